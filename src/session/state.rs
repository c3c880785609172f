//! Mode state machine
//!
//! Exactly one mode is active at any time. All mutation funnels through
//! [`ModeMachine::transition`]; gesture patterns are interpreted against the
//! current mode here so the classifier can stay mode-agnostic.

use crate::gesture::GesturePattern;
use crate::session::messages::ControlMsg;

/// Top-level interaction mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Presentation,
    Drawing,
    Erasing,
}

impl Mode {
    /// Human-readable label for the GUI collaborator
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Presentation => "Presentation",
            Mode::Drawing => "Drawing",
            Mode::Erasing => "Erasing",
        }
    }
}

/// Owns the process-wide current mode and the gesture interpretation table
#[derive(Debug, Default)]
pub struct ModeMachine {
    mode: Mode,
}

impl ModeMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Resolve a classified gesture into a mode-scoped action.
    ///
    /// Mode-switch patterns are honored from every state. Anything else that
    /// is not valid in the current mode is silently dropped; an erase gesture
    /// seen during a presentation simply does nothing.
    pub fn interpret(&self, pattern: GesturePattern) -> Option<ControlMsg> {
        match pattern {
            GesturePattern::EnterPresentation => Some(ControlMsg::SwitchMode(Mode::Presentation)),
            GesturePattern::EnterDrawing => Some(ControlMsg::SwitchMode(Mode::Drawing)),
            GesturePattern::EnterErasing => Some(ControlMsg::SwitchMode(Mode::Erasing)),
            GesturePattern::NextSlide if self.mode == Mode::Presentation => {
                Some(ControlMsg::NextSlide)
            }
            GesturePattern::PrevSlide if self.mode == Mode::Presentation => {
                Some(ControlMsg::PrevSlide)
            }
            GesturePattern::Screenshot if self.mode == Mode::Presentation => {
                Some(ControlMsg::Screenshot)
            }
            GesturePattern::ToggleFullscreen if self.mode == Mode::Presentation => {
                Some(ControlMsg::ToggleFullscreen)
            }
            // The open palm is the one pattern whose meaning depends on mode
            GesturePattern::OpenPalm if self.mode == Mode::Drawing => Some(ControlMsg::CycleColor),
            GesturePattern::OpenPalm if self.mode == Mode::Erasing => Some(ControlMsg::ClearCanvas),
            _ => None,
        }
    }

    /// Switch modes; returns true when the mode actually changed.
    ///
    /// The caller must flush any in-progress stroke before a change takes
    /// effect; no stroke survives a mode switch uncommitted.
    pub fn transition(&mut self, mode: Mode) -> bool {
        if self.mode == mode {
            return false;
        }
        log::info!("mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_presentation() {
        assert_eq!(ModeMachine::new().mode(), Mode::Presentation);
    }

    #[test]
    fn mode_switch_patterns_work_from_any_state() {
        let mut m = ModeMachine::new();
        assert_eq!(
            m.interpret(GesturePattern::EnterDrawing),
            Some(ControlMsg::SwitchMode(Mode::Drawing))
        );
        m.transition(Mode::Erasing);
        assert_eq!(
            m.interpret(GesturePattern::EnterPresentation),
            Some(ControlMsg::SwitchMode(Mode::Presentation))
        );
    }

    #[test]
    fn open_palm_depends_on_mode() {
        let mut m = ModeMachine::new();
        assert_eq!(m.interpret(GesturePattern::OpenPalm), None);
        m.transition(Mode::Drawing);
        assert_eq!(
            m.interpret(GesturePattern::OpenPalm),
            Some(ControlMsg::CycleColor)
        );
        m.transition(Mode::Erasing);
        assert_eq!(
            m.interpret(GesturePattern::OpenPalm),
            Some(ControlMsg::ClearCanvas)
        );
    }

    #[test]
    fn navigation_is_ignored_outside_presentation() {
        let mut m = ModeMachine::new();
        m.transition(Mode::Drawing);
        assert_eq!(m.interpret(GesturePattern::NextSlide), None);
        assert_eq!(m.interpret(GesturePattern::Screenshot), None);
    }

    #[test]
    fn transition_reports_change() {
        let mut m = ModeMachine::new();
        assert!(m.transition(Mode::Drawing));
        assert!(!m.transition(Mode::Drawing));
    }
}
