//! Keyboard fallback for the gesture vocabulary
//!
//! The GUI collaborator routes raw key presses here; they resolve to the
//! same [`ControlMsg`] actions the gestures produce.

use crate::session::messages::{ControlMsg, Key};

/// Map a key press to a session action
pub fn handle_key_event(key: Key) -> Option<ControlMsg> {
    match key {
        Key::ArrowLeft => Some(ControlMsg::PrevSlide),
        Key::ArrowRight => Some(ControlMsg::NextSlide),
        Key::Character(c) if c.eq_ignore_ascii_case(&'f') => Some(ControlMsg::ToggleFullscreen),
        Key::Escape => Some(ControlMsg::ExitFullscreen),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_navigate() {
        assert_eq!(handle_key_event(Key::ArrowLeft), Some(ControlMsg::PrevSlide));
        assert_eq!(
            handle_key_event(Key::ArrowRight),
            Some(ControlMsg::NextSlide)
        );
    }

    #[test]
    fn f_toggles_and_escape_exits_fullscreen() {
        assert_eq!(
            handle_key_event(Key::Character('f')),
            Some(ControlMsg::ToggleFullscreen)
        );
        assert_eq!(
            handle_key_event(Key::Character('F')),
            Some(ControlMsg::ToggleFullscreen)
        );
        assert_eq!(
            handle_key_event(Key::Escape),
            Some(ControlMsg::ExitFullscreen)
        );
    }

    #[test]
    fn unmapped_keys_do_nothing() {
        assert_eq!(handle_key_event(Key::Character('x')), None);
    }
}
