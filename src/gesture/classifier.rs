//! Debounced gesture classification
//!
//! Maps a stream of per-frame finger vectors to discrete gesture events.
//! A vector must stay stable for the debounce window before it fires, and an
//! identical event is suppressed for the cooldown window afterwards, giving
//! "hold to trigger once" semantics. Both windows are real-time durations
//! measured against frame timestamps so behavior does not change with the
//! capture frame rate.
//!
//! Classification is deliberately mode-agnostic: the same open-palm vector
//! means "change color" while drawing and "clear canvas" while erasing, and
//! that interpretation belongs to the mode state machine.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::domain::FingerVector;

/// Discrete gesture recognized from a stable finger vector
///
/// Patterns are raw vocabulary entries; mode-dependent meaning (open palm as
/// color change vs. canvas clear) is resolved downstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePattern {
    EnterPresentation,
    NextSlide,
    PrevSlide,
    EnterDrawing,
    EnterErasing,
    Screenshot,
    ToggleFullscreen,
    /// All five fingers extended; interpreted per mode
    OpenPalm,
}

impl GesturePattern {
    /// Exact lookup from the five-bit vocabulary
    /// (bit order thumb, index, middle, ring, pinky)
    pub fn from_vector(v: FingerVector) -> Option<GesturePattern> {
        match v.bits() {
            [true, true, false, false, false] => Some(GesturePattern::EnterPresentation),
            [false, true, false, false, false] => Some(GesturePattern::NextSlide),
            [true, false, false, false, false] => Some(GesturePattern::PrevSlide),
            [false, true, true, false, false] => Some(GesturePattern::EnterDrawing),
            [false, true, true, true, false] => Some(GesturePattern::EnterErasing),
            [true, true, true, false, false] => Some(GesturePattern::Screenshot),
            [false, false, true, true, false] => Some(GesturePattern::ToggleFullscreen),
            [true, true, true, true, true] => Some(GesturePattern::OpenPalm),
            _ => None,
        }
    }
}

/// A debounced gesture event emitted at most once per hold
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestureEvent {
    pub pattern: GesturePattern,
    /// The vector that produced the event
    pub vector: FingerVector,
    /// How many consecutive recent frames matched the vector when it fired
    pub stability: u32,
}

/// Tuning for debounce and cooldown windows
#[derive(Clone, Copy, Debug)]
pub struct ClassifierConfig {
    /// How long a vector must hold steady before it can fire
    pub debounce: Duration,
    /// Window after firing during which the identical pattern is suppressed
    pub cooldown: Duration,
    /// Rolling history capacity, used for the stability counter
    pub history: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(120),
            cooldown: Duration::from_millis(700),
            history: 8,
        }
    }
}

/// Stateful classifier for the single controlling hand
#[derive(Debug)]
pub struct GestureClassifier {
    config: ClassifierConfig,
    history: VecDeque<FingerVector>,
    /// Vector currently being held and when the hold began
    candidate: Option<(FingerVector, Instant)>,
    last_emit: Option<(GesturePattern, Instant)>,
}

impl GestureClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            history: VecDeque::with_capacity(config.history),
            candidate: None,
            last_emit: None,
        }
    }

    /// Feed one frame's finger vector (or absence) into the classifier.
    ///
    /// Absence resets debounce progress but deliberately leaves the cooldown
    /// clock running: a hand dropping out of frame must not re-arm a gesture
    /// early.
    pub fn observe(&mut self, vector: Option<FingerVector>, now: Instant) -> Option<GestureEvent> {
        let Some(vector) = vector else {
            self.history.clear();
            self.candidate = None;
            return None;
        };

        if self.history.len() == self.config.history {
            self.history.pop_front();
        }
        self.history.push_back(vector);

        match self.candidate {
            Some((held, _)) if held == vector => {}
            _ => {
                self.candidate = Some((vector, now));
                return None;
            }
        }

        let (_, since) = self.candidate.expect("candidate set above");
        if now.duration_since(since) < self.config.debounce {
            return None;
        }

        // Stable but outside the vocabulary: classified as no gesture
        let pattern = GesturePattern::from_vector(vector)?;

        // A held gesture fires once at the debounce boundary and is then
        // suppressed by its own cooldown; it may fire again only after the
        // cooldown lapses. Distinct patterns pass through immediately.
        if let Some((last_pattern, last_at)) = self.last_emit
            && last_pattern == pattern
            && now.duration_since(last_at) < self.config.cooldown
        {
            return None;
        }

        self.last_emit = Some((pattern, now));
        let stability = self.stability(vector);
        log::debug!("gesture {:?} fired from vector {}", pattern, vector);
        Some(GestureEvent {
            pattern,
            vector,
            stability,
        })
    }

    /// Count of consecutive most-recent history entries equal to `vector`
    fn stability(&self, vector: FingerVector) -> u32 {
        self.history
            .iter()
            .rev()
            .take_while(|v| **v == vector)
            .count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FingerVector;

    fn vec_of(bits: [bool; 5]) -> FingerVector {
        FingerVector::new(bits[0], bits[1], bits[2], bits[3], bits[4])
    }

    fn next_slide() -> FingerVector {
        vec_of([false, true, false, false, false])
    }

    fn classifier() -> GestureClassifier {
        GestureClassifier::new(ClassifierConfig {
            debounce: Duration::from_millis(100),
            cooldown: Duration::from_millis(500),
            history: 8,
        })
    }

    /// Drive the classifier at a fixed synthetic frame rate, returning every
    /// emitted event.
    fn run_frames(
        c: &mut GestureClassifier,
        start: Instant,
        frames: &[Option<FingerVector>],
        interval: Duration,
    ) -> Vec<GestureEvent> {
        let mut out = Vec::new();
        for (i, v) in frames.iter().enumerate() {
            if let Some(ev) = c.observe(*v, start + interval * i as u32) {
                out.push(ev);
            }
        }
        out
    }

    #[test]
    fn short_hold_never_fires() {
        let mut c = classifier();
        let start = Instant::now();
        // 3 frames at 30ms = 60ms held, below the 100ms debounce
        let frames = vec![Some(next_slide()); 3];
        let events = run_frames(&mut c, start, &frames, Duration::from_millis(30));
        assert!(events.is_empty());
    }

    #[test]
    fn stable_hold_fires_exactly_once() {
        let mut c = classifier();
        let start = Instant::now();
        let frames = vec![Some(next_slide()); 12];
        let events = run_frames(&mut c, start, &frames, Duration::from_millis(30));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].pattern, GesturePattern::NextSlide);
        assert!(events[0].stability >= 4);
    }

    #[test]
    fn identical_gesture_within_cooldown_is_suppressed() {
        let mut c = classifier();
        let start = Instant::now();
        let hold = vec![Some(next_slide()); 6];
        let gap = vec![None; 2];
        let mut frames = hold.clone();
        frames.extend(gap);
        frames.extend(hold);
        // 14 frames at 30ms: the second hold completes well inside the 500ms
        // cooldown
        let events = run_frames(&mut c, start, &frames, Duration::from_millis(30));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn identical_gesture_fires_again_after_cooldown() {
        let mut c = classifier();
        let start = Instant::now();
        let v = next_slide();

        let first = run_frames(
            &mut c,
            start,
            &vec![Some(v); 6],
            Duration::from_millis(30),
        );
        assert_eq!(first.len(), 1);

        // Drop the hand, then repeat the gesture after the cooldown expired
        c.observe(None, start + Duration::from_millis(200));
        let later = start + Duration::from_millis(800);
        let second = run_frames(&mut c, later, &vec![Some(v); 6], Duration::from_millis(30));
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn distinct_gesture_is_allowed_during_cooldown() {
        let mut c = classifier();
        let start = Instant::now();

        let first = run_frames(
            &mut c,
            start,
            &vec![Some(next_slide()); 6],
            Duration::from_millis(30),
        );
        assert_eq!(first.len(), 1);

        let prev = vec_of([true, false, false, false, false]);
        let later = start + Duration::from_millis(200);
        let second = run_frames(&mut c, later, &vec![Some(prev); 6], Duration::from_millis(30));
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].pattern, GesturePattern::PrevSlide);
    }

    #[test]
    fn absence_resets_debounce_progress() {
        let mut c = classifier();
        let start = Instant::now();
        let v = next_slide();

        // Hold for 90ms, lose the hand, hold again for 90ms; neither hold
        // alone reaches the 100ms debounce
        c.observe(Some(v), start);
        c.observe(Some(v), start + Duration::from_millis(90));
        c.observe(None, start + Duration::from_millis(120));
        assert!(c
            .observe(Some(v), start + Duration::from_millis(150))
            .is_none());
        assert!(c
            .observe(Some(v), start + Duration::from_millis(240))
            .is_none());
    }

    #[test]
    fn unknown_vector_classifies_as_none() {
        let mut c = classifier();
        let start = Instant::now();
        // index + pinky is not in the vocabulary
        let odd = vec_of([false, true, false, false, true]);
        let events = run_frames(&mut c, start, &vec![Some(odd); 10], Duration::from_millis(30));
        assert!(events.is_empty());
    }
}
