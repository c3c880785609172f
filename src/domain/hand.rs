//! Hand observation types produced by the external landmark detector
//!
//! A detector frame carries zero or more hands, each with 21 keypoints and a
//! handedness label. These types are ephemeral: produced once per frame,
//! consumed by the gesture pipeline, never persisted.

use std::time::Instant;

use crate::domain::Point;

/// Number of keypoints the detector reports per hand
pub const LANDMARK_COUNT: usize = 21;

/// Which hand the detector believes it is looking at
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

/// One tracked keypoint on a hand, in normalized image coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    /// Depth relative to the wrist; unused by classification but forwarded
    /// by most detectors
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Project onto the 2D canvas plane
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Planar distance to another landmark
    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One detected hand in one frame
#[derive(Clone, Debug)]
pub struct Hand {
    pub handedness: Handedness,
    /// Detection confidence in `[0, 1]`
    pub confidence: f32,
    /// Exactly [`LANDMARK_COUNT`] entries for a usable observation
    pub landmarks: Vec<Landmark>,
}

impl Hand {
    /// Landmark by index, if present
    pub fn landmark(&self, index: usize) -> Option<&Landmark> {
        self.landmarks.get(index)
    }
}

/// One frame of detector output fed into the pipeline
#[derive(Clone, Debug)]
pub struct HandFrame {
    pub hands: Vec<Hand>,
    /// Capture timestamp; debounce and cooldown windows are measured against
    /// this, not against frame counts
    pub captured_at: Instant,
}

impl HandFrame {
    pub fn new(hands: Vec<Hand>, captured_at: Instant) -> Self {
        Self { hands, captured_at }
    }

    /// An empty frame (no hands detected)
    pub fn empty(captured_at: Instant) -> Self {
        Self {
            hands: Vec::new(),
            captured_at,
        }
    }

    /// Pick the controlling hand for this frame: highest confidence wins,
    /// first detected on ties.
    pub fn controlling_hand(&self) -> Option<&Hand> {
        let mut best: Option<&Hand> = None;
        for hand in &self.hands {
            match best {
                Some(b) if hand.confidence <= b.confidence => {}
                _ => best = Some(hand),
            }
        }
        best
    }
}

/// Which fingers are extended, thumb through pinky
///
/// Derived fresh each frame from one hand's landmarks; carries no identity
/// across frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FingerVector {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerVector {
    pub fn new(thumb: bool, index: bool, middle: bool, ring: bool, pinky: bool) -> Self {
        Self {
            thumb,
            index,
            middle,
            ring,
            pinky,
        }
    }

    /// Fixed-order bit view (thumb, index, middle, ring, pinky)
    pub fn bits(&self) -> [bool; 5] {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
    }

    /// Pointing pose that drives the live draw/erase cursor: index extended,
    /// middle folded. Excluding the middle finger keeps multi-finger command
    /// gestures from leaving ink while they are being held.
    pub fn is_pointer(&self) -> bool {
        self.index && !self.middle
    }
}

impl std::fmt::Display for FingerVector {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for bit in self.bits() {
            write!(f, "{}", if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}
