//! Finger-state extraction from hand landmarks
//!
//! Derives a five-bit "which fingers are extended" vector from one hand's 21
//! keypoints. This is a pure per-frame function: no temporal state, the same
//! landmarks always produce the same vector.

use crate::domain::{FingerVector, Hand, Handedness, LANDMARK_COUNT};

/// Wrist keypoint index
pub const WRIST: usize = 0;
/// Thumb interphalangeal joint
pub const THUMB_IP: usize = 3;
/// Thumb tip
pub const THUMB_TIP: usize = 4;
/// Index fingertip; doubles as the live draw/erase cursor
pub const INDEX_TIP: usize = 8;

/// (proximal joint, tip) keypoint pairs for index through pinky
const FINGER_JOINTS: [(usize, usize); 4] = [(6, 8), (10, 12), (14, 16), (18, 20)];

/// A fingertip must be farther from the wrist than its proximal joint by this
/// much (normalized units) to count as extended. Filters out half-curled
/// fingers that flicker across the boundary.
const EXTEND_MARGIN: f32 = 0.02;

/// Lateral offset the thumb tip must clear past the IP joint
const THUMB_MARGIN: f32 = 0.01;

/// Derive the finger vector for one hand.
///
/// Returns `None` when the observation is unusable: fewer than 21 landmarks
/// or confidence below `min_confidence`. Downstream treats absence as "no
/// gesture this frame", never as an error.
pub fn finger_vector(hand: &Hand, min_confidence: f32) -> Option<FingerVector> {
    if hand.landmarks.len() < LANDMARK_COUNT || hand.confidence < min_confidence {
        return None;
    }

    let wrist = &hand.landmarks[WRIST];

    // Index through pinky: the tip-to-wrist distance beats the joint-to-wrist
    // distance only when the finger is straightened, regardless of how the
    // hand is rotated in the image plane.
    let mut long_fingers = [false; 4];
    for (slot, (joint, tip)) in FINGER_JOINTS.iter().enumerate() {
        let tip_dist = hand.landmarks[*tip].distance(wrist);
        let joint_dist = hand.landmarks[*joint].distance(wrist);
        long_fingers[slot] = tip_dist > joint_dist + EXTEND_MARGIN;
    }

    // The thumb extends laterally, so compare x positions of tip and IP
    // joint. Which side means "extended" depends on handedness; the detector
    // reports handedness for the unmirrored image.
    let tip_x = hand.landmarks[THUMB_TIP].x;
    let ip_x = hand.landmarks[THUMB_IP].x;
    let thumb = match hand.handedness {
        Handedness::Right => tip_x < ip_x - THUMB_MARGIN,
        Handedness::Left => tip_x > ip_x + THUMB_MARGIN,
    };

    Some(FingerVector::new(
        thumb,
        long_fingers[0],
        long_fingers[1],
        long_fingers[2],
        long_fingers[3],
    ))
}
