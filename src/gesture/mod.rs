//! Gesture recognition pipeline
//!
//! This module turns noisy per-frame hand landmarks into stable, debounced
//! gesture events:
//! - Finger-state extraction (per-frame, stateless geometry)
//! - Classification with rolling history, debounce, and cooldown

pub mod classifier;
pub mod fingers;

pub use classifier::{ClassifierConfig, GestureClassifier, GestureEvent, GesturePattern};
pub use fingers::finger_vector;
