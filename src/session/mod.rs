//! Presentation session management
//!
//! This module contains:
//! - The mode state machine (presentation / drawing / erasing)
//! - Message types linking gestures, keyboard input, and mode-scoped actions
//! - Keyboard fallback shortcuts

pub mod messages;
pub mod shortcuts;
pub mod state;

pub use messages::{ControlMsg, Key, UiRequest};
pub use state::{Mode, ModeMachine};
