//! wavedeck: hand-gesture control core for slide presentations
//!
//! Turns per-frame hand landmarks from an external detector into slide
//! navigation, mode switches, and a persistent per-slide drawing layer.
//! The crate is display-agnostic: a GUI shell feeds it [`domain::HandFrame`]s
//! and keyboard events and acts on the [`session::UiRequest`]s it emits.

pub mod annotations;
pub mod capture;
pub mod config;
pub mod core;
pub mod domain;
pub mod gesture;
pub mod render;
pub mod session;
pub mod slides;
pub mod storage;

pub use config::WaveDeckConfig;
pub use core::{Controller, FrameOutput};
pub use domain::{Hand, HandFrame, Point, Stroke, Tool};
pub use session::{ControlMsg, Key, Mode, UiRequest};
