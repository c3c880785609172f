//! Per-frame control pipeline
//!
//! The controller owns every stateful collaborator (classifier, mode machine,
//! annotation engine, navigator, save queue) and advances them one detector
//! frame at a time.

pub mod control;

pub use control::{Controller, FrameOutput};
