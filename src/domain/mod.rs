//! Pure domain types with minimal dependencies
//!
//! This module contains core types used throughout the crate. Types here
//! should have no rendering or storage dependencies so the gesture pipeline,
//! the annotation engine, and the persistence layer can all share them.

pub mod geometry;
pub mod hand;
pub mod stroke;

pub use geometry::*;
pub use hand::*;
pub use stroke::*;

/// Opaque slide identifier assigned by the external persistence collaborator
pub type SlideId = u64;

/// Opaque user identifier assigned by the external persistence collaborator
pub type UserId = u64;
