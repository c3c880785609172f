//! Drawing-layer rendering
//!
//! This module contains:
//! - Geometry constants and helpers shared by the stroke paths
//! - Compositing of a slide canvas over its background into an
//!   `image::RgbaImage` using tiny-skia

pub mod geometry;
pub mod image;

pub use image::{composite_canvas, Background};
