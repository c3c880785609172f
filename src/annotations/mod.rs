//! Per-slide annotation layer
//!
//! This module provides:
//! - [`SlideCanvas`]: committed strokes, the in-progress stroke, and the
//!   undo journal for one slide
//! - [`AnnotationEngine`]: active tool and palette state plus the canvas map
//!   spanning the whole slide set

pub mod canvas;
pub mod engine;

pub use canvas::SlideCanvas;
pub use engine::AnnotationEngine;
