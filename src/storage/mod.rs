//! Persistence interfaces and the background save worker
//!
//! The core talks to storage through the [`AnnotationStore`] trait; the
//! bundled [`JsonStore`] keeps per-slide JSON files on disk. All writes go
//! through the [`SaveQueue`] so the per-frame pipeline never blocks on I/O.

pub mod json;
pub mod queue;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{SlideId, Stroke, UserId};

/// Storage failures surfaced to the caller as retryable or not.
///
/// A failed save never rolls back in-memory annotation state; memory stays
/// the source of truth until a retry succeeds.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("stroke serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether retrying the same operation could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Io(_))
    }
}

/// External persistence collaborator for annotations and screenshots
pub trait AnnotationStore: Send + Sync {
    /// Replace the persisted stroke list for a slide
    fn save_annotations(
        &self,
        slide_id: SlideId,
        user_id: UserId,
        strokes: &[Stroke],
    ) -> Result<(), StoreError>;

    /// Load the persisted stroke list for a slide; an unknown slide yields
    /// an empty list, not an error
    fn load_annotations(&self, slide_id: SlideId) -> Result<Vec<Stroke>, StoreError>;

    /// Persist an encoded screenshot, returning where it landed
    fn save_screenshot(&self, bytes: &[u8]) -> Result<PathBuf, StoreError>;
}

pub use json::JsonStore;
pub use queue::{SaveJob, SaveQueue};
