//! JSON-file implementation of the annotation store
//!
//! One file per slide under `<root>/annotations/`, screenshots under
//! `<root>/screenshots/` with chrono-stamped names. The stroke wire format
//! round-trips exactly through serde_json.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{SlideId, Stroke, UserId};
use crate::storage::{AnnotationStore, StoreError};

/// Annotation store backed by a directory of JSON files
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted in the user's data directory
    pub fn default_location() -> Self {
        let root = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wavedeck");
        Self::new(root)
    }

    fn annotation_path(&self, slide_id: SlideId) -> PathBuf {
        self.root
            .join("annotations")
            .join(format!("slide_{slide_id}.json"))
    }

    fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl AnnotationStore for JsonStore {
    fn save_annotations(
        &self,
        slide_id: SlideId,
        user_id: UserId,
        strokes: &[Stroke],
    ) -> Result<(), StoreError> {
        let path = self.annotation_path(slide_id);
        let json = serde_json::to_vec_pretty(strokes)?;
        Self::write_atomically(&path, &json)?;
        log::debug!(
            "saved {} strokes for slide {} (user {})",
            strokes.len(),
            slide_id,
            user_id
        );
        Ok(())
    }

    fn load_annotations(&self, slide_id: SlideId) -> Result<Vec<Stroke>, StoreError> {
        let path = self.annotation_path(slide_id);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read(&path)?;
        Ok(serde_json::from_slice(&json)?)
    }

    fn save_screenshot(&self, bytes: &[u8]) -> Result<PathBuf, StoreError> {
        let dir = self.root.join("screenshots");
        fs::create_dir_all(&dir)?;
        let name = format!(
            "screenshot_{}.png",
            chrono::Local::now().format("%Y-%m-%d_%H-%M-%S%.3f")
        );
        let path = dir.join(name);
        fs::write(&path, bytes)?;
        log::info!("screenshot saved to {}", path.display());
        Ok(path)
    }
}
