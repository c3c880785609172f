//! Message types for the presentation session
//!
//! Gestures and keyboard input both resolve to [`ControlMsg`] actions; the
//! controller applies them and answers with [`UiRequest`]s for the external
//! display shell.

use std::path::PathBuf;

use crate::session::state::Mode;

// ============================================================================
// Inbound actions
// ============================================================================

/// A mode-scoped action ready to apply, produced by interpreting a gesture
/// event (or a keyboard shortcut) in the current mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlMsg {
    /// Switch to the given mode, flushing any in-progress stroke first
    SwitchMode(Mode),
    /// Advance to the next slide (clamped at the end of the set)
    NextSlide,
    /// Go back one slide (clamped at the start of the set)
    PrevSlide,
    /// Capture a composited screenshot of the current frame
    Screenshot,
    /// Hand fullscreen toggling to the display shell
    ToggleFullscreen,
    /// Leave fullscreen (keyboard-only fallback)
    ExitFullscreen,
    /// Cycle the drawing palette to its next color
    CycleColor,
    /// Empty the active slide's committed strokes (undoable per stroke)
    ClearCanvas,
}

/// Keyboard fallback input routed in by the GUI collaborator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Character(char),
}

// ============================================================================
// Outbound requests
// ============================================================================

/// Side effects the core cannot perform itself, surfaced to the shell once
/// per processed frame
#[derive(Clone, Debug, PartialEq)]
pub enum UiRequest {
    /// The mode changed; the shell should refresh its mode label
    ModeChanged(Mode),
    /// Toggle the window's fullscreen state
    ToggleFullscreen,
    /// Leave fullscreen
    ExitFullscreen,
    /// The shell should call back with the current composited background so
    /// a screenshot can be captured and persisted
    CaptureScreenshot,
    /// Short user-facing notification text
    Toast(String),
}

/// Progress reports from the background persistence worker
#[derive(Clone, Debug)]
pub enum StoreNotice {
    /// Annotations for a slide were written
    AnnotationsSaved(crate::domain::SlideId),
    /// A screenshot landed on disk at this path
    ScreenshotSaved(PathBuf),
    /// A write failed; in-memory state is untouched and the save may be
    /// retried
    Failed {
        what: String,
        error: String,
        retryable: bool,
    },
}
