//! One slide's drawing layer
//!
//! A canvas holds the committed strokes in insertion order, at most one
//! in-progress stroke, and an undo journal. Committed strokes are immutable;
//! the in-progress stroke is append-only and must be committed or discarded
//! before the canvas is handed to another mode or slide.

use crate::domain::{Point, Stroke};

/// Undo journal entry
///
/// Clearing the canvas logs one `Cleared` entry per removed stroke, so a
/// clear can be unwound stroke by stroke in the reverse of commit order.
#[derive(Clone, Debug)]
enum UndoEntry {
    /// A stroke was committed; undo pops it off the committed list
    Committed,
    /// A stroke was removed by a clear; undo reinserts it at the front
    Cleared(Stroke),
}

/// The annotation layer bound to one slide
#[derive(Clone, Debug, Default)]
pub struct SlideCanvas {
    committed: Vec<Stroke>,
    in_progress: Option<Stroke>,
    undo_log: Vec<UndoEntry>,
}

impl SlideCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a canvas with strokes loaded from the persistence collaborator
    pub fn from_strokes(strokes: Vec<Stroke>) -> Self {
        let undo_log = strokes.iter().map(|_| UndoEntry::Committed).collect();
        Self {
            committed: strokes,
            in_progress: None,
            undo_log,
        }
    }

    /// Committed strokes in insertion order
    pub fn committed(&self) -> &[Stroke] {
        &self.committed
    }

    /// The stroke currently being drawn, if any
    pub fn in_progress(&self) -> Option<&Stroke> {
        self.in_progress.as_ref()
    }

    /// Start a new in-progress stroke, committing any previous one first
    pub fn begin(&mut self, stroke: Stroke) {
        if self.in_progress.is_some() {
            self.commit();
        }
        self.in_progress = Some(stroke);
    }

    /// Append a cursor position to the in-progress stroke.
    ///
    /// Returns false when no stroke is in progress; the caller decides
    /// whether to begin one.
    pub fn extend(&mut self, point: Point) -> bool {
        match &mut self.in_progress {
            Some(stroke) => {
                stroke.push(point);
                true
            }
            None => false,
        }
    }

    /// Finish the in-progress stroke: commit it when non-empty, discard it
    /// otherwise. Returns true when a stroke was committed.
    pub fn commit(&mut self) -> bool {
        let Some(stroke) = self.in_progress.take() else {
            return false;
        };
        if stroke.is_empty() {
            log::debug!("discarding empty {:?} stroke", stroke.tool);
            return false;
        }
        self.committed.push(stroke);
        self.undo_log.push(UndoEntry::Committed);
        true
    }

    /// Drop the in-progress stroke without committing it
    pub fn discard(&mut self) {
        self.in_progress = None;
    }

    /// Undo the most recent operation. No-op on an empty journal.
    ///
    /// Returns true when something changed.
    pub fn undo(&mut self) -> bool {
        match self.undo_log.pop() {
            Some(UndoEntry::Committed) => {
                self.committed.pop();
                true
            }
            Some(UndoEntry::Cleared(stroke)) => {
                // Cleared strokes were journaled in commit order, so popping
                // restores the most recently committed first; reinserting at
                // the front rebuilds the original order as undos accumulate.
                self.committed.insert(0, stroke);
                true
            }
            None => false,
        }
    }

    /// Remove every committed stroke, journaling each one so the clear can
    /// be undone stroke by stroke. Returns how many strokes were removed.
    pub fn clear(&mut self) -> usize {
        self.in_progress = None;
        let removed = self.committed.len();
        for stroke in self.committed.drain(..) {
            self.undo_log.push(UndoEntry::Cleared(stroke));
        }
        removed
    }

    /// True when the canvas has neither committed nor in-progress content
    pub fn is_blank(&self) -> bool {
        self.committed.is_empty() && self.in_progress.is_none()
    }
}
