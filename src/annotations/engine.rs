//! Annotation engine spanning the slide set
//!
//! Owns one [`SlideCanvas`] per visited slide plus the active brush state:
//! tool, palette position, size, and opacity. Canvases persist across slide
//! switches for the lifetime of the session; the persistence layer is the
//! source of truth only for slides not yet visited.

use std::collections::HashMap;

use crate::annotations::canvas::SlideCanvas;
use crate::domain::{PaletteColor, Point, SlideId, Stroke, StrokeColor, Tool};
use crate::render::geometry::eraser;

/// Drawing and palette state plus the per-slide canvas map
#[derive(Debug)]
pub struct AnnotationEngine {
    canvases: HashMap<SlideId, SlideCanvas>,
    active: SlideId,
    palette: Vec<PaletteColor>,
    blackboard_palette: Vec<PaletteColor>,
    color_index: usize,
    tool: Tool,
    brush_size: f32,
    opacity: f32,
    /// Blackboard mode swaps in the light palette
    blackboard: bool,
}

impl AnnotationEngine {
    pub fn new(palette: Vec<PaletteColor>, blackboard_palette: Vec<PaletteColor>) -> Self {
        debug_assert!(!palette.is_empty() && !blackboard_palette.is_empty());
        Self {
            canvases: HashMap::new(),
            active: 0,
            palette,
            blackboard_palette,
            color_index: 0,
            tool: Tool::Pen,
            brush_size: 5.0,
            opacity: 1.0,
            blackboard: false,
        }
    }

    // ========================================================================
    // Brush state
    // ========================================================================

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn brush_size(&self) -> f32 {
        self.brush_size
    }

    /// Brush width in output pixels, clamped to >= 1
    pub fn set_brush_size(&mut self, size: f32) {
        self.brush_size = size.max(1.0);
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn set_blackboard(&mut self, blackboard: bool) {
        self.blackboard = blackboard;
    }

    fn active_palette(&self) -> &[PaletteColor] {
        if self.blackboard {
            &self.blackboard_palette
        } else {
            &self.palette
        }
    }

    /// Current drawing color under the active palette
    pub fn active_color(&self) -> StrokeColor {
        let palette = self.active_palette();
        palette[self.color_index % palette.len()].color
    }

    /// Name of the current color, for toasts and the GUI label
    pub fn active_color_name(&self) -> &str {
        let palette = self.active_palette();
        &palette[self.color_index % palette.len()].name
    }

    /// Advance to the next palette color and return its name
    pub fn cycle_color(&mut self) -> &str {
        self.color_index = (self.color_index + 1) % self.palette.len();
        log::info!("palette color -> {}", self.active_color_name());
        self.active_color_name()
    }

    // ========================================================================
    // Slide switching
    // ========================================================================

    pub fn active_slide(&self) -> SlideId {
        self.active
    }

    /// Swap the active canvas. Any in-progress stroke on the old slide is
    /// committed or discarded first; strokes never migrate between slides.
    pub fn set_active_slide(&mut self, slide: SlideId) {
        if slide == self.active {
            return;
        }
        self.flush();
        self.active = slide;
        self.canvases.entry(slide).or_default();
    }

    /// Install strokes loaded from storage for a slide that has not been
    /// drawn on this session. An existing canvas wins: in-memory state is
    /// the source of truth.
    pub fn load_slide(&mut self, slide: SlideId, strokes: Vec<Stroke>) {
        self.canvases
            .entry(slide)
            .or_insert_with(|| SlideCanvas::from_strokes(strokes));
    }

    /// The active slide's canvas
    pub fn canvas(&self) -> Option<&SlideCanvas> {
        self.canvases.get(&self.active)
    }

    fn canvas_mut(&mut self) -> &mut SlideCanvas {
        self.canvases.entry(self.active).or_default()
    }

    // ========================================================================
    // Stroke operations
    // ========================================================================

    /// Start a stroke with the current tool, color, size, and opacity.
    ///
    /// The eraser widens the brush and paints with clear blending; its color
    /// field is irrelevant to rendering but kept for the wire format.
    pub fn begin_stroke(&mut self) {
        let stroke = match self.tool {
            Tool::Eraser => Stroke::new(
                Tool::Eraser,
                StrokeColor::new(0.0, 0.0, 0.0),
                eraser::width(self.brush_size),
                1.0,
            ),
            tool => Stroke::new(tool, self.active_color(), self.brush_size, self.opacity),
        };
        self.canvas_mut().begin(stroke);
    }

    /// Feed the live cursor position, starting a stroke if none is open
    pub fn extend_stroke(&mut self, point: Point) {
        if !self.canvas_mut().extend(point) {
            self.begin_stroke();
            self.canvas_mut().extend(point);
        }
    }

    /// Finish the in-progress stroke; returns true when one was committed
    pub fn commit_stroke(&mut self) -> bool {
        self.canvas_mut().commit()
    }

    /// Commit-or-discard any in-progress stroke. Called on every mode and
    /// slide switch so no stroke survives a transition half-open.
    /// Returns true when a stroke was committed.
    pub fn flush(&mut self) -> bool {
        match self.canvases.get_mut(&self.active) {
            Some(canvas) => canvas.commit(),
            None => false,
        }
    }

    /// Undo the latest operation on the active slide; no-op when there is
    /// nothing to undo
    pub fn undo(&mut self) -> bool {
        self.canvas_mut().undo()
    }

    /// Clear the active slide's committed strokes; returns how many were
    /// removed
    pub fn clear(&mut self) -> usize {
        self.canvas_mut().clear()
    }

    /// Snapshot of the active slide's committed strokes for persistence
    pub fn committed_strokes(&self) -> Vec<Stroke> {
        self.canvas()
            .map(|c| c.committed().to_vec())
            .unwrap_or_default()
    }
}
