//! Stroke and tool types for the per-slide drawing layer
//!
//! A stroke is append-only while in progress and immutable once committed.
//! The serialized form (camelCase fields, points as `[x, y]` pairs) is the
//! wire format of the persistence collaborator and must round-trip exactly.

use serde::{Deserialize, Serialize};

use crate::domain::Point;

/// Drawing tool for a stroke
///
/// The set is closed on purpose: exhaustive matching in the renderer catches
/// a forgotten variant at compile time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pen,
    Circle,
    Square,
    Eraser,
}

impl Tool {
    /// Shape tools commit a start/end pair rather than a free-form polyline
    pub fn is_shape(self) -> bool {
        matches!(self, Tool::Circle | Tool::Square)
    }
}

/// RGB color for strokes, components in `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokeColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for StrokeColor {
    fn default() -> Self {
        // Default red, matching the first palette entry
        Self {
            r: 0.9,
            g: 0.1,
            b: 0.1,
        }
    }
}

impl StrokeColor {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Convert to 8-bit RGBA with the given opacity applied to alpha
    pub fn to_rgba_u8(self, opacity: f32) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

/// A named palette entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaletteColor {
    pub name: String,
    pub color: StrokeColor,
}

impl PaletteColor {
    pub fn new(name: &str, r: f32, g: f32, b: f32) -> Self {
        Self {
            name: name.to_string(),
            color: StrokeColor::new(r, g, b),
        }
    }
}

/// One drawing operation on a slide canvas
///
/// Pen and Eraser strokes carry the full point sequence; Circle and Square
/// strokes carry exactly the drag start and the latest drag end.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub tool: Tool,
    pub color: StrokeColor,
    /// Brush width in output pixels
    pub size_px: f32,
    /// Per-stroke opacity in `[0, 1]`
    pub opacity: f32,
    pub points: Vec<Point>,
}

impl Stroke {
    /// Start a stroke with no points yet
    pub fn new(tool: Tool, color: StrokeColor, size_px: f32, opacity: f32) -> Self {
        Self {
            tool,
            color,
            size_px: size_px.max(1.0),
            opacity: opacity.clamp(0.0, 1.0),
            points: Vec::new(),
        }
    }

    /// Append a cursor position. Shape tools keep only the drag start and the
    /// latest end point; pen-like tools accumulate the whole polyline.
    pub fn push(&mut self, point: Point) {
        let point = point.clamped();
        if self.tool.is_shape() && self.points.len() >= 2 {
            self.points[1] = point;
        } else {
            self.points.push(point);
        }
    }

    /// A stroke with no points draws nothing and is discarded on commit.
    /// Shape strokes additionally need a drag end distinct from the start.
    pub fn is_empty(&self) -> bool {
        if self.tool.is_shape() {
            self.points.len() < 2 || self.points[0] == self.points[1]
        } else {
            self.points.is_empty()
        }
    }

    /// Drag start point, if any
    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// Latest drag end point, if any
    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }
}
