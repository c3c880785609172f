//! Canvas compositing using tiny-skia
//!
//! Strokes are drawn into a transparent overlay pixmap in insertion order
//! (committed first, then the in-progress stroke), then the overlay is
//! composited over the background. Eraser strokes punch through the overlay
//! with clear blending, so they remove ink without touching the background.

use image::RgbaImage;
use tiny_skia::{
    BlendMode, Color, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke as SkStroke,
    Transform,
};

use super::geometry::{normalize_rect, shape};
use crate::annotations::SlideCanvas;
use crate::domain::{Point, Stroke, Tool};

/// What the drawing layer is composited over
#[derive(Clone, Copy, Debug)]
pub enum Background<'a> {
    /// A slide image or webcam frame, already sized to the output
    Image(&'a RgbaImage),
    /// Solid fill (blackboard mode)
    Solid([u8; 4]),
}

/// Composite a slide canvas over its background into an RGBA image.
///
/// Later strokes draw over earlier ones; no blending beyond per-stroke
/// opacity. A background image of the wrong size is scaled by nearest
/// sampling rather than rejected.
pub fn composite_canvas(
    background: Background,
    canvas: &SlideCanvas,
    width: u32,
    height: u32,
) -> RgbaImage {
    let mut base = base_pixmap(background, width, height);

    if let Some(overlay) = render_overlay(canvas, width, height) {
        base.draw_pixmap(
            0,
            0,
            overlay.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    RgbaImage::from_raw(width, height, base.data().to_vec())
        .unwrap_or_else(|| RgbaImage::new(width, height))
}

/// Render only the stroke overlay (transparent where nothing is drawn)
pub fn render_overlay(canvas: &SlideCanvas, width: u32, height: u32) -> Option<Pixmap> {
    let mut overlay = Pixmap::new(width, height)?;
    let (w, h) = (width as f32, height as f32);
    for stroke in canvas.committed() {
        draw_stroke(&mut overlay, stroke, w, h);
    }
    if let Some(stroke) = canvas.in_progress() {
        draw_stroke(&mut overlay, stroke, w, h);
    }
    Some(overlay)
}

fn base_pixmap(background: Background, width: u32, height: u32) -> Pixmap {
    let mut base = Pixmap::new(width.max(1), height.max(1))
        .expect("non-zero pixmap dimensions");
    match background {
        Background::Solid([r, g, b, a]) => {
            base.fill(Color::from_rgba8(r, g, b, a));
        }
        Background::Image(img) => {
            if img.width() == width && img.height() == height {
                base.data_mut().copy_from_slice(img.as_raw());
            } else {
                // Nearest-sample mismatched backgrounds instead of failing
                let data = base.data_mut();
                for y in 0..height {
                    let sy = y * img.height() / height.max(1);
                    for x in 0..width {
                        let sx = x * img.width() / width.max(1);
                        let px = img.get_pixel(sx.min(img.width() - 1), sy.min(img.height() - 1));
                        let at = ((y * width + x) * 4) as usize;
                        data[at..at + 4].copy_from_slice(&px.0);
                    }
                }
            }
        }
    }
    base
}

/// Draw one stroke onto the overlay with exhaustive tool dispatch
fn draw_stroke(pixmap: &mut Pixmap, stroke: &Stroke, w: f32, h: f32) {
    let path = match stroke.tool {
        Tool::Pen | Tool::Eraser => build_pen_path(&stroke.points, w, h),
        Tool::Circle => build_circle_path(stroke, w, h),
        Tool::Square => build_square_path(stroke, w, h),
    };
    let Some(path) = path else {
        return;
    };

    let [r, g, b, a] = stroke.color.to_rgba_u8(stroke.opacity);
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    if stroke.tool == Tool::Eraser {
        paint.blend_mode = BlendMode::Clear;
    }

    let sk_stroke = SkStroke {
        width: stroke.size_px.max(1.0),
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    };
    pixmap.stroke_path(&path, &paint, &sk_stroke, Transform::identity(), None);
}

/// Polyline through every recorded point; a single point becomes a dot via a
/// degenerate segment and the round line cap
fn build_pen_path(points: &[Point], w: f32, h: f32) -> Option<tiny_skia::Path> {
    let first = points.first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x * w, first.y * h);
    if points.len() == 1 {
        pb.line_to(first.x * w + 0.01, first.y * h);
    }
    for p in &points[1..] {
        pb.line_to(p.x * w, p.y * h);
    }
    pb.finish()
}

/// Circle centered on the drag start with radius out to the drag end,
/// approximated with four cubic beziers
fn build_circle_path(stroke: &Stroke, w: f32, h: f32) -> Option<tiny_skia::Path> {
    let start = stroke.start()?;
    let end = stroke.end()?;
    let (cx, cy) = (start.x * w, start.y * h);
    let dx = end.x * w - cx;
    let dy = end.y * h - cy;
    let radius = (dx * dx + dy * dy).sqrt();
    if radius < shape::MIN_RADIUS {
        return None;
    }

    let k = radius * shape::BEZIER_K;
    let mut pb = PathBuilder::new();
    pb.move_to(cx, cy - radius);
    pb.cubic_to(cx + k, cy - radius, cx + radius, cy - k, cx + radius, cy);
    pb.cubic_to(cx + radius, cy + k, cx + k, cy + radius, cx, cy + radius);
    pb.cubic_to(cx - k, cy + radius, cx - radius, cy + k, cx - radius, cy);
    pb.cubic_to(cx - radius, cy - k, cx - k, cy - radius, cx, cy - radius);
    pb.close();
    pb.finish()
}

/// Axis-aligned rectangle between the drag corners
fn build_square_path(stroke: &Stroke, w: f32, h: f32) -> Option<tiny_skia::Path> {
    let start = stroke.start()?;
    let end = stroke.end()?;
    let (min_x, min_y, max_x, max_y) =
        normalize_rect(start.x * w, start.y * h, end.x * w, end.y * h);
    if max_x - min_x < 1.0 || max_y - min_y < 1.0 {
        return None;
    }

    let mut pb = PathBuilder::new();
    pb.move_to(min_x, min_y);
    pb.line_to(max_x, min_y);
    pb.line_to(max_x, max_y);
    pb.line_to(min_x, max_y);
    pb.close();
    pb.finish()
}
