//! Shared geometry for stroke rendering

/// Shape (circle/square) geometry constants
pub mod shape {
    /// Ellipse bezier approximation constant: 4/3 * (sqrt(2) - 1)
    pub const BEZIER_K: f32 = 0.552_284_8;
    /// Minimum radius in pixels for a circle to be drawn
    pub const MIN_RADIUS: f32 = 1.0;
}

/// Eraser sizing
pub mod eraser {
    /// Eraser width relative to the brush size
    pub const WIDTH_FACTOR: f32 = 2.0;
    /// Smallest usable eraser width in pixels
    pub const MIN_WIDTH: f32 = 5.0;

    /// Eraser width derived from the active brush size
    pub fn width(brush_size: f32) -> f32 {
        (brush_size * WIDTH_FACTOR).max(MIN_WIDTH)
    }
}

/// Normalize min/max coordinates from arbitrary start/end points
#[inline]
pub fn normalize_rect(x1: f32, y1: f32, x2: f32, y2: f32) -> (f32, f32, f32, f32) {
    let (min_x, max_x) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    let (min_y, max_y) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
    (min_x, min_y, max_x, max_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_rect_orders_corners() {
        assert_eq!(
            normalize_rect(5.0, 1.0, 2.0, 4.0),
            (2.0, 1.0, 5.0, 4.0)
        );
    }

    #[test]
    fn eraser_width_has_a_floor() {
        assert_eq!(eraser::width(1.0), eraser::MIN_WIDTH);
        assert_eq!(eraser::width(10.0), 20.0);
    }
}
