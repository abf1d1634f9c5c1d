//! Axis-aligned rectangles and the overlap test shared by rendering and collision.

/// Bounding rectangle in canvas pixels, top-left origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Rect {
    /// Build the rectangle covered by something at `(x, y)` with the given size.
    pub fn from_bounds(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            top: y,
            left: x,
            bottom: y + height,
            right: x + width,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// True when `a` and `b` overlap.
///
/// Rectangles that only share an edge are separated: the boundary is exclusive.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    !(b.left >= a.right || b.right <= a.left || b.top >= a.bottom || b.bottom <= a.top)
}
