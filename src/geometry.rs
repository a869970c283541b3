/// Axis-aligned rectangles in arena pixels, plus the overlap test every
/// collision in the game goes through.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    /// Pull the rectangle back inside `[0, width - w] × [0, height - h]`.
    /// Returns which axes were moved as `(x_clamped, y_clamped)`.
    pub fn clamp_within(&mut self, width: i32, height: i32) -> (bool, bool) {
        let x = self.x.min(width - self.w).max(0);
        let y = self.y.min(height - self.h).max(0);
        let moved = (x != self.x, y != self.y);
        self.x = x;
        self.y = y;
        moved
    }
}

/// True iff `a` and `b` share a region of non-zero area.
///
/// Intervals are half-open, so rectangles that only touch along an edge do
/// not overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}
