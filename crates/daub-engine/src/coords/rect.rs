use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.origin.x;
        let mut y = self.origin.y;
        let mut w = self.size.x;
        let mut h = self.size.y;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    /// Closed containment: [min, max]. Points on any edge are inside.
    #[inline]
    pub fn contains_inclusive(self, p: Vec2) -> bool {
        let r = self.normalized();
        let max = r.max();
        p.x >= r.origin.x && p.y >= r.origin.y && p.x <= max.x && p.y <= max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_positive_is_identity() {
        let rect = r(1.0, 2.0, 10.0, 20.0);
        assert_eq!(rect.normalized(), rect);
    }

    #[test]
    fn normalized_negative_extent() {
        let n = r(10.0, 10.0, -4.0, -3.0).normalized();
        assert_eq!(n, r(6.0, 7.0, 4.0, 3.0));
    }

    // ── contains_inclusive ────────────────────────────────────────────────

    #[test]
    fn contains_interior_point() {
        assert!(r(0.0, 0.0, 10.0, 10.0).contains_inclusive(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn contains_both_edges() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains_inclusive(Vec2::new(0.0, 0.0)));
        assert!(rect.contains_inclusive(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn contains_outside() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(!rect.contains_inclusive(Vec2::new(-1.0, 5.0)));
        assert!(!rect.contains_inclusive(Vec2::new(5.0, 10.5)));
    }

    #[test]
    fn degenerate_rect_contains_only_its_origin() {
        let rect = r(3.0, 3.0, 0.0, 0.0);
        assert!(rect.is_empty());
        assert!(rect.contains_inclusive(Vec2::new(3.0, 3.0)));
        assert!(!rect.contains_inclusive(Vec2::new(3.1, 3.0)));
    }
}
