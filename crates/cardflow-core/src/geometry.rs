#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are host pixels as `f64` (layout engines report fractional
//! positions). Rectangles are half-open: the left and top edges are inside,
//! the right and bottom edges are not, so two adjacent cards never both
//! contain the same pointer sample.

/// A pointer position in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A rectangle for drop-target bounds and collision probes.
///
/// Uses host coordinates (origin at top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f64,
    /// Top edge (inclusive).
    pub y: f64,
    /// Width; negative values are treated as zero.
    pub width: f64,
    /// Height; negative values are treated as zero.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle of the given size centred on `center`.
    #[inline]
    pub fn centered_on(center: Point, width: f64, height: f64) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    /// Left edge (alias for x).
    #[inline]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width.max(0.0)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height.max(0.0)
    }

    /// Area in square pixels.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.area() <= 0.0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Corners in clockwise order starting at the top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left(), self.top()),
            Point::new(self.right(), self.top()),
            Point::new(self.right(), self.bottom()),
            Point::new(self.left(), self.bottom()),
        ]
    }

    /// Compute the intersection with another rectangle, returning `None` if no overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Area shared with another rectangle (zero when disjoint).
    #[inline]
    pub fn intersection_area(&self, other: &Rect) -> f64 {
        self.intersection_opt(other).map_or(0.0, |r| r.area())
    }

    /// Mean distance between corresponding corners of two rectangles.
    ///
    /// Small values mean the rectangles are close in both position and size.
    pub fn corner_distance(&self, other: &Rect) -> f64 {
        let ours = self.corners();
        let theirs = other.corners();
        ours.iter()
            .zip(theirs.iter())
            .map(|(a, b)| a.distance(*b))
            .sum::<f64>()
            / 4.0
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect};

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(2.0, 3.0, 4.0, 5.0);
        assert!(rect.contains(Point::new(2.0, 3.0)));
        assert!(rect.contains(Point::new(5.9, 7.9)));
        assert!(!rect.contains(Point::new(6.0, 3.0)));
        assert!(!rect.contains(Point::new(2.0, 8.0)));
    }

    #[test]
    fn negative_size_is_empty() {
        let rect = Rect::new(0.0, 0.0, -3.0, 4.0);
        assert!(rect.is_empty());
        assert_eq!(rect.area(), 0.0);
        assert!(!rect.contains(Point::new(0.0, 1.0)));
    }

    #[test]
    fn rect_intersection_overlaps() {
        let a = Rect::new(0.0, 0.0, 4.0, 4.0);
        let b = Rect::new(2.0, 2.0, 4.0, 4.0);
        assert_eq!(a.intersection_opt(&b), Some(Rect::new(2.0, 2.0, 2.0, 2.0)));
        assert_eq!(a.intersection_area(&b), 4.0);
    }

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect::new(2.0, 0.0, 2.0, 2.0);
        assert_eq!(a.intersection_opt(&b), None);
        assert_eq!(a.intersection_area(&b), 0.0);
    }

    #[test]
    fn centered_probe() {
        let probe = Rect::centered_on(Point::new(10.0, 10.0), 4.0, 2.0);
        assert_eq!(probe, Rect::new(8.0, 9.0, 4.0, 2.0));
    }

    #[test]
    fn corner_distance_is_zero_for_identical() {
        let a = Rect::new(1.0, 1.0, 3.0, 3.0);
        assert_eq!(a.corner_distance(&a), 0.0);
    }

    #[test]
    fn corner_distance_of_translation() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect::new(3.0, 4.0, 2.0, 2.0);
        assert!((a.corner_distance(&b) - 5.0).abs() < 1e-9);
    }
}
