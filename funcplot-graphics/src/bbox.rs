//! Axis-aligned bounding box computation.
//!
//! The interpreter keeps one [`BoundingBox`] as the running axis range of
//! everything plotted since the last reset; renderers use it to size their
//! viewport.

use crate::types::{Point, Scalar};

// ---------------------------------------------------------------------------
// BoundingBox type
// ---------------------------------------------------------------------------

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: Scalar,
    pub min_y: Scalar,
    pub max_x: Scalar,
    pub max_y: Scalar,
}

impl BoundingBox {
    /// An empty (inverted) bounding box.
    pub const EMPTY: Self = Self {
        min_x: Scalar::INFINITY,
        min_y: Scalar::INFINITY,
        max_x: Scalar::NEG_INFINITY,
        max_y: Scalar::NEG_INFINITY,
    };

    /// Bounding box of a set of points. Empty input gives [`Self::EMPTY`].
    #[must_use]
    pub fn from_points(points: &[Point]) -> Self {
        points.iter().fold(Self::EMPTY, |mut bb, &p| {
            bb.include_point(p);
            bb
        })
    }

    /// Check if this bounding box is valid (non-empty).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Width.
    #[must_use]
    pub fn width(&self) -> Scalar {
        if self.is_valid() {
            self.max_x - self.min_x
        } else {
            0.0
        }
    }

    /// Height.
    #[must_use]
    pub fn height(&self) -> Scalar {
        if self.is_valid() {
            self.max_y - self.min_y
        } else {
            0.0
        }
    }

    /// Smallest x, or `None` while nothing has been plotted.
    #[must_use]
    pub fn x_min(&self) -> Option<Scalar> {
        self.is_valid().then_some(self.min_x)
    }

    #[must_use]
    pub fn x_max(&self) -> Option<Scalar> {
        self.is_valid().then_some(self.max_x)
    }

    #[must_use]
    pub fn y_min(&self) -> Option<Scalar> {
        self.is_valid().then_some(self.min_y)
    }

    #[must_use]
    pub fn y_max(&self) -> Option<Scalar> {
        self.is_valid().then_some(self.max_y)
    }

    /// Expand to include a point.
    pub fn include_point(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Expand to include another bounding box.
    pub fn union(&mut self, other: &Self) {
        if other.is_valid() {
            self.min_x = self.min_x.min(other.min_x);
            self.min_y = self.min_y.min(other.min_y);
            self.max_x = self.max_x.max(other.max_x);
            self.max_y = self.max_y.max(other.max_y);
        }
    }

    /// A copy grown by `margin` on every side.
    #[must_use]
    pub fn expanded(&self, margin: Scalar) -> Self {
        if !self.is_valid() {
            return *self;
        }
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::EPSILON;

    #[test]
    fn test_bounding_box_empty() {
        let bb = BoundingBox::EMPTY;
        assert!(!bb.is_valid());
        assert_eq!(bb.width(), 0.0);
        assert_eq!(bb.height(), 0.0);
        assert_eq!(bb.x_min(), None);
        assert_eq!(bb.y_max(), None);
    }

    #[test]
    fn test_bounding_box_include_point() {
        let mut bb = BoundingBox::EMPTY;
        bb.include_point(Point::new(1.0, 2.0));
        bb.include_point(Point::new(5.0, 8.0));
        assert!(bb.is_valid());
        assert!((bb.min_x - 1.0).abs() < EPSILON);
        assert!((bb.min_y - 2.0).abs() < EPSILON);
        assert!((bb.max_x - 5.0).abs() < EPSILON);
        assert!((bb.max_y - 8.0).abs() < EPSILON);
    }

    #[test]
    fn test_single_point_is_valid() {
        let bb = BoundingBox::from_points(&[Point::new(3.0, -1.0)]);
        assert!(bb.is_valid());
        assert_eq!(bb.x_min(), Some(3.0));
        assert_eq!(bb.x_max(), Some(3.0));
        assert_eq!(bb.width(), 0.0);
    }

    #[test]
    fn test_union_never_shrinks() {
        let mut bb = BoundingBox::from_points(&[Point::new(0.0, 0.0), Point::new(4.0, 4.0)]);
        bb.union(&BoundingBox::from_points(&[Point::new(1.0, 1.0), Point::new(2.0, 2.0)]));
        assert_eq!((bb.min_x, bb.max_x, bb.min_y, bb.max_y), (0.0, 4.0, 0.0, 4.0));

        bb.union(&BoundingBox::from_points(&[Point::new(-1.0, 5.0)]));
        assert_eq!((bb.min_x, bb.max_x, bb.min_y, bb.max_y), (-1.0, 4.0, 0.0, 5.0));
    }

    #[test]
    fn test_union_with_empty_is_noop() {
        let mut bb = BoundingBox::from_points(&[Point::new(1.0, 2.0)]);
        let before = bb;
        bb.union(&BoundingBox::EMPTY);
        assert_eq!(bb, before);
    }

    #[test]
    fn test_expanded() {
        let bb = BoundingBox::from_points(&[Point::new(0.0, 0.0), Point::new(10.0, 5.0)]);
        let e = bb.expanded(50.0);
        assert_eq!((e.min_x, e.min_y, e.max_x, e.max_y), (-50.0, -50.0, 60.0, 55.0));
        assert!(!BoundingBox::EMPTY.expanded(1.0).is_valid());
    }
}
