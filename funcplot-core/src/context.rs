//! Drawing context: the mutable state statements act on.

use funcplot_graphics::bbox::BoundingBox;
use funcplot_graphics::transform;
use funcplot_graphics::types::{Point, Scalar, Style, Transform, Vec2};

use crate::ast::StyleValue;

/// Plot state owned by one interpreter.
///
/// `points` holds the batch produced by the most recent successful loop;
/// `range` covers every batch since the last reset and never shrinks.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingContext {
    pub origin: Point,
    /// Rotation in radians.
    pub rotation: Scalar,
    pub scale: Vec2,
    pub style: Style,
    pub points: Vec<Point>,
    pub range: BoundingBox,
}

impl DrawingContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            origin: Point::ZERO,
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
            style: Style::DEFAULT,
            points: Vec::new(),
            range: BoundingBox::EMPTY,
        }
    }

    /// Restore every field to its default.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The current scale, rotate, translate transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        transform::plot_transform(self.origin, self.scale, self.rotation)
    }

    /// Overwrite the style fields present in `value`.
    pub fn apply_style(&mut self, value: &StyleValue) {
        if let Some(color) = value.color {
            self.style.color = color;
        }
        if let Some(opacity) = value.opacity {
            self.style.opacity = opacity;
        }
        if let Some(width) = value.line_width {
            self.style.line_width = width;
        }
    }

    /// Replace the cached batch and grow the axis range to cover it.
    pub fn commit_points(&mut self, points: Vec<Point>) {
        self.range.union(&BoundingBox::from_points(&points));
        self.points = points;
    }
}

impl Default for DrawingContext {
    fn default() -> Self {
        Self::new()
    }
}
