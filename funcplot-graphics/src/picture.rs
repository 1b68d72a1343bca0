//! Picture assembly.
//!
//! A picture is the ordered list of point batches handed to the renderer,
//! one [`Stroke`] per executed `FOR ... DRAW` statement, each carrying the
//! style that was current when it was drawn.

use crate::bbox::BoundingBox;
use crate::types::{Point, Style};

// ---------------------------------------------------------------------------
// Renderer trait
// ---------------------------------------------------------------------------

/// Consumer of plotted point batches.
///
/// Implementations range from the in-memory [`Picture`] to live canvases in
/// a host application.
pub trait Renderer {
    /// Draw one connected batch of points with the given style.
    fn draw(&mut self, points: &[Point], style: &Style);
}

/// A renderer that discards everything.
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _points: &[Point], _style: &Style) {}
}

// ---------------------------------------------------------------------------
// Picture
// ---------------------------------------------------------------------------

/// One drawn batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<Point>,
    pub style: Style,
}

/// An ordered collection of strokes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Picture {
    pub strokes: Vec<Stroke>,
}

impl Picture {
    pub const fn new() -> Self {
        Self {
            strokes: Vec::new(),
        }
    }

    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    /// Bounds of every point in the picture.
    #[must_use]
    pub fn bbox(&self) -> BoundingBox {
        let mut bb = BoundingBox::EMPTY;
        for stroke in &self.strokes {
            bb.union(&BoundingBox::from_points(&stroke.points));
        }
        bb
    }

    /// Hand every stroke, in order, to another renderer.
    pub fn replay(&self, renderer: &mut dyn Renderer) {
        for stroke in &self.strokes {
            renderer.draw(&stroke.points, &stroke.style);
        }
    }
}

impl Renderer for Picture {
    fn draw(&mut self, points: &[Point], style: &Style) {
        self.push(Stroke {
            points: points.to_vec(),
            style: *style,
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn draw_records_stroke() {
        let mut pic = Picture::new();
        let style = Style {
            color: Color::RED,
            opacity: 0.5,
            line_width: 2.0,
        };
        pic.draw(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)], &style);
        assert_eq!(pic.strokes.len(), 1);
        assert_eq!(pic.strokes[0].style, style);
        assert_eq!(pic.strokes[0].points.len(), 2);
    }

    #[test]
    fn bbox_spans_all_strokes() {
        let mut pic = Picture::new();
        pic.draw(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)], &Style::DEFAULT);
        pic.draw(&[Point::new(-2.0, 3.0)], &Style::DEFAULT);
        let bb = pic.bbox();
        assert_eq!((bb.min_x, bb.max_x, bb.min_y, bb.max_y), (-2.0, 1.0, 0.0, 3.0));
    }

    #[test]
    fn replay_preserves_order() {
        let mut pic = Picture::new();
        pic.draw(&[Point::new(1.0, 0.0)], &Style::DEFAULT);
        pic.draw(&[Point::new(2.0, 0.0)], &Style::DEFAULT);

        let mut copy = Picture::new();
        pic.replay(&mut copy);
        assert_eq!(copy, pic);

        pic.replay(&mut NullRenderer);
    }
}
