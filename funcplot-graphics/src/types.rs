//! Core types shared across the `funcplot` system.
//!
//! Points and vectors come from `kurbo`; colors are packed 24-bit RGB
//! values so that a color token can carry its value as a single integer.

use std::fmt;

use kurbo::Affine;
pub use kurbo::{Point, Vec2};

// ---------------------------------------------------------------------------
// Scalar
// ---------------------------------------------------------------------------

/// All plot arithmetic is done in `f64`.
pub type Scalar = f64;

/// Tolerance for floating-point comparisons.
pub const EPSILON: Scalar = 1e-9;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// RGB color packed as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const BLACK: Self = Self(0x00_0000);
    pub const WHITE: Self = Self(0xFF_FFFF);
    pub const RED: Self = Self(0xFF_0000);
    pub const GREEN: Self = Self(0x00_FF00);
    pub const BLUE: Self = Self(0x00_00FF);
    pub const YELLOW: Self = Self(0xFF_FF00);

    #[inline]
    pub const fn r(self) -> u8 {
        self.0.to_be_bytes()[1]
    }

    #[inline]
    pub const fn g(self) -> u8 {
        self.0.to_be_bytes()[2]
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0.to_be_bytes()[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Line style applied to a batch of plotted points.
///
/// `opacity` lies in `[0, 1]` and `line_width` is non-negative; the
/// interpreter rejects values outside those ranges before they get here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub color: Color,
    pub opacity: Scalar,
    pub line_width: Scalar,
}

impl Style {
    pub const DEFAULT: Self = Self {
        color: Color::BLACK,
        opacity: 1.0,
        line_width: 1.0,
    };
}

impl Default for Style {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

/// A 2D affine transformation.
///
/// Maps point (x, y) to:
///   (tx + txx*x + txy*y, ty + tyx*x + tyy*y)
///
/// Thin named wrapper over `kurbo::Affine`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub tx: Scalar,
    pub ty: Scalar,
    pub txx: Scalar,
    pub txy: Scalar,
    pub tyx: Scalar,
    pub tyy: Scalar,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        tx: 0.0,
        ty: 0.0,
        txx: 1.0,
        txy: 0.0,
        tyx: 0.0,
        tyy: 1.0,
    };

    /// Convert to a kurbo `Affine`.
    ///
    /// kurbo Affine coefficients: [a, b, c, d, e, f]
    /// mapping: x' = a*x + c*y + e,  y' = b*x + d*y + f
    #[inline]
    pub const fn to_affine(self) -> Affine {
        Affine::new([self.txx, self.tyx, self.txy, self.tyy, self.tx, self.ty])
    }

    /// Apply this transform to a point.
    #[inline]
    pub fn apply_to_point(&self, p: Point) -> Point {
        self.to_affine() * p
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn color_defaults() {
        assert_eq!(Color::default(), Color::BLACK);
        assert_eq!(Color::WHITE.to_string(), "#FFFFFF");
    }

    #[test]
    fn color_components() {
        let c = Color::YELLOW;
        assert_eq!((c.r(), c.g(), c.b()), (0xFF, 0xFF, 0x00));
        assert_eq!((Color::BLUE.r(), Color::BLUE.g(), Color::BLUE.b()), (0, 0, 0xFF));
    }

    #[test]
    fn named_colors() {
        assert_eq!(Color::RED.to_string(), "#FF0000");
        assert_eq!(Color::YELLOW.to_string(), "#FFFF00");
    }

    #[test]
    fn style_default() {
        let s = Style::default();
        assert_eq!(s.color, Color::BLACK);
        assert_eq!(s.opacity, 1.0);
        assert_eq!(s.line_width, 1.0);
    }

    #[test]
    fn transform_applies_through_affine() {
        let t = Transform {
            tx: 1.0,
            ty: 2.0,
            txx: 3.0,
            txy: 4.0,
            tyx: 5.0,
            tyy: 6.0,
        };
        assert_eq!(t.to_affine().as_coeffs(), [3.0, 5.0, 4.0, 6.0, 1.0, 2.0]);
        let p = t.apply_to_point(Point::new(1.0, 1.0));
        assert_eq!(p, Point::new(8.0, 13.0));
    }
}
