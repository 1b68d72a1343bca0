//! The plot coordinate pipeline.
//!
//! Every plotted sample `(x, y)` goes through three steps in a fixed order:
//! per-axis scale, rotation by an angle in radians, then translation to the
//! origin. The rotation uses the plot language's own sign arrangement:
//!
//! ```text
//! x'' = x' * cos(a) + y' * sin(a)
//! y'' = y' * cos(a) - x' * sin(a)
//! ```
//!
//! which is not the textbook counter-clockwise matrix.

use crate::types::{Point, Scalar, Transform, Vec2};

/// The full plot transform: scale, then rotate, then translate.
///
/// Built once per loop and applied to every sample.
#[must_use]
pub fn plot_transform(origin: Point, scale: Vec2, rotation: Scalar) -> Transform {
    let (s, c) = rotation.sin_cos();
    Transform {
        tx: origin.x,
        ty: origin.y,
        txx: scale.x * c,
        txy: scale.y * s,
        tyx: -(scale.x * s),
        tyy: scale.y * c,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
