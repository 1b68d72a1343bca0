//! Statement execution.
//!
//! `ORIGIN`, `SCALE` and `ROT` replace one context field each, `STYLE`
//! overwrites the fields it names, and `FOR` samples the curve. A loop
//! computes its whole batch before touching the context, so a failing
//! loop has no effect.

use funcplot_graphics::picture::Renderer;
use funcplot_graphics::types::{Point, Scalar, Vec2};
use tracing::info;

use crate::ast::{Expr, Statement};
use crate::error::{ErrorKind, InterpResult, InterpreterError};

use super::Interpreter;

/// Tolerance added before flooring the sample count, so that an end value
/// reached by accumulated rounding is still sampled.
const COUNT_TOLERANCE: Scalar = 1e-9;

/// Upper bound on the buffer reserved up front for one batch.
const PREALLOC_LIMIT: usize = 4096;

impl Interpreter {
    /// Execute one statement.
    pub(super) fn execute(&mut self, stmt: &Statement) -> InterpResult<()> {
        match stmt {
            Statement::Origin { x, y } => {
                self.context.origin = Point::new(x.eval_const()?, y.eval_const()?);
            }
            Statement::Scale { x, y } => {
                self.context.scale = Vec2::new(x.eval_const()?, y.eval_const()?);
            }
            Statement::Rot(angle) => {
                self.context.rotation = angle.eval_const()?;
            }
            Statement::Style(value) => self.context.apply_style(value),
            Statement::For {
                start,
                end,
                step,
                x,
                y,
            } => self.execute_loop(start, end, step, x, y)?,
        }
        Ok(())
    }

    fn execute_loop(
        &mut self,
        start: &Expr,
        end: &Expr,
        step: &Expr,
        x: &Expr,
        y: &Expr,
    ) -> InterpResult<()> {
        let start = start.eval_const()?;
        let end = end.eval_const()?;
        let step = step.eval_const()?;

        if step <= 0.0 {
            return Err(InterpreterError::new(
                ErrorKind::InvalidLoop,
                format!("step must be positive, got {step}"),
            ));
        }
        if start > end {
            return Err(InterpreterError::new(
                ErrorKind::InvalidLoop,
                format!("start/end/step mismatch: FROM {start} TO {end} STEP {step}"),
            ));
        }

        let count = sample_count(start, end, step)?;
        if let Some(limit) = self.sample_limit.filter(|&limit| count > limit) {
            return Err(InterpreterError::new(
                ErrorKind::TooManySamples,
                format!("loop takes {count} samples, limit is {limit}"),
            ));
        }

        let transform = self.context.transform();
        let mut points = Vec::with_capacity(count.min(PREALLOC_LIMIT));
        for i in 0..count {
            #[expect(clippy::cast_precision_loss, reason = "sample index fits in f64 mantissa")]
            let t = (i as Scalar).mul_add(step, start);
            let p = transform.apply_to_point(Point::new(x.eval(t)?, y.eval(t)?));
            if !(p.x.is_finite() && p.y.is_finite()) {
                return Err(InterpreterError::new(
                    ErrorKind::ArithmeticError,
                    format!("point at T = {t} is not finite"),
                ));
            }
            points.push(p);
        }

        let style = self.context.style;
        self.picture.draw(&points, &style);
        self.context.commit_points(points);

        let n = self.context.points.len();
        info!(points = n, from = start, to = end, step, "drew batch");
        self.errors.push(InterpreterError::info(format!(
            "drew {n} points for T from {start} to {end} step {step}"
        )));
        Ok(())
    }
}

/// `floor((end - start) / step + tolerance) + 1`, checked.
fn sample_count(start: Scalar, end: Scalar, step: Scalar) -> InterpResult<usize> {
    let count = ((end - start) / step + COUNT_TOLERANCE).floor() + 1.0;
    #[expect(clippy::cast_precision_loss, reason = "bound check only")]
    let max = usize::MAX as Scalar;
    if !count.is_finite() || count >= max {
        return Err(InterpreterError::new(
            ErrorKind::TooManySamples,
            format!("loop from {start} to {end} step {step} has too many samples"),
        ));
    }
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "count is finite, at least 1 and below usize::MAX"
    )]
    let count = count as usize;
    Ok(count)
}
