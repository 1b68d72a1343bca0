//! Expression evaluation.
//!
//! A post-order walk over [`Expr`]. Every intermediate value is finite:
//! constants are checked by the scanner, and any operation that produces a
//! NaN or an infinity from finite operands is reported instead of
//! propagated.

use funcplot_graphics::types::Scalar;

use crate::ast::{BinOp, Expr, UnaryFn};
use crate::error::{ErrorKind, InterpResult, InterpreterError};

impl Expr {
    /// Evaluate with the parameter bound to `t`.
    pub fn eval(&self, t: Scalar) -> InterpResult<Scalar> {
        match self {
            Self::Const(v) => Ok(*v),
            Self::Param => Ok(t),
            Self::Call { func, arg } => {
                let x = arg.eval(t)?;
                apply_fn(*func, x)
            }
            Self::Binary { op, lhs, rhs } => {
                let a = lhs.eval(t)?;
                let b = rhs.eval(t)?;
                apply_binary(*op, a, b)
            }
        }
    }

    /// Evaluate an expression that does not mention `T`.
    pub fn eval_const(&self) -> InterpResult<Scalar> {
        self.eval(0.0)
    }
}

fn apply_fn(func: UnaryFn, x: Scalar) -> InterpResult<Scalar> {
    let result = func.apply(x);
    if result.is_finite() {
        Ok(result)
    } else {
        Err(InterpreterError::new(
            ErrorKind::ArithmeticError,
            format!("{}({x}) is not a finite number", func.name()),
        ))
    }
}

fn apply_binary(op: BinOp, a: Scalar, b: Scalar) -> InterpResult<Scalar> {
    let result = match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::Div => {
            if b == 0.0 {
                return Err(InterpreterError::new(
                    ErrorKind::DivisionByZero,
                    format!("division by zero in {a} / {b}"),
                ));
            }
            a / b
        }
        BinOp::Pow => a.powf(b),
    };
    if result.is_finite() {
        Ok(result)
    } else {
        Err(InterpreterError::new(
            ErrorKind::ArithmeticError,
            format!("{a} {} {b} is not a finite number", op.symbol()),
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
