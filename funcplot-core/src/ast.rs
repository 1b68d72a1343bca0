//! Expression trees and statements.
//!
//! The parser builds one [`Statement`] per `;`-terminated statement. Each
//! statement owns its expression trees; children are boxed and owned by
//! their parent node. Evaluation lives in [`crate::eval`].

use std::fmt;

use funcplot_graphics::types::{Color, Scalar};

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    /// Source spelling.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "**",
        }
    }
}

/// Built-in unary functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryFn {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Exp,
    Ln,
}

impl UnaryFn {
    /// Apply the function. Domain violations come back as NaN or an
    /// infinity; the evaluator turns those into errors.
    #[must_use]
    pub fn apply(self, x: Scalar) -> Scalar {
        match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Sqrt => x.sqrt(),
            Self::Exp => x.exp(),
            Self::Ln => x.ln(),
        }
    }

    /// Upper-case source name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sin => "SIN",
            Self::Cos => "COS",
            Self::Tan => "TAN",
            Self::Sqrt => "SQRT",
            Self::Exp => "EXP",
            Self::Ln => "LN",
        }
    }
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// An expression tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal or named constant.
    Const(Scalar),
    /// The loop parameter `T`.
    Param,
    /// A built-in function applied to one argument.
    Call { func: UnaryFn, arg: Box<Self> },
    /// A binary operation.
    Binary {
        op: BinOp,
        lhs: Box<Self>,
        rhs: Box<Self>,
    },
}

impl Expr {
    /// Build a binary node.
    #[must_use]
    pub fn binary(op: BinOp, lhs: Self, rhs: Self) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Build a function call node.
    #[must_use]
    pub fn call(func: UnaryFn, arg: Self) -> Self {
        Self::Call {
            func,
            arg: Box::new(arg),
        }
    }

    /// Whether `T` occurs anywhere in the tree.
    #[must_use]
    pub fn uses_param(&self) -> bool {
        match self {
            Self::Const(_) => false,
            Self::Param => true,
            Self::Call { arg, .. } => arg.uses_param(),
            Self::Binary { lhs, rhs, .. } => lhs.uses_param() || rhs.uses_param(),
        }
    }

    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            Self::Const(v) => writeln!(f, "{indent}{v}"),
            Self::Param => writeln!(f, "{indent}T"),
            Self::Call { func, arg } => {
                writeln!(f, "{indent}{}", func.name())?;
                arg.fmt_tree(f, depth + 1)
            }
            Self::Binary { op, lhs, rhs } => {
                writeln!(f, "{indent}{}", op.symbol())?;
                lhs.fmt_tree(f, depth + 1)?;
                rhs.fmt_tree(f, depth + 1)
            }
        }
    }
}

/// Indented outline, one node per line, children below their parent.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

/// The value of a `STYLE IS` statement. Absent fields leave the current
/// style unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StyleValue {
    pub color: Option<Color>,
    pub opacity: Option<Scalar>,
    pub line_width: Option<Scalar>,
}

/// One parsed statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `ORIGIN IS (x, y)`
    Origin { x: Expr, y: Expr },
    /// `SCALE IS (x, y)`
    Scale { x: Expr, y: Expr },
    /// `ROT IS angle`
    Rot(Expr),
    /// `STYLE IS value`
    Style(StyleValue),
    /// `FOR T FROM start TO end STEP step DRAW (x, y)`
    For {
        start: Expr,
        end: Expr,
        step: Expr,
        x: Expr,
        y: Expr,
    },
}

impl Statement {
    /// Leading keyword, for log lines.
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Origin { .. } => "ORIGIN",
            Self::Scale { .. } => "SCALE",
            Self::Rot(_) => "ROT",
            Self::Style(_) => "STYLE",
            Self::For { .. } => "FOR",
        }
    }
}

fn fmt_labeled(f: &mut fmt::Formatter<'_>, label: &str, expr: &Expr) -> fmt::Result {
    writeln!(f, "  {label}:")?;
    expr.fmt_tree(f, 2)
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.keyword())?;
        match self {
            Self::Origin { x, y } | Self::Scale { x, y } => {
                fmt_labeled(f, "x", x)?;
                fmt_labeled(f, "y", y)
            }
            Self::Rot(angle) => fmt_labeled(f, "angle", angle),
            Self::Style(style) => {
                if let Some(color) = style.color {
                    writeln!(f, "  color: {color}")?;
                }
                if let Some(opacity) = style.opacity {
                    writeln!(f, "  opacity: {opacity}")?;
                }
                if let Some(width) = style.line_width {
                    writeln!(f, "  line width: {width}")?;
                }
                Ok(())
            }
            Self::For {
                start,
                end,
                step,
                x,
                y,
            } => {
                fmt_labeled(f, "from", start)?;
                fmt_labeled(f, "to", end)?;
                fmt_labeled(f, "step", step)?;
                fmt_labeled(f, "x", x)?;
                fmt_labeled(f, "y", y)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
