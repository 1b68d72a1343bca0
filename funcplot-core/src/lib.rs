//! Front-end and evaluator for the `funcplot` parametric-curve language.
//!
//! Source text flows through the [`scanner`] (a table-driven DFA), the
//! [`parser`] (LL(1) recursive descent producing [`ast`] trees) and the
//! [`interpreter`], which executes each statement as soon as it is parsed
//! against an explicit [`context::DrawingContext`].

pub mod ast;
pub mod context;
pub mod error;
pub mod eval;
pub mod interpreter;
pub mod parser;
pub mod scanner;
pub mod symbols;
pub mod token;
