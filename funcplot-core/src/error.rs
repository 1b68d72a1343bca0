//! Error types for the `funcplot` parser and interpreter.

use std::fmt;

use crate::token::{LexError, Span};

// ---------------------------------------------------------------------------
// Error severity
// ---------------------------------------------------------------------------

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational message (e.g. a drawn batch).
    Info,
    /// Error (execution stops).
    Error,
}

impl Severity {
    /// Lower-case label used when printing diagnostics.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// An error produced by the `funcplot` parser or interpreter.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}{message}", span_prefix(.span))]
pub struct InterpreterError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Source location, if available.
    pub span: Option<Span>,
    /// Severity.
    pub severity: Severity,
}

#[allow(clippy::ref_option)]
fn span_prefix(span: &Option<Span>) -> String {
    span.map_or_else(String::new, |s| format!("[{}..{}] ", s.start, s.end))
}

impl InterpreterError {
    /// Create a new error.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
            severity: Severity::Error,
        }
    }

    /// An informational diagnostic.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message, message).with_severity(Severity::Info)
    }

    /// Attach a source span.
    #[must_use]
    pub const fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Set severity.
    #[must_use]
    pub const fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

// ---------------------------------------------------------------------------
// Error kinds
// ---------------------------------------------------------------------------

/// The three families of program errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Lexical,
    Syntax,
    Semantic,
    /// Not an error: informational diagnostics.
    Message,
}

/// Categories of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // -- Lexical errors --
    /// Character that starts no token.
    InvalidCharacter,
    /// Numeric literal that does not convert to a finite value.
    MalformedNumber,
    /// `/*` without a closing `*/`.
    UnterminatedComment,

    // -- Syntax errors --
    /// Unexpected token.
    UnexpectedToken,
    /// Malformed `STYLE IS` value.
    InvalidStyle,

    // -- Semantic errors --
    /// Opacity or line width out of range.
    OutOfRange,
    /// Loop bounds or step are unusable.
    InvalidLoop,
    /// `T` used outside a `DRAW` pair.
    UnboundParameter,
    /// Division by zero.
    DivisionByZero,
    /// Non-finite result from a math operation.
    ArithmeticError,
    /// Loop would exceed the configured sample limit.
    TooManySamples,
    /// Expression nested too deeply.
    Overflow,

    // -- Diagnostics --
    /// Informational message.
    Message,
}

impl ErrorKind {
    /// Which family this kind belongs to.
    pub const fn class(self) -> ErrorClass {
        match self {
            Self::InvalidCharacter | Self::MalformedNumber | Self::UnterminatedComment => {
                ErrorClass::Lexical
            }
            Self::UnexpectedToken | Self::InvalidStyle => ErrorClass::Syntax,
            Self::OutOfRange
            | Self::InvalidLoop
            | Self::UnboundParameter
            | Self::DivisionByZero
            | Self::ArithmeticError
            | Self::TooManySamples
            | Self::Overflow => ErrorClass::Semantic,
            Self::Message => ErrorClass::Message,
        }
    }
}

impl From<LexError> for ErrorKind {
    fn from(err: LexError) -> Self {
        match err {
            LexError::InvalidCharacter => Self::InvalidCharacter,
            LexError::MalformedNumber => Self::MalformedNumber,
            LexError::UnterminatedComment => Self::UnterminatedComment,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter => write!(f, "invalid character"),
            Self::MalformedNumber => write!(f, "malformed number"),
            Self::UnterminatedComment => write!(f, "unterminated comment"),
            Self::UnexpectedToken => write!(f, "unexpected token"),
            Self::InvalidStyle => write!(f, "invalid style"),
            Self::OutOfRange => write!(f, "value out of range"),
            Self::InvalidLoop => write!(f, "invalid loop"),
            Self::UnboundParameter => write!(f, "unbound parameter"),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ArithmeticError => write!(f, "arithmetic error"),
            Self::TooManySamples => write!(f, "too many samples"),
            Self::Overflow => write!(f, "overflow"),
            Self::Message => write!(f, "message"),
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexical => write!(f, "lexical error"),
            Self::Syntax => write!(f, "syntax error"),
            Self::Semantic => write!(f, "semantic error"),
            Self::Message => write!(f, "message"),
        }
    }
}

/// Convenience type alias for results using [`InterpreterError`].
pub type InterpResult<T> = Result<T, InterpreterError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = InterpreterError::new(ErrorKind::UnexpectedToken, "expected `;`")
            .with_span(Span::new(10, 11));
        let s = format!("{err}");
        assert!(s.contains("[10..11]"), "missing span: {s}");
        assert!(s.contains("expected `;`"), "missing message: {s}");
    }

    #[test]
    fn error_without_span() {
        let err = InterpreterError::new(ErrorKind::DivisionByZero, "division by zero");
        let s = format!("{err}");
        assert!(!s.contains('['), "should not have span: {s}");
        assert!(s.contains("division by zero"), "missing message: {s}");
    }

    #[test]
    fn kinds_group_into_classes() {
        assert_eq!(ErrorKind::InvalidCharacter.class(), ErrorClass::Lexical);
        assert_eq!(ErrorKind::InvalidStyle.class(), ErrorClass::Syntax);
        assert_eq!(ErrorKind::OutOfRange.class(), ErrorClass::Semantic);
        assert_eq!(ErrorKind::DivisionByZero.class(), ErrorClass::Semantic);
        assert_eq!(
            ErrorKind::from(LexError::UnterminatedComment),
            ErrorKind::UnterminatedComment
        );
    }

    #[test]
    fn info_severity() {
        let msg = InterpreterError::info("cached 3 points");
        assert_eq!(msg.severity, Severity::Info);
        assert_eq!(msg.kind.class(), ErrorClass::Message);
    }
}
