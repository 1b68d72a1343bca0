//! Token types for the `funcplot` scanner.
//!
//! Every token carries its upper-cased lexeme and a source span. The kind
//! carries the semantic payload: the value of a numeric constant, the
//! built-in operation of a function name, or the packed RGB of a color.

use std::fmt;

use funcplot_graphics::types::{Color, Scalar};

use crate::ast::UnaryFn;

// ---------------------------------------------------------------------------
// Source location
// ---------------------------------------------------------------------------

/// A byte-offset span in the source input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: u32,
    /// End byte offset (exclusive).
    pub end: u32,
}

impl Span {
    /// Create a new span.
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// A zero-length span at the given position.
    #[must_use]
    pub const fn at(pos: u32) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Whether the span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

// ---------------------------------------------------------------------------
// Lexical failures
// ---------------------------------------------------------------------------

/// Why the scanner produced an error token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("invalid character")]
    InvalidCharacter,
    #[error("malformed number")]
    MalformedNumber,
    #[error("unterminated block comment")]
    UnterminatedComment,
}

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// A lexical token produced by the scanner.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind and payload of the token.
    pub kind: TokenKind,
    /// The matched text, upper-cased.
    pub lexeme: String,
    /// Source location.
    pub span: Span,
}

impl Token {
    /// The end-of-input token at `pos`.
    #[must_use]
    pub const fn eof(pos: u32) -> Self {
        Self {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            span: Span::at(pos),
        }
    }
}

/// The kind and payload of a token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    // -- reserved words --
    Origin,
    Scale,
    Rot,
    Style,
    Is,
    For,
    From,
    To,
    Step,
    Draw,
    /// The loop parameter `T`.
    Param,

    /// An identifier that is not in the symbol table.
    Ident,
    /// A numeric literal or a named constant (`PI`, `E`).
    Const(Scalar),
    /// A built-in unary function name.
    Func(UnaryFn),
    /// A color name.
    Color(Color),

    // -- operators --
    Plus,
    Minus,
    Mul,
    Div,
    Power,

    // -- delimiters --
    Semicolon,
    LParen,
    RParen,
    Comma,

    /// A comment, only produced by scanners that keep comments.
    Comment,
    /// End of input.
    Eof,
    /// Input the scanner could not tokenize.
    Error(LexError),
}

/// Coarse token categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    ReservedWord,
    Identifier,
    Constant,
    Function,
    Color,
    Operator,
    Delimiter,
    Comment,
    EndOfInput,
    Error,
}

impl TokenCategory {
    /// Lower-case name used in token dumps.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ReservedWord => "reserved-word",
            Self::Identifier => "identifier",
            Self::Constant => "constant",
            Self::Function => "function",
            Self::Color => "color",
            Self::Operator => "operator",
            Self::Delimiter => "delimiter",
            Self::Comment => "comment",
            Self::EndOfInput => "end-of-input",
            Self::Error => "error",
        }
    }
}

impl TokenKind {
    /// The coarse category of this kind.
    pub const fn category(&self) -> TokenCategory {
        match self {
            Self::Origin
            | Self::Scale
            | Self::Rot
            | Self::Style
            | Self::Is
            | Self::For
            | Self::From
            | Self::To
            | Self::Step
            | Self::Draw
            | Self::Param => TokenCategory::ReservedWord,
            Self::Ident => TokenCategory::Identifier,
            Self::Const(_) => TokenCategory::Constant,
            Self::Func(_) => TokenCategory::Function,
            Self::Color(_) => TokenCategory::Color,
            Self::Plus | Self::Minus | Self::Mul | Self::Div | Self::Power => {
                TokenCategory::Operator
            }
            Self::Semicolon | Self::LParen | Self::RParen | Self::Comma => {
                TokenCategory::Delimiter
            }
            Self::Comment => TokenCategory::Comment,
            Self::Eof => TokenCategory::EndOfInput,
            Self::Error(_) => TokenCategory::Error,
        }
    }

    /// Whether `other` is the same kind, ignoring payloads.
    pub fn same_kind(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Returns `true` if this is end-of-input.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }

    /// How the kind reads in an "expected ..." message.
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Origin => "ORIGIN",
            Self::Scale => "SCALE",
            Self::Rot => "ROT",
            Self::Style => "STYLE",
            Self::Is => "IS",
            Self::For => "FOR",
            Self::From => "FROM",
            Self::To => "TO",
            Self::Step => "STEP",
            Self::Draw => "DRAW",
            Self::Param => "T",
            Self::Ident => "an identifier",
            Self::Const(_) => "a number",
            Self::Func(_) => "a function name",
            Self::Color(_) => "a color name",
            Self::Plus => "`+`",
            Self::Minus => "`-`",
            Self::Mul => "`*`",
            Self::Div => "`/`",
            Self::Power => "`**`",
            Self::Semicolon => "`;`",
            Self::LParen => "`(`",
            Self::RParen => "`)`",
            Self::Comma => "`,`",
            Self::Comment => "a comment",
            Self::Eof => "end of input",
            Self::Error(_) => "an invalid token",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_eof() {
            return write!(f, "end of input");
        }
        write!(f, "`{}`", self.lexeme)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
