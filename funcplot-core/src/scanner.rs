//! Lexical scanner for plot programs.
//!
//! A table-driven DFA with maximal munch. Characters are grouped into
//! classes; the transition table maps `(state, class)` to the next state,
//! and a second table maps each state to the token it accepts. Scanning
//! stops at the first character with no transition, and the last state
//! reached decides the token.
//!
//! # Token production rules
//!
//! | Input                 | Token produced                            |
//! |-----------------------|-------------------------------------------|
//! | `12`, `3.5`, `3.`     | `Const(value)`                            |
//! | `sin`, `Pi`, `red`    | resolved through the symbol table         |
//! | `foo`                 | `Ident`                                   |
//! | `+ - * / **`          | operator                                  |
//! | `; ( ) ,`             | delimiter (never merge)                   |
//! | `// ..`, `-- ..`, `# ..` | skipped to end of line                 |
//! | `/* .. */`            | skipped to the closing `*/`               |
//! | anything else         | `Error(InvalidCharacter)`                 |
//! | end of input          | `Eof`, repeated on every further call     |
//!
//! The scanner never fails: problems become `Error` tokens, which the
//! parser reports.

use tracing::trace;

use crate::symbols;
use crate::token::{LexError, Span, Token, TokenKind};

// ---------------------------------------------------------------------------
// Character classes
// ---------------------------------------------------------------------------

const LETTER: u8 = 0;
const DIGIT: u8 = 1;
const DOT: u8 = 2;
const STAR: u8 = 3;
const SLASH: u8 = 4;
const MINUS: u8 = 5;
const PLUS: u8 = 6;
const SEMI: u8 = 7;
const LPAREN: u8 = 8;
const RPAREN: u8 = 9;
const COMMA: u8 = 10;
const OTHER: u8 = 11;
const HASH: u8 = 12;

const CLASS_COUNT: usize = 13;

/// Class of one source byte. Bytes of non-ASCII characters are `OTHER`.
const fn char_class(c: u8) -> u8 {
    match c {
        b'A'..=b'Z' | b'a'..=b'z' | b'_' => LETTER,
        b'0'..=b'9' => DIGIT,
        b'.' => DOT,
        b'*' => STAR,
        b'/' => SLASH,
        b'-' => MINUS,
        b'+' => PLUS,
        b';' => SEMI,
        b'(' => LPAREN,
        b')' => RPAREN,
        b',' => COMMA,
        b'#' => HASH,
        _ => OTHER,
    }
}

// ---------------------------------------------------------------------------
// Automaton tables
// ---------------------------------------------------------------------------

/// No transition.
const NONE: u8 = u8::MAX;
const N: u8 = NONE;

const STATE_COUNT: usize = 15;

/// `TRANSITIONS[state][class]`.
#[rustfmt::skip]
const TRANSITIONS: [[u8; CLASS_COUNT]; STATE_COUNT] = [
    //  L  D  .  *  /  -  +  ;   (   )   ,   ?  #
    [   1, 2, N, 4, 6, 7, 8, 10, 11, 12, 13, N, 9 ], // 0  start
    [   1, 1, N, N, N, N, N, N,  N,  N,  N,  N, N ], // 1  identifier
    [   N, 2, 3, N, N, N, N, N,  N,  N,  N,  N, N ], // 2  integer
    [   N, 3, N, N, N, N, N, N,  N,  N,  N,  N, N ], // 3  fraction
    [   N, N, N, 5, N, N, N, N,  N,  N,  N,  N, N ], // 4  *
    [   N, N, N, N, N, N, N, N,  N,  N,  N,  N, N ], // 5  **
    [   N, N, N, 14, 9, N, N, N, N,  N,  N,  N, N ], // 6  /
    [   N, N, N, N, N, 9, N, N,  N,  N,  N,  N, N ], // 7  -
    [   N, N, N, N, N, N, N, N,  N,  N,  N,  N, N ], // 8  +
    [   N, N, N, N, N, N, N, N,  N,  N,  N,  N, N ], // 9  line comment
    [   N, N, N, N, N, N, N, N,  N,  N,  N,  N, N ], // 10 ;
    [   N, N, N, N, N, N, N, N,  N,  N,  N,  N, N ], // 11 (
    [   N, N, N, N, N, N, N, N,  N,  N,  N,  N, N ], // 12 )
    [   N, N, N, N, N, N, N, N,  N,  N,  N,  N, N ], // 13 ,
    [   N, N, N, N, N, N, N, N,  N,  N,  N,  N, N ], // 14 /*
];

/// What a state accepts when the automaton stops in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accept {
    Nothing,
    Identifier,
    Number,
    Mul,
    Power,
    Div,
    Minus,
    Plus,
    LineComment,
    Semicolon,
    LParen,
    RParen,
    Comma,
    BlockComment,
}

const ACCEPTS: [Accept; STATE_COUNT] = [
    Accept::Nothing,
    Accept::Identifier,
    Accept::Number,
    Accept::Number,
    Accept::Mul,
    Accept::Power,
    Accept::Div,
    Accept::Minus,
    Accept::Plus,
    Accept::LineComment,
    Accept::Semicolon,
    Accept::LParen,
    Accept::RParen,
    Accept::Comma,
    Accept::BlockComment,
];

const fn transition(state: u8, class: u8) -> u8 {
    TRANSITIONS[state as usize][class as usize]
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// Lexical scanner over one program source.
pub struct Scanner {
    /// Source text (owned).
    src: String,
    /// Current byte position. Always on a character boundary.
    pos: usize,
    /// Return comments as tokens instead of skipping them.
    keep_comments: bool,
}

impl Scanner {
    /// Create a new scanner over the given source string.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            src: source.to_owned(),
            pos: 0,
            keep_comments: false,
        }
    }

    /// Return comment tokens instead of discarding them.
    #[must_use]
    pub const fn keep_comments(mut self) -> Self {
        self.keep_comments = true;
        self
    }

    /// Scan the next token. After the end of input this keeps returning
    /// `Eof`.
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();

            if self.pos >= self.src.len() {
                return Token::eof(u32_pos(self.src.len()));
            }

            let start = self.pos;
            let Some(accept) = self.run_automaton() else {
                return self.invalid_character(start);
            };

            let kind = match accept {
                Accept::Identifier => {
                    let upper = self.src[start..self.pos].to_ascii_uppercase();
                    symbols::lookup(&upper).unwrap_or(TokenKind::Ident)
                }
                Accept::Number => parse_number(&self.src[start..self.pos]),
                Accept::Mul => TokenKind::Mul,
                Accept::Power => TokenKind::Power,
                Accept::Div => TokenKind::Div,
                Accept::Minus => TokenKind::Minus,
                Accept::Plus => TokenKind::Plus,
                Accept::Semicolon => TokenKind::Semicolon,
                Accept::LParen => TokenKind::LParen,
                Accept::RParen => TokenKind::RParen,
                Accept::Comma => TokenKind::Comma,
                Accept::LineComment => {
                    self.skip_line();
                    if !self.keep_comments {
                        continue;
                    }
                    TokenKind::Comment
                }
                Accept::BlockComment => {
                    if !self.skip_block_comment() {
                        TokenKind::Error(LexError::UnterminatedComment)
                    } else if self.keep_comments {
                        TokenKind::Comment
                    } else {
                        continue;
                    }
                }
                Accept::Nothing => return self.invalid_character(start),
            };

            let tok = self.make_token(kind, start);
            trace!(kind = ?tok.kind, lexeme = %tok.lexeme, "token");
            return tok;
        }
    }

    /// Scan all remaining tokens (including `Eof`).
    pub fn scan_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let is_eof = tok.kind.is_eof();
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        tokens
    }

    // -- internal helpers --

    fn skip_whitespace(&mut self) {
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    /// Advance from `self.pos` while transitions exist. Returns what the
    /// final state accepts, or `None` if the first character has no
    /// transition out of the start state.
    fn run_automaton(&mut self) -> Option<Accept> {
        let bytes = self.src.as_bytes();
        let mut state = 0;
        while self.pos < bytes.len() {
            let next = transition(state, char_class(bytes[self.pos]));
            if next == NONE {
                break;
            }
            state = next;
            self.pos += 1;
        }
        if state == 0 {
            None
        } else {
            Some(ACCEPTS[state as usize])
        }
    }

    /// Consume the rest of the line, leaving the newline for the
    /// whitespace skipper.
    fn skip_line(&mut self) {
        let bytes = self.src.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos] != b'\n' {
            self.pos += 1;
        }
    }

    /// Consume through the closing `*/`. Returns `false` (with the whole
    /// rest of the input consumed) if there is none.
    fn skip_block_comment(&mut self) -> bool {
        if let Some(offset) = self.src[self.pos..].find("*/") {
            self.pos += offset + 2;
            true
        } else {
            self.pos = self.src.len();
            false
        }
    }

    /// An `Error(InvalidCharacter)` token holding exactly the character at
    /// `start`.
    fn invalid_character(&mut self, start: usize) -> Token {
        let width = self.src[start..].chars().next().map_or(1, char::len_utf8);
        self.pos = start + width;
        let tok = self.make_token(TokenKind::Error(LexError::InvalidCharacter), start);
        trace!(lexeme = %tok.lexeme, "invalid character");
        tok
    }

    fn make_token(&self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            lexeme: self.src[start..self.pos].to_ascii_uppercase(),
            span: Span::new(u32_pos(start), u32_pos(self.pos)),
        }
    }
}

/// Convert a numeric lexeme. Anything that is not a finite `f64` is a
/// malformed number.
fn parse_number(text: &str) -> TokenKind {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => TokenKind::Const(value),
        _ => TokenKind::Error(LexError::MalformedNumber),
    }
}

/// Convert a `usize` position to `u32` for [`Span`].
///
/// Clamps to `u32::MAX` for sources larger than 4 GiB.
#[expect(
    clippy::cast_possible_truncation,
    reason = "explicitly clamped to u32::MAX before cast"
)]
pub(crate) const fn u32_pos(pos: usize) -> u32 {
    if pos > u32::MAX as usize {
        u32::MAX
    } else {
        pos as u32
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
