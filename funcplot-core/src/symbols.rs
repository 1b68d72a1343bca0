//! Symbol table for the plot language.
//!
//! Maps every predefined upper-case name to the token kind the scanner
//! produces for it:
//! - **Constants** `PI` and `E` carry their value
//! - **Functions** carry the [`UnaryFn`] they apply
//! - **Colors** carry their packed RGB value
//! - **Reserved words** and the parameter `T` carry nothing
//!
//! The table is fixed at compile time; programs cannot define names.

use std::f64::consts;

use funcplot_graphics::types::Color;

use crate::ast::UnaryFn;
use crate::token::TokenKind;

// ---------------------------------------------------------------------------
// Symbol entries
// ---------------------------------------------------------------------------

/// One predefined name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolEntry {
    /// Upper-case spelling.
    pub name: &'static str,
    /// The token kind (with payload) the name scans to.
    pub kind: TokenKind,
}

const fn entry(name: &'static str, kind: TokenKind) -> SymbolEntry {
    SymbolEntry { name, kind }
}

/// Every predefined name.
pub const SYMBOLS: &[SymbolEntry] = &[
    // constants
    entry("PI", TokenKind::Const(consts::PI)),
    entry("E", TokenKind::Const(consts::E)),
    // parameter
    entry("T", TokenKind::Param),
    // functions
    entry("SIN", TokenKind::Func(UnaryFn::Sin)),
    entry("COS", TokenKind::Func(UnaryFn::Cos)),
    entry("TAN", TokenKind::Func(UnaryFn::Tan)),
    entry("SQRT", TokenKind::Func(UnaryFn::Sqrt)),
    entry("EXP", TokenKind::Func(UnaryFn::Exp)),
    entry("LN", TokenKind::Func(UnaryFn::Ln)),
    // reserved words
    entry("ORIGIN", TokenKind::Origin),
    entry("SCALE", TokenKind::Scale),
    entry("ROT", TokenKind::Rot),
    entry("STYLE", TokenKind::Style),
    entry("IS", TokenKind::Is),
    entry("FOR", TokenKind::For),
    entry("FROM", TokenKind::From),
    entry("TO", TokenKind::To),
    entry("STEP", TokenKind::Step),
    entry("DRAW", TokenKind::Draw),
    // colors
    entry("RED", TokenKind::Color(Color::RED)),
    entry("BLUE", TokenKind::Color(Color::BLUE)),
    entry("GREEN", TokenKind::Color(Color::GREEN)),
    entry("YELLOW", TokenKind::Color(Color::YELLOW)),
    entry("BLACK", TokenKind::Color(Color::BLACK)),
    entry("WHITE", TokenKind::Color(Color::WHITE)),
];

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Resolve an upper-case lexeme. Returns `None` for unknown names.
#[must_use]
pub fn lookup(name: &str) -> Option<TokenKind> {
    SYMBOLS.iter().find(|e| e.name == name).map(|e| e.kind)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenCategory;

    #[test]
    fn constants_carry_values() {
        assert_eq!(lookup("PI"), Some(TokenKind::Const(consts::PI)));
        assert_eq!(lookup("E"), Some(TokenKind::Const(consts::E)));
    }

    #[test]
    fn functions_and_colors() {
        assert_eq!(lookup("SQRT"), Some(TokenKind::Func(UnaryFn::Sqrt)));
        assert_eq!(lookup("LN"), Some(TokenKind::Func(UnaryFn::Ln)));
        assert_eq!(lookup("YELLOW"), Some(TokenKind::Color(Color::YELLOW)));
    }

    #[test]
    fn reserved_words() {
        for name in [
            "ORIGIN", "SCALE", "ROT", "STYLE", "IS", "FOR", "FROM", "TO", "STEP", "DRAW", "T",
        ] {
            let kind = lookup(name).unwrap_or_else(|| panic!("missing {name}"));
            assert_eq!(kind.category(), TokenCategory::ReservedWord, "{name}");
        }
    }

    #[test]
    fn lookup_is_case_sensitive_on_upper() {
        assert_eq!(lookup("pi"), None);
        assert_eq!(lookup("FOO"), None);
    }

    #[test]
    fn names_are_unique() {
        let table = SYMBOLS;
        for (i, a) in table.iter().enumerate() {
            assert!(
                table[i + 1..].iter().all(|b| b.name != a.name),
                "duplicate {}",
                a.name
            );
        }
    }
}
