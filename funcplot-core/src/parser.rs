//! Recursive-descent parser.
//!
//! One token of lookahead, no backtracking. The grammar:
//!
//! ```text
//! Program     → { Statement ';' }
//! Statement   → OriginStmt | ScaleStmt | RotStmt | StyleStmt | ForStmt
//! OriginStmt  → 'ORIGIN' 'IS' '(' Expr ',' Expr ')'
//! ScaleStmt   → 'SCALE'  'IS' '(' Expr ',' Expr ')'
//! RotStmt     → 'ROT'    'IS' Expr
//! StyleStmt   → 'STYLE'  'IS' StyleValue
//! ForStmt     → 'FOR' 'T' 'FROM' Expr 'TO' Expr 'STEP' Expr 'DRAW' '(' Expr ',' Expr ')'
//! StyleValue  → Color | Number | '(' Color [ ',' Number [ ',' Number ] ] ')'
//! Expr        → Term { ('+' | '-') Term }
//! Term        → Factor { ('*' | '/') Factor }
//! Factor      → ('+' | '-') Factor | Component
//! Component   → Atom [ '**' Factor ]
//! Atom        → Number | 'T' | Function '(' Expr ')' | '(' Expr ')'
//! ```
//!
//! Unary signs become `0 + x` and `0 - x`. Because the exponent of `**` is
//! a `Factor`, `**` is right-associative and accepts a signed exponent.
//!
//! Expression nesting is capped at [`MAX_DEPTH`] levels. Each bracket,
//! call, sign, exponent and chained `+ - * /` counts as one level, so the
//! tree handed to the evaluator is never deeper than the cap.
//!
//! The parser hands out one statement at a time through
//! [`Parser::next_statement`], so a caller can execute each statement
//! before the next one is read.

use funcplot_graphics::types::Scalar;

use crate::ast::{BinOp, Expr, Statement, StyleValue};
use crate::error::{ErrorKind, InterpResult, InterpreterError};
use crate::scanner::Scanner;
use crate::token::{Span, Token, TokenKind};

/// Deepest expression nesting the parser accepts.
pub const MAX_DEPTH: usize = 256;

/// Statement parser over one program source.
pub struct Parser {
    scanner: Scanner,
    /// The lookahead token.
    current: Token,
    /// Whether `T` may appear in the expression being parsed.
    param_bound: bool,
    /// Span of the last statement returned, including its `;`.
    statement_span: Span,
    /// Current expression nesting.
    depth: usize,
}

impl Parser {
    /// Create a parser and fetch the first token.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut scanner = Scanner::new(source);
        let current = scanner.next_token();
        Self {
            scanner,
            current,
            param_bound: false,
            statement_span: Span::at(0),
            depth: 0,
        }
    }

    /// Parse every statement of `source`.
    pub fn parse_program(source: &str) -> InterpResult<Vec<Statement>> {
        let mut parser = Self::new(source);
        let mut statements = Vec::new();
        while let Some(stmt) = parser.next_statement()? {
            statements.push(stmt);
        }
        Ok(statements)
    }

    /// Parse the next `Statement ';'`, or return `None` at end of input.
    pub fn next_statement(&mut self) -> InterpResult<Option<Statement>> {
        check_lexical(&self.current)?;
        if self.current.kind.is_eof() {
            return Ok(None);
        }
        let start = self.current.span.start;
        let stmt = self.statement()?;
        if !self.at(TokenKind::Semicolon) {
            return Err(self.unexpected(TokenKind::Semicolon.describe()));
        }
        self.statement_span = Span::new(start, self.current.span.end);
        // Lexical errors in the lookahead surface on the next call, after
        // this statement has run.
        self.current = self.scanner.next_token();
        Ok(Some(stmt))
    }

    /// Span of the statement most recently returned by
    /// [`Self::next_statement`].
    #[must_use]
    pub const fn statement_span(&self) -> Span {
        self.statement_span
    }

    // -- token plumbing --

    fn advance(&mut self) -> InterpResult<()> {
        self.current = self.scanner.next_token();
        check_lexical(&self.current)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current.kind.same_kind(&kind)
    }

    /// Consume a token of the given kind (payload ignored).
    fn expect(&mut self, kind: TokenKind) -> InterpResult<()> {
        if self.at(kind) {
            self.advance()
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    fn unexpected(&self, expected: &str) -> InterpreterError {
        self.error(
            ErrorKind::UnexpectedToken,
            format!("expected {expected}, found {}", self.current),
        )
    }

    fn error(&self, kind: ErrorKind, message: String) -> InterpreterError {
        InterpreterError::new(kind, message).with_span(self.current.span)
    }

    /// Go one nesting level deeper, failing past [`MAX_DEPTH`].
    fn descend(&mut self) -> InterpResult<()> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(
                ErrorKind::Overflow,
                format!("expression nested deeper than {MAX_DEPTH} levels"),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    /// Parse with `f` one level deeper.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> InterpResult<T>) -> InterpResult<T> {
        self.descend()?;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // -- statements --

    fn statement(&mut self) -> InterpResult<Statement> {
        match self.current.kind {
            TokenKind::Origin => {
                self.advance()?;
                self.expect(TokenKind::Is)?;
                let (x, y) = self.pair()?;
                Ok(Statement::Origin { x, y })
            }
            TokenKind::Scale => {
                self.advance()?;
                self.expect(TokenKind::Is)?;
                let (x, y) = self.pair()?;
                Ok(Statement::Scale { x, y })
            }
            TokenKind::Rot => {
                self.advance()?;
                self.expect(TokenKind::Is)?;
                Ok(Statement::Rot(self.expr()?))
            }
            TokenKind::Style => {
                self.advance()?;
                self.expect(TokenKind::Is)?;
                Ok(Statement::Style(self.style_value()?))
            }
            TokenKind::For => self.for_statement(),
            _ => Err(self.unexpected("ORIGIN, SCALE, ROT, STYLE or FOR")),
        }
    }

    fn for_statement(&mut self) -> InterpResult<Statement> {
        self.advance()?;
        self.expect(TokenKind::Param)?;
        self.expect(TokenKind::From)?;
        let start = self.expr()?;
        self.expect(TokenKind::To)?;
        let end = self.expr()?;
        self.expect(TokenKind::Step)?;
        let step = self.expr()?;
        self.expect(TokenKind::Draw)?;

        self.param_bound = true;
        let pair = self.pair();
        self.param_bound = false;
        let (x, y) = pair?;

        Ok(Statement::For {
            start,
            end,
            step,
            x,
            y,
        })
    }

    /// `'(' Expr ',' Expr ')'`
    fn pair(&mut self) -> InterpResult<(Expr, Expr)> {
        self.expect(TokenKind::LParen)?;
        let x = self.expr()?;
        self.expect(TokenKind::Comma)?;
        let y = self.expr()?;
        self.expect(TokenKind::RParen)?;
        Ok((x, y))
    }

    // -- style values --

    fn style_value(&mut self) -> InterpResult<StyleValue> {
        match self.current.kind {
            TokenKind::Color(color) => {
                self.advance()?;
                Ok(StyleValue {
                    color: Some(color),
                    ..StyleValue::default()
                })
            }
            TokenKind::Const(_) | TokenKind::Plus | TokenKind::Minus => {
                let width = self.line_width()?;
                Ok(StyleValue {
                    line_width: Some(width),
                    ..StyleValue::default()
                })
            }
            TokenKind::LParen => {
                self.advance()?;
                let TokenKind::Color(color) = self.current.kind else {
                    return Err(self.error(
                        ErrorKind::InvalidStyle,
                        format!("expected a color name, found {}", self.current),
                    ));
                };
                self.advance()?;
                let mut value = StyleValue {
                    color: Some(color),
                    ..StyleValue::default()
                };
                if self.at(TokenKind::Comma) {
                    self.advance()?;
                    value.opacity = Some(self.opacity()?);
                    if self.at(TokenKind::Comma) {
                        self.advance()?;
                        value.line_width = Some(self.line_width()?);
                    }
                }
                self.expect(TokenKind::RParen)?;
                Ok(value)
            }
            _ => Err(self.error(
                ErrorKind::InvalidStyle,
                format!("expected a color, a number or `(`, found {}", self.current),
            )),
        }
    }

    fn opacity(&mut self) -> InterpResult<Scalar> {
        let (value, span) = self.signed_number()?;
        if (0.0..=1.0).contains(&value) {
            Ok(value)
        } else {
            Err(InterpreterError::new(
                ErrorKind::OutOfRange,
                format!("opacity must be between 0 and 1, got {value}"),
            )
            .with_span(span))
        }
    }

    fn line_width(&mut self) -> InterpResult<Scalar> {
        let (value, span) = self.signed_number()?;
        if value >= 0.0 {
            Ok(value)
        } else {
            Err(InterpreterError::new(
                ErrorKind::OutOfRange,
                format!("line width must not be negative, got {value}"),
            )
            .with_span(span))
        }
    }

    /// `['+' | '-'] Number`, with the span covering the sign.
    fn signed_number(&mut self) -> InterpResult<(Scalar, Span)> {
        let start = self.current.span.start;
        let mut sign = 1.0;
        match self.current.kind {
            TokenKind::Minus => {
                sign = -1.0;
                self.advance()?;
            }
            TokenKind::Plus => self.advance()?,
            _ => {}
        }
        let TokenKind::Const(value) = self.current.kind else {
            return Err(self.error(
                ErrorKind::InvalidStyle,
                format!("expected a number, found {}", self.current),
            ));
        };
        let span = Span::new(start, self.current.span.end);
        self.advance()?;
        Ok((sign * value, span))
    }

    // -- expressions --

    fn expr(&mut self) -> InterpResult<Expr> {
        let outer = self.depth;
        let result = self.expr_chain();
        self.depth = outer;
        result
    }

    /// `Term { ('+' | '-') Term }`; every fold deepens the left spine.
    fn expr_chain(&mut self) -> InterpResult<Expr> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => return Ok(lhs),
            };
            self.descend()?;
            self.advance()?;
            let rhs = self.term()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn term(&mut self) -> InterpResult<Expr> {
        let outer = self.depth;
        let result = self.term_chain();
        self.depth = outer;
        result
    }

    fn term_chain(&mut self) -> InterpResult<Expr> {
        let mut lhs = self.factor()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Mul => BinOp::Mul,
                TokenKind::Div => BinOp::Div,
                _ => return Ok(lhs),
            };
            self.descend()?;
            self.advance()?;
            let rhs = self.factor()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
    }

    fn factor(&mut self) -> InterpResult<Expr> {
        let op = match self.current.kind {
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            _ => return self.component(),
        };
        let operand = self.nested(|p| {
            p.advance()?;
            p.factor()
        })?;
        Ok(Expr::binary(op, Expr::Const(0.0), operand))
    }

    fn component(&mut self) -> InterpResult<Expr> {
        let base = self.atom()?;
        if !self.at(TokenKind::Power) {
            return Ok(base);
        }
        let exponent = self.nested(|p| {
            p.advance()?;
            p.factor()
        })?;
        Ok(Expr::binary(BinOp::Pow, base, exponent))
    }

    fn atom(&mut self) -> InterpResult<Expr> {
        match self.current.kind {
            TokenKind::Const(value) => {
                self.advance()?;
                Ok(Expr::Const(value))
            }
            TokenKind::Param => {
                if !self.param_bound {
                    return Err(self.error(
                        ErrorKind::UnboundParameter,
                        "T can only be used inside DRAW (x, y)".into(),
                    ));
                }
                self.advance()?;
                Ok(Expr::Param)
            }
            TokenKind::Func(func) => self.nested(|p| {
                p.advance()?;
                p.expect(TokenKind::LParen)?;
                let arg = p.expr()?;
                p.expect(TokenKind::RParen)?;
                Ok(Expr::call(func, arg))
            }),
            TokenKind::LParen => self.nested(|p| {
                p.advance()?;
                let inner = p.expr()?;
                p.expect(TokenKind::RParen)?;
                Ok(inner)
            }),
            _ => Err(self.unexpected("an expression")),
        }
    }
}

/// Report an `Error` token as a lexical error.
fn check_lexical(tok: &Token) -> InterpResult<()> {
    if let TokenKind::Error(err) = tok.kind {
        Err(InterpreterError::new(err.into(), format!("{err}: {tok}")).with_span(tok.span))
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use funcplot_graphics::types::Color;

    use super::*;
    use crate::ast::UnaryFn;

    fn parse(src: &str) -> InterpResult<Vec<Statement>> {
        Parser::parse_program(src)
    }

    fn parse_err(src: &str) -> InterpreterError {
        parse(src).expect_err("expected a parse error")
    }

    /// Evaluate the angle of a single `ROT IS <expr>;`.
    fn rot_value(expr: &str) -> Scalar {
        let stmts = parse(&format!("ROT IS {expr};")).expect("parse");
        let Statement::Rot(e) = &stmts[0] else {
            panic!("expected ROT");
        };
        e.eval_const().expect("eval")
    }

    // -- precedence --

    #[test]
    fn precedence() {
        assert_eq!(rot_value("2 + 3 * 4"), 14.0);
        assert_eq!(rot_value("(2 + 3) * 4"), 20.0);
        assert_eq!(rot_value("10 - 4 - 3"), 3.0);
        assert_eq!(rot_value("24 / 4 / 3"), 2.0);
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(rot_value("2 ** 3 ** 2"), 512.0);
    }

    #[test]
    fn unary_signs() {
        assert_eq!(rot_value("- - 5"), 5.0);
        assert_eq!(rot_value("+3"), 3.0);
        assert_eq!(rot_value("-2 ** 2"), -4.0);
        assert_eq!(rot_value("2 ** -1"), 0.5);
        assert_eq!(rot_value("3 * -2"), -6.0);
    }

    #[test]
    fn unary_minus_desugars_to_subtraction() {
        let stmts = parse("ROT IS -PI;").expect("parse");
        let Statement::Rot(e) = &stmts[0] else {
            panic!("expected ROT");
        };
        assert_eq!(
            *e,
            Expr::binary(BinOp::Sub, Expr::Const(0.0), Expr::Const(std::f64::consts::PI))
        );
    }

    #[test]
    fn function_calls() {
        assert!((rot_value("cos(0) + sqrt(16)") - 5.0).abs() < 1e-12);
        assert!((rot_value("ln(e)") - 1.0).abs() < 1e-12);
    }

    // -- statements --

    #[test]
    fn all_statement_forms() {
        let stmts = parse(
            "origin is (100, 200);
             scale is (2, 3);
             rot is pi/2;
             style is red;
             for t from 0 to 1 step 0.5 draw (t, t*t);",
        )
        .expect("parse");
        assert_eq!(stmts.len(), 5);
        assert!(matches!(stmts[0], Statement::Origin { .. }));
        assert!(matches!(stmts[1], Statement::Scale { .. }));
        assert!(matches!(stmts[2], Statement::Rot(_)));
        assert!(matches!(stmts[3], Statement::Style(_)));
        let Statement::For { x, y, .. } = &stmts[4] else {
            panic!("expected FOR");
        };
        assert_eq!(*x, Expr::Param);
        assert!(y.uses_param());
    }

    #[test]
    fn empty_program() {
        assert_eq!(parse("").expect("parse"), vec![]);
        assert_eq!(parse("  -- only a comment\n").expect("parse"), vec![]);
    }

    #[test]
    fn statement_span_covers_semicolon() {
        let mut p = Parser::new("ROT IS 1;  ROT IS 2;");
        p.next_statement().expect("first").expect("some");
        assert_eq!(p.statement_span(), Span::new(0, 9));
        p.next_statement().expect("second").expect("some");
        assert_eq!(p.statement_span(), Span::new(11, 20));
        assert_eq!(p.next_statement().expect("end"), None);
    }

    // -- style values --

    fn style_of(src: &str) -> StyleValue {
        let stmts = parse(src).expect("parse");
        let Statement::Style(v) = stmts[0] else {
            panic!("expected STYLE");
        };
        v
    }

    #[test]
    fn style_forms() {
        assert_eq!(
            style_of("STYLE IS BLUE;"),
            StyleValue {
                color: Some(Color::BLUE),
                ..StyleValue::default()
            }
        );
        assert_eq!(
            style_of("STYLE IS 3;"),
            StyleValue {
                line_width: Some(3.0),
                ..StyleValue::default()
            }
        );
        assert_eq!(
            style_of("STYLE IS (GREEN, 0.5);"),
            StyleValue {
                color: Some(Color::GREEN),
                opacity: Some(0.5),
                line_width: None,
            }
        );
        assert_eq!(
            style_of("STYLE IS (WHITE, 0.25, 4);"),
            StyleValue {
                color: Some(Color::WHITE),
                opacity: Some(0.25),
                line_width: Some(4.0),
            }
        );
    }

    #[test]
    fn style_out_of_range() {
        let err = parse_err("STYLE IS (RED, 1.5);");
        assert_eq!(err.kind, ErrorKind::OutOfRange);
        assert_eq!(err.span, Some(Span::new(15, 18)));

        assert_eq!(parse_err("STYLE IS -1;").kind, ErrorKind::OutOfRange);
        assert_eq!(parse_err("STYLE IS (RED, 1, -2);").kind, ErrorKind::OutOfRange);
    }

    #[test]
    fn style_syntax_errors() {
        assert_eq!(parse_err("STYLE IS (1, 2);").kind, ErrorKind::InvalidStyle);
        assert_eq!(parse_err("STYLE IS SIN;").kind, ErrorKind::InvalidStyle);
        assert_eq!(parse_err("STYLE IS (RED, BLUE);").kind, ErrorKind::InvalidStyle);
        assert_eq!(parse_err("STYLE IS (RED;").kind, ErrorKind::UnexpectedToken);
    }

    // -- errors --

    #[test]
    fn missing_semicolon() {
        let err = parse_err("ROT IS 1");
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
        assert!(err.message.contains("`;`"), "{}", err.message);
        assert!(err.message.contains("end of input"), "{}", err.message);
    }

    #[test]
    fn unknown_identifier_is_syntax_error() {
        let err = parse_err("ROT IS FOO;");
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
        assert!(err.message.contains("`FOO`"), "{}", err.message);
        assert_eq!(err.span, Some(Span::new(7, 10)));
    }

    #[test]
    fn bad_statement_start() {
        let err = parse_err("DRAW (1, 2);");
        assert_eq!(err.kind, ErrorKind::UnexpectedToken);
    }

    #[test]
    fn function_requires_parens() {
        assert_eq!(parse_err("ROT IS SIN 1;").kind, ErrorKind::UnexpectedToken);
    }

    #[test]
    fn lexical_error_reported_on_fetch() {
        let err = parse_err("ROT IS 1 @ 2;");
        assert_eq!(err.kind, ErrorKind::InvalidCharacter);
        assert_eq!(err.span, Some(Span::new(9, 10)));

        assert_eq!(parse_err("$").kind, ErrorKind::InvalidCharacter);
        assert_eq!(parse_err("ROT IS 1; /* open").kind, ErrorKind::UnterminatedComment);
    }

    #[test]
    fn param_outside_draw() {
        for src in [
            "ORIGIN IS (T, 0);",
            "SCALE IS (1, T);",
            "ROT IS T;",
            "FOR T FROM T TO 1 STEP 1 DRAW (T, T);",
            "FOR T FROM 0 TO 1 STEP T DRAW (T, T);",
        ] {
            assert_eq!(parse_err(src).kind, ErrorKind::UnboundParameter, "{src}");
        }
    }

    #[test]
    fn param_unbound_again_after_draw() {
        let err = parse_err("FOR T FROM 0 TO 1 STEP 1 DRAW (T, T); ROT IS T;");
        assert_eq!(err.kind, ErrorKind::UnboundParameter);
    }

    #[test]
    fn first_error_stops_parsing() {
        let mut p = Parser::new("ROT IS 1; ROT IS ; ROT IS 2;");
        assert!(p.next_statement().expect("first").is_some());
        assert!(p.next_statement().is_err());
    }

    // -- nesting limit --

    fn nested_parens(levels: usize) -> String {
        format!("ROT IS {}1{};", "(".repeat(levels), ")".repeat(levels))
    }

    #[test]
    fn nesting_up_to_the_limit_parses() {
        let stmts = parse(&nested_parens(MAX_DEPTH)).expect("parse");
        let Statement::Rot(e) = &stmts[0] else {
            panic!("expected ROT");
        };
        assert_eq!(e.eval_const(), Ok(1.0));
    }

    #[test]
    fn deep_nesting_is_an_error() {
        let err = parse_err(&nested_parens(MAX_DEPTH + 1));
        assert_eq!(err.kind, ErrorKind::Overflow);
        assert_eq!(err.kind.class(), crate::error::ErrorClass::Semantic);

        assert_eq!(parse_err(&nested_parens(50_000)).kind, ErrorKind::Overflow);
        let calls = format!("ROT IS {}1{};", "SIN(".repeat(2000), ")".repeat(2000));
        assert_eq!(parse_err(&calls).kind, ErrorKind::Overflow);
        let signs = format!("ROT IS {}1;", "- ".repeat(2000));
        assert_eq!(parse_err(&signs).kind, ErrorKind::Overflow);
        let powers = format!("ROT IS 1{};", " ** 1".repeat(2000));
        assert_eq!(parse_err(&powers).kind, ErrorKind::Overflow);
    }

    #[test]
    fn long_operator_chains() {
        assert_eq!(rot_value(&vec!["1"; 100].join(" + ")), 100.0);

        let sum = format!(
            "FOR T FROM 0 TO 1 STEP 1 DRAW (T, {});",
            vec!["1"; 20_000].join("+")
        );
        assert_eq!(parse_err(&sum).kind, ErrorKind::Overflow);
        let product = format!("ROT IS {};", vec!["2"; 20_000].join(" * "));
        assert_eq!(parse_err(&product).kind, ErrorKind::Overflow);
    }

    #[test]
    fn sibling_groups_do_not_add_up() {
        let group = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        let src = format!("SCALE IS ({group} + {group} * {group}, {group});");
        let stmts = parse(&src).expect("parse");
        let Statement::Scale { x, y } = &stmts[0] else {
            panic!("expected SCALE");
        };
        assert_eq!(x.eval_const(), Ok(2.0));
        assert_eq!(y.eval_const(), Ok(1.0));
    }

    #[test]
    fn nested_calls() {
        let stmts = parse("FOR T FROM 0 TO 1 STEP 1 DRAW (SIN(COS(T)), EXP(T));").expect("parse");
        let Statement::For { x, .. } = &stmts[0] else {
            panic!("expected FOR");
        };
        assert_eq!(
            *x,
            Expr::call(UnaryFn::Sin, Expr::call(UnaryFn::Cos, Expr::Param))
        );
    }
}
