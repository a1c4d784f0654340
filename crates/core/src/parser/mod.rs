//! Recursive-descent acceptor with inline semantic checks.
//!
//! One method per grammar production. The cursor only moves forward and every
//! decision looks at the current token alone. Semantic rules run as soon as
//! the tokens they depend on have been consumed, against a `SymbolTable` the
//! parser owns for the duration of one run. Nothing is kept afterwards except
//! the counts in [`Summary`].
//!
//! Recursion depth is fixed by the grammar (it has no self-recursive
//! productions); input size only affects loop iterations.

use crate::error::{Position, ValidationError};
use crate::keywords::{Dialect, Keyword};
use crate::lexer::{Token, TokenKind};
use crate::symbols::SymbolTable;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

mod definitions;
mod simulation;

/// What an accepted program contained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub carousels: usize,
    pub products: usize,
    pub transactions: usize,
    pub queries: usize,
}

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    dialect: Dialect,
    symbols: SymbolTable,
    transactions: usize,
    queries: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], dialect: Dialect) -> Self {
        Parser {
            tokens,
            pos: 0,
            dialect,
            symbols: SymbolTable::new(dialect),
            transactions: 0,
            queries: 0,
        }
    }

    fn cur(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> TokenKind {
        self.cur().kind
    }

    fn advance(&mut self) -> &'a Token {
        let tokens = self.tokens;
        let t = &tokens[self.pos.min(tokens.len() - 1)];
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        t
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    fn at_keyword(&self, kw: Keyword) -> bool {
        self.at(TokenKind::Keyword(kw))
    }

    /// `'KW'` quoted in the active dialect, for error messages.
    fn spell(&self, kw: Keyword) -> String {
        format!("'{}'", self.dialect.spelling(kw))
    }

    fn err(&self, expected: impl Into<String>) -> ValidationError {
        let tok = self.cur();
        ValidationError::syntax(tok.position(), expected, tok.to_string())
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<&'a Token, ValidationError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.err(what))
        }
    }

    fn expect_keyword(&mut self, kw: Keyword) -> Result<(), ValidationError> {
        if self.at_keyword(kw) {
            self.advance();
            Ok(())
        } else {
            Err(self.err(self.spell(kw)))
        }
    }

    fn expect_colon(&mut self) -> Result<(), ValidationError> {
        self.expect(TokenKind::Colon, "':'").map(|_| ())
    }

    fn expect_lbrace(&mut self) -> Result<(), ValidationError> {
        self.expect(TokenKind::LBrace, "'{'").map(|_| ())
    }

    fn expect_rbrace(&mut self) -> Result<(), ValidationError> {
        self.expect(TokenKind::RBrace, "'}'").map(|_| ())
    }

    fn expect_lparen(&mut self) -> Result<(), ValidationError> {
        self.expect(TokenKind::LParen, "'('").map(|_| ())
    }

    fn expect_rparen(&mut self) -> Result<(), ValidationError> {
        self.expect(TokenKind::RParen, "')'").map(|_| ())
    }

    fn take_ident(&mut self) -> Result<(String, Position), ValidationError> {
        let tok = self.expect(TokenKind::Ident, "identifier")?;
        Ok((tok.lexeme.clone(), tok.position()))
    }

    fn take_int(&mut self) -> Result<(i64, Position), ValidationError> {
        let tok = self.expect(TokenKind::Int, "integer")?;
        let n = tok.lexeme.parse::<i64>().map_err(|_| {
            ValidationError::lexical(
                tok.position(),
                format!("integer literal {} is out of range", tok.lexeme),
            )
        })?;
        Ok((n, tok.position()))
    }

    fn take_decimal(&mut self) -> Result<(Decimal, Position), ValidationError> {
        let tok = self.expect(TokenKind::Decimal, "decimal")?;
        let d = Decimal::from_str(&tok.lexeme).map_err(|_| {
            ValidationError::lexical(
                tok.position(),
                format!("decimal literal {} is out of range", tok.lexeme),
            )
        })?;
        Ok((d, tok.position()))
    }

    fn take_str(&mut self) -> Result<String, ValidationError> {
        let tok = self.expect(TokenKind::Str, "string literal")?;
        Ok(tok.lexeme.clone())
    }

    // -- Statement separators ------------------------------------

    /// skip_nl := NL*
    fn skip_newlines(&mut self) {
        while self.at(TokenKind::Newline) {
            self.advance();
        }
    }

    /// fin := ';' NL* | NL+
    fn fin(&mut self) -> Result<(), ValidationError> {
        match self.peek() {
            TokenKind::Semi => {
                self.advance();
                self.skip_newlines();
                Ok(())
            }
            TokenKind::Newline => {
                self.skip_newlines();
                Ok(())
            }
            _ => Err(self.err("';' or end of line")),
        }
    }

    // -- Top level ------------------------------------------------

    /// program := skip_nl carousel_def* skip_nl simulation skip_nl EOF
    fn parse_program(&mut self) -> Result<Summary, ValidationError> {
        self.skip_newlines();
        while self.at_keyword(Keyword::Carousel) {
            let carousel = self.parse_carousel()?;
            tracing::debug!(
                id = %carousel.id,
                slots = carousel.slots,
                capacity = carousel.capacity,
                products = carousel.catalog.len(),
                "carousel accepted"
            );
        }
        self.skip_newlines();
        self.parse_simulation()?;
        self.skip_newlines();
        self.expect(TokenKind::Eof, "end of input")?;

        Ok(Summary {
            carousels: self.symbols.carousel_count(),
            products: self.symbols.product_count(),
            transactions: self.transactions,
            queries: self.queries,
        })
    }
}

/// Run the acceptor over a token stream produced by [`crate::lexer::lex`].
///
/// Returns the first syntax or semantic error, or a [`Summary`] of the
/// accepted program.
pub fn parse(tokens: &[Token], dialect: Dialect) -> Result<Summary, ValidationError> {
    match tokens.last() {
        Some(last) if last.kind == TokenKind::Eof => {}
        Some(last) => {
            return Err(ValidationError::syntax(
                last.position(),
                "end of input",
                last.to_string(),
            ))
        }
        None => {
            return Err(ValidationError::syntax(
                Position::new(1, 1),
                "end of input",
                "empty token stream",
            ))
        }
    }
    let mut p = Parser::new(tokens, dialect);
    p.parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::lexer;

    pub(super) fn check(src: &str) -> Result<Summary, ValidationError> {
        let tokens = lexer::lex(src, Dialect::English)?;
        parse(&tokens, Dialect::English)
    }

    pub(super) const MINIMAL: &str = "\
CARROUSEL c1 {
    SLOTS: 5
    CAPACITY: 20
    PRODUCT p1 {
        PRICE: 1.50
        MIN: 1
        MAX: 10
        CRITICALITY: HIGH
    }
}
SIMULATE {
    TRANSACTIONS: [RESTOCK(p1, 5)]
    STATUS
}
";

    #[test]
    fn minimal_program_is_accepted() {
        let summary = check(MINIMAL).unwrap();
        assert_eq!(
            summary,
            Summary {
                carousels: 1,
                products: 1,
                transactions: 1,
                queries: 1,
            }
        );
    }

    #[test]
    fn simulation_alone_is_a_program() {
        let summary = check("SIMULATE { TRANSACTIONS: [];\n}").unwrap();
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn leading_and_trailing_blank_lines_are_ignored() {
        let src = format!("\n\n# header comment\n{}\n\n", MINIMAL);
        assert!(check(&src).is_ok());
    }

    #[test]
    fn content_after_simulation_is_rejected() {
        let src = format!("{}STATUS\n", MINIMAL);
        let err = check(&src).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.position(), Position::new(15, 1));
        assert_eq!(
            err.message(),
            "expected end of input, found reserved word 'STATUS'"
        );
    }

    #[test]
    fn missing_simulation_is_rejected() {
        let err = check("").unwrap_err();
        assert_eq!(err.message(), "expected 'SIMULATE', found end of input");
    }

    #[test]
    fn stream_without_eof_is_rejected() {
        assert!(parse(&[], Dialect::English).is_err());
    }

    #[test]
    fn fin_accepts_semicolon_newline_or_many_newlines() {
        for sep in [";", "\n", "\n\n\n", "; \n\n"] {
            let src = format!(
                "CARROUSEL c1 {{ SLOTS: 5{sep}CAPACITY: 20{sep}}}\nSIMULATE {{ TRANSACTIONS: []{sep}}}"
            );
            assert!(check(&src).is_ok(), "separator {:?} rejected", sep);
        }
    }

    #[test]
    fn fin_rejects_adjacent_statements() {
        let err = check("CARROUSEL c1 { SLOTS: 5 CAPACITY: 20;}\nSIMULATE { TRANSACTIONS: [];}")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(
            err.message(),
            "expected ';' or end of line, found reserved word 'CAPACITY'"
        );
        assert_eq!(err.position(), Position::new(1, 25));
    }
}
