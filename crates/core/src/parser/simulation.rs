use super::Parser;
use crate::error::{Position, ValidationError};
use crate::keywords::Keyword;
use crate::lexer::TokenKind;
use crate::model::{Query, Transaction};

impl<'a> Parser<'a> {
    /// simulation := 'SIMULATE' '{' tx_block query* '}'
    pub(super) fn parse_simulation(&mut self) -> Result<(), ValidationError> {
        self.expect_keyword(Keyword::Simulate)?;
        self.skip_newlines();
        self.expect_lbrace()?;
        self.skip_newlines();

        self.parse_transaction_block()?;
        self.skip_newlines();

        while self.at_query() {
            let query = self.parse_query()?;
            self.fin()?;
            self.skip_newlines();
            tracing::trace!(?query, "query accepted");
            self.queries += 1;
        }

        self.expect_rbrace()
    }

    /// tx_block := 'TRANSACTIONS' ':' '[' tx_list? ']' fin
    fn parse_transaction_block(&mut self) -> Result<(), ValidationError> {
        self.expect_keyword(Keyword::Transactions)?;
        self.expect_colon()?;
        self.expect(TokenKind::LBracket, "'['")?;
        self.skip_newlines();

        if !self.at(TokenKind::RBracket) {
            self.parse_transaction_list()?;
        }

        self.skip_newlines();
        self.expect(TokenKind::RBracket, "']'")?;
        self.fin()
    }

    /// tx_list := tx (',' tx)*
    fn parse_transaction_list(&mut self) -> Result<(), ValidationError> {
        self.parse_transaction()?;
        while self.at(TokenKind::Comma) {
            self.advance();
            self.skip_newlines();
            self.parse_transaction()?;
        }
        Ok(())
    }

    /// tx := 'WITHDRAW' '(' ID ',' INT ')' | 'RESTOCK' '(' ID ',' INT ')' | 'COUNT' '(' ID ')'
    fn parse_transaction(&mut self) -> Result<(), ValidationError> {
        let keyword = match self.peek() {
            TokenKind::Keyword(kw @ (Keyword::Withdraw | Keyword::Restock | Keyword::Count)) => kw,
            _ => {
                return Err(self.err(format!(
                    "{}, {} or {}",
                    self.spell(Keyword::Withdraw),
                    self.spell(Keyword::Restock),
                    self.spell(Keyword::Count)
                )))
            }
        };
        self.advance();
        self.expect_lparen()?;
        let (product, product_at) = self.take_ident()?;

        let (tx, qty_at) = if keyword == Keyword::Count {
            (Transaction::Count { product }, product_at)
        } else {
            self.expect(TokenKind::Comma, "','")?;
            let (qty, qty_at) = self.take_int()?;
            let tx = if keyword == Keyword::Withdraw {
                Transaction::Withdraw { product, qty }
            } else {
                Transaction::Restock { product, qty }
            };
            (tx, qty_at)
        };
        self.expect_rparen()?;

        self.check_transaction(&tx, product_at, qty_at)?;
        tracing::trace!(?tx, "transaction accepted");
        self.transactions += 1;
        Ok(())
    }

    /// Cross-reference and quantity rules for one transaction entry.
    fn check_transaction(
        &self,
        tx: &Transaction,
        product_at: Position,
        qty_at: Position,
    ) -> Result<(), ValidationError> {
        self.symbols.require_product(tx.product(), product_at)?;
        if tx.quantity() <= 0 {
            return Err(ValidationError::semantic(
                qty_at,
                format!("quantity must be greater than 0, found {}", tx.quantity()),
            ));
        }
        Ok(())
    }

    fn at_query(&self) -> bool {
        self.at_keyword(Keyword::Status)
            || self.at_keyword(Keyword::Statistics)
            || self.at_keyword(Keyword::Report)
    }

    /// query := 'STATUS' | 'STATISTICS' | 'REPORT' '(' STRING ')'
    fn parse_query(&mut self) -> Result<Query, ValidationError> {
        match self.peek() {
            TokenKind::Keyword(Keyword::Status) => {
                self.advance();
                Ok(Query::Status)
            }
            TokenKind::Keyword(Keyword::Statistics) => {
                self.advance();
                Ok(Query::Statistics)
            }
            TokenKind::Keyword(Keyword::Report) => {
                self.advance();
                self.expect_lparen()?;
                let name = self.take_str()?;
                self.expect_rparen()?;
                Ok(Query::Report(name))
            }
            _ => Err(self.err(format!(
                "{}, {} or {}",
                self.spell(Keyword::Status),
                self.spell(Keyword::Statistics),
                self.spell(Keyword::Report)
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{check, MINIMAL};
    use crate::error::{ErrorKind, Position};

    fn with_transactions(list: &str) -> String {
        MINIMAL.replace("[RESTOCK(p1, 5)]", list)
    }

    #[test]
    fn all_transaction_forms_are_accepted() {
        let src = with_transactions("[\n      WITHDRAW(p1, 2),\n      RESTOCK(p1, 5),\n      COUNT(p1)\n    ]");
        let summary = check(&src).unwrap();
        assert_eq!(summary.transactions, 3);
    }

    #[test]
    fn undefined_product_is_rejected_at_that_entry() {
        let src = with_transactions("[RESTOCK(p1, 5), WITHDRAW(p2, 1), COUNT(p1)]");
        let err = check(&src).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Semantic);
        assert_eq!(
            err.message(),
            "transaction references undefined product 'p2'"
        );
        assert_eq!(err.position(), Position::new(12, 45));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let err = check(&with_transactions("[WITHDRAW(p1, 0)]")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Semantic);
        assert_eq!(err.message(), "quantity must be greater than 0, found 0");
        assert_eq!(err.position(), Position::new(12, 33));
    }

    #[test]
    fn undefined_product_wins_over_bad_quantity() {
        let err = check(&with_transactions("[RESTOCK(ghost, -4)]")).unwrap_err();
        assert_eq!(
            err.message(),
            "transaction references undefined product 'ghost'"
        );
    }

    #[test]
    fn count_never_fails_quantity_check() {
        assert!(check(&with_transactions("[COUNT(p1)]")).is_ok());
    }

    #[test]
    fn trailing_comma_is_rejected() {
        let err = check(&with_transactions("[COUNT(p1),]")).unwrap_err();
        assert_eq!(
            err.message(),
            "expected 'WITHDRAW', 'RESTOCK' or 'COUNT', found ']'"
        );
    }

    #[test]
    fn transaction_block_needs_terminator() {
        let src = MINIMAL.replace("[RESTOCK(p1, 5)]\n    STATUS", "[RESTOCK(p1, 5)] STATUS");
        let err = check(&src).unwrap_err();
        assert_eq!(
            err.message(),
            "expected ';' or end of line, found reserved word 'STATUS'"
        );
    }

    #[test]
    fn all_query_forms_are_accepted() {
        let src = MINIMAL.replace(
            "    STATUS\n",
            "    STATUS;\n    STATISTICS\n\n    REPORT(\"low \\\"stock\\\"\");\n",
        );
        let summary = check(&src).unwrap();
        assert_eq!(summary.queries, 3);
    }

    #[test]
    fn report_requires_string() {
        let src = MINIMAL.replace("    STATUS\n", "    REPORT(daily)\n");
        let err = check(&src).unwrap_err();
        assert_eq!(
            err.message(),
            "expected string literal, found identifier 'daily'"
        );
    }

    #[test]
    fn query_needs_terminator_before_closing_brace() {
        let src = MINIMAL.replace("    STATUS\n}", "    STATUS }");
        let err = check(&src).unwrap_err();
        assert_eq!(err.message(), "expected ';' or end of line, found '}'");
    }

    #[test]
    fn transactions_must_come_first() {
        let src = MINIMAL.replace(
            "    TRANSACTIONS: [RESTOCK(p1, 5)]\n    STATUS\n",
            "    STATUS\n    TRANSACTIONS: [RESTOCK(p1, 5)]\n",
        );
        let err = check(&src).unwrap_err();
        assert_eq!(
            err.message(),
            "expected 'TRANSACTIONS', found reserved word 'STATUS'"
        );
    }
}
