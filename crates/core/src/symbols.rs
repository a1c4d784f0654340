//! Symbol table: carousel and product identifiers declared so far.
//!
//! Owned by a single parse. Product ids share one program-wide namespace even
//! though products are declared inside a carousel body.

use crate::error::{Position, ValidationError};
use crate::keywords::Dialect;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct SymbolTable {
    dialect: Dialect,
    carousels: HashMap<String, Position>,
    products: HashMap<String, Position>,
}

impl SymbolTable {
    pub fn new(dialect: Dialect) -> Self {
        SymbolTable {
            dialect,
            ..Default::default()
        }
    }

    pub fn declare_carousel(&mut self, id: &str, at: Position) -> Result<(), ValidationError> {
        self.check_not_reserved(id, at)?;
        if let Some(first) = self.carousels.get(id) {
            return Err(ValidationError::semantic(
                at,
                format!("carousel '{}' is already defined at {}", id, first),
            ));
        }
        self.carousels.insert(id.to_owned(), at);
        Ok(())
    }

    pub fn declare_product(&mut self, id: &str, at: Position) -> Result<(), ValidationError> {
        self.check_not_reserved(id, at)?;
        if let Some(first) = self.products.get(id) {
            return Err(ValidationError::semantic(
                at,
                format!("product '{}' is already defined at {}", id, first),
            ));
        }
        self.products.insert(id.to_owned(), at);
        Ok(())
    }

    /// A transaction may only name a product declared earlier in the program.
    pub fn require_product(&self, id: &str, at: Position) -> Result<(), ValidationError> {
        if self.products.contains_key(id) {
            Ok(())
        } else {
            Err(ValidationError::semantic(
                at,
                format!("transaction references undefined product '{}'", id),
            ))
        }
    }

    pub fn carousel_count(&self) -> usize {
        self.carousels.len()
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    // The lexer already turns reserved words into keyword tokens, so this only
    // fires if an identifier reaches the table by some other route.
    fn check_not_reserved(&self, id: &str, at: Position) -> Result<(), ValidationError> {
        if self.dialect.is_reserved(id) {
            return Err(ValidationError::semantic(
                at,
                format!("'{}' is a reserved word and cannot be used as an identifier", id),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_product_cites_first_declaration() {
        let mut table = SymbolTable::new(Dialect::English);
        table.declare_product("p1", Position::new(3, 13)).unwrap();
        let err = table
            .declare_product("p1", Position::new(9, 13))
            .unwrap_err();
        assert_eq!(err.position(), Position::new(9, 13));
        assert_eq!(
            err.message(),
            "product 'p1' is already defined at line 3, column 13"
        );
    }

    #[test]
    fn carousels_and_products_are_separate_namespaces() {
        let mut table = SymbolTable::new(Dialect::English);
        table.declare_carousel("x", Position::new(1, 11)).unwrap();
        table.declare_product("x", Position::new(2, 11)).unwrap();
        assert_eq!(table.carousel_count(), 1);
        assert_eq!(table.product_count(), 1);
    }

    #[test]
    fn reserved_word_is_rejected() {
        let mut table = SymbolTable::new(Dialect::Spanish);
        let err = table
            .declare_carousel("ESTADO", Position::new(1, 10))
            .unwrap_err();
        assert!(matches!(err, ValidationError::Semantic { .. }));
        assert!(table.declare_carousel("STATUS", Position::new(2, 10)).is_ok());
    }

    #[test]
    fn undefined_product_reference() {
        let mut table = SymbolTable::new(Dialect::English);
        table.declare_product("p1", Position::new(1, 1)).unwrap();
        assert!(table.require_product("p1", Position::new(5, 12)).is_ok());
        let err = table
            .require_product("p2", Position::new(5, 12))
            .unwrap_err();
        assert_eq!(
            err.message(),
            "transaction references undefined product 'p2'"
        );
    }
}
