use super::Parser;
use crate::error::ValidationError;
use crate::keywords::Keyword;
use crate::lexer::TokenKind;
use crate::model::{CarouselDef, Criticality, ProductDef};
use rust_decimal::Decimal;

impl<'a> Parser<'a> {
    /// carousel_def := 'CARROUSEL' ID '{' params catalog '}'
    pub(super) fn parse_carousel(&mut self) -> Result<CarouselDef, ValidationError> {
        self.expect_keyword(Keyword::Carousel)?;
        let (id, at) = self.take_ident()?;
        self.symbols.declare_carousel(&id, at)?;

        self.skip_newlines();
        self.expect_lbrace()?;
        self.skip_newlines();

        let (slots, capacity) = self.parse_params()?;
        self.skip_newlines();

        let catalog = self.parse_catalog()?;
        self.skip_newlines();

        self.expect_rbrace()?;
        self.skip_newlines();

        Ok(CarouselDef {
            id,
            slots,
            capacity,
            catalog,
        })
    }

    /// params := 'SLOTS' ':' INT fin 'CAPACITY' ':' INT fin
    fn parse_params(&mut self) -> Result<(i64, i64), ValidationError> {
        self.expect_keyword(Keyword::Slots)?;
        self.expect_colon()?;
        let (slots, at) = self.take_int()?;
        if slots <= 0 {
            return Err(ValidationError::semantic(
                at,
                format!(
                    "{} must be greater than 0, found {}",
                    self.dialect.spelling(Keyword::Slots),
                    slots
                ),
            ));
        }
        self.fin()?;

        self.expect_keyword(Keyword::Capacity)?;
        self.expect_colon()?;
        let (capacity, at) = self.take_int()?;
        if capacity <= 0 {
            return Err(ValidationError::semantic(
                at,
                format!(
                    "{} must be greater than 0, found {}",
                    self.dialect.spelling(Keyword::Capacity),
                    capacity
                ),
            ));
        }
        self.fin()?;

        Ok((slots, capacity))
    }

    /// catalog := product_def*
    fn parse_catalog(&mut self) -> Result<Vec<ProductDef>, ValidationError> {
        let mut catalog = Vec::new();
        while self.at_keyword(Keyword::Product) {
            let product = self.parse_product()?;
            tracing::debug!(
                id = %product.id,
                price = %product.price,
                min = product.min,
                max = product.max,
                criticality = ?product.criticality,
                "product accepted"
            );
            catalog.push(product);
        }
        Ok(catalog)
    }

    /// product_def := 'PRODUCT' ID '{' 'PRICE' ':' DECIMAL fin 'MIN' ':' INT fin
    ///                'MAX' ':' INT fin 'CRITICALITY' ':' criticality fin '}'
    fn parse_product(&mut self) -> Result<ProductDef, ValidationError> {
        self.expect_keyword(Keyword::Product)?;
        let (id, at) = self.take_ident()?;
        // Product ids are global, not scoped to the enclosing carousel.
        self.symbols.declare_product(&id, at)?;

        self.skip_newlines();
        self.expect_lbrace()?;
        self.skip_newlines();

        self.expect_keyword(Keyword::Price)?;
        self.expect_colon()?;
        let (price, at) = self.take_decimal()?;
        if price < Decimal::ZERO {
            return Err(ValidationError::semantic(
                at,
                format!(
                    "{} must be >= 0, found {}",
                    self.dialect.spelling(Keyword::Price),
                    price
                ),
            ));
        }
        self.fin()?;

        self.expect_keyword(Keyword::Min)?;
        self.expect_colon()?;
        let (min, _) = self.take_int()?;
        self.fin()?;

        self.expect_keyword(Keyword::Max)?;
        self.expect_colon()?;
        let (max, at) = self.take_int()?;
        if min > max {
            return Err(ValidationError::semantic(
                at,
                format!(
                    "{} must be <= {}, found {} > {}",
                    self.dialect.spelling(Keyword::Min),
                    self.dialect.spelling(Keyword::Max),
                    min,
                    max
                ),
            ));
        }
        self.fin()?;

        self.expect_keyword(Keyword::Criticality)?;
        self.expect_colon()?;
        let criticality = self.parse_criticality()?;
        self.fin()?;

        self.expect_rbrace()?;
        self.skip_newlines();

        Ok(ProductDef {
            id,
            price,
            min,
            max,
            criticality,
        })
    }

    /// criticality := 'HIGH' | 'MEDIUM' | 'LOW'
    fn parse_criticality(&mut self) -> Result<Criticality, ValidationError> {
        if let TokenKind::Keyword(kw) = self.peek() {
            if let Some(criticality) = Criticality::from_keyword(kw) {
                self.advance();
                return Ok(criticality);
            }
        }
        Err(self.err(format!(
            "{}, {} or {}",
            self.spell(Keyword::High),
            self.spell(Keyword::Medium),
            self.spell(Keyword::Low)
        )))
    }
}
