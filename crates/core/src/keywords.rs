//! Reserved words and the dialects that spell them.
//!
//! The reserved-word set is closed: each [`Dialect`] is a fixed table mapping
//! every [`Keyword`] to exactly one spelling. Matching is exact and case
//! sensitive.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Carousel,
    Product,
    Slots,
    Capacity,
    Price,
    Min,
    Max,
    Criticality,
    High,
    Medium,
    Low,
    Simulate,
    Transactions,
    Withdraw,
    Restock,
    Count,
    Status,
    Statistics,
    Report,
}

impl Keyword {
    pub const ALL: [Keyword; 19] = [
        Keyword::Carousel,
        Keyword::Product,
        Keyword::Slots,
        Keyword::Capacity,
        Keyword::Price,
        Keyword::Min,
        Keyword::Max,
        Keyword::Criticality,
        Keyword::High,
        Keyword::Medium,
        Keyword::Low,
        Keyword::Simulate,
        Keyword::Transactions,
        Keyword::Withdraw,
        Keyword::Restock,
        Keyword::Count,
        Keyword::Status,
        Keyword::Statistics,
        Keyword::Report,
    ];
}

/// Spelling of the reserved-word table. One dialect is active per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dialect {
    #[default]
    English,
    /// `CARRUSEL`, `PRODUCTO`, `ESPACIOS`, ...
    Spanish,
}

impl Dialect {
    pub fn spelling(self, kw: Keyword) -> &'static str {
        match self {
            Dialect::English => match kw {
                Keyword::Carousel => "CARROUSEL",
                Keyword::Product => "PRODUCT",
                Keyword::Slots => "SLOTS",
                Keyword::Capacity => "CAPACITY",
                Keyword::Price => "PRICE",
                Keyword::Min => "MIN",
                Keyword::Max => "MAX",
                Keyword::Criticality => "CRITICALITY",
                Keyword::High => "HIGH",
                Keyword::Medium => "MEDIUM",
                Keyword::Low => "LOW",
                Keyword::Simulate => "SIMULATE",
                Keyword::Transactions => "TRANSACTIONS",
                Keyword::Withdraw => "WITHDRAW",
                Keyword::Restock => "RESTOCK",
                Keyword::Count => "COUNT",
                Keyword::Status => "STATUS",
                Keyword::Statistics => "STATISTICS",
                Keyword::Report => "REPORT",
            },
            Dialect::Spanish => match kw {
                Keyword::Carousel => "CARRUSEL",
                Keyword::Product => "PRODUCTO",
                Keyword::Slots => "ESPACIOS",
                Keyword::Capacity => "CAPACIDAD",
                Keyword::Price => "PRECIO",
                Keyword::Min => "MINIMO",
                Keyword::Max => "MAXIMO",
                Keyword::Criticality => "CRITICIDAD",
                Keyword::High => "ALTA",
                Keyword::Medium => "MEDIA",
                Keyword::Low => "BAJA",
                Keyword::Simulate => "SIMULAR",
                Keyword::Transactions => "TRANSACCIONES",
                Keyword::Withdraw => "RETIRAR",
                Keyword::Restock => "RESURTIR",
                Keyword::Count => "CONTAR",
                Keyword::Status => "ESTADO",
                Keyword::Statistics => "ESTADISTICAS",
                Keyword::Report => "REPORTE",
            },
        }
    }

    pub fn lookup(self, word: &str) -> Option<Keyword> {
        Keyword::ALL
            .iter()
            .copied()
            .find(|&kw| self.spelling(kw) == word)
    }

    pub fn is_reserved(self, word: &str) -> bool {
        self.lookup(word).is_some()
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::English => f.write_str("english"),
            Dialect::Spanish => f.write_str("spanish"),
        }
    }
}
