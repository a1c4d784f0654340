//! Entities recognised by the parser.
//!
//! Each grammar production hands back one of these values so its checks can
//! run against typed data. They are dropped as soon as they are counted:
//! validation never builds a tree of them.

use crate::keywords::Keyword;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    High,
    Medium,
    Low,
}

impl Criticality {
    pub fn from_keyword(kw: Keyword) -> Option<Self> {
        match kw {
            Keyword::High => Some(Criticality::High),
            Keyword::Medium => Some(Criticality::Medium),
            Keyword::Low => Some(Criticality::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDef {
    pub id: String,
    pub price: Decimal,
    pub min: i64,
    pub max: i64,
    pub criticality: Criticality,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarouselDef {
    pub id: String,
    pub slots: i64,
    pub capacity: i64,
    pub catalog: Vec<ProductDef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Withdraw { product: String, qty: i64 },
    Restock { product: String, qty: i64 },
    Count { product: String },
}

impl Transaction {
    pub fn product(&self) -> &str {
        match self {
            Transaction::Withdraw { product, .. }
            | Transaction::Restock { product, .. }
            | Transaction::Count { product } => product,
        }
    }

    /// Quantity checked against the `> 0` rule. `Count` carries no quantity
    /// and is treated as 1, so it never fails that rule.
    pub fn quantity(&self) -> i64 {
        match self {
            Transaction::Withdraw { qty, .. } | Transaction::Restock { qty, .. } => *qty,
            Transaction::Count { .. } => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Status,
    Statistics,
    /// Report name exactly as written, quotes and escapes included.
    Report(String),
}
