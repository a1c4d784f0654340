//! carousel-core: validator for the carousel inventory language.
//!
//! Source text describes vending-machine carousels, their product catalogs,
//! and a simulated block of stock transactions and status queries. This crate
//! checks that text in a single descent:
//!
//! - [`lexer::lex`] -- ordered regex rules to a token stream
//! - [`parser::parse`] -- recursive-descent acceptor with inline semantic
//!   checks backed by a [`SymbolTable`]
//! - [`validate()`] -- both of the above; the first error stops everything
//!
//! Nothing is executed and no syntax tree is kept. A successful run yields a
//! [`Summary`] of what was declared.

pub mod error;
pub mod keywords;
pub mod lexer;
pub mod model;
pub mod parser;
pub mod symbols;
pub mod validate;

// ── Convenience re-exports ───────────────────────────────────────────

pub use error::{ErrorKind, Position, ValidationError};
pub use keywords::{Dialect, Keyword};
pub use lexer::{Token, TokenKind};
pub use parser::Summary;
pub use symbols::SymbolTable;
pub use validate::{validate, validate_str};
