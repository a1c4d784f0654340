//! Validation entry point: lex the whole source, then run the acceptor over
//! the token stream.
//!
//! Each call owns its own token buffer and symbol table, so independent
//! sources can be validated concurrently.

use crate::error::ValidationError;
use crate::keywords::Dialect;
use crate::lexer;
use crate::parser::{self, Summary};

/// Validate `source` with the reserved words of `dialect`. Returns the first
/// lexical, syntax or semantic error encountered.
pub fn validate(source: &str, dialect: Dialect) -> Result<Summary, ValidationError> {
    let tokens = lexer::lex(source, dialect)?;
    let summary = parser::parse(&tokens, dialect)?;
    tracing::debug!(?summary, "program accepted");
    Ok(summary)
}

/// [`validate`] with the default (English) dialect.
pub fn validate_str(source: &str) -> Result<Summary, ValidationError> {
    validate(source, Dialect::default())
}
