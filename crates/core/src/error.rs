use serde::{Deserialize, Serialize};
use std::fmt;

/// 1-based line and column of a token's first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Which stage rejected the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Semantic,
}

/// The first (and only) reason a program was rejected.
///
/// Validation halts at the first violation, so a run produces at most one of
/// these. Every variant carries the position of the character or token the
/// violation was detected at.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// No token category matches the input at `position`.
    #[error("lexical error at {position}: {message}")]
    Lexical { position: Position, message: String },

    /// The current token does not fit the active grammar production.
    #[error("syntax error at {position}: expected {expected}, found {found}")]
    Syntax {
        position: Position,
        expected: String,
        found: String,
    },

    /// Grammatically valid, but breaks a domain rule (duplicate id, range,
    /// undefined reference).
    #[error("semantic error at {position}: {message}")]
    Semantic { position: Position, message: String },
}

impl ValidationError {
    pub fn lexical(position: Position, message: impl Into<String>) -> Self {
        ValidationError::Lexical {
            position,
            message: message.into(),
        }
    }

    pub fn syntax(position: Position, expected: impl Into<String>, found: impl Into<String>) -> Self {
        ValidationError::Syntax {
            position,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn semantic(position: Position, message: impl Into<String>) -> Self {
        ValidationError::Semantic {
            position,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::Lexical { .. } => ErrorKind::Lexical,
            ValidationError::Syntax { .. } => ErrorKind::Syntax,
            ValidationError::Semantic { .. } => ErrorKind::Semantic,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            ValidationError::Lexical { position, .. }
            | ValidationError::Syntax { position, .. }
            | ValidationError::Semantic { position, .. } => *position,
        }
    }

    /// The error text without the kind/position prefix.
    pub fn message(&self) -> String {
        match self {
            ValidationError::Lexical { message, .. } | ValidationError::Semantic { message, .. } => {
                message.clone()
            }
            ValidationError::Syntax {
                expected, found, ..
            } => format!("expected {}, found {}", expected, found),
        }
    }

    /// Serialize to the JSON shape used by `--output json` and by the
    /// `*.expected-error.json` conformance fixtures.
    pub fn to_json_value(&self) -> serde_json::Value {
        let position = self.position();
        serde_json::json!({
            "kind":    self.kind(),
            "line":    position.line,
            "column":  position.column,
            "message": self.message(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_position() {
        let err = ValidationError::lexical(Position::new(3, 7), "invalid character '@'");
        assert_eq!(
            err.to_string(),
            "lexical error at line 3, column 7: invalid character '@'"
        );
    }

    #[test]
    fn syntax_message_names_expected_and_found() {
        let err = ValidationError::syntax(Position::new(1, 1), "'{'", "identifier 'x'");
        assert_eq!(err.message(), "expected '{', found identifier 'x'");
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn json_shape() {
        let err = ValidationError::semantic(Position::new(2, 11), "product 'p1' is already defined");
        assert_eq!(
            err.to_json_value(),
            serde_json::json!({
                "kind": "semantic",
                "line": 2,
                "column": 11,
                "message": "product 'p1' is already defined",
            })
        );
    }
}
