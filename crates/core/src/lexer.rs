use crate::error::{Position, ValidationError};
use crate::keywords::{Dialect, Keyword};
use regex::Regex;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Punctuation
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Colon,
    Comma,
    Semi,
    /// Double-quoted string; the lexeme keeps the quotes and escapes verbatim
    Str,
    /// `digits '.' digits`, optionally negative; representable as a `Decimal`
    Decimal,
    /// `digits`, optionally negative; guaranteed to fit in an `i64`
    Int,
    /// Identifier that is not a reserved word of the active dialect
    Ident,
    Keyword(Keyword),
    /// Line break; significant as a statement terminator
    Newline,
    // End of input
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Str => write!(f, "string {}", self.lexeme),
            TokenKind::Decimal => write!(f, "decimal {}", self.lexeme),
            TokenKind::Int => write!(f, "integer {}", self.lexeme),
            TokenKind::Ident => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::Keyword(_) => write!(f, "reserved word '{}'", self.lexeme),
            TokenKind::Newline => f.write_str("end of line"),
            TokenKind::Eof => f.write_str("end of input"),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}

/// Token categories in match precedence order. The first rule whose pattern
/// matches at the current offset wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Newline,
    Whitespace,
    Comment,
    Symbol,
    Str,
    Decimal,
    Int,
    Word,
}

// Decimal MUST stay ahead of Int: otherwise "12.5" lexes as Int("12") and
// then fails on '.'.
static RULES: LazyLock<Vec<(Rule, Regex)>> = LazyLock::new(|| {
    [
        (Rule::Newline, r"\A\n"),
        (Rule::Whitespace, r"\A[ \t\r]+"),
        (Rule::Comment, r"\A#.*"),
        (Rule::Symbol, r"\A[{}()\[\]:,;]"),
        (Rule::Str, r#"\A"(?:[^"\\]|\\.)*""#),
        (Rule::Decimal, r"\A-?[0-9]+\.[0-9]+"),
        (Rule::Int, r"\A-?[0-9]+"),
        (Rule::Word, r"\A[A-Za-z][A-Za-z0-9_]*"),
    ]
    .into_iter()
    .map(|(rule, pattern)| (rule, Regex::new(pattern).unwrap()))
    .collect()
});

fn symbol_kind(lexeme: &str) -> Option<TokenKind> {
    Some(match lexeme {
        "{" => TokenKind::LBrace,
        "}" => TokenKind::RBrace,
        "(" => TokenKind::LParen,
        ")" => TokenKind::RParen,
        "[" => TokenKind::LBracket,
        "]" => TokenKind::RBracket,
        ":" => TokenKind::Colon,
        "," => TokenKind::Comma,
        ";" => TokenKind::Semi,
        _ => return None,
    })
}

/// Line/column bookkeeping over the source text.
struct Cursor {
    offset: usize,
    line: u32,
    column: u32,
}

impl Cursor {
    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn advance(&mut self, lexeme: &str) {
        for c in lexeme.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset += lexeme.len();
    }
}

/// Tokenize `src` in full. The returned stream always ends with exactly one
/// `Eof` token positioned where scanning stopped.
pub fn lex(src: &str, dialect: Dialect) -> Result<Vec<Token>, ValidationError> {
    let mut tokens = Vec::new();
    let mut cursor = Cursor {
        offset: 0,
        line: 1,
        column: 1,
    };

    'scan: while cursor.offset < src.len() {
        let rest = &src[cursor.offset..];
        for (rule, re) in RULES.iter() {
            let Some(m) = re.find(rest) else {
                continue;
            };
            let lexeme = m.as_str();
            let start = cursor.position();
            let kind = classify(*rule, lexeme, dialect, start)?;
            cursor.advance(lexeme);
            if let Some(kind) = kind {
                tokens.push(Token {
                    kind,
                    lexeme: lexeme.to_owned(),
                    line: start.line,
                    column: start.column,
                });
            }
            continue 'scan;
        }

        let c = rest.chars().next().unwrap_or_default();
        return Err(ValidationError::lexical(
            cursor.position(),
            format!("invalid character '{}'", c),
        ));
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        lexeme: String::new(),
        line: cursor.line,
        column: cursor.column,
    });
    tracing::debug!(tokens = tokens.len(), %dialect, "lexed source");
    Ok(tokens)
}

/// Map a matched lexeme to its token kind. `None` means the lexeme is
/// consumed without producing a token (whitespace, comments).
fn classify(
    rule: Rule,
    lexeme: &str,
    dialect: Dialect,
    start: Position,
) -> Result<Option<TokenKind>, ValidationError> {
    let kind = match rule {
        Rule::Whitespace | Rule::Comment => return Ok(None),
        Rule::Newline => TokenKind::Newline,
        Rule::Symbol => match symbol_kind(lexeme) {
            Some(kind) => kind,
            None => {
                return Err(ValidationError::lexical(
                    start,
                    format!("invalid character '{}'", lexeme),
                ))
            }
        },
        Rule::Str => TokenKind::Str,
        Rule::Decimal => {
            if Decimal::from_str(lexeme).is_err() {
                return Err(ValidationError::lexical(
                    start,
                    format!("decimal literal {} is out of range", lexeme),
                ));
            }
            TokenKind::Decimal
        }
        Rule::Int => {
            if lexeme.parse::<i64>().is_err() {
                return Err(ValidationError::lexical(
                    start,
                    format!("integer literal {} is out of range", lexeme),
                ));
            }
            TokenKind::Int
        }
        Rule::Word => match dialect.lookup(lexeme) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Ident,
        },
    };
    tracing::trace!(?kind, lexeme, line = start.line, column = start.column, "token");
    Ok(Some(kind))
}
