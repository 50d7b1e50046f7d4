use crate::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenKind {
    /// Unrecognized character or malformed escape (`\` at end of input, `\1`).
    Illegal,
    /// End of input; always the last token of a stream.
    Eof,
    /// One whitespace character.
    Space,
    /// `\name` or a one-character symbol command such as `\{` (value excludes the backslash).
    Command,
    /// A single letter.
    Symbol,
    /// A run of digits.
    Number,
    /// `+ - * / =`
    Operator,
    /// `^`
    Superscript,
    /// `_`
    Subscript,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `( ) [ ] |`
    Delimiter,
    /// `.`
    Period,
    /// `&`, the matrix cell separator.
    Ampersand,
    /// `\\`, the matrix row separator.
    Backslash,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
            TokenKind::Space => "SPACE",
            TokenKind::Command => "COMMAND",
            TokenKind::Symbol => "SYMBOL",
            TokenKind::Number => "NUMBER",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Superscript => "SUPERSCRIPT",
            TokenKind::Subscript => "SUBSCRIPT",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Delimiter => "DELIMITER",
            TokenKind::Period => "PERIOD",
            TokenKind::Ampersand => "AMPERSAND",
            TokenKind::Backslash => "BACKSLASH",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified run of input characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Literal text of the token (command names without their backslash).
    pub value: String,
    /// Position of the token's first character.
    pub pos: Position,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, pos: Position) -> Self {
        Self {
            kind,
            value: value.into(),
            pos,
        }
    }

    /// True for a `COMMAND` token named `name`.
    pub fn is_command(&self, name: &str) -> bool {
        self.kind == TokenKind::Command && self.value == name
    }

    /// True for a `DELIMITER` token with the given character.
    pub fn is_delimiter(&self, value: &str) -> bool {
        self.kind == TokenKind::Delimiter && self.value == value
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}('{}')", self.kind, self.value)
    }
}
