use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in the input: byte offset plus 1-indexed line and column.
///
/// Positions are plain values. They order by byte offset, which is the only
/// component that grows monotonically through the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset in the input.
    pub offset: usize,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed), counted in characters.
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// The position of the first character of any input.
    pub const fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the position immediately after `ch`, assuming `ch` sits at `self`.
    pub fn advance(self, ch: char) -> Self {
        if ch == '\n' {
            Self {
                offset: self.offset + ch.len_utf8(),
                line: self.line + 1,
                column: 1,
            }
        } else {
            Self {
                offset: self.offset + ch.len_utf8(),
                line: self.line,
                column: self.column + 1,
            }
        }
    }

    /// Returns the position immediately after `text`, assuming it starts at `self`.
    pub fn advance_str(self, text: &str) -> Self {
        text.chars().fold(self, Position::advance)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
