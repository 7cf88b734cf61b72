use std::cmp::Ordering;
use std::fmt;

/// Represents a cursor location in the source text.
///
/// Positions are shared by the tokenizer, the combinators and the error
/// type: every token, result and error carries a pair of them. Two positions
/// taken from the same input are ordered by their byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Byte offset from the start of the input
    pub offset: usize,
}

impl Position {
    /// Creates a new position at the start of the input.
    pub fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Creates a position with the given values.
    pub fn at(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Returns the position reached after stepping over `ch`.
    pub fn step(self, ch: char) -> Self {
        if ch == '\n' {
            Self {
                line: self.line + 1,
                column: 1,
                offset: self.offset + ch.len_utf8(),
            }
        } else {
            Self {
                line: self.line,
                column: self.column + 1,
                offset: self.offset + ch.len_utf8(),
            }
        }
    }

    /// Returns the position reached after stepping over every char of `text`.
    pub fn step_str(self, text: &str) -> Self {
        text.chars().fold(self, Position::step)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset
            .cmp(&other.offset)
            .then(self.line.cmp(&other.line))
            .then(self.column.cmp(&other.column))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
