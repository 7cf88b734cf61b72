use crate::Position;
use std::fmt;

/// A half-open region `[start, end)` of the source text.
///
/// Every token, result and error is tagged with one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Creates a span between two positions.
    ///
    /// # Panics
    ///
    /// Panics if `end` precedes `start`.
    pub fn new(start: Position, end: Position) -> Self {
        assert!(
            start.offset <= end.offset,
            "span end {} precedes start {}",
            end,
            start
        );
        Self { start, end }
    }

    /// Creates a zero-length span at `pos`.
    pub fn empty(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Creates the span from the start of `first` to the end of `last`.
    pub fn cover(first: Span, last: Span) -> Self {
        Self::new(first.start, last.end)
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `other` lies entirely within this span.
    pub fn contains(&self, other: &Span) -> bool {
        self.start.offset <= other.start.offset && other.end.offset <= self.end.offset
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
