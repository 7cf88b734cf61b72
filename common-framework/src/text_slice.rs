use std::fmt;
use std::ops::{Deref, Range};
use std::sync::Arc;

/// Immutable view into a shared input buffer.
///
/// Tokens hold their matched text as a `TextSlice` so they can be cloned and
/// stored in result trees without copying the text or borrowing the
/// tokenizer.
#[derive(Clone)]
pub struct TextSlice {
    buffer: Arc<str>,
    range: Range<usize>,
}

impl TextSlice {
    /// Creates a slice over `buffer[start..end]`.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds or not on char boundaries.
    pub fn new(buffer: Arc<str>, start: usize, end: usize) -> Self {
        assert!(
            buffer.get(start..end).is_some(),
            "invalid text slice {}..{} of a {}-byte buffer",
            start,
            end,
            buffer.len()
        );
        Self {
            buffer,
            range: start..end,
        }
    }

    /// Creates an empty slice positioned at `offset`.
    pub fn empty_at(buffer: Arc<str>, offset: usize) -> Self {
        Self::new(buffer, offset, offset)
    }

    pub fn as_str(&self) -> &str {
        &self.buffer[self.range.clone()]
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }
}

impl Deref for TextSlice {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for TextSlice {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TextSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for TextSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.as_str(), self.range)
    }
}

// Two slices are equal when they cover the same text at the same offsets,
// whichever buffer they were cut from.
impl PartialEq for TextSlice {
    fn eq(&self, other: &Self) -> bool {
        self.range == other.range && self.as_str() == other.as_str()
    }
}

impl Eq for TextSlice {}

impl PartialEq<str> for TextSlice {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for TextSlice {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_views_buffer() {
        let buffer: Arc<str> = Arc::from("hello world");
        let slice = TextSlice::new(buffer, 6, 11);
        assert_eq!(slice, "world");
        assert_eq!(slice.len(), 5);
        assert_eq!(slice.start(), 6);
        assert_eq!(slice.end(), 11);
    }

    #[test]
    fn test_slices_from_distinct_buffers_compare_by_text() {
        let a = TextSlice::new(Arc::from("abc"), 1, 2);
        let b = TextSlice::new(Arc::from("xbz"), 1, 2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_slice() {
        let slice = TextSlice::empty_at(Arc::from("abc"), 3);
        assert!(slice.is_empty());
        assert_eq!(slice.as_str(), "");
    }

    #[test]
    #[should_panic(expected = "invalid text slice")]
    fn test_slice_rejects_split_char() {
        TextSlice::new(Arc::from("λx"), 1, 2);
    }
}
