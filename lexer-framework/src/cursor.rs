use common_framework::{Position, TextSlice};
use std::sync::Arc;

/// A forward-only cursor over the tokenizer's input text.
///
/// The cursor owns a shared handle to the input and the single mutable
/// position of a parse. It never moves backwards.
#[derive(Debug, Clone)]
pub struct Cursor {
    buffer: Arc<str>,
    position: Position,
}

impl Cursor {
    /// Creates a new cursor from the input string.
    pub fn new<S: Into<String>>(input: S) -> Self {
        Self {
            buffer: Arc::from(input.into()),
            position: Position::new(),
        }
    }

    /// Returns the current position in the source.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns true if the cursor is at the end of the input.
    pub fn is_eof(&self) -> bool {
        self.position.offset >= self.buffer.len()
    }

    /// Returns the unread input.
    pub fn remaining(&self) -> &str {
        &self.buffer[self.position.offset..]
    }

    /// Returns the whole input.
    pub fn input(&self) -> &str {
        &self.buffer
    }

    /// Returns a slice of `len` bytes starting at the cursor.
    pub fn slice_ahead(&self, len: usize) -> TextSlice {
        let start = self.position.offset;
        TextSlice::new(Arc::clone(&self.buffer), start, start + len)
    }

    /// Advances the cursor over the next `len` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `len` runs past the input or splits a character.
    pub fn advance_bytes(&mut self, len: usize) {
        let start = self.position.offset;
        let text = self.buffer.get(start..start + len).unwrap_or_else(|| {
            panic!(
                "cannot advance {} bytes from offset {} in a {}-byte input",
                len,
                start,
                self.buffer.len()
            )
        });
        self.position = self.position.step_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_advance_bytes_tracks_lines() {
        let mut cursor = Cursor::new("a\nb");
        cursor.advance_bytes(2);
        assert_eq!(cursor.position(), Position::at(2, 1, 2));
        cursor.advance_bytes(1);
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_cursor_advance_bytes() {
        let mut cursor = Cursor::new("λx y");
        cursor.advance_bytes(3);
        assert_eq!(cursor.position().offset, 3);
        assert_eq!(cursor.position().column, 3);
        assert_eq!(cursor.remaining(), " y");
    }

    #[test]
    #[should_panic(expected = "cannot advance")]
    fn test_cursor_advance_bytes_past_end() {
        let mut cursor = Cursor::new("ab");
        cursor.advance_bytes(3);
    }

    #[test]
    fn test_cursor_slice_ahead() {
        let mut cursor = Cursor::new("hello world");
        cursor.advance_bytes(6);
        assert_eq!(cursor.slice_ahead(5), "world");
        assert_eq!(cursor.input(), "hello world");
    }
}
