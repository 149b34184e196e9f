// SPDX-License-Identifier: Apache-2.0

/// Error type for Cursor operations.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// Reached the end of input data.
    ReachedEnd,
    /// Invalid slice bounds provided.
    InvalidSliceBounds,
}

/// A read-only view over the input with a forward-only read position.
///
/// The position never exceeds `data.len()` and never moves backwards.
#[derive(Debug)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new Cursor at the start of the given data.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    /// Bytes between the current position and the end of input.
    pub fn remaining(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or_default()
    }

    /// Returns the byte at the current position without consuming it.
    pub fn peek(&self) -> Result<u8, Error> {
        self.data.get(self.pos).copied().ok_or(Error::ReachedEnd)
    }

    pub fn consume_byte(&mut self) -> Result<u8, Error> {
        let byte = self.peek()?;
        self.pos += 1;
        Ok(byte)
    }

    /// Absolute position of the first `needle` at or after the current position.
    pub fn find(&self, needle: u8) -> Option<usize> {
        self.remaining()
            .iter()
            .position(|&b| b == needle)
            .map(|offset| self.pos + offset)
    }

    /// Gets a slice of the data from start to end positions, with bounds checking.
    pub fn slice(&self, start: usize, end: usize) -> Result<&'a [u8], Error> {
        self.data.get(start..end).ok_or(Error::InvalidSliceBounds)
    }

    /// Moves the position forward to `pos`.
    pub fn advance_to(&mut self, pos: usize) -> Result<(), Error> {
        if pos < self.pos || pos > self.data.len() {
            return Err(Error::InvalidSliceBounds);
        }
        self.pos = pos;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_boundary_behavior() {
        let data = b"abc";
        let mut cursor = Cursor::new(data);

        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.peek(), Ok(b'a'));
        assert_eq!(cursor.consume_byte(), Ok(b'a'));
        assert_eq!(cursor.remaining(), b"bc");

        assert_eq!(cursor.consume_byte(), Ok(b'b'));
        assert_eq!(cursor.consume_byte(), Ok(b'c'));

        // Exactly at end: nothing left to read, position stays put
        assert_eq!(cursor.position(), data.len());
        assert_eq!(cursor.remaining(), b"");
        assert_eq!(cursor.peek(), Err(Error::ReachedEnd));
        assert_eq!(cursor.consume_byte(), Err(Error::ReachedEnd));
        assert_eq!(cursor.position(), data.len());
    }

    #[test]
    fn test_find_is_relative_to_position() {
        let mut cursor = Cursor::new(b"e1:ae");
        assert_eq!(cursor.find(b'e'), Some(0));
        cursor.advance_to(1).unwrap();
        assert_eq!(cursor.find(b'e'), Some(4));
        assert_eq!(cursor.find(b':'), Some(2));
        assert_eq!(cursor.find(b'x'), None);
    }

    #[test]
    fn test_advance_to_is_forward_only() {
        let mut cursor = Cursor::new(b"abcd");
        cursor.advance_to(2).unwrap();
        assert_eq!(cursor.advance_to(1), Err(Error::InvalidSliceBounds));
        assert_eq!(cursor.advance_to(5), Err(Error::InvalidSliceBounds));
        assert_eq!(cursor.advance_to(4), Ok(()));
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_slice_bounds() {
        let cursor = Cursor::new(b"4:spam");
        assert_eq!(cursor.slice(2, 6), Ok(&b"spam"[..]));
        assert_eq!(cursor.slice(2, 7), Err(Error::InvalidSliceBounds));
    }
}
