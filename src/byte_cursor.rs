//! ByteCursor - positional reader over one in-memory byte window.
//!
//! Tar headers are laid out as fixed-width, NUL-padded text fields. The
//! cursor reads those fields while keeping the position advancing by the
//! declared field width, so offset tracking never drifts no matter where
//! a field's content actually ends.

/// Positional reader over a borrowed byte window.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current position from the start of the window.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the position and the end of the window.
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// Read an `n`-byte fixed-width text field.
    ///
    /// The field content is the prefix up to the first NUL byte, decoded
    /// as single-byte text. The position advances by the full `n`
    /// regardless of where the content ends. Never fails: bytes past the
    /// end of the window are treated as no content.
    pub fn read_fixed_field(&mut self, n: usize) -> String {
        let end = (self.pos + n).min(self.buf.len());
        let field = &self.buf[self.pos..end];
        let content = match memchr::memchr(0, field) {
            Some(nul) => &field[..nul],
            None => field,
        };
        self.pos += n;
        content.iter().map(|&b| b as char).collect()
    }

    /// Read a single raw byte, or 0 past the end of the window.
    pub fn read_byte(&mut self) -> u8 {
        let b = self.buf.get(self.pos).copied().unwrap_or(0);
        self.pos += 1;
        b
    }

    /// Return an owned copy of the next `n` bytes and advance by `n`.
    ///
    /// The caller must guarantee `n` bytes remain; the window decoder
    /// enforces this before decoding content.
    pub fn read_raw(&mut self, n: usize) -> Vec<u8> {
        let out = self.buf[self.pos..self.pos + n].to_vec();
        self.pos += n;
        out
    }

    pub fn seek_to(&mut self, p: usize) {
        self.pos = p;
    }

    pub fn seek_by(&mut self, n: usize) {
        self.pos += n;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_field_truncates_at_nul() {
        let buf = b"abc\0\0\0\0\0rest";
        let mut cursor = ByteCursor::new(buf);
        assert_eq!(cursor.read_fixed_field(8), "abc");
        // Position advanced by the full field width, not the content.
        assert_eq!(cursor.position(), 8);
        assert_eq!(cursor.read_fixed_field(4), "rest");
    }

    #[test]
    fn test_fixed_field_without_nul() {
        let mut cursor = ByteCursor::new(b"abcdef");
        assert_eq!(cursor.read_fixed_field(6), "abcdef");
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_fixed_field_past_end() {
        let mut cursor = ByteCursor::new(b"ab");
        assert_eq!(cursor.read_fixed_field(8), "ab");
        assert_eq!(cursor.position(), 8);
        assert_eq!(cursor.read_fixed_field(4), "");
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_read_raw_and_seek() {
        let mut cursor = ByteCursor::new(&[1, 2, 3, 4, 5]);
        assert_eq!(cursor.read_raw(2), vec![1, 2]);
        cursor.seek_by(1);
        assert_eq!(cursor.read_raw(2), vec![4, 5]);
        cursor.seek_to(0);
        assert_eq!(cursor.remaining(), 5);
    }

    #[test]
    fn test_high_bytes_decode_as_single_byte_text() {
        let mut cursor = ByteCursor::new(&[0xC3, 0xA9, 0]);
        let s = cursor.read_fixed_field(3);
        assert_eq!(s.chars().count(), 2);
    }
}
