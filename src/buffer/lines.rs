//! Line-addressed access and editing.
//!
//! Lines are delimited by `\n`. Line numbers are 1-based, and line 0 is
//! accepted as another name for the first line. A line's content excludes
//! its `\n` terminator and a `\r` immediately before it.
//!
//! The line number one past the last line addresses the end of a buffer
//! that ends with `\n`. It is a valid insert position but not a line.

use super::text_buffer::{check_nul, TextBuffer};
use crate::error::{BufferError, BufferResult};
use tracing::trace;

impl TextBuffer {
    /// Get the number of lines.
    ///
    /// An empty buffer has no lines; an unterminated last line counts.
    pub fn line_count(&self) -> usize {
        let bytes = self.as_bytes();
        let newlines = bytes.iter().filter(|&&b| b == b'\n').count();
        newlines + usize::from(bytes.last().is_some_and(|&b| b != b'\n'))
    }

    /// Translate a line number into the byte offset where that line starts.
    ///
    /// Lines 0 and 1 map to offset 0 without scanning. Asking for the line
    /// after a trailing newline yields `len()`.
    pub fn line_offset(&self, line: usize) -> BufferResult<usize> {
        if line <= 1 {
            return Ok(0);
        }

        let offset = self
            .as_bytes()
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b == b'\n')
            .nth(line - 2)
            .map(|(idx, _)| idx + 1)
            .ok_or_else(|| self.line_not_found(line))?;

        trace!(line, offset, "resolved line offset");
        Ok(offset)
    }

    /// Get the content of a line, without its terminator.
    pub fn line(&self, line: usize) -> Option<&[u8]> {
        let (start, end) = self.line_bounds(line).ok()?;
        Some(strip_terminator(&self.as_bytes()[start..end]))
    }

    /// Iterate over the content of every line.
    pub fn lines(&self) -> Lines<'_> {
        Lines {
            remaining: self.as_bytes(),
        }
    }

    /// Insert `text` as a new line so that it becomes line `line`.
    ///
    /// The text and its trailing newline are inserted in one step.
    pub fn insert_line(&mut self, line: usize, text: impl AsRef<[u8]>) -> BufferResult<()> {
        let text = text.as_ref();
        let offset = self.line_offset(line)?;
        check_nul(text)?;
        self.ensure_capacity(text.len() + 1)?;

        self.write_at(offset, text);
        self.write_at(offset + text.len(), b"\n");
        Ok(())
    }

    /// Delete a line together with its terminator.
    pub fn delete_line(&mut self, line: usize) -> BufferResult<()> {
        let (start, end) = self.line_bounds(line)?;
        self.delete(start, end)
    }

    /// Byte range of a line, terminator included.
    fn line_bounds(&self, line: usize) -> BufferResult<(usize, usize)> {
        let start = self.line_offset(line)?;
        let bytes = self.as_bytes();
        if start >= bytes.len() {
            return Err(self.line_not_found(line));
        }

        let end = bytes[start..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(bytes.len(), |i| start + i + 1);
        Ok((start, end))
    }

    fn line_not_found(&self, line: usize) -> BufferError {
        BufferError::LineNotFound {
            line,
            line_count: self.line_count(),
        }
    }
}

/// Drop a trailing `\n` and then a trailing `\r`.
fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Iterator over the lines of a [`TextBuffer`].
///
/// Created by [`TextBuffer::lines`].
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    remaining: &'a [u8],
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }

        let (line, rest) = match self.remaining.iter().position(|&b| b == b'\n') {
            Some(i) => self.remaining.split_at(i + 1),
            None => (self.remaining, &self.remaining[self.remaining.len()..]),
        };
        self.remaining = rest;
        Some(strip_terminator(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::text_buffer::tests::assert_invariants;
    use crate::error::ErrorKind;

    fn buffer(text: &str) -> TextBuffer {
        TextBuffer::try_from(text).unwrap()
    }

    #[test]
    fn test_line_count() {
        assert_eq!(buffer("").line_count(), 0);
        assert_eq!(buffer("A").line_count(), 1);
        assert_eq!(buffer("A\n").line_count(), 1);
        assert_eq!(buffer("A\nB").line_count(), 2);
        assert_eq!(buffer("A\n\nC\n").line_count(), 3);
    }

    #[test]
    fn test_line_offset() {
        let buf = buffer("AB\nCD\nEF\n");
        assert_eq!(buf.line_offset(0).unwrap(), 0);
        assert_eq!(buf.line_offset(1).unwrap(), 0);
        assert_eq!(buf.line_offset(2).unwrap(), 3);
        assert_eq!(buf.line_offset(3).unwrap(), 6);
        // One past the last line is the append position.
        assert_eq!(buf.line_offset(4).unwrap(), buf.len());

        let err = buf.line_offset(5).unwrap_err();
        assert!(matches!(
            err,
            BufferError::LineNotFound {
                line: 5,
                line_count: 3
            }
        ));
    }

    #[test]
    fn test_line_offset_unterminated() {
        let buf = buffer("AB\nCD");
        assert_eq!(buf.line_offset(2).unwrap(), 3);
        assert_eq!(buf.line_offset(3).unwrap_err().kind(), ErrorKind::LineNotFound);

        let empty = TextBuffer::new();
        assert_eq!(empty.line_offset(1).unwrap(), 0);
        assert!(empty.line_offset(2).is_err());
    }

    #[test]
    fn test_line_content() {
        let buf = buffer("first\r\nsecond\n\nlast");
        assert_eq!(buf.line(1), Some(&b"first"[..]));
        assert_eq!(buf.line(0), Some(&b"first"[..]));
        assert_eq!(buf.line(2), Some(&b"second"[..]));
        assert_eq!(buf.line(3), Some(&b""[..]));
        assert_eq!(buf.line(4), Some(&b"last"[..]));
        assert_eq!(buf.line(5), None);

        let lines: Vec<&[u8]> = buf.lines().collect();
        assert_eq!(lines, [&b"first"[..], &b"second"[..], &b""[..], &b"last"[..]]);
        assert_eq!(lines.len(), buf.line_count());
    }

    #[test]
    fn test_insert_line_header() {
        let mut buf = buffer("A\nB\n");
        buf.insert_line(0, "Header").unwrap();
        assert_eq!(buf.as_bytes(), b"Header\nA\nB\n");
        assert_invariants(&buf);
    }

    #[test]
    fn test_insert_line_middle_and_end() {
        let mut buf = buffer("A\nB\n");
        buf.insert_line(2, "mid").unwrap();
        assert_eq!(buf.as_bytes(), b"A\nmid\nB\n");

        buf.insert_line(4, "tail").unwrap();
        assert_eq!(buf.as_bytes(), b"A\nmid\nB\ntail\n");
        assert_eq!(buf.line(4), Some(&b"tail"[..]));
        assert_invariants(&buf);
    }

    #[test]
    fn test_insert_line_missing() {
        let mut buf = buffer("A\nB\n");
        let err = buf.insert_line(7, "nope").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LineNotFound);
        assert_eq!(buf.as_bytes(), b"A\nB\n");

        let err = buf.insert_line(1, b"x\0").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InteriorNul);
        assert_eq!(buf.as_bytes(), b"A\nB\n");
    }

    #[test]
    fn test_insert_line_empty_buffer() {
        let mut buf = TextBuffer::new();
        buf.insert_line(1, "x").unwrap();
        assert_eq!(buf.as_bytes(), b"x\n");
        assert_eq!(buf.line_count(), 1);
        assert_invariants(&buf);

        let mut buf = TextBuffer::new();
        let err = buf.insert_line(2, "x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LineNotFound);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_insert_line_past_unterminated_end() {
        let mut buf = buffer("A\nB");
        let past = buf.line_count() + 1;
        assert_eq!(past, 3);

        let err = buf.insert_line(past, "C").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LineNotFound);
        assert_eq!(buf.as_bytes(), b"A\nB");
        assert_invariants(&buf);
    }

    #[test]
    fn test_delete_line_first() {
        let mut buf = buffer("A\nB\nC\n");
        buf.delete_line(1).unwrap();
        assert_eq!(buf.as_bytes(), b"B\nC\n");
        assert_invariants(&buf);
    }

    #[test]
    fn test_delete_line_middle_and_last() {
        let mut buf = buffer("A\nB\nC");
        buf.delete_line(2).unwrap();
        assert_eq!(buf.as_bytes(), b"A\nC");

        buf.delete_line(2).unwrap();
        assert_eq!(buf.as_bytes(), b"A\n");

        buf.delete_line(1).unwrap();
        assert!(buf.is_empty());
        assert_invariants(&buf);
    }

    #[test]
    fn test_delete_line_crlf() {
        let mut buf = buffer("one\r\ntwo\r\nthree\r\n");
        buf.delete_line(2).unwrap();
        assert_eq!(buf.as_bytes(), b"one\r\nthree\r\n");
        assert_eq!(buf.line_count(), 2);
    }

    #[test]
    fn test_delete_line_missing() {
        let mut buf = buffer("A\nB\n");
        // The append position is not a line.
        assert_eq!(buf.delete_line(3).unwrap_err().kind(), ErrorKind::LineNotFound);
        assert_eq!(buf.delete_line(9).unwrap_err().kind(), ErrorKind::LineNotFound);
        assert_eq!(buf.as_bytes(), b"A\nB\n");

        let mut empty = TextBuffer::new();
        assert!(empty.delete_line(1).is_err());
        assert!(empty.delete_line(0).is_err());
    }

    #[test]
    fn test_insert_then_delete_line_restores() {
        let original = buffer("alpha\nbeta\ngamma\n");
        for line in 1..=4 {
            let mut buf = original.clone();
            buf.insert_line(line, "inserted").unwrap();
            assert_eq!(buf.line_count(), original.line_count() + 1);
            buf.delete_line(line).unwrap();
            assert_eq!(buf, original);
            assert_invariants(&buf);
        }
    }
}
