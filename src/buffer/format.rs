//! Formatted append and insert.
//!
//! Formatted text is rendered in two passes: a dry run that only counts the
//! bytes the arguments produce, then a render into a scratch string reserved
//! to exactly that size. The scratch string is spliced in with the regular
//! insert path, so a formatting failure never touches the buffer.

use super::text_buffer::TextBuffer;
use crate::error::{BufferError, BufferResult};
use std::fmt;

/// A `fmt::Write` sink that only counts bytes.
#[derive(Debug, Default)]
struct LengthCounter(usize);

impl fmt::Write for LengthCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

/// Render formatting arguments into an exactly-sized string.
fn render(args: fmt::Arguments<'_>) -> BufferResult<String> {
    if let Some(literal) = args.as_str() {
        return Ok(literal.to_owned());
    }

    let mut counter = LengthCounter::default();
    fmt::write(&mut counter, args)?;

    let mut scratch = String::new();
    scratch
        .try_reserve_exact(counter.0)
        .map_err(|e| BufferError::Allocation {
            requested: counter.0,
            reason: e.into(),
        })?;
    fmt::write(&mut scratch, args)?;
    Ok(scratch)
}

impl TextBuffer {
    /// Append formatted text.
    ///
    /// ```
    /// # use textbuf::TextBuffer;
    /// let mut buffer = TextBuffer::new();
    /// buffer.append_formatted(format_args!("{} + {} = {}", 2, 2, 4)).unwrap();
    /// assert_eq!(buffer.as_bytes(), b"2 + 2 = 4");
    /// ```
    pub fn append_formatted(&mut self, args: fmt::Arguments<'_>) -> BufferResult<()> {
        let text = render(args)?;
        self.append(text)
    }

    /// Insert formatted text at `offset`.
    pub fn insert_formatted(&mut self, offset: usize, args: fmt::Arguments<'_>) -> BufferResult<()> {
        self.check_offset(offset)?;
        let text = render(args)?;
        self.insert(offset, text)
    }

    /// Insert formatted text as a new line numbered `line`.
    pub fn insert_line_formatted(&mut self, line: usize, args: fmt::Arguments<'_>) -> BufferResult<()> {
        let text = render(args)?;
        self.insert_line(line, text)
    }
}

impl fmt::Write for TextBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s).map_err(|_| fmt::Error)
    }

    /// Render the whole `write!` call before touching the buffer, so a
    /// failing argument leaves no partial output behind.
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        self.append_formatted(args).map_err(|_| fmt::Error)
    }
}
