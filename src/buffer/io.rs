//! Persistence: loading a buffer from a file or stream and saving it back.
//!
//! Files are raw bytes with no header or encoding step. Loading measures the
//! source, allocates once and reads everything in a single pass; reading
//! fewer bytes than measured is an error rather than a silent truncation.

use super::text_buffer::{check_nul, TextBuffer, SENTINEL};
use crate::error::{AllocationFailure, BufferError, BufferResult};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::debug;

impl TextBuffer {
    /// Load the entire content of a file into a new buffer.
    pub fn from_file(path: impl AsRef<Path>) -> BufferResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| BufferError::io(format!("opening {}", path.display()), e))?;

        let buffer = Self::from_reader(file)?;
        debug!(path = %path.display(), bytes = buffer.len(), "loaded text buffer");
        Ok(buffer)
    }

    /// Load the entire content of a seekable stream into a new buffer.
    ///
    /// The stream is measured by seeking to its end and rewound before
    /// reading, so it is read from the start regardless of its position.
    pub fn from_reader<R: Read + Seek>(mut reader: R) -> BufferResult<Self> {
        let size = reader
            .seek(SeekFrom::End(0))
            .map_err(|e| BufferError::io("seeking to end of input", e))?;
        reader
            .rewind()
            .map_err(|e| BufferError::io("seeking to start of input", e))?;

        let expected = usize::try_from(size)
            .ok()
            .filter(|&n| n < usize::MAX)
            .ok_or(BufferError::Allocation {
                requested: usize::MAX,
                reason: AllocationFailure::Overflow,
            })?;

        let mut buffer = Self::with_capacity(expected + 1)?;
        buffer.data.clear();
        let actual = reader
            .take(size)
            .read_to_end(&mut buffer.data)
            .map_err(|e| BufferError::io("reading input", e))?;

        if actual != expected {
            return Err(BufferError::ShortRead { expected, actual });
        }
        check_nul(&buffer.data)?;

        buffer.data.push(SENTINEL);
        Ok(buffer)
    }

    /// Write the content (without the sentinel) to a file, creating or
    /// truncating it.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> BufferResult<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| BufferError::io(format!("creating {}", path.display()), e))?;

        self.write_to(file)?;
        debug!(path = %path.display(), bytes = self.len(), "saved text buffer");
        Ok(())
    }

    /// Write the content (without the sentinel) to any writer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> BufferResult<()> {
        writer
            .write_all(self.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| BufferError::io("writing buffer", e))
    }
}
