//! TextBuffer: A growable, sentinel-terminated byte buffer.
//!
//! The content is stored in a single contiguous `Vec<u8>` followed by one
//! NUL sentinel byte, so the buffer can be handed to C code as a
//! `const char*` without copying. Capacity is accounted separately from the
//! vector and grows by doubling.

use crate::error::{AllocationFailure, BufferError, BufferResult};
use std::ffi::CStr;
use std::fmt;
use tracing::debug;

/// Byte written immediately after the logical content.
pub(super) const SENTINEL: u8 = 0;

/// Configuration for a [`TextBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferConfig {
    /// Capacity allocated up front. Clamped to at least 1.
    pub initial_capacity: usize,
    /// Maximum capacity the buffer may grow to (0 = unlimited).
    pub max_capacity: usize,
    /// Whether every delete ends with a [`TextBuffer::trim`].
    pub shrink_on_delete: bool,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
            max_capacity: 0,
            shrink_on_delete: false,
        }
    }
}

impl BufferConfig {
    /// Set the initial capacity.
    pub const fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set the maximum capacity (0 = unlimited).
    pub const fn with_max_capacity(mut self, capacity: usize) -> Self {
        self.max_capacity = capacity;
        self
    }

    /// Enable or disable trimming after deletes.
    pub const fn with_shrink_on_delete(mut self, shrink: bool) -> Self {
        self.shrink_on_delete = shrink;
        self
    }

    const fn limit(&self) -> Option<usize> {
        if self.max_capacity == 0 {
            None
        } else {
            Some(self.max_capacity)
        }
    }
}

/// A mutable, dynamically-growing text buffer.
///
/// The buffer is byte-oriented: offsets are byte offsets and no encoding is
/// assumed. The only byte value it refuses is NUL, which is reserved for the
/// sentinel.
///
/// # Invariants
///
/// - `data.len() == len() + 1` and the last byte of `data` is the sentinel.
/// - `len() < capacity()`.
/// - `data` has room for at least `capacity()` bytes.
///
/// Every operation either succeeds or returns an error with the buffer
/// unchanged.
pub struct TextBuffer {
    /// Content followed by the sentinel.
    pub(super) data: Vec<u8>,
    /// Capacity as accounted by the doubling policy.
    pub(super) capacity: usize,
    /// Configuration.
    pub(super) config: BufferConfig,
}

impl TextBuffer {
    /// Create an empty buffer with the smallest possible capacity.
    pub fn new() -> Self {
        Self {
            data: vec![SENTINEL],
            capacity: 1,
            config: BufferConfig::default().with_initial_capacity(1),
        }
    }

    /// Create an empty buffer with room for `capacity` bytes, sentinel
    /// included. A capacity of 0 is treated as 1.
    pub fn with_capacity(capacity: usize) -> BufferResult<Self> {
        Self::with_config(BufferConfig::default().with_initial_capacity(capacity))
    }

    /// Create an empty buffer with custom configuration.
    pub fn with_config(config: BufferConfig) -> BufferResult<Self> {
        let capacity = config.initial_capacity.max(1);
        if let Some(max) = config.limit() {
            if capacity > max {
                return Err(BufferError::Allocation {
                    requested: capacity,
                    reason: AllocationFailure::LimitExceeded { max },
                });
            }
        }

        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|e| BufferError::Allocation {
                requested: capacity,
                reason: e.into(),
            })?;
        data.push(SENTINEL);

        Ok(Self {
            data,
            capacity,
            config,
        })
    }

    /// Get the number of content bytes (the sentinel is not counted).
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() - 1
    }

    /// Check if the buffer holds no content.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the allocated capacity in bytes, sentinel included.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the configuration this buffer was created with.
    #[inline]
    pub const fn config(&self) -> &BufferConfig {
        &self.config
    }

    /// Get the content bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len()]
    }

    /// Get the content as a string slice, if it is valid UTF-8.
    pub fn as_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(self.as_bytes())
    }

    /// Get the content as a NUL-terminated C string.
    pub fn as_c_str(&self) -> &CStr {
        // The sentinel is always the only NUL in `data`, so this never
        // falls back to the empty default.
        CStr::from_bytes_with_nul(&self.data).unwrap_or_default()
    }

    /// Consume the buffer and return its content without the sentinel.
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.data.pop();
        self.data
    }

    /// Make room for `additional` more content bytes.
    ///
    /// If `len() + additional + 1` exceeds the capacity, the capacity is
    /// doubled until it fits (capped at `max_capacity` when configured).
    /// On failure the buffer is left untouched.
    pub fn ensure_capacity(&mut self, additional: usize) -> BufferResult<()> {
        let required = self
            .len()
            .checked_add(additional)
            .and_then(|n| n.checked_add(1))
            .ok_or(BufferError::Allocation {
                requested: usize::MAX,
                reason: AllocationFailure::Overflow,
            })?;

        if required <= self.capacity {
            return Ok(());
        }

        let mut new_capacity = self.capacity.max(1);
        while new_capacity < required {
            new_capacity = new_capacity.saturating_mul(2);
        }

        if let Some(max) = self.config.limit() {
            if required > max {
                return Err(BufferError::Allocation {
                    requested: required,
                    reason: AllocationFailure::LimitExceeded { max },
                });
            }
            new_capacity = new_capacity.min(max);
        }

        self.data
            .try_reserve_exact(new_capacity - self.data.len())
            .map_err(|e| BufferError::Allocation {
                requested: new_capacity,
                reason: e.into(),
            })?;

        debug!(
            old_capacity = self.capacity,
            new_capacity,
            len = self.len(),
            "growing text buffer"
        );
        self.capacity = new_capacity;
        Ok(())
    }

    /// Append bytes to the end of the buffer.
    pub fn append(&mut self, text: impl AsRef<[u8]>) -> BufferResult<()> {
        let text = text.as_ref();
        check_nul(text)?;
        self.ensure_capacity(text.len())?;
        self.write_at(self.len(), text);
        Ok(())
    }

    /// Append `text` as a complete line.
    ///
    /// A newline is added first if the buffer is non-empty and does not
    /// already end with one, and `text` is always followed by a newline.
    pub fn append_line(&mut self, text: impl AsRef<[u8]>) -> BufferResult<()> {
        let text = text.as_ref();
        check_nul(text)?;

        let needs_break = self.as_bytes().last().is_some_and(|&b| b != b'\n');
        self.ensure_capacity(usize::from(needs_break) + text.len() + 1)?;

        if needs_break {
            self.write_at(self.len(), b"\n");
        }
        self.write_at(self.len(), text);
        self.write_at(self.len(), b"\n");
        Ok(())
    }

    /// Insert bytes at `offset`, shifting the tail right.
    ///
    /// `offset` must be in `[0, len()]`.
    pub fn insert(&mut self, offset: usize, text: impl AsRef<[u8]>) -> BufferResult<()> {
        let text = text.as_ref();
        self.check_offset(offset)?;
        check_nul(text)?;
        self.ensure_capacity(text.len())?;
        self.write_at(offset, text);
        Ok(())
    }

    /// Delete the half-open byte range `[start, end)`.
    ///
    /// Requires `start <= end <= len()`.
    pub fn delete(&mut self, start: usize, end: usize) -> BufferResult<()> {
        let len = self.len();
        if start > end || end > len {
            return Err(BufferError::InvalidRange { start, end, len });
        }

        if start < end {
            // Move the tail and the sentinel over the deleted span.
            self.data.copy_within(end..=len, start);
            self.data.truncate(len - (end - start) + 1);
        }

        if self.config.shrink_on_delete {
            self.trim();
        }
        Ok(())
    }

    /// Release unused capacity so that `capacity() == len() + 1`.
    pub fn trim(&mut self) {
        self.data.shrink_to_fit();
        if self.capacity != self.data.len() {
            debug!(
                old_capacity = self.capacity,
                new_capacity = self.data.len(),
                "trimming text buffer"
            );
        }
        self.capacity = self.data.len();
    }

    /// Return an error unless `offset` is a valid insert position.
    pub(super) fn check_offset(&self, offset: usize) -> BufferResult<()> {
        let len = self.len();
        if offset > len {
            return Err(BufferError::InvalidOffset { offset, len });
        }
        Ok(())
    }

    /// Splice `text` in at `offset`.
    ///
    /// The caller has validated `offset`, rejected NUL bytes and reserved
    /// capacity for `text`, so nothing here can fail or reallocate.
    pub(super) fn write_at(&mut self, offset: usize, text: &[u8]) {
        if text.is_empty() {
            return;
        }
        let len = self.len();
        let n = text.len();
        debug_assert!(offset <= len);
        debug_assert!(len + n < self.capacity);

        self.data.resize(len + n + 1, SENTINEL);
        self.data.copy_within(offset..len, offset + n);
        self.data[offset..offset + n].copy_from_slice(text);
        self.data[len + n] = SENTINEL;
    }
}

/// Reject input that contains the sentinel byte.
pub(super) fn check_nul(text: &[u8]) -> BufferResult<()> {
    match text.iter().position(|&b| b == SENTINEL) {
        Some(position) => Err(BufferError::InteriorNul { position }),
        None => Ok(()),
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TextBuffer {
    fn clone(&self) -> Self {
        // Keep the backing storage at least as large as the accounted capacity.
        let mut data = Vec::with_capacity(self.capacity);
        data.extend_from_slice(&self.data);
        Self {
            data,
            capacity: self.capacity,
            config: self.config,
        }
    }
}

impl PartialEq for TextBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for TextBuffer {}

impl TryFrom<&[u8]> for TextBuffer {
    type Error = BufferError;

    fn try_from(bytes: &[u8]) -> BufferResult<Self> {
        check_nul(bytes)?;
        let mut buffer = Self::with_capacity(bytes.len().saturating_add(1))?;
        buffer.write_at(0, bytes);
        Ok(buffer)
    }
}

impl TryFrom<&str> for TextBuffer {
    type Error = BufferError;

    fn try_from(text: &str) -> BufferResult<Self> {
        Self::try_from(text.as_bytes())
    }
}

impl AsRef<[u8]> for TextBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("content", &String::from_utf8_lossy(self.as_bytes()))
            .finish()
    }
}
