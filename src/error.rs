//! Error types for buffer operations.
//!
//! Every fallible operation returns a [`BufferResult`]. A failed operation
//! leaves the buffer exactly as it was before the call.

use std::collections::TryReserveError;
use std::io;

/// Result type for buffer operations.
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations.
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    /// Growing the buffer failed or would exceed the configured limit.
    #[error("cannot grow buffer to {requested} bytes: {reason}")]
    Allocation {
        /// Capacity that was requested.
        requested: usize,
        /// Why the allocation was refused.
        reason: AllocationFailure,
    },

    /// A file or stream operation failed.
    #[error("I/O error while {context}: {source}")]
    Io {
        /// What was being done when the error occurred.
        context: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// Fewer bytes were read than the measured size of the source.
    #[error("short read: expected {expected} bytes, got {actual}")]
    ShortRead {
        /// Measured size of the source.
        expected: usize,
        /// Bytes actually read.
        actual: usize,
    },

    /// Insert offset outside `[0, len]`.
    #[error("offset {offset} is out of bounds for buffer of length {len}")]
    InvalidOffset {
        /// Offending offset.
        offset: usize,
        /// Buffer length at the time of the call.
        len: usize,
    },

    /// Delete range not satisfying `start <= end <= len`.
    #[error("invalid range {start}..{end} for buffer of length {len}")]
    InvalidRange {
        /// Range start.
        start: usize,
        /// Range end (exclusive).
        end: usize,
        /// Buffer length at the time of the call.
        len: usize,
    },

    /// The line number does not address a line in the buffer.
    #[error("line {line} not found (buffer has {line_count} lines)")]
    LineNotFound {
        /// Requested line number.
        line: usize,
        /// Number of lines in the buffer.
        line_count: usize,
    },

    /// Input contains the sentinel byte.
    #[error("input contains a NUL byte at position {position}")]
    InteriorNul {
        /// Position of the NUL byte within the input.
        position: usize,
    },

    /// A formatting trait implementation returned an error.
    #[error("formatting failed")]
    Format(#[from] std::fmt::Error),
}

/// Reason an allocation request was refused.
#[derive(Debug, thiserror::Error)]
pub enum AllocationFailure {
    /// Size computation overflowed `usize`.
    #[error("capacity overflow")]
    Overflow,
    /// Requested capacity exceeds `BufferConfig::max_capacity`.
    #[error("exceeds configured maximum of {max} bytes")]
    LimitExceeded {
        /// Configured maximum.
        max: usize,
    },
    /// The allocator refused the reservation.
    #[error(transparent)]
    Reserve(#[from] TryReserveError),
}

/// Coarse classification of a [`BufferError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Memory growth failure.
    Allocation,
    /// File open/seek/read/write failure, including short reads.
    Io,
    /// Caller-supplied offset out of bounds.
    InvalidOffset,
    /// Caller-supplied range out of bounds.
    InvalidRange,
    /// Line number has no corresponding content.
    LineNotFound,
    /// Input contains a NUL byte.
    InteriorNul,
    /// Formatted rendering failed.
    Format,
}

impl BufferError {
    /// Classify this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Allocation { .. } => ErrorKind::Allocation,
            Self::Io { .. } | Self::ShortRead { .. } => ErrorKind::Io,
            Self::InvalidOffset { .. } => ErrorKind::InvalidOffset,
            Self::InvalidRange { .. } => ErrorKind::InvalidRange,
            Self::LineNotFound { .. } => ErrorKind::LineNotFound,
            Self::InteriorNul { .. } => ErrorKind::InteriorNul,
            Self::Format(_) => ErrorKind::Format,
        }
    }

    /// Wrap an I/O error with a description of what was being done.
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
