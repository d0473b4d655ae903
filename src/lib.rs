//! # Textbuf
//!
//! A mutable, dynamically-growing text buffer for code generators, log
//! accumulators and simple editors.
//!
//! Textbuf keeps its content in one contiguous allocation terminated by a
//! NUL sentinel, so the same buffer can be edited from Rust and read from C
//! as a plain `const char*`.
//!
//! ## Core Concepts
//!
//! - **Doubling growth**: Capacity doubles on demand and only shrinks on `trim`
//! - **Byte offsets**: Insert and delete address raw bytes, no encoding assumed
//! - **Line addressing**: 1-based line numbers resolved by scanning for `\n`
//! - **All-or-nothing edits**: A failed operation leaves the buffer unchanged
//!
//! ## Example
//!
//! ```rust
//! use textbuf::TextBuffer;
//!
//! let mut buffer = TextBuffer::new();
//! buffer.append_line("A")?;
//! buffer.append_line("B")?;
//! buffer.insert_line(0, "Header")?;
//! buffer.delete_line(2)?;
//!
//! assert_eq!(buffer.as_bytes(), b"Header\nB\n");
//! # Ok::<(), textbuf::BufferError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod error;
pub mod ffi;

// Re-exports for convenience
pub use buffer::{BufferConfig, Lines, TextBuffer};
pub use error::{AllocationFailure, BufferError, BufferResult, ErrorKind};
