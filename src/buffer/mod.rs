//! Buffer module: The growable text buffer and its operations.
//!
//! This module contains:
//! - [`TextBuffer`]: Sentinel-terminated byte storage with offset editing
//! - [`BufferConfig`]: Capacity settings for a buffer
//! - [`Lines`]: Iterator over line contents
//!
//! Line-addressed editing, formatted editing and file persistence are
//! further `impl TextBuffer` blocks in the private submodules.

mod format;
mod io;
mod lines;
mod text_buffer;

pub use lines::Lines;
pub use text_buffer::{BufferConfig, TextBuffer};
