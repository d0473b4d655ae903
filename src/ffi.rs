//! C Foreign Function Interface (FFI) for Textbuf.
//!
//! This module provides a C-compatible API for using Textbuf from
//! other programming languages. All functions are `extern "C"` with
//! stable ABI.
//!
//! Because the buffer content is always followed by a NUL sentinel,
//! [`textbuf_data`] can hand out a pointer that C code may treat as an
//! ordinary NUL-terminated string until the next mutating call.
//!
//! # Safety
//!
//! All functions that accept pointers require valid pointers; NULL is
//! detected and reported, dangling pointers are not. Text arguments must be
//! NUL-terminated. The caller is responsible for destroying every handle.
//!
//! # Example (C)
//!
//! ```c
//! #include "textbuf.h"
//!
//! int main() {
//!     TextbufHandle* sb = textbuf_create(0);
//!     if (!sb) return 1;
//!
//!     textbuf_append_line(sb, "Line 1");
//!     textbuf_insert_line(sb, 0, "Header");
//!     printf("%s", textbuf_data(sb));
//!
//!     textbuf_destroy(sb);
//!     return 0;
//! }
//! ```

// FFI modules intentionally use unsafe and no_mangle
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]
#![allow(clippy::missing_safety_doc)]
#![allow(clippy::not_unsafe_ptr_arg_deref)]

use crate::buffer::TextBuffer;
use crate::error::{BufferError, BufferResult, ErrorKind};
use std::ffi::CStr;
use std::os::raw::c_char;
use std::path::Path;
use std::ptr;

// =============================================================================
// Opaque Handle Types
// =============================================================================

/// Opaque handle to a text buffer.
pub struct TextbufHandle(TextBuffer);

// =============================================================================
// Result and Error Codes
// =============================================================================

/// Result codes for FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextbufResult {
    /// Operation succeeded.
    Ok = 0,
    /// Null pointer passed.
    NullPointer = 1,
    /// Path is not valid UTF-8 (non-Unix targets only).
    InvalidUtf8 = 2,
    /// I/O error, including short reads.
    IoError = 3,
    /// Insert offset out of bounds.
    InvalidOffset = 4,
    /// Delete range out of bounds.
    InvalidRange = 5,
    /// Line number does not exist.
    LineNotFound = 6,
    /// Buffer could not grow.
    AllocationError = 7,
    /// Content contains a NUL byte.
    InteriorNul = 8,
    /// Formatted rendering failed.
    FormatError = 9,
}

impl From<&BufferError> for TextbufResult {
    fn from(err: &BufferError) -> Self {
        match err.kind() {
            ErrorKind::Allocation => Self::AllocationError,
            ErrorKind::Format => Self::FormatError,
            ErrorKind::Io => Self::IoError,
            ErrorKind::InvalidOffset => Self::InvalidOffset,
            ErrorKind::InvalidRange => Self::InvalidRange,
            ErrorKind::LineNotFound => Self::LineNotFound,
            ErrorKind::InteriorNul => Self::InteriorNul,
        }
    }
}

fn status(result: BufferResult<()>) -> TextbufResult {
    match result {
        Ok(()) => TextbufResult::Ok,
        Err(err) => TextbufResult::from(&err),
    }
}

// =============================================================================
// Lifecycle Functions
// =============================================================================

/// Create an empty buffer with the given initial capacity (0 is treated as 1).
///
/// Returns NULL on failure.
#[unsafe(no_mangle)]
pub extern "C" fn textbuf_create(initial_capacity: usize) -> *mut TextbufHandle {
    match TextBuffer::with_capacity(initial_capacity) {
        Ok(buffer) => Box::into_raw(Box::new(TextbufHandle(buffer))),
        Err(_) => ptr::null_mut(),
    }
}

/// Create a buffer holding the entire content of a file.
///
/// Returns NULL on failure.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn textbuf_create_from_file(path: *const c_char) -> *mut TextbufHandle {
    let Ok(path) = path_arg(path) else {
        return ptr::null_mut();
    };

    match TextBuffer::from_file(path) {
        Ok(buffer) => Box::into_raw(Box::new(TextbufHandle(buffer))),
        Err(_) => ptr::null_mut(),
    }
}

/// Destroy a buffer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn textbuf_destroy(buffer: *mut TextbufHandle) {
    if !buffer.is_null() {
        drop(Box::from_raw(buffer));
    }
}

/// Write the buffer content to a file, creating or truncating it.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn textbuf_save_to_file(
    buffer: *const TextbufHandle,
    path: *const c_char,
) -> TextbufResult {
    if buffer.is_null() {
        return TextbufResult::NullPointer;
    }
    let path = match path_arg(path) {
        Ok(path) => path,
        Err(code) => return code,
    };

    status((*buffer).0.save_to_file(path))
}

// =============================================================================
// Editing Functions
// =============================================================================

/// Append text to the end of the buffer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn textbuf_append(
    buffer: *mut TextbufHandle,
    text: *const c_char,
) -> TextbufResult {
    match (buffer.is_null(), text_arg(text)) {
        (false, Some(text)) => status((*buffer).0.append(text)),
        _ => TextbufResult::NullPointer,
    }
}

/// Append text as a complete, newline-terminated line.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn textbuf_append_line(
    buffer: *mut TextbufHandle,
    text: *const c_char,
) -> TextbufResult {
    match (buffer.is_null(), text_arg(text)) {
        (false, Some(text)) => status((*buffer).0.append_line(text)),
        _ => TextbufResult::NullPointer,
    }
}

/// Insert text at a byte offset.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn textbuf_insert(
    buffer: *mut TextbufHandle,
    offset: usize,
    text: *const c_char,
) -> TextbufResult {
    match (buffer.is_null(), text_arg(text)) {
        (false, Some(text)) => status((*buffer).0.insert(offset, text)),
        _ => TextbufResult::NullPointer,
    }
}

/// Insert text as a new line with the given (1-based) line number.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn textbuf_insert_line(
    buffer: *mut TextbufHandle,
    line: usize,
    text: *const c_char,
) -> TextbufResult {
    match (buffer.is_null(), text_arg(text)) {
        (false, Some(text)) => status((*buffer).0.insert_line(line, text)),
        _ => TextbufResult::NullPointer,
    }
}

/// Delete the half-open byte range `[start, end)`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn textbuf_delete(
    buffer: *mut TextbufHandle,
    start: usize,
    end: usize,
) -> TextbufResult {
    if buffer.is_null() {
        return TextbufResult::NullPointer;
    }
    status((*buffer).0.delete(start, end))
}

/// Delete a line and its terminator.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn textbuf_delete_line(
    buffer: *mut TextbufHandle,
    line: usize,
) -> TextbufResult {
    if buffer.is_null() {
        return TextbufResult::NullPointer;
    }
    status((*buffer).0.delete_line(line))
}

/// Release unused capacity.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn textbuf_trim(buffer: *mut TextbufHandle) -> TextbufResult {
    if buffer.is_null() {
        return TextbufResult::NullPointer;
    }
    (*buffer).0.trim();
    TextbufResult::Ok
}

// =============================================================================
// Query Functions
// =============================================================================

/// Resolve a line number to the byte offset where it starts.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn textbuf_line_offset(
    buffer: *const TextbufHandle,
    line: usize,
    offset_out: *mut usize,
) -> TextbufResult {
    if buffer.is_null() || offset_out.is_null() {
        return TextbufResult::NullPointer;
    }
    match (*buffer).0.line_offset(line) {
        Ok(offset) => {
            *offset_out = offset;
            TextbufResult::Ok
        }
        Err(err) => TextbufResult::from(&err),
    }
}

/// Get the NUL-terminated content.
///
/// The pointer is invalidated by any mutating call. Returns NULL for a NULL
/// handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn textbuf_data(buffer: *const TextbufHandle) -> *const c_char {
    if buffer.is_null() {
        return ptr::null();
    }
    (*buffer).0.as_c_str().as_ptr()
}

/// Get the content length in bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn textbuf_length(buffer: *const TextbufHandle) -> usize {
    if buffer.is_null() {
        return 0;
    }
    (*buffer).0.len()
}

/// Get the allocated capacity in bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn textbuf_capacity(buffer: *const TextbufHandle) -> usize {
    if buffer.is_null() {
        return 0;
    }
    (*buffer).0.capacity()
}

// =============================================================================
// Version Information
// =============================================================================

/// Get the Textbuf version string.
#[unsafe(no_mangle)]
pub extern "C" fn textbuf_version() -> *const c_char {
    static VERSION: &[u8] = b"0.1.0\0";
    VERSION.as_ptr().cast::<c_char>()
}

// =============================================================================
// Helper Functions
// =============================================================================

unsafe fn text_arg<'a>(text: *const c_char) -> Option<&'a [u8]> {
    if text.is_null() {
        None
    } else {
        Some(CStr::from_ptr(text).to_bytes())
    }
}

/// Convert a path argument. Unix paths are taken as raw bytes; elsewhere
/// they must be UTF-8.
unsafe fn path_arg<'a>(path: *const c_char) -> Result<&'a Path, TextbufResult> {
    let bytes = text_arg(path).ok_or(TextbufResult::NullPointer)?;

    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        Ok(Path::new(std::ffi::OsStr::from_bytes(bytes)))
    }

    #[cfg(not(unix))]
    {
        std::str::from_utf8(bytes)
            .map(Path::new)
            .map_err(|_| TextbufResult::InvalidUtf8)
    }
}
