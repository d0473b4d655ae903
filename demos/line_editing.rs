//! Line editing demo: Load or create a buffer, edit it, save it back.
//!
//! Run with `cargo run --example line_editing [PATH]`. If `PATH` (default
//! `test`) exists it is loaded, otherwise the demo starts from an empty
//! buffer. Set `RUST_LOG=textbuf=debug` to watch the buffer grow.

use crossterm::style::Stylize;
use std::path::PathBuf;
use textbuf::{BufferResult, TextBuffer};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

fn main() -> BufferResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("test"), PathBuf::from);

    let mut buffer = if path.exists() {
        info!(path = %path.display(), "loading existing file");
        TextBuffer::from_file(&path)?
    } else {
        info!(path = %path.display(), "starting with an empty buffer");
        TextBuffer::new()
    };

    for n in 1..=6 {
        buffer.append_line(format!("Line {n}"))?;
    }

    buffer.insert(0, "AAAAAA")?;
    buffer.insert_line(0, "Line Insert 1")?;
    buffer.insert_line_formatted(3, format_args!("Line Insert {}", 2))?;

    // Removes "Line " from the first line.
    buffer.delete(0, 5)?;

    for _ in 0..3 {
        buffer.delete_line(1)?;
    }

    buffer.save_to_file(&path)?;
    info!(
        path = %path.display(),
        bytes = buffer.len(),
        capacity = buffer.capacity(),
        "saved buffer"
    );

    for (n, line) in buffer.lines().enumerate() {
        let gutter = format!("{:>4} ", n + 1);
        println!("{}{}", gutter.dark_grey(), String::from_utf8_lossy(line));
    }

    Ok(())
}
