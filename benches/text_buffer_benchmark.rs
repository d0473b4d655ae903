//! TextBuffer benchmark: Measure append, insert and line operations.
//!
//! Target: amortized O(1) append, line lookup linear in bytes scanned

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use textbuf::TextBuffer;

fn filled_buffer(lines: usize) -> TextBuffer {
    let mut buffer = TextBuffer::new();
    for i in 0..lines {
        buffer
            .append_formatted(format_args!("line {i}: the quick brown fox\n"))
            .unwrap();
    }
    buffer
}

fn buffer_append_short(c: &mut Criterion) {
    c.bench_function("buffer_append_16b", |b| {
        let mut buffer = TextBuffer::new();
        b.iter(|| {
            buffer.append(black_box("0123456789abcdef")).unwrap();
        });
    });
}

fn buffer_append_line(c: &mut Criterion) {
    c.bench_function("buffer_append_line", |b| {
        let mut buffer = TextBuffer::new();
        b.iter(|| {
            buffer.append_line(black_box("fn main() {}")).unwrap();
        });
    });
}

fn buffer_append_formatted(c: &mut Criterion) {
    c.bench_function("buffer_append_formatted", |b| {
        let mut buffer = TextBuffer::new();
        let mut n = 0u64;
        b.iter(|| {
            n += 1;
            buffer
                .append_formatted(format_args!("{}: {:>8}\n", black_box("key"), n))
                .unwrap();
        });
    });
}

fn buffer_insert_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_insert_front");

    for size in [1_000, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("bytes", size), &size, |b, &size| {
            let mut buffer = TextBuffer::try_from("x".repeat(size).as_str()).unwrap();
            b.iter(|| {
                buffer.insert(0, black_box("abc")).unwrap();
                buffer.delete(0, 3).unwrap();
            });
        });
    }

    group.finish();
}

fn buffer_line_offset(c: &mut Criterion) {
    let buffer = filled_buffer(10_000);

    c.bench_function("buffer_line_offset_5k", |b| {
        b.iter(|| buffer.line_offset(black_box(5_000)).unwrap());
    });
}

fn buffer_insert_delete_line(c: &mut Criterion) {
    let mut buffer = filled_buffer(10_000);

    c.bench_function("buffer_insert_delete_line_5k", |b| {
        b.iter(|| {
            buffer.insert_line(black_box(5_000), "inserted").unwrap();
            buffer.delete_line(black_box(5_000)).unwrap();
        });
    });
}

fn buffer_lines_iter(c: &mut Criterion) {
    let buffer = filled_buffer(10_000);

    c.bench_function("buffer_lines_count_10k", |b| {
        b.iter(|| black_box(buffer.lines().count()));
    });
}

criterion_group!(
    benches,
    buffer_append_short,
    buffer_append_line,
    buffer_append_formatted,
    buffer_insert_front,
    buffer_line_offset,
    buffer_insert_delete_line,
    buffer_lines_iter,
);
criterion_main!(benches);
