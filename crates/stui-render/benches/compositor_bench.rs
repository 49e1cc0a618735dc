//! Benchmarks for text-area compositing.
//!
//! Run with: cargo bench -p stui-render --bench compositor_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use stui_render::compositor::{DrawOptions, TextArea, draw_text_box};
use stui_render::escape::split;

fn styled_text(rows: usize, cols: usize) -> String {
    (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| {
                    if c % 8 == 0 {
                        format!("\x1b[{}m{}", 30 + (r + c) % 8, char::from(b'a' + (c % 26) as u8))
                    } else {
                        char::from(b'a' + (c % 26) as u8).to_string()
                    }
                })
                .collect::<String>()
                + "\x1b[0m"
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("escape/split");
    for cols in [40, 120, 400] {
        let row = styled_text(1, cols);
        group.throughput(Throughput::Bytes(row.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(cols), &row, |b, row| {
            b.iter(|| black_box(split(black_box(row))))
        });
    }
    group.finish();
}

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("compositor/draw_text_box");
    for (w, h) in [(80u16, 24u16), (120, 40), (200, 60)] {
        // Content twice as wide as the area so every row is clipped.
        let area = TextArea::new(1, 1, w, h, styled_text(usize::from(h), usize::from(w) * 2));
        group.throughput(Throughput::Elements(u64::from(w) * u64::from(h)));
        for overwrite in [false, true] {
            let opts = DrawOptions {
                overwrite,
                flush: false,
            };
            let name = if overwrite { "overwrite" } else { "plain" };
            let mut out = Vec::with_capacity(64 * 1024);
            group.bench_with_input(BenchmarkId::new(name, format!("{w}x{h}")), &area, |b, area| {
                b.iter(|| {
                    out.clear();
                    draw_text_box(&mut out, area, opts).unwrap();
                    black_box(out.len())
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_split, bench_draw);
criterion_main!(benches);
