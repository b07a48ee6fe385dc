//! Measurement and truncation benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use clampkit::text::{CellMeasurer, Constraints, Fragment, TextMeasurer, TruncateOptions, Truncator};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn paragraph(words: usize) -> String {
    let words_list = ["lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing"];
    (0..words)
        .map(|i| words_list[i % words_list.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn measurement(c: &mut Criterion) {
    let measurer = CellMeasurer::new();
    let short = vec![Fragment::text(paragraph(20))];
    let long = vec![Fragment::text(paragraph(2_000))];

    c.bench_function("measure_short_word_wrap", |b| {
        b.iter(|| measurer.measure(black_box(&short), Constraints::clamped(40, 3)));
    });

    c.bench_function("measure_long_word_wrap", |b| {
        b.iter(|| measurer.measure(black_box(&long), Constraints::unbounded(80)));
    });
}

fn truncation(c: &mut Criterion) {
    let text = paragraph(500);
    c.bench_function("truncate_settle_500_words", |b| {
        b.iter(|| {
            let options = TruncateOptions::default().with_rows(3);
            let mut truncator =
                Truncator::new(black_box(text.as_str()), options, CellMeasurer::new())
                    .expect("rows > 0");
            truncator.set_container_width(60);
            truncator.settle();
            black_box(truncator.render())
        });
    });
}

criterion_group!(benches, measurement, truncation);
criterion_main!(benches);
