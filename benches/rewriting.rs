//! Benchmarks for applying edits to template text.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mailform::template::{EditMap, Rewriter, preview_lines};

const FIXTURE: &str = include_str!("../tests/fixtures/template.html");

fn bench_apply_no_edits(c: &mut Criterion) {
    let rewriter = Rewriter::new();
    let empty = EditMap::new();
    c.bench_function("apply_no_edits", |b| {
        b.iter(|| rewriter.apply(black_box(FIXTURE), &empty, &empty))
    });
}

fn bench_apply_typical_edits(c: &mut Criterion) {
    let rewriter = Rewriter::new();
    let mut edits = EditMap::new();
    edits.insert("Your Partner in Employee Health", "A Fresh Start");
    edits.insert(
        "Annual Wellness Visits: A Smart Investment in Workforce Success",
        "Checkups That Pay Off",
    );
    edits.insert("Follow us", "Stay in touch");
    edits.insert(
        "https://www.facebook.com/wellnessco",
        "https://www.facebook.com/wellnessco.health",
    );
    let mut labels = EditMap::new();
    labels.insert("Book Wellness Visits", "Reserve a Slot");
    c.bench_function("apply_typical_edits", |b| {
        b.iter(|| rewriter.apply(black_box(FIXTURE), &edits, &labels))
    });
}

fn bench_preview_lines(c: &mut Criterion) {
    c.bench_function("preview_lines", |b| b.iter(|| preview_lines(black_box(FIXTURE))));
}

criterion_group!(
    benches,
    bench_apply_no_edits,
    bench_apply_typical_edits,
    bench_preview_lines
);
criterion_main!(benches);
