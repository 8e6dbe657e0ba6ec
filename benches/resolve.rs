//! Benchmarks for accent color resolution.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.

use accent_color::{parse_css_color, ColorResolver, CssEngine};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const SAMPLES: [&str; 6] = [
    "#379D94",
    "97698C",
    "rebeccapurple",
    "rgb(68, 114, 196)",
    "hsl(210 50% 13% / 0.5)",
    "not-a-color",
];

/// Cold resolution: every call goes through the engine
fn bench_resolve_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_miss");
    for sample in SAMPLES {
        group.bench_with_input(BenchmarkId::from_parameter(sample), sample, |b, s| {
            b.iter(|| ColorResolver::new(CssEngine::new()).resolve(black_box(s)))
        });
    }
    group.finish();
}

/// Warm resolution: served from the cache after the first call
fn bench_resolve_hit(c: &mut Criterion) {
    let mut resolver = ColorResolver::new(CssEngine::new());
    resolver.resolve("#379D94");

    c.bench_function("resolve_hit", |b| {
        b.iter(|| resolver.resolve(black_box("#379D94")))
    });
}

/// Mode switching across the six default colors
fn bench_theme_cycle(c: &mut Criterion) {
    let colors = ["#379D94", "#97698C", "#6B987D", "#52C4BB", "#C790B3", "#8CBF9E"];
    let mut resolver = ColorResolver::new(CssEngine::new());

    c.bench_function("theme_cycle", |b| {
        b.iter(|| {
            for color in colors {
                black_box(resolver.resolve(color));
            }
        })
    });
}

fn bench_parse_css(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_css_color");
    for sample in SAMPLES {
        group.bench_with_input(BenchmarkId::from_parameter(sample), sample, |b, s| {
            b.iter(|| parse_css_color(black_box(s)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_resolve_miss,
    bench_resolve_hit,
    bench_theme_cycle,
    bench_parse_css
);
criterion_main!(benches);
