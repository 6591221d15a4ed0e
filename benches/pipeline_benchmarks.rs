//! Criterion benchmarks for the hot per-icon pipeline stages.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgba, RgbaImage};

use icosweep::output::build_base_name;
use icosweep::scanner::pixel_digest;
use icosweep::sizes::canonicalize;

fn gradient(size: u32) -> RgbaImage {
    RgbaImage::from_fn(size, size, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    })
}

fn bench_pixel_digest(c: &mut Criterion) {
    let icon = gradient(256);
    c.bench_function("pixel_digest_256", |b| {
        b.iter(|| pixel_digest(black_box(&icon)));
    });
}

fn bench_canonicalize(c: &mut Criterion) {
    let icon = gradient(300);
    c.bench_function("canonicalize_300_to_256", |b| {
        b.iter(|| canonicalize(black_box(icon.clone())));
    });
}

fn bench_base_name(c: &mut Criterion) {
    let path = std::path::Path::new("/opt/vendor/Some App: Special*Edition.exe");
    c.bench_function("build_base_name", |b| {
        b.iter(|| build_base_name(black_box(path), 64, 64));
    });
}

criterion_group!(
    benches,
    bench_pixel_digest,
    bench_canonicalize,
    bench_base_name
);
criterion_main!(benches);
