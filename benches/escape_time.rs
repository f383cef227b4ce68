//! Per-pixel cost of the two evaluator backends over the default frame.
//!
//! Run with: `cargo bench --bench escape_time`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mandelbrot_engine::{
    Complex, EscapeParams, FractalAlgorithm, MandelbrotBig, MandelbrotFloat64, Precision,
    Viewport, escape_time_f64,
};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

/// One row through the middle of the frame: cardioid interior plus both
/// escaping flanks.
fn bench_middle_row(c: &mut Criterion) {
    let mut group = c.benchmark_group("escape_time_row");
    group.throughput(Throughput::Elements(u64::from(WIDTH)));

    let params = EscapeParams::default();
    let viewport = Viewport::default();

    let float64 = MandelbrotFloat64::new(&viewport, WIDTH, HEIGHT, params);
    group.bench_function("float64", |b| {
        let row = float64.prepare_row(HEIGHT / 2);
        b.iter(|| {
            for x in 0..WIDTH {
                black_box(float64.compute(&row, x));
            }
        });
    });

    for bits in [64, 128, 256] {
        let snapshot = viewport.with_precision(Precision::new(bits).unwrap());
        let big = MandelbrotBig::new(&snapshot, WIDTH, HEIGHT, params);

        group.bench_with_input(BenchmarkId::new("big", bits), &big, |b, big| {
            let row = big.prepare_row(HEIGHT / 2);
            b.iter(|| {
                for x in 0..WIDTH {
                    black_box(big.compute(&row, x));
                }
            });
        });
    }

    group.finish();
}

fn bench_single_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("escape_time_point");

    for cap in [64, 256, 1024] {
        let params = EscapeParams::new(cap, 4.0).unwrap();
        // inside the set: always runs to the cap
        group.bench_with_input(BenchmarkId::new("interior", cap), &params, |b, params| {
            b.iter(|| escape_time_f64(black_box(Complex::new(-0.7, 0.0)), params));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_middle_row, bench_single_point);
criterion_main!(benches);
