//! Criterion benchmarks for the tonegen oscillators
//!
//! Run with: cargo bench -p tonegen-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tonegen_core::{
    GeneratorRegistry, HarmonicTable, Oscillator, Surface, Waveform, render_preview,
};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn bench_sine(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sine");

    for &block_size in BLOCK_SIZES {
        let mut output = vec![0.0f32; block_size];

        group.bench_with_input(
            BenchmarkId::new("process_block", block_size),
            &block_size,
            |b, _| {
                let mut osc = Oscillator::new(Waveform::Sine, SAMPLE_RATE);
                b.iter(|| {
                    osc.process_block(black_box(440.0), black_box(-6.0), &mut output);
                    black_box(&output);
                });
            },
        );
    }

    group.finish();
}

fn bench_square(c: &mut Criterion) {
    let mut group = c.benchmark_group("Square");

    // Cost is linear in the harmonic count: 800 at 20 Hz, 54 at 440 Hz.
    for &freq in &[20.0f32, 440.0, 4000.0] {
        let mut output = vec![0.0f32; 256];

        group.bench_with_input(
            BenchmarkId::new("process_block_256", freq as u32),
            &freq,
            |b, &freq| {
                let mut osc = Oscillator::new(Waveform::Square, SAMPLE_RATE);
                b.iter(|| {
                    osc.process_block(black_box(freq), black_box(-6.0), &mut output);
                    black_box(&output);
                });
            },
        );
    }

    group.finish();
}

fn bench_harmonic_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("HarmonicTable");

    group.bench_function("prepare_alternating", |b| {
        let mut table = HarmonicTable::new();
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let freq = if flip { 30.0 } else { 3000.0 };
            black_box(table.prepare_for(SAMPLE_RATE, black_box(freq)));
        });
    });

    group.finish();
}

fn bench_gliding(c: &mut Criterion) {
    let registry = GeneratorRegistry::new();

    c.bench_function("Squargen/glide_256", |b| {
        let mut osc = registry
            .create("squargen", SAMPLE_RATE)
            .expect("squargen is built in");
        let mut output = vec![0.0f32; 256];
        let mut up = false;
        b.iter(|| {
            up = !up;
            let target = if up { 1000.0 } else { 100.0 };
            osc.process_block(black_box(target), -6.0, &mut output);
            black_box(&output);
        });
    });
}

fn bench_preview(c: &mut Criterion) {
    let mut osc = Oscillator::new(Waveform::Sine, SAMPLE_RATE);
    osc.process_block(440.0, -6.0, &mut [0.0; 64]);
    let snapshot = osc.snapshot();

    c.bench_function("Preview/render_200x30", |b| {
        let mut surface = Surface::new();
        b.iter(|| {
            render_preview(black_box(&snapshot), 200, 30, &mut surface);
            black_box(surface.pixels());
        });
    });
}

criterion_group!(
    benches,
    bench_sine,
    bench_square,
    bench_harmonic_table,
    bench_gliding,
    bench_preview,
);

criterion_main!(benches);
