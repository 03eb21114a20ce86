use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::RgbaImage;
use mandelbrot::planes::{Pixel, PlaneMapper};
use mandelbrot::render::{render_pixel, render_row};
use mandelbrot::{color_for, evaluate, render, Escape, JitterRng, RenderConfig, View};
use num::Complex;

const SIZES: &[u32] = &[100, 400];
const ITERATIONS: &[u32] = &[10, 100, 1000];

fn bench_config(size: u32, max_iterations: u32) -> RenderConfig {
    RenderConfig {
        width: size,
        height: size,
        samples_per_pixel: 5,
        max_iterations,
        rng_seed: 0x5eed,
        ..RenderConfig::default()
    }
}

fn view() -> View {
    View::new(-0.5, 0.0, 1.0)
}

fn render_image(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_image");
    group.sample_size(10);
    for &size in SIZES {
        for &max_iterations in ITERATIONS {
            let config = bench_config(size, max_iterations);
            let id = format!("size_{}_iter_{}", size, max_iterations);
            group.bench_function(BenchmarkId::from_parameter(id), |b| {
                let mut image = RgbaImage::new(size, size);
                b.iter(|| render(&mut image, view(), &config).unwrap())
            });
        }
    }
    group.finish();
}

fn render_one_row(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_row");
    for &max_iterations in ITERATIONS {
        let config = bench_config(1000, max_iterations);
        let plane = PlaneMapper::new(config.width, config.height, view()).unwrap();
        let mut row = vec![0u8; config.width as usize * 4];
        group.bench_with_input(
            BenchmarkId::from_parameter(max_iterations),
            &config,
            |b, config| {
                let mut rng = JitterRng::new(config.rng_seed);
                b.iter(|| render_row(&plane, config, &mut rng, 500, &mut row))
            },
        );
    }
    group.finish();
}

fn render_one_pixel(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_pixel");
    for &max_iterations in ITERATIONS {
        let config = bench_config(1000, max_iterations);
        let plane = PlaneMapper::new(config.width, config.height, view()).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(max_iterations),
            &config,
            |b, config| {
                let mut rng = JitterRng::new(config.rng_seed);
                b.iter(|| render_pixel(&plane, config, &mut rng, Pixel(500, 500)))
            },
        );
    }
    group.finish();
}

fn colour_escaped(c: &mut Criterion) {
    let config = bench_config(1000, 100);
    let result = Escape::Escaped {
        iterations: 100,
        magnitude: 2.5,
    };
    c.bench_function("color_for_escaped", |b| {
        b.iter(|| color_for(black_box(result), &config))
    });
}

fn escape_time(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    // Inside the set, so every iteration of the budget is spent.
    let point = Complex::new(-0.5, 0.0);
    for &max_iterations in &[10u32, 100, 1000, 10_000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(max_iterations),
            &max_iterations,
            |b, &n| b.iter(|| evaluate(black_box(point), n)),
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    render_image,
    render_one_row,
    render_one_pixel,
    colour_escaped,
    escape_time
);
criterion_main!(benches);
