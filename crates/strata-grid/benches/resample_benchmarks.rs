use criterion::{Criterion, black_box, criterion_group, criterion_main};
use strata_grid::{Grid, Resampler};

fn source_grid() -> Grid<f64> {
    Grid::from_fn(256, 128, |x, y| ((x * 31 + y * 17) % 97) as f64 / 97.0)
}

fn bench_upscale_single(c: &mut Criterion) {
    let grid = source_grid();
    let resampler = Resampler::single_threaded();
    c.bench_function("upscale_2x_single", |bencher| {
        bencher.iter(|| black_box(resampler.resample(&grid, 512, 256)))
    });
}

fn bench_upscale_threaded(c: &mut Criterion) {
    let grid = source_grid();
    let resampler = Resampler::with_defaults();
    c.bench_function("upscale_2x_threaded", |bencher| {
        bencher.iter(|| black_box(resampler.resample(&grid, 512, 256)))
    });
}

fn bench_downscale_mask(c: &mut Criterion) {
    let mask = source_grid().map(|v| v > 0.5);
    let resampler = Resampler::with_defaults();
    c.bench_function("downscale_mask", |bencher| {
        bencher.iter(|| black_box(resampler.resample(&mask, 64, 32)))
    });
}

criterion_group!(
    benches,
    bench_upscale_single,
    bench_upscale_threaded,
    bench_downscale_mask
);
criterion_main!(benches);
