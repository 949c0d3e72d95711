use criterion::{black_box, criterion_group, criterion_main, Criterion};
use spectro_core::{build_static_raster, Direction, RasterImageOptions, Spectrogram, SpectrogramOptions};

fn ramp(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 256) as u8).collect()
}

fn bench_waterfall_vertical_1024(c: &mut Criterion) {
    let mut sg = Spectrogram::waterfall(1024, 512, Direction::Down, &SpectrogramOptions::default());
    let line = ramp(1024);
    c.bench_function("waterfall_vertical_1024x512", |b| {
        b.iter(|| sg.new_line(black_box(&line)));
    });
}

fn bench_waterfall_horizontal_1024(c: &mut Criterion) {
    let mut sg = Spectrogram::waterfall(1024, 512, Direction::Left, &SpectrogramOptions::default());
    let line = ramp(1024);
    c.bench_function("waterfall_horizontal_1024x512", |b| {
        b.iter(|| sg.new_line(black_box(&line)));
    });
}

fn bench_raster_scan_with_marker(c: &mut Criterion) {
    let mut sg = Spectrogram::raster_scan(1024, 512, Direction::Right, &SpectrogramOptions::default());
    let line = ramp(1024);
    c.bench_function("raster_scan_marker_1024x512", |b| {
        b.iter(|| sg.new_line(black_box(&line)));
    });
}

fn bench_static_raster_256(c: &mut Criterion) {
    let grid: Vec<Vec<u8>> = (0..256).map(|_| ramp(256)).collect();
    let options = RasterImageOptions::default();
    c.bench_function("static_raster_256x256", |b| {
        b.iter(|| black_box(build_static_raster(&grid, 256, 256, &options)));
    });
}

criterion_group!(
    benches,
    bench_waterfall_vertical_1024,
    bench_waterfall_horizontal_1024,
    bench_raster_scan_with_marker,
    bench_static_raster_256,
);
criterion_main!(benches);
