use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use img_shrink::{
    archive, render_surface, search_quality, target_dimensions, CompressionResult, Dimensions,
    Engine, EngineConfig, ImageResource, JpegSurfaceEncoder,
};
use std::io::Cursor;

fn create_test_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8])
    }))
}

fn encode_bmp(img: &DynamicImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Bmp).unwrap();
    buf.into_inner()
}

fn bench_target_dimensions(c: &mut Criterion) {
    c.bench_function("target_dimensions", |b| {
        b.iter(|| target_dimensions(black_box(Dimensions::new(4032, 3024)), black_box(1600)))
    });
}

fn bench_render_surface(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_surface");

    for (width, height) in [(800, 600), (1920, 1080), (3840, 2160)] {
        let img = create_test_image(width, height);
        let target = target_dimensions(Dimensions::new(width, height), 1600);

        group.bench_with_input(
            BenchmarkId::new("render", format!("{}x{}", width, height)),
            &(img, target),
            |b, (img, target)| b.iter(|| render_surface(black_box(img), black_box(*target))),
        );
    }

    group.finish();
}

fn bench_quality_search(c: &mut Criterion) {
    let surface = create_test_image(1600, 900).to_rgb8();
    let config = EngineConfig::default();

    let mut group = c.benchmark_group("quality_search");
    // A generous budget stops after one encode, a tiny one walks the whole ladder.
    for (label, budget) in [("first_fit", u64::MAX), ("full_descent", 1)] {
        group.bench_function(label, |b| {
            b.iter(|| search_quality(black_box(&surface), budget, &JpegSurfaceEncoder, &config))
        });
    }
    group.finish();
}

fn bench_engine_compress(c: &mut Criterion) {
    let engine = Engine::new(EngineConfig::default()).unwrap();
    let bytes = encode_bmp(&create_test_image(2400, 1600));

    c.bench_function("engine_compress_blocking", |b| {
        b.iter(|| engine.compress_blocking(ImageResource::new("bench.bmp", bytes.clone())))
    });
}

fn bench_archive(c: &mut Criterion) {
    let results: Vec<_> = (0..20)
        .map(|i| {
            CompressionResult::retain_original(ImageResource::new(
                format!("image_{}.jpg", i),
                vec![0xAB; 256 * 1024],
            ))
        })
        .collect();

    c.bench_function("archive_20_results", |b| b.iter(|| archive(black_box(&results))));
}

criterion_group!(
    benches,
    bench_target_dimensions,
    bench_render_surface,
    bench_quality_search,
    bench_engine_compress,
    bench_archive
);
criterion_main!(benches);
