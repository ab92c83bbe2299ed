//! Encoding Benchmarks
//!
//! Measures the per-image work done when a raster is placed on a page:
//! row repacking, ASCII85 encoding and Flate compression, plus a small
//! end-to-end document.
//!
//! Run with: `cargo bench --bench encoding_benchmarks`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use draw2pdf::{ascii85, Color, Document, LineStyle, Point, RasterImage, Rectangle, WriterConfig};

fn noise(len: usize) -> Vec<u8> {
    // Cheap deterministic bytes; only the mix of zero and non-zero groups matters.
    let mut state = 0x2545_F491_u32;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

fn benchmark_ascii85(c: &mut Criterion) {
    let mut group = c.benchmark_group("ascii85_encode");

    for size in [1024usize, 64 * 1024, 1024 * 1024] {
        let random = noise(size);
        let zeros = vec![0u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("random", size), &random, |b, data| {
            b.iter(|| ascii85::encode(black_box(data)))
        });
        group.bench_with_input(BenchmarkId::new("zeros", size), &zeros, |b, data| {
            b.iter(|| ascii85::encode(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_repack(c: &mut Criterion) {
    let mut group = c.benchmark_group("image_repack");

    for (name, bpp) in [("gray8", 8u32), ("rgb24", 24), ("rgba32", 32)] {
        let width = 512u32;
        let height = 512u32;
        // Rows padded to a 4-byte boundary, as most framebuffers are.
        let row = width as usize * (bpp as usize / 8);
        let stride = (row + 3) & !3;
        let image = RasterImage::new(width, height, bpp, stride, noise(stride * height as usize))
            .expect("valid image");

        group.throughput(Throughput::Bytes((stride * height as usize) as u64));
        group.bench_function(name, |b| b.iter(|| black_box(&image).repack()));
    }

    group.finish();
}

#[cfg(feature = "compression")]
fn benchmark_flate(c: &mut Criterion) {
    use draw2pdf::compression::compress;

    let mut group = c.benchmark_group("flate_compress");
    let size = 256 * 1024;
    let random = noise(size);
    let gradient: Vec<u8> = (0..size).map(|i| (i % 256) as u8).collect();

    group.throughput(Throughput::Bytes(size as u64));
    group.bench_function("random", |b| b.iter(|| compress(black_box(&random))));
    group.bench_function("gradient", |b| b.iter(|| compress(black_box(&gradient))));
    group.finish();
}

#[cfg(not(feature = "compression"))]
fn benchmark_flate(_c: &mut Criterion) {}

fn benchmark_document(c: &mut Criterion) {
    let page_box = Rectangle::from_position_and_size(0.0, 0.0, 612.0, 792.0);
    let pixels = noise(128 * 128 * 3);

    c.bench_function("document_ten_pages", |b| {
        b.iter(|| {
            let mut doc = Document::from_writer(Vec::new(), page_box, WriterConfig::default())
                .expect("document opens");
            doc.set_line_style(LineStyle::new(Color::blue(), 0.5));
            for page in 0..10 {
                if page > 0 {
                    doc.next_page().expect("page ends");
                }
                let points: Vec<Point> = (0..200)
                    .map(|i| Point::new(i as f64 * 3.0, 400.0 + (i as f64 * 0.1).sin() * 300.0))
                    .collect();
                doc.draw_polyline(&points);
                doc.draw_text(Point::new(72.0, 720.0), "Benchmark page");
                let image = RasterImage::rgb(128, 128, pixels.clone()).expect("valid image");
                doc.draw_image(image, 72.0, 72.0, 128.0, 128.0)
                    .expect("image encodes");
            }
            black_box(doc.close().expect("document closes"))
        })
    });
}

criterion_group!(
    benches,
    benchmark_ascii85,
    benchmark_repack,
    benchmark_flate,
    benchmark_document
);
criterion_main!(benches);
