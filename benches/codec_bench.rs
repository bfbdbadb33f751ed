//! Benchmarks for whole-drawing emit and parse
//!
//! Run with: cargo bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dxf_codec::entities::{Circle, Line, Polyline};
use dxf_codec::{Drawing, DxfConfiguration, DxfReader, DxfVersion, DxfWriter, Handle, Vector3};
use std::hint::black_box;

fn drawing(count: usize) -> Drawing {
    let mut drawing = Drawing::new(DxfVersion::R2000);
    for i in 0..count {
        let x = i as f64;
        let mut line = Line::from_points(Vector3::new(x, 0.0, 0.0), Vector3::new(x, 10.0, 0.0));
        line.common.handle = Some(Handle::new(0x100 + i as u64));
        drawing.add_entity(line.into());
        drawing.add_entity(Circle::from_center_radius(Vector3::new(x, 5.0, 0.0), 0.5).into());
        if i % 10 == 0 {
            let points = (0..8).map(|k| Vector3::new(x + k as f64, k as f64, 0.0));
            drawing.add_entity(Polyline::from_points(points).into());
        }
    }
    drawing
}

// ============================================================================
// Emit
// ============================================================================

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec/write");
    for count in [100, 1_000, 10_000] {
        let drawing = drawing(count);
        group.throughput(Throughput::Elements(drawing.entities.len() as u64));
        for version in [DxfVersion::R12, DxfVersion::R2000] {
            let writer = DxfWriter::new(DxfConfiguration::new(version));
            group.bench_with_input(
                BenchmarkId::new(version.release_name(), count),
                &drawing,
                |b, drawing| b.iter(|| black_box(writer.write_to_vec(drawing).unwrap())),
            );
        }
    }
    group.finish();
}

// ============================================================================
// Parse
// ============================================================================

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec/read");
    for count in [100, 1_000, 10_000] {
        let drawing = drawing(count);
        let bytes = DxfWriter::new(DxfConfiguration::new(DxfVersion::R2000))
            .write_to_vec(&drawing)
            .unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &bytes, |b, bytes| {
            b.iter(|| black_box(DxfReader::from_reader(bytes.as_slice()).read().unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_write, bench_read);
criterion_main!(benches);
