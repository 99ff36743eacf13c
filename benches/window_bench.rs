//! Benchmarks for scanwin.
//!
//! Run with:
//!     cargo bench

use std::io::Cursor;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use scanwin::{CancelToken, OverlapWindower, Segmenter, WindowConfig, WindowReader};

fn bench_reader(c: &mut Criterion) {
    let mut group = c.benchmark_group("reader");

    for size in [64 * 1024, 1024 * 1024, 16 * 1024 * 1024] {
        let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(format!("iter_{}kb", size / 1024), &data, |b, data| {
            let reader = WindowReader::default();
            b.iter(|| {
                let count = reader
                    .windows(Cursor::new(black_box(data.as_slice())))
                    .count();
                black_box(count)
            });
        });
    }

    group.finish();
}

fn bench_configs(c: &mut Criterion) {
    let mut group = c.benchmark_group("configs");
    let size = 4 * 1024 * 1024;
    let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();
    group.throughput(Throughput::Bytes(size as u64));

    for (name, chunk_size, peek_size) in [
        ("no_peek", 10 * 1024, 0),
        ("default", 10 * 1024, 3 * 1024),
        ("large", 1024 * 1024, 4 * 1024),
    ] {
        let reader = WindowReader::new(WindowConfig::new(chunk_size, peek_size).unwrap()).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| black_box(reader.windows(Cursor::new(data.as_slice())).count()));
        });
    }

    group.finish();
}

fn bench_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("paths");
    let size = 4 * 1024 * 1024;
    let data: Vec<u8> = (0..size).map(|i| (i * 7 + 13) as u8).collect();
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_function("engine_push_64k", |b| {
        b.iter(|| {
            let mut engine = OverlapWindower::new(WindowConfig::default()).unwrap();
            let mut count = 0;
            for piece in data.chunks(64 * 1024) {
                count += engine.push(black_box(piece)).len();
            }
            count += engine.finish().len();
            black_box(count)
        });
    });

    group.bench_function("pipeline", |b| {
        let reader = WindowReader::default();
        b.iter(|| {
            let windows = reader
                .spawn(Cursor::new(data.clone()), &CancelToken::new())
                .unwrap();
            black_box(windows.count())
        });
    });

    group.bench_function("segmenter", |b| {
        let segmenter = Segmenter::default();
        let bytes = bytes::Bytes::from(data.clone());
        b.iter(|| black_box(segmenter.segment(bytes.clone()).count()));
    });

    group.finish();
}

criterion_group!(benches, bench_reader, bench_configs, bench_paths);
criterion_main!(benches);
