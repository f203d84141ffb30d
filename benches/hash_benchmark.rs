//! Performance benchmarks for HashBridge
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hashbridge::config::{EngineConfig, HashAlgorithm};
use hashbridge::core::{path_to_bytes, HashEngine};
use hashbridge::hash::hash_bytes;
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;

/// Create a test file of the specified size
fn create_test_file(dir: &std::path::Path, name: &str, size: usize) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).unwrap();

    let chunk_size = 64 * 1024;
    let chunk: Vec<u8> = (0..chunk_size).map(|i| (i % 256) as u8).collect();
    let mut remaining = size;

    while remaining > 0 {
        let to_write = remaining.min(chunk_size);
        file.write_all(&chunk[..to_write]).unwrap();
        remaining -= to_write;
    }

    path
}

fn bench_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_bytes");
    let data: Vec<u8> = (0..1024 * 1024).map(|i| (i % 256) as u8).collect();
    group.throughput(Throughput::Bytes(data.len() as u64));

    for algorithm in [
        HashAlgorithm::Sha256,
        HashAlgorithm::Blake3,
        HashAlgorithm::XXHash3,
        HashAlgorithm::XXHash64,
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(algorithm.name()), &data, |b, data| {
            b.iter(|| hash_bytes(black_box(data), algorithm));
        });
    }

    group.finish();
}

fn bench_hash_many(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let paths: Vec<Vec<u8>> = (0..256)
        .map(|i| path_to_bytes(&create_test_file(dir.path(), &format!("file_{}.bin", i), 16 * 1024)))
        .collect();

    let mut group = c.benchmark_group("hash_many_256x16k");
    for workers in [1usize, 4, 16] {
        let engine = HashEngine::new(EngineConfig {
            max_in_flight: workers,
            ..Default::default()
        })
        .unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(workers), &paths, |b, paths| {
            b.iter(|| black_box(engine.hash_many(paths)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_algorithms, bench_hash_many);
criterion_main!(benches);
