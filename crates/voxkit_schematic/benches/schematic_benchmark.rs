//! Benchmark for schematic insertion and lookup.
//!
//! Run with: cargo bench --package voxkit_schematic --bench schematic_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use voxkit_schematic::Schematic;

fn filled(side: i32) -> Schematic {
    let mut schematic = Schematic::new(None);
    for z in 0..side {
        for y in 0..side {
            for x in 0..side {
                schematic.add_voxel(x, y, z, 0xFF00_0000 | ((x ^ y ^ z) & 0xFF) as u32 + 1);
            }
        }
    }
    schematic
}

fn benchmark_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    group.throughput(Throughput::Elements(64 * 64 * 64));
    group.sample_size(10);
    group.bench_function("fill_64_cube", |b| {
        b.iter(|| black_box(filled(64)));
    });
    group.finish();
}

fn benchmark_lookup(c: &mut Criterion) {
    let schematic = filled(64);

    c.bench_function("color_at_hit", |b| {
        let mut i = 0i32;
        b.iter(|| {
            i = (i + 1) % 64;
            black_box(schematic.color_at(black_box(i), i, 63 - i))
        });
    });

    c.bench_function("color_at_miss", |b| {
        b.iter(|| black_box(schematic.color_at(black_box(1500), 900, 1500)));
    });
}

criterion_group!(benches, benchmark_insert, benchmark_lookup);
criterion_main!(benches);
