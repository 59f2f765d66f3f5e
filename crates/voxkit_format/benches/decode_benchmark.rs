//! Benchmark for scene decoding and grid downsampling.
//!
//! Run with: cargo bench --package voxkit_format --bench decode_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use voxkit_format::{decode, DecodeOptions, VoxelGrid, VOX_MAGIC, VOX_VERSION};

fn push_chunk(out: &mut Vec<u8>, tag: &[u8; 4], content: &[u8], children: &[u8]) {
    out.extend_from_slice(tag);
    out.extend_from_slice(&(content.len() as i32).to_le_bytes());
    out.extend_from_slice(&(children.len() as i32).to_le_bytes());
    out.extend_from_slice(content);
    out.extend_from_slice(children);
}

/// A 128^3 frame filled on every other voxel, plus a full palette.
fn dense_scene() -> (Vec<u8>, u64) {
    let mut voxels = Vec::new();
    let mut count = 0u32;
    for z in (0..128u8).step_by(2) {
        for y in (0..128u8).step_by(2) {
            for x in 0..128u8 {
                voxels.extend_from_slice(&[x, y, z, 1 + (x ^ y ^ z) % 254]);
                count += 1;
            }
        }
    }
    let mut xyzi = count.to_le_bytes().to_vec();
    xyzi.extend(voxels);

    let mut size = Vec::new();
    for dim in [127i32, 127, 127] {
        size.extend_from_slice(&dim.to_le_bytes());
    }
    let rgba: Vec<u8> = (0..=255u8).flat_map(|i| [i, i, i, 255]).collect();

    let mut children = Vec::new();
    push_chunk(&mut children, b"SIZE", &size, &[]);
    push_chunk(&mut children, b"XYZI", &xyzi, &[]);
    push_chunk(&mut children, b"RGBA", &rgba, &[]);

    let mut file = VOX_MAGIC.to_vec();
    file.extend_from_slice(&VOX_VERSION.to_le_bytes());
    push_chunk(&mut file, b"MAIN", &[], &children);
    (file, u64::from(count))
}

fn benchmark_decode(c: &mut Criterion) {
    let (bytes, voxels) = dense_scene();

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Elements(voxels));
    group.bench_function("dense_128_frame", |b| {
        b.iter(|| black_box(decode(black_box(&bytes), DecodeOptions::default())));
    });
    group.finish();
}

fn benchmark_downsample(c: &mut Criterion) {
    let mut grid = VoxelGrid::new(63, 63, 63);
    for z in 0..64 {
        for y in 0..64 {
            for x in (0..64).step_by(3) {
                grid.set(x, y, z, ((x + y + z) % 7 + 1) as u8);
            }
        }
    }

    c.bench_function("to_smaller_64", |b| {
        b.iter(|| black_box(grid.to_smaller()));
    });
}

criterion_group!(benches, benchmark_decode, benchmark_downsample);
criterion_main!(benches);
