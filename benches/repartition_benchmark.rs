//! Throughput of the partition-metadata rewrite and of bond decoding.
//!
//!   $ cargo bench --bench repartition_benchmark

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main, measurement::WallTime};
use mpiio_snapshot::{
    ParticlePayload, PartitionMetadata, Snapshot, SnapshotDescriptor, SnapshotHeader,
    write_blockfile,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;
use std::io;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

const PARTICLE_COUNTS: [usize; 3] = [10_000, 100_000, 1_000_000];
const OLD_RANKS: usize = 64;
const NEW_RANKS: usize = 48;
const MAX_BONDS_PER_PARTICLE: i32 = 3;

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

/// Bond type 0 has one partner; every particle bonds to random others.
fn random_snapshot(n_particles: usize) -> (PartitionMetadata, Vec<i32>) {
    let mut rng = StdRng::seed_from_u64(7);
    let mut bond_counts = Vec::with_capacity(n_particles);
    let mut bonds = Vec::new();

    for _ in 0..n_particles {
        let n_bonds = rng.random_range(0..=MAX_BONDS_PER_PARTICLE);
        for _ in 0..n_bonds {
            bonds.push(0);
            bonds.push(rng.random_range(0..n_particles as i32));
        }
        bond_counts.push(2 * n_bonds);
    }

    let meta = PartitionMetadata::from_counts(vec![1; n_particles], bond_counts)
        .and_then(|single| single.repartition(OLD_RANKS))
        .expect("Failed to build benchmark partition");

    (meta, bonds)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn repartition_bench(c: &mut Criterion<WallTime>) {
    let mut group = c.benchmark_group("repartition");

    for &n in &PARTICLE_COUNTS {
        let (meta, _) = random_snapshot(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &meta, |b, meta| {
            b.iter(|| black_box(meta.repartition(NEW_RANKS).unwrap()));
        });
    }

    group.finish();
}

fn decode_bench(c: &mut Criterion<WallTime>) {
    let mut group = c.benchmark_group("decode_blockfile");
    group.sample_size(10);

    for &n in &PARTICLE_COUNTS {
        let (meta, bonds) = random_snapshot(n);
        let n_bond_words = bonds.len();
        let descriptor = SnapshotDescriptor::from_parts(
            meta.prefix().to_vec(),
            Some(meta.bond_offsets().to_vec()),
            n,
            n_bond_words,
        )
        .unwrap();
        let payload = ParticlePayload::new((0..n as i32).collect()).with_bonds(bonds);
        let snapshot = Snapshot::from_parts(SnapshotHeader::new(0, vec![1]), descriptor, payload);

        group.bench_with_input(BenchmarkId::from_parameter(n), &snapshot, |b, snapshot| {
            b.iter(|| write_blockfile(snapshot, &mut io::sink()).unwrap());
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Criterion harness
// ---------------------------------------------------------------------------

criterion_group!(benches, repartition_bench, decode_bench);
criterion_main!(benches);
