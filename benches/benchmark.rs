//! Performance benchmarks for FastHiCcompare
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fast_hiccompare::core::{
    create_hic_table, exclude_regions, join_entries, ExclusionRegionSet, GenomicInterval,
    HicInput, JoinPolicy, SparseEntry, TableOptions,
};
use fast_hiccompare::formats::parse_hic_reader;

const BIN: u64 = 40_000;

/// Banded upper triangle of `bins` bins, keeping pairs up to `band` bins apart
fn synthetic_entries(bins: u64, band: u64, seed: u64) -> Vec<SparseEntry> {
    (0..bins)
        .flat_map(|i| {
            (i..(i + band).min(bins)).map(move |j| {
                let freq = ((i * 31 + j * 17 + seed) % 97 + 1) as f64 / (j - i + 1) as f64;
                SparseEntry::new(i * BIN, j * BIN, freq)
            })
        })
        .collect()
}

fn options(include_zeros: bool) -> TableOptions {
    TableOptions {
        chromosome: Some("chr1".to_string()),
        include_zeros,
        ..TableOptions::default()
    }
}

/// Benchmark the full table pipeline
fn bench_create_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_hic_table");

    for bins in [500u64, 2000, 5000].iter() {
        let first = synthetic_entries(*bins, 100, 1);
        let second = synthetic_entries(*bins, 100, 7);
        group.throughput(Throughput::Elements(first.len() as u64));

        for include_zeros in [false, true] {
            let id = format!("{}/{}", bins, if include_zeros { "outer" } else { "inner" });
            group.bench_with_input(BenchmarkId::from_parameter(id), bins, |b, _| {
                b.iter(|| {
                    let table = create_hic_table(
                        HicInput::Triplets(first.clone()),
                        HicInput::Triplets(second.clone()),
                        &options(include_zeros),
                    )
                    .unwrap();
                    black_box(table)
                })
            });
        }
    }

    group.finish();
}

/// Benchmark the join alone
fn bench_join(c: &mut Criterion) {
    let first = synthetic_entries(2000, 100, 1);
    let second = synthetic_entries(2000, 100, 7);

    c.bench_function("join_outer", |b| {
        b.iter(|| black_box(join_entries(black_box(&first), black_box(&second), JoinPolicy::Outer)))
    });
}

/// Benchmark region exclusion against a table
fn bench_exclusion(c: &mut Criterion) {
    let entries = synthetic_entries(2000, 100, 1);
    let table = create_hic_table(
        HicInput::Triplets(entries.clone()),
        HicInput::Triplets(entries),
        &options(false),
    )
    .unwrap();
    let regions = ExclusionRegionSet::from_intervals(
        (0..200)
            .map(|i| GenomicInterval::new("chr1", i * 400_000, i * 400_000 + 25_000))
            .collect(),
    )
    .unwrap();

    c.bench_function("exclude_regions", |b| {
        b.iter(|| black_box(exclude_regions(&table, black_box(&regions), 0.2).unwrap()))
    });
}

/// Benchmark sparse matrix parsing
fn bench_sparse_parsing(c: &mut Criterion) {
    let text: String = synthetic_entries(1000, 50, 3)
        .iter()
        .map(|e| format!("{}\t{}\t{}\n", e.region1, e.region2, e.freq))
        .collect();

    let mut group = c.benchmark_group("sparse_parsing");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("triplets", |b| {
        b.iter(|| black_box(parse_hic_reader(black_box(text.as_bytes()), 1).unwrap()))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_create_table,
    bench_join,
    bench_exclusion,
    bench_sparse_parsing
);
criterion_main!(benches);
