//! Operation performance benchmarks.
//!
//! Measures load + describe and load + sort over generated CSV data.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use grist::input::load_str;
use grist::ops::{self, SortOrder};

/// Generate a mixed-type CSV with the given number of rows.
fn generate_csv(rows: usize) -> String {
    let mut data = String::from("id,region,amount,score,active\n");
    let regions = ["north", "south", "east", "west"];
    for row in 0..rows {
        data.push_str(&format!(
            "{},{},{},{:.2},{}\n",
            row + 1,
            regions[row % regions.len()],
            (row * 37) % 1000,
            (row % 100) as f64 * 0.73,
            row % 2 == 0,
        ));
    }
    data
}

fn bench_load_and_describe(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_describe");

    for rows in [100, 1_000, 10_000] {
        let csv = generate_csv(rows);
        group.throughput(Throughput::Bytes(csv.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &csv, |b, csv| {
            b.iter(|| {
                let ds = load_str(black_box(csv)).unwrap();
                black_box(ops::describe(&ds))
            });
        });
    }

    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");

    for rows in [1_000, 10_000] {
        let ds = load_str(&generate_csv(rows)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(rows), &ds, |b, ds| {
            b.iter(|| black_box(ops::sort(ds, "amount", SortOrder::Asc).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_load_and_describe, bench_sort);
criterion_main!(benches);
