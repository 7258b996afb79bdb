//! Performance benchmarks for relicdex
//!
//! Every list and search re-walks the data root, so these benchmarks measure
//! the full cost of a request at a few dataset sizes.
//!
//! **Benchmarks Included:**
//! - `list`: directory walk plus descriptor mapping
//! - `search_general`: walk, read, parse, and substring match of every record
//! - `search_lightcone`: same walk with the heuristic classifier
//!
//! **Run benchmarks:**
//! ```bash
//! cargo bench                      # Run all benchmarks
//! cargo bench -- search_general    # General search only
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use relicdex::catalog::{Catalog, SearchRequest};
use std::fs;
use tempfile::TempDir;

const FOLDERS: &[&str] = &["Characters", "Lightcones", "Relics/Sets", "Weapons"];

/// Write `count` records spread over a few category folders.
fn create_dataset(count: usize) -> TempDir {
    let tmpdir = TempDir::new().expect("failed to create temp dir");

    for folder in FOLDERS {
        fs::create_dir_all(tmpdir.path().join(folder)).expect("failed to create folder");
    }

    for i in 0..count {
        let folder = FOLDERS[i % FOLDERS.len()];
        let rarity = if folder == "Lightcones" {
            format!("Lightcone {}", 3 + i % 3)
        } else {
            format!("{}", 3 + i % 3)
        };
        let record = serde_json::json!({
            "Name": format!("Item {i}"),
            "Rarity": rarity,
            "Description": "A fairly ordinary record used for benchmarking the full scan.",
            "Stats": {"ATK": i * 3, "DEF": i * 2, "HP": i * 10},
        });
        fs::write(
            tmpdir.path().join(folder).join(format!("item_{i}.json")),
            record.to_string(),
        )
        .expect("failed to write record");
    }

    tmpdir
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().expect("failed to build runtime")
}

fn bench_list(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("list");
    group.sample_size(10);
    group.measurement_time(std::time::Duration::from_secs(5));

    for count in &[100, 1000] {
        let dataset = create_dataset(*count);
        let catalog = Catalog::new(dataset.path());

        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.to_async(&rt)
                .iter(|| async { black_box(catalog.list().await.expect("list failed")) });
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let rt = runtime();

    for (name, request) in [
        ("search_general", SearchRequest::general("item 42")),
        ("search_lightcone", SearchRequest::lightcone()),
    ] {
        let mut group = c.benchmark_group(name);
        group.sample_size(10);
        group.measurement_time(std::time::Duration::from_secs(5));

        for count in &[100, 1000] {
            let dataset = create_dataset(*count);
            let catalog = Catalog::new(dataset.path());

            group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
                b.to_async(&rt).iter(|| async {
                    black_box(catalog.search(&request).await.expect("search failed"))
                });
            });
        }

        group.finish();
    }
}

criterion_group!(benches, bench_list, bench_search);
criterion_main!(benches);
