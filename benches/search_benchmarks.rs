/*!
# Search Benchmarks

Benchmarks for translating query-string parameters into a search.

## Usage

```bash
# Run all benchmarks
cargo bench --bench search_benchmarks

# Run a specific group
cargo bench --bench search_benchmarks -- "Compile"

# Quick run with fewer samples
cargo bench --bench search_benchmarks -- --quick
```

HTML reports are generated in `target/criterion/report/index.html`.
*/

use async_trait::async_trait;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use crudsearch::{Bindings, ModelSchema, PropertySchema, Search, SearchQuery, Store};
use sea_orm::DbErr;
use std::hint::black_box;

/// Store that never returns anything; only compilation is measured
struct NullStore;

#[async_trait]
impl Store for NullStore {
    type Record = ();

    async fn find(&self, _model: &str, _query: &SearchQuery) -> Result<Vec<()>, DbErr> {
        Ok(Vec::new())
    }

    async fn count(&self, _model: &str, _predicate: &str, _bindings: &Bindings) -> Result<u64, DbErr> {
        Ok(0)
    }
}

fn schema(columns: usize) -> ModelSchema {
    let properties = (0..columns)
        .map(|i| PropertySchema::new(format!("column_{i}"), i % 4 != 3))
        .collect();
    ModelSchema::new("benchmark_posts", properties)
}

fn typical_request() -> Vec<(String, String)> {
    vec![
        ("column_0*has".into(), "rust".into()),
        ("column_1*column_2*has".into(), "async".into()),
        ("column_4*min".into(), "10".into()),
        ("column_4*max".into(), "250.5".into()),
        ("sort".into(), "column_0*desc".into()),
        ("sort".into(), "column_1*asc".into()),
        ("limit".into(), "25".into()),
        ("offset".into(), "50".into()),
        ("utm_source".into(), "newsletter".into()),
    ]
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("Compile");
    let search = Search::from_schema(schema(8), NullStore);
    let params = typical_request();

    group.bench_function("typical_request", |b| {
        b.iter(|| search.compile(black_box(&params).iter().map(|(k, v)| (k, v))));
    });

    for columns in [4_usize, 16, 64] {
        let search = Search::from_schema(schema(columns), NullStore);
        group.bench_with_input(
            BenchmarkId::new("bare_criterion", columns),
            &columns,
            |b, _| b.iter(|| search.compile(black_box([("*has", "needle")]))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_compile);
criterion_main!(benches);
