use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use nameday_engine::{NamedayEntry, NamedayResolver};

/// A resolver over a synthetic table about the size of a real calendar
/// (a few hundred names).
fn build_resolver(entries: usize) -> NamedayResolver {
    let table = (0..entries)
        .map(|i| {
            let month = (i % 12 + 1) as u32;
            let day = (i % 28 + 1) as u32;
            NamedayEntry::new(format!("Name{i:04}"), month, day).unwrap()
        })
        .collect();
    NamedayResolver::new(table)
}

fn benchmark_resolve(c: &mut Criterion) {
    let resolver = build_resolver(400);

    c.bench_function("resolve_exact_hit", |b| {
        b.iter(|| resolver.resolve(black_box("Name0399")))
    });

    // Prefix fallback forces both passes over the full table.
    c.bench_function("resolve_prefix_fallback", |b| {
        b.iter(|| resolver.resolve(black_box("Name0399ka")))
    });

    c.bench_function("resolve_miss", |b| {
        b.iter(|| resolver.resolve(black_box("Zornitsa")))
    });
}

criterion_group!(benches, benchmark_resolve);
criterion_main!(benches);
