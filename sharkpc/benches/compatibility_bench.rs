use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sharkpc::prelude::*;
use sharkpc::RulesEngine;

fn full_build() -> Selection {
    let catalog = Catalog::builtin();
    ["cpu1", "gpu1", "mb2", "ram1", "storage1", "psu1", "case1"]
        .iter()
        .filter_map(|id| catalog.get(id).cloned())
        .collect()
}

fn bench_analyze(c: &mut Criterion) {
    let engine = RulesEngine::with_default_rules();
    let selection = full_build();

    c.bench_function("analyze_full_build", |b| {
        b.iter(|| engine.analyze(black_box(&selection)));
    });
}

fn bench_total_price(c: &mut Criterion) {
    let selection = full_build();

    c.bench_function("total_price", |b| {
        b.iter(|| black_box(&selection).total_price());
    });
}

criterion_group!(benches, bench_analyze, bench_total_price);
criterion_main!(benches);
