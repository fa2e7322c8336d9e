use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use eterna_core::{generate_universe, FilterConfig, FilterUpdate, SortConfig, SortDirection, SortKey};
use eterna_store::derive_view;

fn bench_derive(c: &mut Criterion) {
    let tokens = generate_universe(500);
    let default_filter = FilterConfig::default();
    let mut search_filter = FilterConfig::default();
    search_filter.apply(FilterUpdate::search("sol"));
    let price_sort = SortConfig {
        key: SortKey::Price,
        direction: SortDirection::Desc,
    };

    c.bench_function("derive_view/500_default", |b| {
        b.iter(|| derive_view(black_box(&tokens), &default_filter, &SortConfig::default()))
    });

    c.bench_function("derive_view/500_search_price_desc", |b| {
        b.iter(|| derive_view(black_box(&tokens), &search_filter, &price_sort))
    });
}

criterion_group!(benches, bench_derive);
criterion_main!(benches);
