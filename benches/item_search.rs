use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use eq_inventory_search::models::{InventoryIndex, ItemEntry};
use eq_inventory_search::{Scope, search};

fn generate_index(items: usize) -> InventoryIndex {
    let items = (0..items)
        .map(|i| {
            let mut item = ItemEntry::new(&(10_000 + i).to_string(), &format!("Test Item {}", i));
            for c in 0..(i % 5 + 1) {
                item.add(&format!("Character{}", c), &format!("Bank{}", i % 24 + 1), 1);
            }
            item
        })
        .collect();
    InventoryIndex { items }
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [1_000, 10_000, 50_000].iter() {
        let index = generate_index(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("substring", size), &index, |b, index| {
            b.iter(|| search(black_box("item 12"), index, &Scope::All, false));
        });
        group.bench_with_input(BenchmarkId::new("pattern", size), &index, |b, index| {
            b.iter(|| search(black_box("^test.*9$"), index, &Scope::All, false));
        });
        group.bench_with_input(BenchmarkId::new("scoped", size), &index, |b, index| {
            let scope = Scope::from_label("Character3");
            b.iter(|| search(black_box("item"), index, &scope, true));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
