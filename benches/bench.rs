use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rb_ordered_tree::OrderedTree;
use std::hint::black_box;

struct KeyGenerator {
    rng: StdRng,
    limit: i64,
}
impl KeyGenerator {
    fn new() -> Self {
        const LIMIT: i64 = 1000;
        Self {
            rng: StdRng::from_seed([0; 32]),
            limit: LIMIT,
        }
    }

    fn next(&mut self) -> i64 {
        self.rng.gen_range(0..self.limit)
    }
}

// insert helper fn
fn ordered_tree_insert(count: usize, bench: &mut Bencher) {
    let mut gen = KeyGenerator::new();
    let keys: Vec<_> = std::iter::repeat_with(|| gen.next()).take(count).collect();
    bench.iter(|| {
        let mut tree = OrderedTree::new();
        for &k in &keys {
            black_box(tree.insert(k));
        }
    });
}

// insert and erase helper fn
fn ordered_tree_insert_erase(count: usize, bench: &mut Bencher) {
    let mut gen = KeyGenerator::new();
    let keys: Vec<_> = std::iter::repeat_with(|| gen.next()).take(count).collect();
    bench.iter(|| {
        let mut tree = OrderedTree::new();
        let handles: Vec<_> = keys.iter().map(|&k| tree.insert(k)).collect();
        for node in handles {
            let _ignore = black_box(tree.erase(node));
        }
    });
}

// in-order export helper fn
fn ordered_tree_export(count: usize, bench: &mut Bencher) {
    let mut gen = KeyGenerator::new();
    let mut tree = OrderedTree::new();
    for _ in 0..count {
        tree.insert(gen.next());
    }
    bench.iter(|| {
        black_box(tree.to_ordered_vec());
    });
}

fn bench_ordered_tree_insert(c: &mut Criterion) {
    c.bench_function("bench_ordered_tree_insert_100", |b| {
        ordered_tree_insert(100, b)
    });
    c.bench_function("bench_ordered_tree_insert_1000", |b| {
        ordered_tree_insert(1000, b)
    });
    c.bench_function("bench_ordered_tree_insert_10,000", |b| {
        ordered_tree_insert(10_000, b)
    });
    c.bench_function("bench_ordered_tree_insert_100,000", |b| {
        ordered_tree_insert(100_000, b)
    });
}

fn bench_ordered_tree_insert_erase(c: &mut Criterion) {
    c.bench_function("bench_ordered_tree_insert_erase_100", |b| {
        ordered_tree_insert_erase(100, b)
    });
    c.bench_function("bench_ordered_tree_insert_erase_1000", |b| {
        ordered_tree_insert_erase(1000, b)
    });
    c.bench_function("bench_ordered_tree_insert_erase_10,000", |b| {
        ordered_tree_insert_erase(10_000, b)
    });
    c.bench_function("bench_ordered_tree_insert_erase_100,000", |b| {
        ordered_tree_insert_erase(100_000, b)
    });
}

fn bench_ordered_tree_export(c: &mut Criterion) {
    c.bench_function("bench_ordered_tree_export_1000", |b| {
        ordered_tree_export(1000, b)
    });
    c.bench_function("bench_ordered_tree_export_10,000", |b| {
        ordered_tree_export(10_000, b)
    });
}

fn criterion_config() -> Criterion {
    Criterion::default().configure_from_args().without_plots()
}

criterion_group! {
    name = benches_basic_op;
    config = criterion_config();
    targets = bench_ordered_tree_insert, bench_ordered_tree_insert_erase,
}

criterion_group! {
    name = benches_export;
    config = criterion_config();
    targets = bench_ordered_tree_export
}

criterion_main!(benches_basic_op, benches_export);
