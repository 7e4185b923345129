use std::hint::black_box;

use bench::{apply_large_runtime_config, apply_small_runtime_config, default_rng, distinct_keys};
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};

use avl_tree::{AvlTree, decode, deserialize_with, encode, serialize};

const SIZES: [usize; 4] = [1_000, 4_000, 16_000, 64_000];

fn build(keys: &[i64]) -> AvlTree<()> {
    let mut tree = AvlTree::with_observer(keys[0], ());
    for &key in &keys[1..] {
        let _ = tree.insert(key);
    }
    tree
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("avl_tree/insert");
    apply_large_runtime_config(&mut group);
    let mut rng = default_rng();
    for &size in &SIZES {
        let random = distinct_keys(&mut rng, size);
        let ascending: Vec<i64> = (0..size as i64).collect();
        group.bench_function(BenchmarkId::new("random", size), |bencher| {
            bencher.iter(|| black_box(build(&random)).len())
        });
        group.bench_function(BenchmarkId::new("ascending", size), |bencher| {
            bencher.iter(|| black_box(build(&ascending)).len())
        });
    }
    group.finish();
}

fn bench_linear(c: &mut Criterion) {
    let mut group = c.benchmark_group("avl_tree/linear");
    apply_small_runtime_config(&mut group);
    let mut rng = default_rng();
    for &size in &SIZES {
        let tree = build(&distinct_keys(&mut rng, size));
        let keys = serialize(&tree);
        let text = encode(&keys);

        group.bench_function(BenchmarkId::new("serialize", size), |bencher| {
            bencher.iter(|| black_box(serialize(&tree)))
        });
        group.bench_function(BenchmarkId::new("deserialize", size), |bencher| {
            bencher.iter_batched(
                || keys.clone(),
                |keys| black_box(deserialize_with(&keys, ()).map(|t| t.len())),
                BatchSize::SmallInput,
            )
        });
        group.bench_function(BenchmarkId::new("decode", size), |bencher| {
            bencher.iter(|| black_box(decode(&text)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_linear);
criterion_main!(benches);
