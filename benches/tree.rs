use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn shuffled_keys(len: usize) -> Vec<usize> {
    let mut keys: Vec<usize> = (0..len).collect();
    keys.shuffle(&mut ChaCha8Rng::seed_from_u64(7));
    keys
}

fn insert(c: &mut Criterion) {
    let keys = shuffled_keys(1000);
    c.bench_function("noirtree_insert", |b| {
        b.iter(|| {
            let mut tree = noirtree::Tree::new();
            for &k in &keys {
                tree.insert(k);
            }
            tree
        })
    });
    c.bench_function("rbtree_insert", |b| {
        b.iter(|| {
            let mut tree = rbtree::RBTree::<usize, ()>::new();
            for &k in &keys {
                tree.insert(k, ());
            }
            tree
        })
    });
}

fn erase(c: &mut Criterion) {
    let keys = shuffled_keys(1000);
    let full: noirtree::Tree<usize> = keys.iter().copied().collect();
    c.bench_function("noirtree_erase", |b| {
        b.iter_batched(
            || full.clone(),
            |mut tree| {
                for k in &keys {
                    tree.remove(k);
                }
                tree
            },
            BatchSize::SmallInput,
        )
    });
}

fn lookup(c: &mut Criterion) {
    let keys = shuffled_keys(1000);
    let tree: noirtree::Tree<usize> = keys.iter().copied().collect();
    c.bench_function("noirtree_lower_bound", |b| {
        b.iter(|| keys.iter().filter(|k| tree.lower_bound(k).get().is_some()).count())
    });
}

criterion_group!(benches, insert, erase, lookup);
criterion_main!(benches);
