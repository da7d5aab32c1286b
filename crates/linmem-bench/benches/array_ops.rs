//! Criterion micro-benchmarks for DynArray append, insert/erase, and clone,
//! heap-backed versus arena-backed.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use linmem_arena::LinearArena;
use linmem_array::DynArray;
use linmem_bench::fill_array;

const PUSHES: u64 = 10_000;

/// Benchmark: 10K appends into a heap-backed array from the default capacity.
fn bench_push_heap_10k(c: &mut Criterion) {
    c.bench_function("array_push_heap_10k", |b| {
        b.iter(|| {
            let mut array = DynArray::new();
            for i in 0..PUSHES {
                array.push_back(i).unwrap();
            }
            black_box(array.len());
        });
    });
}

/// Benchmark: 10K appends into an arena-backed array, arena reset per iteration.
fn bench_push_arena_10k(c: &mut Criterion) {
    // Every abandoned buffer stays in the arena: roughly 3x the final size.
    let mut buf = vec![0u8; 1024 * 1024];
    let mut arena = LinearArena::new(&mut buf);

    c.bench_function("array_push_arena_10k", |b| {
        b.iter(|| {
            {
                let array = fill_array(&arena, PUSHES).unwrap();
                black_box(array.len());
            }
            arena.free_all();
        });
    });
}

/// Benchmark: insert at the front then erase from the front, 1K elements.
fn bench_insert_erase_front(c: &mut Criterion) {
    c.bench_function("array_insert_erase_front_1k", |b| {
        b.iter(|| {
            let mut array = DynArray::with_capacity(1024);
            for i in 0..1024u32 {
                array.insert(0, i).unwrap();
            }
            while !array.is_empty() {
                array.erase(0).unwrap();
            }
            black_box(array.capacity());
        });
    });
}

/// Benchmark: deep copy of a 10K-element array.
fn bench_clone_10k(c: &mut Criterion) {
    let source: DynArray<'_, u64> = (0..PUSHES).collect();

    c.bench_function("array_clone_10k", |b| {
        b.iter(|| {
            let copy = source.try_clone().unwrap();
            black_box(copy.len());
        });
    });
}

criterion_group!(
    benches,
    bench_push_heap_10k,
    bench_push_arena_10k,
    bench_insert_erase_front,
    bench_clone_10k
);
criterion_main!(benches);
