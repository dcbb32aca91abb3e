//! Performance benchmarks for refinement, sorting and deduplication.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use listkit::{List, NumberList, StringList, Value};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn random_numbers(len: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..len).map(|_| rng.gen_range(0.0..1000.0)).collect()
}

fn bench_refine_numbers(c: &mut Criterion) {
    let list = List::from_vec(random_numbers(10_000).into_iter().map(Value::from).collect());

    c.bench_function("refine_numbers_10k", |b| {
        b.iter(|| black_box(&list).get_improved())
    });
}

fn bench_refine_table(c: &mut Criterion) {
    let columns: Vec<Value> = (0..20)
        .map(|_| {
            let column = List::from_vec(random_numbers(500).into_iter().map(Value::from).collect());
            Value::from(column.into_container())
        })
        .collect();
    let list = List::from_vec(columns);

    c.bench_function("refine_table_20x500", |b| {
        b.iter(|| black_box(&list).get_improved())
    });
}

fn bench_sort(c: &mut Criterion) {
    let numbers = NumberList::from_vec(random_numbers(10_000));

    c.bench_function("sort_numbers_10k", |b| {
        b.iter(|| black_box(&numbers).get_sorted(true))
    });
}

fn bench_dedup(c: &mut Criterion) {
    let rounded: Vec<f64> = random_numbers(10_000).into_iter().map(f64::floor).collect();
    let numbers = NumberList::from_vec(rounded.clone());
    let generic = List::from_vec(rounded.into_iter().map(Value::from).collect());
    let strings: StringList = numbers.iter().map(|n| format!("k{}", n)).collect();

    c.bench_function("dedup_numbers_hashed", |b| {
        b.iter(|| black_box(&numbers).get_without_repetitions())
    });
    c.bench_function("dedup_strings_hashed", |b| {
        b.iter(|| black_box(&strings).get_without_repetitions())
    });
    c.bench_function("dedup_values_pairwise", |b| {
        b.iter(|| black_box(&generic).get_without_repetitions())
    });
}

criterion_group!(
    benches,
    bench_refine_numbers,
    bench_refine_table,
    bench_sort,
    bench_dedup
);
criterion_main!(benches);
