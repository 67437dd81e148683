//! Benchmarks for shape enumeration and the exhaustive search.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use countdown::{enumerate_shapes, evaluate, search_shape, BestSolution, Operator, Search};

fn bench_enumerate(c: &mut Criterion)
{
    let mut group = c.benchmark_group("enumerate_shapes");
    for leaf_count in [4, 5, 6, 7]
    {
        group.bench_with_input(BenchmarkId::from_parameter(leaf_count), &leaf_count, |b, &n| {
            b.iter(|| enumerate_shapes(black_box(n)).unwrap())
        });
    }
    group.finish();
}

fn bench_evaluate(c: &mut Criterion)
{
    let shapes = enumerate_shapes(6).unwrap();
    let ops = [Operator::Add, Operator::Mul, Operator::Sub, Operator::Div, Operator::Pow];
    let nrs = [25, 50, 75, 100, 3, 6];
    c.bench_function("evaluate_six", |b| {
        b.iter(|| {
            shapes.iter()
                .map(|shape| evaluate(shape, black_box(&ops), black_box(&nrs)))
                .filter(|value| value.is_finite())
                .count()
        })
    });
}

fn bench_search(c: &mut Criterion)
{
    let nrs = [3, 7, 8, 50];
    let shapes = enumerate_shapes(nrs.len()).unwrap();

    c.bench_function("search_shape_four", |b| {
        b.iter(|| {
            let best = BestSolution::new();
            search_shape(&shapes[0], black_box(&nrs), 9_999, &best)
        })
    });

    c.bench_function("search_four", |b| {
        b.iter(|| Search::new().run(&shapes, black_box(&nrs), 9_999).unwrap().diff)
    });
}

criterion_group!(benches, bench_enumerate, bench_evaluate, bench_search);
criterion_main!(benches);
