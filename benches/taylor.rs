use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use xctaylor::{ctaylor, taylor, polymul};

#[path = "common/mod.rs"]
mod common;
use common::*;

type T4x2 = taylor!(f64; 4, 2);
type T4x3 = taylor!(f64; 4, 3);
type T4x4 = taylor!(f64; 4, 4);

fn dense_inputs<const NDEG: usize, const LEN: usize>(
    x: &[f64; 4],
) -> [xctaylor::Taylor<f64, 4, NDEG, LEN>; 4] {
    std::array::from_fn(|i| xctaylor::Taylor::variable(x[i], i))
}

fn bench_dense(c: &mut Criterion) {
    let mut group = c.benchmark_group("taylor_dense");
    let x = make_point();

    let v2: [T4x2; 4] = dense_inputs(&x);
    let v3: [T4x3; 4] = dense_inputs(&x);
    let v4: [T4x4; 4] = dense_inputs(&x);

    group.bench_function(BenchmarkId::new("gga_like", 2), |b| {
        b.iter(|| black_box(gga_like(black_box(&v2))))
    });
    group.bench_function(BenchmarkId::new("gga_like", 3), |b| {
        b.iter(|| black_box(gga_like(black_box(&v3))))
    });
    group.bench_function(BenchmarkId::new("gga_like", 4), |b| {
        b.iter(|| black_box(gga_like(black_box(&v4))))
    });
    group.bench_function(BenchmarkId::new("rational", 3), |b| {
        b.iter(|| black_box(rational(black_box(&v3))))
    });
    group.finish();
}

fn bench_cube(c: &mut Criterion) {
    let mut group = c.benchmark_group("taylor_cube");
    let x = make_point();

    let c2: [ctaylor!(f64; 2); 4] =
        std::array::from_fn(|i| xctaylor::CubeTaylor::variable(x[i], i % 2));
    let c3: [ctaylor!(f64; 3); 4] =
        std::array::from_fn(|i| xctaylor::CubeTaylor::variable(x[i], i % 3));
    let c4: [ctaylor!(f64; 4); 4] =
        std::array::from_fn(|i| xctaylor::CubeTaylor::variable(x[i], i));

    group.bench_function(BenchmarkId::new("gga_like", 2), |b| {
        b.iter(|| black_box(gga_like(black_box(&c2))))
    });
    group.bench_function(BenchmarkId::new("gga_like", 3), |b| {
        b.iter(|| black_box(gga_like(black_box(&c3))))
    });
    group.bench_function(BenchmarkId::new("gga_like", 4), |b| {
        b.iter(|| black_box(gga_like(black_box(&c4))))
    });
    group.finish();
}

fn bench_kernel(c: &mut Criterion) {
    let mut group = c.benchmark_group("taylor_kernel");
    for (nvar, ndeg) in [(2, 4), (4, 3), (5, 3), (3, 6)] {
        let len = polymul::polylen(nvar, ndeg);
        let a: Vec<f64> = (0..len).map(|i| 1.0 / (i as f64 + 1.0)).collect();
        let p: Vec<f64> = (0..len).map(|i| (i as f64 * 0.37).sin()).collect();
        group.bench_with_input(
            BenchmarkId::new("mul_acc", format!("{}x{}", nvar, ndeg)),
            &(a, p),
            |b, (a, p)| {
                b.iter(|| {
                    let mut dst = vec![0.0; len];
                    polymul::taylor_mul_acc(nvar, ndeg, &mut dst, black_box(a), black_box(p));
                    black_box(dst)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_dense, bench_cube, bench_kernel);
criterion_main!(benches);
