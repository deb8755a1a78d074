//! Row reduction, Cholesky, and vector dot on generated inputs.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tessera_core::{Matrix, Vector};

/// `B^T B + n I` is symmetric positive definite.
fn spd(n: usize, rng: &mut StdRng) -> Matrix {
    let b = Matrix::rand(n, n, rng).unwrap();
    let eye = Matrix::identity(n).unwrap();
    b.transpose().matmul(&b).unwrap().add(&(&eye * n as f64)).unwrap()
}

fn reduced_row_echelon(c: &mut Criterion) {
    let mut group = c.benchmark_group("rref");
    group.sample_size(10);
    let mut rng = StdRng::seed_from_u64(42);

    for n in [100, 250, 500] {
        let a = Matrix::uniform(n, n, &mut rng).unwrap();
        group.bench_with_input(BenchmarkId::new("uniform", n), &a, |b, a| {
            b.iter(|| black_box(a.reduced_row_echelon()));
        });
    }

    group.finish();
}

fn cholesky(c: &mut Criterion) {
    let mut group = c.benchmark_group("cholesky");
    group.sample_size(10);
    let mut rng = StdRng::seed_from_u64(7);

    for n in [100, 250, 500] {
        let a = spd(n, &mut rng);
        group.bench_with_input(BenchmarkId::new("spd", n), &a, |b, a| {
            b.iter(|| black_box(a.cholesky().unwrap()));
        });
    }

    group.finish();
}

fn vector_dot(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector_dot");
    let mut rng = StdRng::seed_from_u64(3);
    let len = 250_000;
    let x = Vector::uniform(len, &mut rng).unwrap();
    let y = Vector::uniform(len, &mut rng).unwrap();

    group.throughput(Throughput::Elements(len as u64));
    group.bench_function("uniform_250k", |b| {
        b.iter(|| black_box(x.dot(black_box(&y)).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, reduced_row_echelon, cholesky, vector_dot);
criterion_main!(benches);
