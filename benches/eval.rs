// Copyright 2025 the Polyscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{criterion_group, criterion_main, Criterion};
use polyscan::Equation;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

fn random_equation(rng: &mut StdRng, degree: u32) -> Equation {
    Equation::new(
        (0..=degree).map(f64::from),
        (0..=degree).map(|_| rng.random_range(-10.0..10.0)),
    )
}

pub fn eval(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let mut group = c.benchmark_group("eval");

    for degree in [3, 8, 32] {
        let eq = random_equation(&mut rng, degree);
        group.bench_with_input(format!("eval {degree}"), &eq, |b, eq| {
            b.iter(|| eq.eval(black_box(0.75)));
        });
        group.bench_with_input(format!("eval_deriv {degree}"), &eq, |b, eq| {
            b.iter(|| eq.eval_deriv(black_box(0.75)));
        });
    }

    // Fractional exponents take the term-by-term derivative.
    let fractional = Equation::new([2.5, 1.5, 0.5], [1.0, -3.0, 2.0]);
    group.bench_with_input("eval_deriv fractional", &fractional, |b, eq| {
        b.iter(|| eq.eval_deriv(black_box(0.75)));
    });
    group.finish();
}

criterion_group!(benches, eval);
criterion_main!(benches);
