// Copyright 2025 the Polyscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{criterion_group, criterion_main, Criterion};
use polyscan::{Equation, Method, SolveConfig};
use std::hint::black_box;

pub fn solve(c: &mut Criterion) {
    // (x - 1)(x - 2)(x - 3)
    let cubic = Equation::new([3.0, 2.0, 1.0, 0.0], [1.0, -6.0, 11.0, -6.0]);
    // x^5 - 1.5x + 0.5, sparse with a root at 1.
    let sparse = Equation::new([5.0, 1.0, 0.0], [1.0, -1.5, 0.5]);

    let mut group = c.benchmark_group("solve");
    for method in Method::ALL {
        for figures in [4, 8, 12] {
            let config = SolveConfig::new(method, -0.5, 4.5, 50, figures);
            group.bench_with_input(format!("cubic {method} {figures}"), &config, |b, config| {
                b.iter(|| black_box(&cubic).solve(config));
            });
            let config = SolveConfig::new(method, -3.0, 3.0, 200, figures);
            group.bench_with_input(format!("sparse {method} {figures}"), &config, |b, config| {
                b.iter(|| black_box(&sparse).solve(config));
            });
        }
    }
    group.finish();
}

pub fn bracket(c: &mut Criterion) {
    let cubic = Equation::new([3.0, 2.0, 1.0, 0.0], [1.0, -6.0, 11.0, -6.0]);

    let mut group = c.benchmark_group("bracket");
    for subdivisions in [10, 1_000, 100_000] {
        group.bench_with_input(
            format!("cubic {subdivisions}"),
            &subdivisions,
            |b, &subdivisions| b.iter(|| black_box(&cubic).bracket(-10.0, 10.0, subdivisions)),
        );
    }
    group.finish();
}

pub fn possible_solutions(c: &mut Criterion) {
    let eq = Equation::new(
        [9.0, 7.0, 6.0, 4.0, 3.0, 1.0, 0.0],
        [2.0, -1.0, 3.0, -4.0, 1.0, 5.0, -2.0],
    );
    c.bench_function("possible solution report", |b| {
        b.iter(|| black_box(&eq).possible_solution_report());
    });
}

criterion_group!(benches, solve, bracket, possible_solutions);
criterion_main!(benches);
