// Copyright 2025 the Polyscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The full scan-and-refine pipeline.

use alloc::vec::Vec;

use crate::{AbandonReason, Bracket, Equation, Method, Refinement, RootResult};

#[cfg(feature = "libm")]
#[allow(unused_imports, reason = "unused if libm and std are both around")]
use crate::libm_polyfill::FloatFuncs as _;

/// An error from [`Equation::solve`] or [`Equation::bracket`].
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum SolveError {
    /// The interval can't be cut into cells.
    #[error("cannot scan [{start}, {end}] in {subdivisions} subdivisions")]
    InvalidRange {
        /// The lower bound, after reordering.
        start: f64,
        /// The upper bound, after reordering.
        end: f64,
        /// The requested number of cells.
        subdivisions: u32,
    },
    /// Zero significant figures were requested.
    #[error("at least one significant figure is required")]
    InvalidPrecision,
}

/// The parameters of one root search.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveConfig {
    /// How each bracketed root is refined.
    pub method: Method,
    /// One end of the search interval.
    pub start: f64,
    /// The other end of the search interval.
    pub end: f64,
    /// The number of equal cells the interval is cut into.
    pub subdivisions: u32,
    /// The number of significant figures wanted in each root.
    pub significant_figures: u32,
}

impl SolveConfig {
    /// Creates a new search configuration.
    pub const fn new(
        method: Method,
        start: f64,
        end: f64,
        subdivisions: u32,
        significant_figures: u32,
    ) -> SolveConfig {
        SolveConfig {
            method,
            start,
            end,
            subdivisions,
            significant_figures,
        }
    }

    /// The relative error at which refinement stops: `0.5 × 10^-figures`.
    ///
    /// ```
    /// use polyscan::{Method, SolveConfig};
    ///
    /// let config = SolveConfig::new(Method::Bisection, 0.0, 1.0, 10, 4);
    /// assert!((config.target_error() - 5e-5).abs() < 1e-20);
    /// ```
    pub fn target_error(&self) -> f64 {
        let figures = i32::try_from(self.significant_figures).unwrap_or(i32::MAX);
        0.5 * 10f64.powi(-figures)
    }
}

/// What happened at one place found by the scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    /// The polynomial is exactly zero at a cell boundary.
    Exact(RootResult),
    /// A cell with a sign change was refined.
    Refined {
        /// The left boundary of the cell.
        seed: f64,
        /// What the strategy made of it.
        refinement: Refinement,
    },
}

impl Outcome {
    /// The root, if there is one.
    pub fn root(&self) -> Option<RootResult> {
        match *self {
            Self::Exact(root) => Some(root),
            Self::Refined { refinement, .. } => refinement.root(),
        }
    }
}

/// Everything [`Equation::solve_detailed`] found.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    /// The method used for refinement.
    pub method: Method,
    /// The width of each cell.
    pub step: f64,
    /// The relative error refinement aimed for.
    pub target_error: f64,
    /// One entry per exact root or sign change, in increasing order of position.
    pub outcomes: Vec<Outcome>,
}

impl Solution {
    /// The roots found, in increasing order.
    pub fn roots(&self) -> impl Iterator<Item = RootResult> + '_ {
        self.outcomes.iter().filter_map(Outcome::root)
    }

    /// The cells the strategy gave up on, with the reason.
    pub fn abandoned(&self) -> impl Iterator<Item = (f64, AbandonReason)> + '_ {
        self.outcomes.iter().filter_map(|o| match *o {
            Outcome::Refined {
                seed,
                refinement: Refinement::Abandoned(reason),
            } => Some((seed, reason)),
            _ => None,
        })
    }
}

impl Equation {
    /// Finds the real roots in an interval.
    ///
    /// The interval is scanned with [`Equation::bracket`], and each cell with
    /// a sign change is refined with the configured [`Method`]. Cells the
    /// method gives up on are left out; use [`Equation::solve_detailed`] to
    /// see them.
    ///
    /// ```
    /// use polyscan::{Equation, Method, SolveConfig};
    ///
    /// let eq = Equation::new([2.0, 0.0], [1.0, 1.0]);
    /// let config = SolveConfig::new(Method::NewtonRaphson, -10.0, 10.0, 50, 4);
    /// assert!(eq.solve(&config).unwrap().is_empty());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the interval can't be cut into cells, or if
    /// no significant figures are requested.
    pub fn solve(&self, config: &SolveConfig) -> Result<Vec<RootResult>, SolveError> {
        Ok(self.solve_detailed(config)?.roots().collect())
    }

    /// Like [`Equation::solve`], but also reports the cells where refinement
    /// was abandoned.
    ///
    /// # Errors
    ///
    /// See [`Equation::solve`].
    pub fn solve_detailed(&self, config: &SolveConfig) -> Result<Solution, SolveError> {
        if config.significant_figures == 0 {
            return Err(SolveError::InvalidPrecision);
        }
        let brackets = self.bracket(config.start, config.end, config.subdivisions)?;
        let step = brackets.step();
        let target_error = config.target_error();
        let refiner = config.method.refiner();

        let outcomes: Vec<Outcome> = brackets
            .found()
            .iter()
            .map(|b| match *b {
                Bracket::Exact(x) => Outcome::Exact(RootResult::exact(x)),
                Bracket::SignChange(seed) => {
                    let refinement = refiner.refine(self, seed, step, target_error);
                    if let Refinement::Abandoned(reason) = refinement {
                        tracing::debug!(seed, method = %config.method, %reason, "abandoned cell");
                    }
                    Outcome::Refined { seed, refinement }
                }
            })
            .collect();

        Ok(Solution {
            method: config.method,
            step,
            target_error,
            outcomes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cubic() -> Equation {
        // (x - 1)(x - 2)(x - 3)
        Equation::new([3.0, 2.0, 1.0, 0.0], [1.0, -6.0, 11.0, -6.0])
    }

    fn assert_roots(roots: &[RootResult], expected: &[f64], tolerance: f64) {
        assert_eq!(roots.len(), expected.len(), "roots: {roots:?}");
        for (root, &x) in roots.iter().zip(expected) {
            assert!(
                (root.value - x).abs() <= tolerance,
                "{} is not close to {x}",
                root.value
            );
        }
    }

    #[test]
    fn quadratic_bisection() {
        let eq = Equation::new([2.0, 0.0], [1.0, -4.0]);
        let config = SolveConfig::new(Method::Bisection, -5.0, 5.0, 10, 4);
        let roots = eq.solve(&config).unwrap();
        assert_roots(&roots, &[-2.0, 2.0], 1e-3);
        assert!(roots.iter().all(|r| r.relative_error <= 5e-5));
    }

    #[test]
    fn cubic_bisection() {
        let config = SolveConfig::new(Method::Bisection, 0.0, 4.0, 10, 4);
        let roots = cubic().solve(&config).unwrap();
        assert_roots(&roots, &[1.0, 2.0, 3.0], 1e-3);
    }

    #[test]
    fn cubic_newton() {
        let config = SolveConfig::new(Method::NewtonRaphson, 0.0, 4.0, 10, 4);
        let newton = cubic().solve(&config).unwrap();
        assert_roots(&newton, &[1.0, 2.0, 3.0], 1e-3);

        let config = SolveConfig {
            method: Method::Bisection,
            ..config
        };
        let bisection = cubic().solve(&config).unwrap();
        let steps = |roots: &[RootResult]| roots.iter().map(|r| r.iterations).sum::<usize>();
        assert!(steps(&newton) <= steps(&bisection));
    }

    #[test]
    fn no_real_roots() {
        let eq = Equation::new([2.0, 0.0], [1.0, 1.0]);
        for method in Method::ALL {
            for subdivisions in [1, 3, 20, 1000] {
                let config = SolveConfig::new(method, -10.0, 10.0, subdivisions, 6);
                assert!(eq.solve(&config).unwrap().is_empty());
            }
        }
    }

    #[test]
    fn results_ascend() {
        // (x + 1.25)(x - 1.5)(x - 2.75) has its middle root on a boundary of
        // this grid, so exact and refined roots are interleaved.
        let eq = Equation::new([3.0, 2.0, 1.0, 0.0], [1.0, -3.0, -1.1875, 5.15625]);
        for method in [Method::Bisection, Method::NewtonRaphson] {
            let config = SolveConfig::new(method, -4.0, 4.0, 16, 6);
            let solution = eq.solve_detailed(&config).unwrap();
            assert_eq!(solution.outcomes.len(), 3);
            assert!(matches!(solution.outcomes[0], Outcome::Refined { seed, .. } if seed == -1.5));
            assert_eq!(solution.outcomes[1], Outcome::Exact(RootResult::exact(1.5)));
            assert!(matches!(solution.outcomes[2], Outcome::Refined { seed, .. } if seed == 2.5));
            let roots: Vec<_> = solution.roots().collect();
            assert_roots(&roots, &[-1.25, 1.5, 2.75], 1e-5);
        }
    }

    #[test]
    fn abandoned_cells_are_reported() {
        let eq = Equation::new([2.0, 0.0], [1.0, -4.0]);
        let config = SolveConfig::new(Method::SuccessiveApproximation, 1.3, 2.5, 1, 4);
        let solution = eq.solve_detailed(&config).unwrap();
        assert_eq!(solution.roots().count(), 0);
        let abandoned: Vec<_> = solution.abandoned().collect();
        assert_eq!(abandoned.len(), 1);
        assert_eq!(abandoned[0].0, 1.3);
        assert!(eq.solve(&config).unwrap().is_empty());
    }

    #[test]
    fn invalid_config() {
        let eq = cubic();
        let config = SolveConfig::new(Method::Bisection, 0.0, 4.0, 0, 4);
        assert!(matches!(
            eq.solve(&config),
            Err(SolveError::InvalidRange { .. })
        ));
        let config = SolveConfig::new(Method::Bisection, 1.0, 1.0, 10, 4);
        assert!(eq.solve(&config).is_err());
        let config = SolveConfig::new(Method::Bisection, 0.0, 4.0, 10, 0);
        assert_eq!(eq.solve(&config), Err(SolveError::InvalidPrecision));
    }

    #[test]
    fn widest_intervals() {
        let eq = Equation::new([1.0, 0.0], [1.0, -1.0]);
        for subdivisions in [1, 4] {
            let config =
                SolveConfig::new(Method::Bisection, -f64::MAX, f64::MAX, subdivisions, 4);
            assert!(matches!(
                eq.solve(&config),
                Err(SolveError::InvalidRange { .. })
            ));
        }

        // Wide but representable: every root stays finite and in range.
        let eq = Equation::new([1.0, 0.0], [1.0, -1.5e308]);
        for method in Method::ALL {
            let config = SolveConfig::new(method, 1e308, 1.75e308, 1, 4);
            for root in eq.solve(&config).unwrap() {
                assert!(root.value > 1e308 && root.value < 1.75e308, "{root:?}");
            }
        }
        let config = SolveConfig::new(Method::Bisection, 1e308, 1.75e308, 1, 4);
        assert_eq!(eq.solve(&config).unwrap().len(), 1);
    }

    #[test]
    fn residuals_are_small() {
        arbtest::arbtest(|u| {
            let (eq, planted) = crate::arbitrary::equation_with_roots(u)?;
            let method = *u.choose(&Method::ALL)?;
            let config = SolveConfig::new(method, -10.0, 10.0, 40, 8);
            let solution = eq.solve_detailed(&config).unwrap();
            for root in solution.roots() {
                if root.is_exact() {
                    assert_eq!(eq.eval(root.value), 0.0);
                } else {
                    let nearest = planted
                        .iter()
                        .map(|r| (r - root.value).abs())
                        .fold(f64::INFINITY, f64::min);
                    assert!(nearest <= 1e-5, "{root:?} is far from {planted:?}");
                }
            }
            if method == Method::Bisection {
                assert_eq!(solution.roots().count(), planted.len());
            }
            Ok(())
        });
    }
}
