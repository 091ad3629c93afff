// Copyright 2025 the Polyscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Refining a bracketed root to the requested precision.
//!
//! Every strategy gets the left boundary of a cell (the seed) and the cell
//! width, and either converges to a single root or gives up on the cell.
//! Convergence is judged by the relative change between successive
//! approximations, not by a true error bound.

use core::fmt;
use core::str::FromStr;

use crate::{opposite_signs, Equation};

#[cfg(feature = "libm")]
#[allow(unused_imports, reason = "unused if libm and std are both around")]
use crate::libm_polyfill::FloatFuncs as _;

/// The most steps [`SuccessiveApproximation`] and [`NewtonRaphson`] take on
/// one cell before giving up.
pub const MAX_ITERATIONS: usize = 20;

/// Below this magnitude the derivative is too flat for a Newton step.
///
/// The threshold is absolute: it doesn't scale with the coefficients, so a
/// polynomial with tiny coefficients can look flat everywhere. Scale such a
/// polynomial up before solving it with [`NewtonRaphson`].
pub const FLAT_DERIVATIVE: f64 = 1e-12;

/// An approximate root.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RootResult {
    /// Where the root is.
    pub value: f64,
    /// The relative change between the last two approximations.
    ///
    /// Exactly zero when the polynomial was found to vanish at `value`.
    pub relative_error: f64,
    /// The number of refinement steps taken.
    pub iterations: usize,
}

impl RootResult {
    /// A root where the polynomial evaluates to exactly zero.
    #[inline]
    pub const fn exact(value: f64) -> RootResult {
        RootResult {
            value,
            relative_error: 0.0,
            iterations: 0,
        }
    }

    /// Was this root hit exactly, rather than converged to?
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.relative_error == 0.0
    }
}

/// Why a strategy gave up on a cell.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbandonReason {
    /// An iterate landed outside the cell it started in.
    LeftCell {
        /// The iterate that escaped.
        value: f64,
    },
    /// [`MAX_ITERATIONS`] steps didn't reach the target error.
    IterationLimit,
    /// The derivative was smaller than [`FLAT_DERIVATIVE`].
    FlatDerivative {
        /// Where the derivative was evaluated.
        at: f64,
    },
}

impl fmt::Display for AbandonReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeftCell { value } => write!(f, "iterate {value} left its cell"),
            Self::IterationLimit => {
                write!(f, "no convergence after {MAX_ITERATIONS} iterations")
            }
            Self::FlatDerivative { at } => write!(f, "derivative vanishes near {at}"),
        }
    }
}

/// The outcome of refining one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Refinement {
    /// A root was found.
    Converged(RootResult),
    /// The strategy gave up on this cell.
    Abandoned(AbandonReason),
}

impl Refinement {
    /// The root, if one was found.
    #[inline]
    pub fn root(&self) -> Option<RootResult> {
        match *self {
            Self::Converged(root) => Some(root),
            Self::Abandoned(_) => None,
        }
    }

    /// Was a root found?
    #[inline]
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged(_))
    }
}

/// A way of refining a bracketed root.
pub trait Refiner {
    /// Looks for a root in the cell `[seed, seed + step]`.
    ///
    /// `target_error` is the relative change between successive
    /// approximations at which the search stops.
    fn refine(&self, eq: &Equation, seed: f64, step: f64, target_error: f64) -> Refinement;
}

/// Repeated halving of the cell.
///
/// On a cell with a sign change this never gives up: it stops when the
/// midpoint settles, or when the cell has shrunk to neighboring floats.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bisection;

/// Fixed-point iteration `x ← f(x) + x`.
///
/// This only converges where `-2 < f'(x) < 0` near the root, so it is
/// abandoned as soon as an iterate leaves the cell.
#[derive(Clone, Copy, Debug, Default)]
pub struct SuccessiveApproximation;

/// Newton's method `x ← x - f(x) / f'(x)`, confined to the cell.
#[derive(Clone, Copy, Debug, Default)]
pub struct NewtonRaphson;

impl Refiner for Bisection {
    fn refine(&self, eq: &Equation, seed: f64, step: f64, target_error: f64) -> Refinement {
        let mut lower = seed;
        let mut upper = seed + step;
        let mut lower_val = eq.eval(lower);
        let mut mid = seed + step / 2.0;
        let mut previous = None;
        let mut iterations = 0;
        loop {
            let mid_val = eq.eval(mid);
            if mid_val == 0.0 {
                return converged(mid, 0.0, iterations);
            }
            if let Some(previous) = previous {
                if mid == previous {
                    // The cell has shrunk to neighboring floats.
                    return converged(mid, f64::EPSILON, iterations);
                }
                let relative_error = ((mid - previous) / mid).abs();
                tracing::trace!(iterations, mid, relative_error, "bisection step");
                if relative_error <= target_error {
                    return converged(mid, relative_error, iterations);
                }
            }
            if opposite_signs(lower_val, mid_val) {
                upper = mid;
            } else {
                lower = mid;
                lower_val = mid_val;
            }
            previous = Some(mid);
            mid = lower + (upper - lower) / 2.0;
            iterations += 1;
        }
    }
}

impl Refiner for SuccessiveApproximation {
    fn refine(&self, eq: &Equation, seed: f64, step: f64, target_error: f64) -> Refinement {
        iterate(eq, seed, step, target_error, |x| Ok(eq.eval(x) + x))
    }
}

impl Refiner for NewtonRaphson {
    fn refine(&self, eq: &Equation, seed: f64, step: f64, target_error: f64) -> Refinement {
        iterate(eq, seed, step, target_error, |x| {
            let slope = eq.eval_deriv(x);
            if slope.abs() < FLAT_DERIVATIVE {
                return Err(AbandonReason::FlatDerivative { at: x });
            }
            Ok(x - eq.eval(x) / slope)
        })
    }
}

fn converged(value: f64, relative_error: f64, iterations: usize) -> Refinement {
    Refinement::Converged(RootResult {
        value,
        relative_error,
        iterations,
    })
}

/// Runs `next` from the middle of the cell until the relative change drops
/// below `target_error`.
///
/// Gives up if an iterate leaves the cell or after [`MAX_ITERATIONS`] steps.
fn iterate(
    eq: &Equation,
    seed: f64,
    step: f64,
    target_error: f64,
    mut next: impl FnMut(f64) -> Result<f64, AbandonReason>,
) -> Refinement {
    let cell = seed..=seed + step;
    let mut guess = seed + step / 2.0;
    if eq.eval(guess) == 0.0 {
        return Refinement::Converged(RootResult::exact(guess));
    }
    for iterations in 1..=MAX_ITERATIONS {
        let x = match next(guess) {
            Ok(x) => x,
            Err(reason) => return Refinement::Abandoned(reason),
        };
        if !cell.contains(&x) {
            return Refinement::Abandoned(AbandonReason::LeftCell { value: x });
        }
        if x == guess {
            // A floating-point fixed point: no further progress is possible.
            return converged(x, f64::EPSILON, iterations);
        }
        let relative_error = ((x - guess) / x).abs();
        tracing::trace!(iterations, x, relative_error, "iteration step");
        if relative_error < target_error {
            return converged(x, relative_error, iterations);
        }
        guess = x;
    }
    Refinement::Abandoned(AbandonReason::IterationLimit)
}

/// The root-refinement strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    /// See [`Bisection`].
    Bisection,
    /// See [`SuccessiveApproximation`].
    SuccessiveApproximation,
    /// See [`NewtonRaphson`].
    NewtonRaphson,
}

impl Method {
    /// Every method, in menu order.
    pub const ALL: [Method; 3] = [
        Method::Bisection,
        Method::SuccessiveApproximation,
        Method::NewtonRaphson,
    ];

    /// A human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Method::Bisection => "Bisection",
            Method::SuccessiveApproximation => "Successive Approximation",
            Method::NewtonRaphson => "Newton-Raphson",
        }
    }

    /// The strategy implementing this method.
    pub fn refiner(self) -> &'static dyn Refiner {
        match self {
            Method::Bisection => &Bisection,
            Method::SuccessiveApproximation => &SuccessiveApproximation,
            Method::NewtonRaphson => &NewtonRaphson,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The error from parsing a [`Method`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown method: expected a menu index from 0 to 2 or a method name")]
pub struct ParseMethodError;

impl FromStr for Method {
    type Err = ParseMethodError;

    /// Accepts a menu index (`0`, `1` or `2`) or a method name, ignoring case
    /// and treating spaces, hyphens and underscores alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return Method::ALL.get(index).copied().ok_or(ParseMethodError);
        }
        let is = |name: &str| {
            let mut given = s.bytes().filter(|&b| !matches!(b, b' ' | b'-' | b'_'));
            let mut wanted = name.bytes();
            loop {
                match (given.next(), wanted.next()) {
                    (None, None) => return true,
                    (Some(g), Some(w)) if g.eq_ignore_ascii_case(&w) => {}
                    _ => return false,
                }
            }
        };
        if is("bisection") {
            Ok(Method::Bisection)
        } else if is("successiveapproximation") || is("fixedpoint") {
            Ok(Method::SuccessiveApproximation)
        } else if is("newtonraphson") || is("newton") {
            Ok(Method::NewtonRaphson)
        } else {
            Err(ParseMethodError)
        }
    }
}
