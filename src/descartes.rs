// Copyright 2025 the Polyscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Possible root counts by Descartes' rule of signs.

use alloc::string::{String, ToString};
use core::fmt;

use crate::Equation;

/// How many roots of each kind a polynomial might have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RootCounts {
    /// Positive real roots.
    pub positive: usize,
    /// Negative real roots.
    pub negative: usize,
    /// Non-real roots.
    pub imaginary: usize,
    /// Roots at zero.
    pub zero: usize,
}

impl RootCounts {
    /// The total number of roots.
    ///
    /// Saturates at `usize::MAX`.
    pub fn total(&self) -> usize {
        self.positive
            .saturating_add(self.negative)
            .saturating_add(self.imaginary)
            .saturating_add(self.zero)
    }
}

/// Upper bounds on each kind of root, from Descartes' rule of signs.
///
/// The positive bound is the number of sign changes in the coefficients,
/// taken in order of decreasing exponent. The negative bound is the same
/// count after substituting `-x` for `x`. The real count of positive (or
/// negative) roots is the bound minus an even number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PossibleSolutions {
    /// The degree, which every combination of counts adds up to.
    pub degree: usize,
    /// At most this many positive roots.
    pub max_positive: usize,
    /// At most this many negative roots.
    pub max_negative: usize,
    /// At most this many non-real roots.
    pub max_imaginary: usize,
    /// At most this many roots at zero.
    pub max_zero: usize,
}

impl PossibleSolutions {
    /// Every mix of root counts that fits the bounds and adds up to the degree.
    ///
    /// Positive, negative and imaginary counts step down from their bound by
    /// two (the latter because non-real roots come in conjugate pairs); the
    /// zero count steps down by one. Combinations come out in that nesting
    /// order, largest first.
    ///
    /// Once the positive, negative and zero counts are picked the imaginary
    /// count is fixed, so the work doesn't grow with the degree.
    pub fn combinations(&self) -> impl Iterator<Item = RootCounts> {
        let bounds = *self;
        by_twos(bounds.max_positive).flat_map(move |positive| {
            by_twos(bounds.max_negative).flat_map(move |negative| {
                // Ascending zeros give descending imaginaries.
                (0..=bounds.max_zero).filter_map(move |zero| {
                    let imaginary = bounds
                        .degree
                        .checked_sub(positive)?
                        .checked_sub(negative)?
                        .checked_sub(zero)?;
                    (imaginary <= bounds.max_imaginary && imaginary % 2 == 0).then_some(
                        RootCounts {
                            positive,
                            negative,
                            imaginary,
                            zero,
                        },
                    )
                })
            })
        })
    }
}

/// `n, n - 2, ...` down to zero or one.
fn by_twos(n: usize) -> impl Iterator<Item = usize> {
    (0..=n).rev().step_by(2)
}

impl fmt::Display for PossibleSolutions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Possible solutions:")?;
        for c in self.combinations() {
            writeln!(
                f,
                "* Positive: {} | Negative: {} | Zero: {} | Imaginary: {}",
                c.positive, c.negative, c.zero, c.imaginary
            )?;
        }
        Ok(())
    }
}

impl Equation {
    /// Bounds the number of roots of each kind with Descartes' rule of signs.
    ///
    /// Returns `None` for the zero polynomial, and when the leading exponent
    /// doesn't fit in a `usize`. Exponents that aren't whole numbers are
    /// counted as odd, and the degree is the leading exponent rounded down.
    pub fn possible_solutions(&self) -> Option<PossibleSolutions> {
        let terms = self.descending_terms();
        let leading = terms.first()?;
        if leading.exponent.is_nan() || leading.exponent >= usize::MAX as f64 {
            return None;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "the degree of a fractional exponent is rounded down"
        )]
        let degree = leading.exponent as usize;

        let max_positive = sign_changes(terms.iter().map(|t| t.coefficient));
        let max_negative = sign_changes(terms.iter().map(|t| {
            if t.exponent % 2.0 == 0.0 {
                t.coefficient
            } else {
                -t.coefficient
            }
        }));

        Some(PossibleSolutions {
            degree,
            max_positive,
            max_negative,
            max_imaginary: degree - degree % 2,
            // Only the constant term can have exponent zero.
            max_zero: 1,
        })
    }

    /// A text report of [`Equation::possible_solutions`], one line per
    /// combination under a header.
    ///
    /// Every combination the rule allows is listed, so a polynomial may get
    /// several lines even when only one of them is realized: the cubic
    /// `(x - 1)(x - 2)(x - 3)` gets both `3/0/0/0` and `1/0/2/0`.
    ///
    /// The zero polynomial, and one whose degree doesn't fit in a `usize`, get
    /// only the header.
    pub fn possible_solution_report(&self) -> String {
        match self.possible_solutions() {
            Some(solutions) => solutions.to_string(),
            None => "Possible solutions:\n".into(),
        }
    }
}

/// Counts the sign changes in a sequence of non-zero numbers.
fn sign_changes(coeffs: impl Iterator<Item = f64>) -> usize {
    let mut changes = 0;
    let mut last_negative = None;
    for c in coeffs {
        let negative = c < 0.0;
        if last_negative.is_some_and(|last| last != negative) {
            changes += 1;
        }
        last_negative = Some(negative);
    }
    changes
}
