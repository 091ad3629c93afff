// Copyright 2025 the Polyscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sparse polynomials in one variable.

use alloc::string::String;
use core::fmt::{self, Write as _};

use smallvec::{smallvec, SmallVec};

#[cfg(feature = "libm")]
#[allow(unused_imports, reason = "unused if libm and std are both around")]
use crate::libm_polyfill::FloatFuncs as _;

/// Dense buffers are only built up to this degree; past it the derivative
/// is evaluated term by term.
const MAX_DENSE_DEGREE: usize = 1 << 16;

/// A single term `coefficient * x^exponent`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Term {
    /// The power of `x`. Expected to be non-negative.
    pub exponent: f64,
    /// The multiplier of `x^exponent`.
    pub coefficient: f64,
}

impl Term {
    /// Creates a new term.
    #[inline]
    pub const fn new(exponent: f64, coefficient: f64) -> Term {
        Term {
            exponent,
            coefficient,
        }
    }

    /// Evaluates this term at a point.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        self.coefficient * x.powf(self.exponent)
    }
}

/// A polynomial stored as a list of [`Term`]s.
///
/// Terms keep the order they were given in, and may repeat an exponent (the
/// coefficients then add up). No term has a zero coefficient: those are
/// dropped whenever the term list is built or replaced.
///
/// Exponents are real numbers. Most operations work with any non-negative
/// exponent, but the derivative takes a faster path when every exponent is a
/// whole number.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equation {
    terms: SmallVec<[Term; 8]>,
}

impl Equation {
    /// Creates a polynomial by pairing exponents with coefficients.
    ///
    /// The two sequences are paired by position. If one is longer than the
    /// other, its extra entries are ignored.
    ///
    /// Exponents are not checked here: keeping them finite and non-negative
    /// is up to the caller. [`Equation::parse_lines`] and the `FromStr` impl
    /// do reject other exponents, so a polynomial built with one won't
    /// survive a trip through its text form.
    ///
    /// ```
    /// use polyscan::Equation;
    ///
    /// // The trailing exponent has no coefficient and the zero term is dropped.
    /// let eq = Equation::new([2.0, 1.0, 0.0, 7.0], [1.0, 0.0, -4.0]);
    /// assert_eq!(eq.term_count(), 2);
    /// assert_eq!(eq.eval(2.0), 0.0);
    /// ```
    pub fn new(
        exponents: impl IntoIterator<Item = f64>,
        coefficients: impl IntoIterator<Item = f64>,
    ) -> Equation {
        Equation::from_terms(
            exponents
                .into_iter()
                .zip(coefficients)
                .map(|(exponent, coefficient)| Term::new(exponent, coefficient)),
        )
    }

    /// Creates a polynomial from a list of terms.
    ///
    /// As with [`Equation::new`], exponents are not checked.
    pub fn from_terms(terms: impl IntoIterator<Item = Term>) -> Equation {
        let mut eq = Equation::default();
        eq.set_terms(terms);
        eq
    }

    /// Replaces every term of this polynomial.
    pub fn set_terms(&mut self, terms: impl IntoIterator<Item = Term>) {
        self.terms.clear();
        self.terms.extend(terms);
        self.terms.retain(|t| t.coefficient != 0.0);
    }

    /// The terms, in the order they were given.
    #[inline]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// The exponent of every term, in term order.
    pub fn exponents(&self) -> impl Iterator<Item = f64> + '_ {
        self.terms.iter().map(|t| t.exponent)
    }

    /// The coefficient of every term, in term order.
    pub fn coefficients(&self) -> impl Iterator<Item = f64> + '_ {
        self.terms.iter().map(|t| t.coefficient)
    }

    /// The number of terms.
    #[inline]
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Is this the zero polynomial?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The largest exponent, or zero if there are no terms.
    pub fn degree(&self) -> f64 {
        self.exponents().fold(0.0, f64::max)
    }

    /// Evaluates this polynomial at a point.
    pub fn eval(&self, x: f64) -> f64 {
        self.terms.iter().fold(0.0, |acc, t| acc + t.eval(x))
    }

    /// Evaluates the derivative of this polynomial at a point.
    ///
    /// When all exponents are whole numbers this goes through the dense
    /// coefficients and two Horner passes, so no powers are computed.
    ///
    /// ```
    /// use polyscan::Equation;
    ///
    /// // d/dx (x³ - 2x) = 3x² - 2
    /// let eq = Equation::new([3.0, 1.0], [1.0, -2.0]);
    /// assert_eq!(eq.eval_deriv(2.0), 10.0);
    /// ```
    pub fn eval_deriv(&self, x: f64) -> f64 {
        match self.dense_coeffs() {
            Some(coeffs) => horner_deriv(&coeffs, x),
            None => self
                .terms
                .iter()
                .filter(|t| t.exponent != 0.0)
                .fold(0.0, |acc, t| {
                    acc + t.coefficient * t.exponent * x.powf(t.exponent - 1.0)
                }),
        }
    }

    /// The coefficients of this polynomial, indexed by power.
    ///
    /// The coefficient of `x^i` is at index `i`, and the length is the degree
    /// plus one. Powers with no term get a zero.
    ///
    /// Returns `None` if some exponent is not a non-negative whole number, or
    /// if the degree is too large to reasonably lay out densely.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "exponents are checked to be small whole numbers first"
    )]
    pub fn dense_coeffs(&self) -> Option<SmallVec<[f64; 8]>> {
        if !self.exponents().all(is_whole) {
            return None;
        }
        let degree = self.degree() as usize;
        if degree > MAX_DENSE_DEGREE {
            return None;
        }
        let mut coeffs = smallvec![0.0; degree + 1];
        for t in &self.terms {
            coeffs[t.exponent as usize] += t.coefficient;
        }
        Some(coeffs)
    }

    /// The terms ordered by decreasing exponent, with repeated exponents
    /// merged and cancelled terms removed.
    pub(crate) fn descending_terms(&self) -> SmallVec<[Term; 8]> {
        let mut terms = self.terms.clone();
        terms.sort_by(|a, b| b.exponent.total_cmp(&a.exponent));
        terms.dedup_by(|next, kept| {
            if next.exponent == kept.exponent {
                kept.coefficient += next.coefficient;
                true
            } else {
                false
            }
        });
        terms.retain(|t| t.coefficient != 0.0);
        terms
    }

    /// Writes the polynomial as two lines: the exponents, then the
    /// coefficients.
    ///
    /// This is the format read by [`Equation::parse_lines`].
    pub fn to_lines(&self) -> String {
        let mut out = String::new();
        write_joined(&mut out, self.exponents());
        out.push('\n');
        write_joined(&mut out, self.coefficients());
        out.push('\n');
        out
    }
}

/// Is `e` a non-negative whole number?
fn is_whole(e: f64) -> bool {
    e >= 0.0 && e % 1.0 == 0.0
}

/// Evaluates `p'(x)`, where `coeffs[i]` is the coefficient of `x^i` in `p`.
///
/// Synthetic division of `p` by `t - x` gives a quotient `q` with
/// `q(x) = p'(x)`. The first recurrence produces the coefficients of `q`,
/// highest first, and the second runs Horner's rule over them. Both are
/// fused into a single loop.
fn horner_deriv(coeffs: &[f64], x: f64) -> f64 {
    let mut quotient = 0.0;
    let mut deriv = 0.0;
    // The constant term only affects the remainder.
    for &c in coeffs.iter().skip(1).rev() {
        quotient = quotient * x + c;
        deriv = deriv * x + quotient;
    }
    deriv
}

fn write_joined(out: &mut String, values: impl Iterator<Item = f64>) {
    for (i, v) in values.enumerate() {
        if i > 0 {
            out.push(' ');
        }
        // Writing to a `String` can't fail.
        let _ = write!(out, "{v}");
    }
}

impl fmt::Display for Equation {
    /// Writes terms in order as `[± ]coefficient[x[^exponent]] `.
    ///
    /// A coefficient of magnitude one is left out (except on the constant
    /// term), as is the exponent marker for exponents zero and one.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, t) in self.terms.iter().enumerate() {
            if t.coefficient < 0.0 {
                f.write_str("- ")?;
            } else if i > 0 {
                f.write_str("+ ")?;
            }
            let magnitude = t.coefficient.abs();
            if t.exponent == 0.0 || magnitude != 1.0 {
                write!(f, "{magnitude}")?;
            }
            if t.exponent != 0.0 {
                f.write_str("x")?;
                if t.exponent != 1.0 {
                    write!(f, "^{}", t.exponent)?;
                }
            }
            f.write_str(" ")?;
        }
        Ok(())
    }
}
