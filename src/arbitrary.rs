// Copyright 2025 the Polyscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utilities for fuzz and/or property testing using `arbitrary`.

use alloc::vec;
use alloc::vec::Vec;

use arbitrary::Unstructured;

use crate::{Equation, Term};

fn check_finite(f: f64) -> Result<f64, arbitrary::Error> {
    if f.is_finite() {
        Ok(f)
    } else {
        Err(arbitrary::Error::IncorrectFormat)
    }
}

/// An arbitrary finite float.
pub fn finite_float(u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    check_finite(u.arbitrary()?)
}

/// A coefficient, often a small integer and otherwise any finite float.
fn coefficient(u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    if u.arbitrary()? {
        Ok(f64::from(u.int_in_range(-10_i8..=10)?))
    } else {
        finite_float(u)
    }
}

/// A non-negative exponent of at most 8.75, usually a whole number.
fn exponent(u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    let whole = f64::from(u.int_in_range(0_u8..=8)?);
    if u.ratio(1_u8, 4)? {
        Ok(whole + f64::from(u.int_in_range(1_u8..=3)?) / 4.0)
    } else {
        Ok(whole)
    }
}

/// Generate an arbitrary polynomial with up to six terms.
///
/// Coefficients are finite and exponents are non-negative, but exponents may
/// repeat or be fractional.
pub fn equation(u: &mut Unstructured<'_>) -> Result<Equation, arbitrary::Error> {
    let len = u.int_in_range(0_usize..=6)?;
    let mut terms = Vec::with_capacity(len);
    for _ in 0..len {
        terms.push(Term::new(exponent(u)?, coefficient(u)?));
    }
    Ok(Equation::from_terms(terms))
}

/// Generate a polynomial with between one and five simple roots, and return
/// it along with its roots in increasing order.
///
/// Every root is an integer plus a quarter, between -8.75 and 8.25, so roots
/// are at least one apart and sit in the middle of any grid of half-unit
/// cells aligned to the integers. The leading coefficient has magnitude
/// between 0.5 and 4.
pub fn equation_with_roots(
    u: &mut Unstructured<'_>,
) -> Result<(Equation, Vec<f64>), arbitrary::Error> {
    let mut roots = Vec::new();
    for k in -9_i8..=8 {
        if roots.len() < 5 && u.ratio(1_u8, 4)? {
            roots.push(f64::from(k) + 0.25);
        }
    }
    if roots.is_empty() {
        roots.push(f64::from(u.int_in_range(-9_i8..=8)?) + 0.25);
    }

    let magnitude = 0.5 + 3.5 * f64::from(u.arbitrary::<u8>()?) / 255.0;
    let scale = if u.arbitrary()? { -magnitude } else { magnitude };

    // Coefficients indexed by power, one longer than needed so `mul` has room.
    let mut coeffs = vec![0.0; roots.len() + 1];
    coeffs[0] = scale;
    for &r in &roots {
        mul(&mut coeffs, r);
    }

    let eq = Equation::new((0_u32..).map(f64::from), coeffs);
    Ok((eq, roots))
}

// Takes the polynomial in `coeffs` and multiplies it by (x - root).
// (Only correct if the last coefficient is zero.)
fn mul(coeffs: &mut [f64], root: f64) {
    for i in (1..coeffs.len()).rev() {
        coeffs[i] = coeffs[i - 1] - root * coeffs[i];
    }
    coeffs[0] *= -root;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planted_roots() {
        arbtest::arbtest(|u| {
            let (eq, roots) = equation_with_roots(u)?;
            assert!(!roots.is_empty() && roots.len() <= 5);
            assert_eq!(eq.degree(), roots.len() as f64);
            assert!(roots.windows(2).all(|w| w[1] - w[0] >= 1.0));
            for r in roots {
                assert!(eq.eval(r).abs() <= 1e-6, "p({r}) = {}", eq.eval(r));
            }
            Ok(())
        });
    }

    #[test]
    fn exponents_are_in_range() {
        arbtest::arbtest(|u| {
            let eq = equation(u)?;
            assert!(eq.term_count() <= 6);
            for t in eq.terms() {
                assert!((0.0..=8.75).contains(&t.exponent));
                assert!(t.coefficient.is_finite() && t.coefficient != 0.0);
            }
            Ok(())
        });
    }
}
