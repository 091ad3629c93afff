// Copyright 2025 the Polyscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scanning an interval for sign changes.

use alloc::vec::Vec;

use crate::{opposite_signs, Equation, RootResult, SolveError};

/// Something found at a cell boundary while scanning an interval.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bracket {
    /// The polynomial is exactly zero at this boundary.
    Exact(f64),
    /// The polynomial changes sign across the cell with this left boundary.
    SignChange(f64),
}

/// The result of [`Equation::bracket`].
#[derive(Clone, Debug, PartialEq)]
pub struct Brackets {
    step: f64,
    found: Vec<Bracket>,
}

impl Brackets {
    /// The width of every cell.
    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Everything found, in increasing order of position.
    #[inline]
    pub fn found(&self) -> &[Bracket] {
        &self.found
    }

    /// The left boundaries of the cells with a sign change, in increasing order.
    pub fn seeds(&self) -> impl Iterator<Item = f64> + '_ {
        self.found.iter().filter_map(|b| match *b {
            Bracket::SignChange(seed) => Some(seed),
            Bracket::Exact(_) => None,
        })
    }

    /// The boundaries where the polynomial is exactly zero, in increasing order.
    pub fn exact_roots(&self) -> impl Iterator<Item = RootResult> + '_ {
        self.found.iter().filter_map(|b| match *b {
            Bracket::Exact(x) => Some(RootResult::exact(x)),
            Bracket::SignChange(_) => None,
        })
    }
}

impl Equation {
    /// Cuts `[start, end]` into `subdivisions` equal cells and looks for roots.
    ///
    /// Each cell is reported at most once: as an exact root if the polynomial
    /// vanishes at its left boundary, or otherwise as a seed if the polynomial
    /// has opposite signs at its two boundaries. The right end of the whole
    /// interval is checked for an exact root last. The bounds may be given in
    /// either order.
    ///
    /// A cell where the polynomial changes sign twice looks like a cell with
    /// no sign change, so roots closer together than the cell width can be
    /// missed.
    ///
    /// ```
    /// use polyscan::{Bracket, Equation};
    ///
    /// let eq = Equation::new([2.0, 0.0], [1.0, -2.0]);
    /// let brackets = eq.bracket(-2.0, 2.0, 4).unwrap();
    /// assert_eq!(
    ///     brackets.found(),
    ///     &[Bracket::SignChange(-2.0), Bracket::SignChange(1.0)]
    /// );
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::InvalidRange`] if `subdivisions` is zero, if
    /// the bounds are equal or not finite, or if the cell width overflows.
    pub fn bracket(
        &self,
        start: f64,
        end: f64,
        subdivisions: u32,
    ) -> Result<Brackets, SolveError> {
        let (start, end) = if start > end {
            (end, start)
        } else {
            (start, end)
        };
        let invalid = SolveError::InvalidRange {
            start,
            end,
            subdivisions,
        };
        if subdivisions == 0 || !start.is_finite() || !end.is_finite() || start == end {
            return Err(invalid);
        }
        let step = (end - start) / f64::from(subdivisions);
        // The width overflows when the bounds are finite but far apart.
        if !step.is_finite() {
            return Err(invalid);
        }

        let mut found = Vec::new();
        let mut lower = start;
        let mut lower_val = self.eval(lower);
        for i in 1..=subdivisions {
            let upper = start + f64::from(i) * step;
            let upper_val = self.eval(upper);
            if lower_val == 0.0 {
                found.push(Bracket::Exact(lower));
            } else if opposite_signs(lower_val, upper_val) {
                found.push(Bracket::SignChange(lower));
            }
            lower = upper;
            lower_val = upper_val;
        }
        if lower_val == 0.0 {
            found.push(Bracket::Exact(lower));
        }

        tracing::debug!(
            start,
            end,
            subdivisions,
            found = found.len(),
            "scanned interval"
        );
        Ok(Brackets { step, found })
    }
}
