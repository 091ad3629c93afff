// Copyright 2025 the Polyscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Real roots of sparse polynomials in one variable.
//!
//! An [`Equation`] is a list of `(exponent, coefficient)` terms. Roots are
//! found in three stages: the search interval is cut into equal cells and
//! scanned for sign changes ([`Equation::bracket`]), each cell with a sign
//! change is refined by one of three [`Method`]s, and the results are
//! collected in left-to-right order ([`Equation::solve`]).
//!
//! # Examples
//!
//! ```
//! use polyscan::{Equation, Method, SolveConfig};
//!
//! // x³ - 6x² + 11x - 6 = (x - 1)(x - 2)(x - 3)
//! let eq = Equation::new([3.0, 2.0, 1.0, 0.0], [1.0, -6.0, 11.0, -6.0]);
//! assert_eq!(eq.to_string(), "x^3 - 6x^2 + 11x - 6 ");
//!
//! let config = SolveConfig::new(Method::Bisection, 0.0, 4.0, 10, 6);
//! let roots = eq.solve(&config).unwrap();
//! assert_eq!(roots.len(), 3);
//! for (root, expected) in roots.iter().zip([1.0, 2.0, 3.0]) {
//!     assert!((root.value - expected).abs() < 1e-5);
//! }
//! ```
//!
//! Descartes' rule of signs gives the possible mixes of positive, negative,
//! zero and imaginary roots:
//!
//! ```
//! use polyscan::Equation;
//!
//! let eq = Equation::new([3.0, 2.0, 1.0, 0.0], [1.0, -6.0, 11.0, -6.0]);
//! let report = eq.possible_solution_report();
//! assert!(report.contains("* Positive: 3 | Negative: 0 | Zero: 0 | Imaginary: 0"));
//! ```
//!
//! # Features
//!
//! This crate either uses the standard library or the [`libm`] crate for
//! math functionality. The `std` feature is enabled by default, but can be
//! disabled, as long as the `libm` feature is enabled. The `alloc` crate is
//! used regardless. The `serde` and `schemars` features add the matching
//! derives to the data types.
//!
//! [`libm`]: https://docs.rs/libm

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("polyscan requires either the `std` or `libm` feature");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use libm as _;

extern crate alloc;

mod bracket;
mod descartes;
mod equation;
#[cfg(feature = "libm")]
mod libm_polyfill;
mod parse;
mod refine;
mod solve;

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;

pub use crate::bracket::*;
pub use crate::descartes::*;
pub use crate::equation::*;
pub use crate::parse::*;
pub use crate::refine::*;
pub use crate::solve::*;

/// Whether `x` and `y` are non-zero and of opposite sign.
///
/// Mathematically the same as `x * y < 0.0`, but it doesn't lose the sign
/// when the product underflows.
fn opposite_signs(x: f64, y: f64) -> bool {
    (x < 0.0 && y > 0.0) || (x > 0.0 && y < 0.0)
}
