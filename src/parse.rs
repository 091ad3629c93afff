// Copyright 2025 the Polyscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reading polynomials from text.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::str::FromStr;

use crate::{Equation, Term};

/// An error that can occur when reading an [`Equation`] from text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// A token that should have been a number wasn't one.
    #[error("invalid number `{token}`")]
    InvalidNumber {
        /// The offending token.
        token: String,
    },
    /// An exponent was negative or not finite.
    #[error("invalid exponent `{token}`: exponents must be finite and non-negative")]
    InvalidExponent {
        /// The offending token.
        token: String,
    },
    /// A term of the rendered form couldn't be read.
    #[error("malformed term `{token}`")]
    MalformedTerm {
        /// The offending token.
        token: String,
    },
    /// A `+` or `-` wasn't followed by a term.
    #[error("sign without a term after it")]
    DanglingSign,
}

impl Equation {
    /// Reads a polynomial from two lines of text.
    ///
    /// The first line holds whitespace-separated exponents and the second
    /// the matching coefficients. As with [`Equation::new`], entries without
    /// a partner on the other line are ignored, and a missing line counts as
    /// an empty one.
    ///
    /// ```
    /// use polyscan::Equation;
    ///
    /// let eq = Equation::parse_lines("3 2 1 0\n1 -6 11 -6\n").unwrap();
    /// assert_eq!(eq.to_string(), "x^3 - 6x^2 + 11x - 6 ");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if a token is not a number, or if a paired exponent
    /// is negative or not finite.
    pub fn parse_lines(text: &str) -> Result<Equation, ParseError> {
        let mut lines = text.lines();
        let exponents = parse_numbers(lines.next().unwrap_or_default())?;
        let coefficients = parse_numbers(lines.next().unwrap_or_default())?;
        for &e in exponents.iter().take(coefficients.len()) {
            check_exponent(e, &e.to_string())?;
        }
        Ok(Equation::new(exponents, coefficients))
    }
}

/// Reads back the output of `Display` for [`Equation`].
///
/// Terms are separated by whitespace, with a standalone `+` or `-` between
/// them. Each term is a number, `x` with an optional leading number, or
/// either of those followed by `^` and an exponent.
///
/// ```
/// use polyscan::Equation;
///
/// let eq: Equation = "- x^3 + 2.5x - 1 ".parse().unwrap();
/// assert_eq!(eq, Equation::new([3.0, 1.0, 0.0], [-1.0, 2.5, -1.0]));
/// ```
impl FromStr for Equation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut terms = Vec::new();
        let mut sign: Option<f64> = None;
        for token in s.split_whitespace() {
            match token {
                "+" | "-" => {
                    if sign.is_some() {
                        return Err(ParseError::MalformedTerm {
                            token: token.into(),
                        });
                    }
                    sign = Some(if token == "-" { -1.0 } else { 1.0 });
                }
                _ => {
                    let mut term = parse_term(token)?;
                    term.coefficient *= sign.take().unwrap_or(1.0);
                    terms.push(term);
                }
            }
        }
        if sign.is_some() {
            return Err(ParseError::DanglingSign);
        }
        Ok(Equation::from_terms(terms))
    }
}

fn parse_numbers(line: &str) -> Result<Vec<f64>, ParseError> {
    line.split_whitespace().map(parse_number).collect()
}

fn parse_number(token: &str) -> Result<f64, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidNumber {
        token: token.into(),
    })
}

fn check_exponent(e: f64, token: &str) -> Result<f64, ParseError> {
    if e.is_finite() && e >= 0.0 {
        Ok(e)
    } else {
        Err(ParseError::InvalidExponent {
            token: token.into(),
        })
    }
}

fn parse_term(token: &str) -> Result<Term, ParseError> {
    let Some((coefficient, power)) = token.split_once('x') else {
        return Ok(Term::new(0.0, parse_number(token)?));
    };
    let coefficient = match coefficient {
        "" => 1.0,
        c => parse_number(c)?,
    };
    let exponent = match power {
        "" => 1.0,
        p => match p.strip_prefix('^') {
            Some(e) => check_exponent(parse_number(e)?, e)?,
            None => {
                return Err(ParseError::MalformedTerm {
                    token: token.into(),
                })
            }
        },
    };
    Ok(Term::new(exponent, coefficient))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_lines() {
        let eq = Equation::parse_lines("2 0\n1 -4").unwrap();
        assert_eq!(eq, Equation::new([2.0, 0.0], [1.0, -4.0]));

        // Extra whitespace and unmatched entries.
        let eq = Equation::parse_lines("  3\t2 1 0  \n 1 0 5\n").unwrap();
        assert_eq!(eq.terms(), &[Term::new(3.0, 1.0), Term::new(1.0, 5.0)]);
    }

    #[test]
    fn missing_lines() {
        assert!(Equation::parse_lines("").unwrap().is_empty());
        assert!(Equation::parse_lines("2 1 0").unwrap().is_empty());
    }

    #[test]
    fn bad_numbers() {
        assert_eq!(
            Equation::parse_lines("2 two\n1 1"),
            Err(ParseError::InvalidNumber {
                token: "two".into()
            })
        );
        assert!(matches!(
            Equation::parse_lines("-2\n1"),
            Err(ParseError::InvalidExponent { .. })
        ));
        // An unpaired exponent is dropped before it is checked.
        assert!(Equation::parse_lines("2 -1\n1").is_ok());
    }

    #[test]
    fn rendered_terms() {
        let eq: Equation = "x^2 - 4 ".parse().unwrap();
        assert_eq!(eq, Equation::new([2.0, 0.0], [1.0, -4.0]));

        let eq: Equation = "- x + 1 + 0.5x^0.5".parse().unwrap();
        assert_eq!(eq, Equation::new([1.0, 0.0, 0.5], [-1.0, 1.0, 0.5]));

        assert!("".parse::<Equation>().unwrap().is_empty());
    }

    #[test]
    fn rendered_errors() {
        assert_eq!("x^2 -".parse::<Equation>(), Err(ParseError::DanglingSign));
        assert!(matches!(
            "x^2 + - 1".parse::<Equation>(),
            Err(ParseError::MalformedTerm { .. })
        ));
        assert!(matches!(
            "3x2".parse::<Equation>(),
            Err(ParseError::MalformedTerm { .. })
        ));
        assert!(matches!(
            "3x^-2".parse::<Equation>(),
            Err(ParseError::InvalidExponent { .. })
        ));
        assert!(matches!(
            "ax".parse::<Equation>(),
            Err(ParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn display_round_trip() {
        arbtest::arbtest(|u| {
            let eq = crate::arbitrary::equation(u)?;
            let text = eq.to_string();
            let parsed: Equation = text.parse().unwrap();
            assert_eq!(parsed, eq, "rendered as {text:?}");

            let parsed = Equation::parse_lines(&eq.to_lines()).unwrap();
            assert_eq!(parsed, eq);
            Ok(())
        });
    }
}
