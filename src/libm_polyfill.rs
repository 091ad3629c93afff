// Copyright 2025 the Polyscan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg_attr(
    feature = "std",
    expect(dead_code, reason = "unused if std and libm are both around")
)]
pub(crate) trait FloatFuncs: Sized {
    fn abs(self) -> Self;
    fn powf(self, pow: Self) -> Self;
    fn powi(self, pow: i32) -> Self;
}

impl FloatFuncs for f64 {
    fn abs(self) -> Self {
        libm::fabs(self)
    }
    fn powf(self, pow: Self) -> Self {
        libm::pow(self, pow)
    }
    fn powi(self, pow: i32) -> Self {
        libm::pow(self, pow as _)
    }
}
