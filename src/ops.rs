// Copyright 2020 CoD Technologies Corp.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Implementing operators for decimals.
//!
//! Only the three operations the decimal engine defines are covered;
//! the operators run under a default context.

use crate::decimal::Decimal;
use crate::var::Context;
use std::ops::{Add, Mul, Sub};

// The main implementation
// &self + &other
impl Add<&Decimal> for &Decimal {
    type Output = Decimal;

    #[inline]
    fn add(self, other: &Decimal) -> Self::Output {
        Decimal::add(&Context::new(), self, other)
    }
}

// self + other
impl Add<Decimal> for Decimal {
    type Output = Decimal;

    #[inline]
    fn add(self, other: Decimal) -> Self::Output {
        Add::add(&self, &other)
    }
}

// self + &other
impl Add<&Decimal> for Decimal {
    type Output = Decimal;

    #[inline]
    fn add(self, other: &Decimal) -> Self::Output {
        Add::add(&self, other)
    }
}

// &self + other
impl Add<Decimal> for &Decimal {
    type Output = Decimal;

    #[inline]
    fn add(self, other: Decimal) -> Self::Output {
        Add::add(self, &other)
    }
}

// &self - &other
impl Sub<&Decimal> for &Decimal {
    type Output = Decimal;

    #[inline]
    fn sub(self, other: &Decimal) -> Self::Output {
        Decimal::sub(&Context::new(), self, other)
    }
}

// self - other
impl Sub<Decimal> for Decimal {
    type Output = Decimal;

    #[inline]
    fn sub(self, other: Decimal) -> Self::Output {
        Sub::sub(&self, &other)
    }
}

// self - &other
impl Sub<&Decimal> for Decimal {
    type Output = Decimal;

    #[inline]
    fn sub(self, other: &Decimal) -> Self::Output {
        Sub::sub(&self, other)
    }
}

// &self - other
impl Sub<Decimal> for &Decimal {
    type Output = Decimal;

    #[inline]
    fn sub(self, other: Decimal) -> Self::Output {
        Sub::sub(self, &other)
    }
}

// &self * &other
impl Mul<&Decimal> for &Decimal {
    type Output = Decimal;

    #[inline]
    fn mul(self, other: &Decimal) -> Self::Output {
        Decimal::mul(&Context::new(), self, other)
    }
}

// self * other
impl Mul<Decimal> for Decimal {
    type Output = Decimal;

    #[inline]
    fn mul(self, other: Decimal) -> Self::Output {
        Mul::mul(&self, &other)
    }
}

// self * &other
impl Mul<&Decimal> for Decimal {
    type Output = Decimal;

    #[inline]
    fn mul(self, other: &Decimal) -> Self::Output {
        Mul::mul(&self, other)
    }
}

// &self * other
impl Mul<Decimal> for &Decimal {
    type Output = Decimal;

    #[inline]
    fn mul(self, other: Decimal) -> Self::Output {
        Mul::mul(self, &other)
    }
}
