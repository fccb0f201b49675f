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

//! The decimal value and its precision/scale metadata.
//!
//! A `Decimal` pairs an engine-owned digit representation with the two
//! derived metrics the SQL functions are built around: precision (total
//! significant digits) and scale (digits right of the decimal point,
//! trailing zeros excluded).  Metadata of a freshly parsed value comes
//! from the input text; metadata of an arithmetic result is re-derived
//! from the engine's digit encoding, never from text.

use crate::error::DecimalError;
use crate::metric::{text_precision, text_scale};
use crate::var::{Context, DecimalVar, Rounding, LIMB_DIGITS};
use std::cmp;
use std::fmt;

/// An engine operation shared by the add and subtract orchestration,
/// which compute their target metadata the same way.
type EngineOp =
    fn(&Context, &DecimalVar, &DecimalVar, u32, Rounding) -> Result<DecimalVar, DecimalError>;

/// An exact decimal value with derived precision and scale.
#[derive(Debug, Clone)]
pub struct Decimal {
    var: DecimalVar,
    precision: u32,
    scale: u32,
}

impl Decimal {
    /// Creates a decimal with the value of zero.
    ///
    /// This is the one value whose precision is 0 rather than at least
    /// 1; an arithmetic operation normalizes it otherwise.
    #[inline]
    pub fn zero() -> Self {
        Decimal {
            var: DecimalVar::zero(),
            precision: 0,
            scale: 0,
        }
    }

    /// Creates a `NaN` decimal.
    #[inline]
    pub fn nan() -> Self {
        Decimal {
            var: DecimalVar::nan(),
            precision: 0,
            scale: 0,
        }
    }

    /// Creates a decimal value from a string.
    ///
    /// Precision and scale are fixed here, from the input text; the
    /// engine's own encoding plays no part in them.  Invalid input
    /// produces a `NaN` decimal rather than an error.
    pub fn parse(ctx: &Context, s: &str) -> Self {
        let precision = text_precision(s);
        let scale = text_scale(s);

        match ctx.parse(s, precision, ctx.rounding()) {
            Ok(var) => {
                if var.is_nan() {
                    Self::nan()
                } else {
                    Decimal {
                        var,
                        precision,
                        scale,
                    }
                }
            }
            Err(_) => Self::nan(),
        }
    }

    /// Checks if `self` is `NaN`.
    #[inline]
    pub fn is_nan(&self) -> bool {
        self.var.is_nan()
    }

    /// Total count of significant decimal digits, ignoring the sign and
    /// the decimal point.  0 for `NaN`.
    #[inline]
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Count of digits right of the decimal point, trailing zeros
    /// excluded.  0 for integers and for `NaN`.
    #[inline]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Turns `self` into `NaN`, resetting the metadata.
    fn set_nan(&mut self) {
        self.var.set_nan();
        self.precision = 0;
        self.scale = 0;
    }

    /// Re-derives precision and scale from the engine's digit encoding.
    ///
    /// The engine stores digits in 19-digit limbs and only tracks a
    /// magnitude exponent, so after an arithmetic operation the target
    /// metadata set beforehand may overstate the result.  Counting how
    /// many digits of the least significant limb are not trailing zeros
    /// recovers the true precision; the exponent then splits it into
    /// integral and fractional digits.
    ///
    /// A value with no limbs is zero; its metadata is left as already
    /// set.
    fn normalize(&mut self) {
        let limbs = self.var.limb_count();
        if limbs == 0 {
            return;
        }

        let mut limb = self.var.low_limb();
        let mut kept = LIMB_DIGITS;
        while kept > 0 && limb % 10 == 0 {
            limb /= 10;
            kept -= 1;
        }

        let precision = (limbs as u32 - 1) * LIMB_DIGITS + kept;
        let expn = self.var.expn();

        // The exponent outrunning the stored digits means the value is
        // an integer whose trailing zeros live in the exponent alone,
        // such as 1680; they count toward precision all the same.
        if expn > precision as i32 {
            self.precision = expn as u32;
            self.scale = 0;
        } else {
            self.precision = precision;
            self.scale = (precision as i32 - expn) as u32;
        }
    }

    /// The target scale and precision a sum or difference must be
    /// allowed to hold: the larger operand's integral digits, the
    /// larger fractional scale, and one extra digit for the carry.
    ///
    /// A value below one may carry a scale larger than its precision,
    /// so the integral digit count saturates at zero.
    fn add_sub_target(a: &Decimal, b: &Decimal) -> (u32, u32) {
        let scale = cmp::max(a.scale, b.scale);
        let integral = cmp::max(
            a.precision.saturating_sub(a.scale),
            b.precision.saturating_sub(b.scale),
        );
        (integral + scale + 1, scale)
    }

    fn add_or_sub(ctx: &Context, a: &Decimal, b: &Decimal, op: EngineOp) -> Decimal {
        let mut result = Decimal::zero();
        let (precision, scale) = Self::add_sub_target(a, b);
        result.precision = precision;
        result.scale = scale;

        match op(ctx, &a.var, &b.var, result.precision, ctx.rounding()) {
            Ok(var) => {
                result.var = var;
                result.normalize();
            }
            Err(_) => result.set_nan(),
        }

        result
    }

    /// Adds two decimals.  Always returns a decimal; engine failure
    /// yields `NaN`.
    #[inline]
    pub fn add(ctx: &Context, a: &Decimal, b: &Decimal) -> Decimal {
        Self::add_or_sub(ctx, a, b, Context::add)
    }

    /// Subtracts `b` from `a`.  Always returns a decimal; engine
    /// failure yields `NaN`.
    #[inline]
    pub fn sub(ctx: &Context, a: &Decimal, b: &Decimal) -> Decimal {
        Self::add_or_sub(ctx, a, b, Context::sub)
    }

    /// Multiplies two decimals.  Always returns a decimal; engine
    /// failure yields `NaN`.
    ///
    /// The product's precision cannot exceed the sum of the operand
    /// precisions, nor its scale the sum of the operand scales, so the
    /// target metadata is simply both sums.
    pub fn mul(ctx: &Context, a: &Decimal, b: &Decimal) -> Decimal {
        let mut result = Decimal::zero();
        result.scale = a.scale + b.scale;
        result.precision = a.precision + b.precision;

        match ctx.mul(&a.var, &b.var, result.precision, ctx.rounding()) {
            Ok(var) => {
                result.var = var;
                result.normalize();
            }
            Err(_) => result.set_nan(),
        }

        result
    }
}

impl fmt::Display for Decimal {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        fmt::Display::fmt(&self.var, f)
    }
}
