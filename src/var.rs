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

//! The arbitrary-precision decimal arithmetic engine.
//!
//! Everything above this module treats it as a black box: values go in as
//! text, come out as text, and the only window into a value's internals is
//! the limb view consumed by the metadata normalizer.

use crate::error::DecimalError;
use std::cmp::Ordering;
use std::fmt;

/// Number of decimal digits carried by one limb of the exposed digit
/// encoding.
pub(crate) const LIMB_DIGITS: u32 = 19;

/// Default cap on the working precision of a single operation.  Any
/// operation asked to produce more significant digits than this fails,
/// which the caller surfaces as `NaN`.
pub const MAX_PRECISION: u32 = 100_000;

pub(crate) const SIGN_POS: u8 = 0;
pub(crate) const SIGN_NEG: u8 = 1;
pub(crate) const SIGN_NAN: u8 = 2;

/// Rounding mode applied when an operation result is cut back to its
/// target precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Round half to even, the mode used for all SQL-level arithmetic.
    HalfEven,
    /// Truncate towards zero.
    TowardZero,
}

/// A transient context bracketing one set of engine operations.
///
/// The context carries the operation configuration: the rounding mode and
/// the cap on working precision.  Values produced against a context are
/// plain owned values; dropping the context or any value releases its
/// storage, on every exit path.
#[derive(Debug, Clone)]
pub struct Context {
    rounding: Rounding,
    max_precision: u32,
}

impl Context {
    /// Creates a context with half-even rounding and the default
    /// precision cap.
    #[inline]
    pub fn new() -> Self {
        Context {
            rounding: Rounding::HalfEven,
            max_precision: MAX_PRECISION,
        }
    }

    /// Creates a context with a custom cap on working precision.
    #[inline]
    pub fn with_max_precision(max_precision: u32) -> Self {
        Context {
            rounding: Rounding::HalfEven,
            max_precision,
        }
    }

    #[inline]
    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Parses `s` into a value holding up to `precision` significant
    /// digits.
    pub(crate) fn parse(
        &self,
        s: &str,
        precision: u32,
        rounding: Rounding,
    ) -> Result<DecimalVar, DecimalError> {
        self.check_precision(precision)?;
        let mut var = crate::parse::parse_str(s)?;
        var.apply_round(precision, rounding);
        Ok(var)
    }

    /// Adds `a` and `b` at `precision` significant digits.
    pub(crate) fn add(
        &self,
        a: &DecimalVar,
        b: &DecimalVar,
        precision: u32,
        rounding: Rounding,
    ) -> Result<DecimalVar, DecimalError> {
        self.check_operands(a, b)?;
        self.check_precision(precision)?;
        let mut res = a.add(b);
        res.apply_round(precision, rounding);
        Ok(res)
    }

    /// Subtracts `b` from `a` at `precision` significant digits.
    pub(crate) fn sub(
        &self,
        a: &DecimalVar,
        b: &DecimalVar,
        precision: u32,
        rounding: Rounding,
    ) -> Result<DecimalVar, DecimalError> {
        self.check_operands(a, b)?;
        self.check_precision(precision)?;
        let mut res = a.add(&b.negated());
        res.apply_round(precision, rounding);
        Ok(res)
    }

    /// Multiplies `a` by `b` at `precision` significant digits.
    pub(crate) fn mul(
        &self,
        a: &DecimalVar,
        b: &DecimalVar,
        precision: u32,
        rounding: Rounding,
    ) -> Result<DecimalVar, DecimalError> {
        self.check_operands(a, b)?;
        self.check_precision(precision)?;
        let mut res = a.mul(b);
        res.apply_round(precision, rounding);
        Ok(res)
    }

    #[inline]
    fn check_precision(&self, precision: u32) -> Result<(), DecimalError> {
        if precision == 0 {
            return Err(DecimalError::invalid());
        }
        if precision > self.max_precision {
            return Err(DecimalError::overflow());
        }
        Ok(())
    }

    #[inline]
    fn check_operands(&self, a: &DecimalVar, b: &DecimalVar) -> Result<(), DecimalError> {
        if a.is_nan() || b.is_nan() {
            return Err(DecimalError::invalid());
        }
        Ok(())
    }
}

impl Default for Context {
    #[inline]
    fn default() -> Self {
        Context::new()
    }
}

/// `DecimalVar` is the engine's value format.
///
/// `digits` holds the significant decimal digits, most significant first,
/// with neither leading nor trailing zero digits; an empty buffer is the
/// value zero.  `expn` is the count of digits that belong before the
/// decimal point, so the represented magnitude is `0.digits * 10^expn`.
/// `expn` may be zero or negative for values below one.
///
/// The limb view exposed to the metadata normalizer chunks the stored
/// digit string into 19-digit limbs, least significant limb first, with
/// the last chunk right-padded by zeros to a full limb.
#[derive(Debug, Clone)]
pub(crate) struct DecimalVar {
    sign: u8,
    expn: i32,
    digits: Vec<u8>,
}

impl DecimalVar {
    /// Creates a value of zero, which has an empty limb sequence.
    #[inline]
    pub fn zero() -> Self {
        DecimalVar {
            sign: SIGN_POS,
            expn: 0,
            digits: Vec::new(),
        }
    }

    /// Creates a `NaN` value.
    #[inline]
    pub fn nan() -> Self {
        DecimalVar {
            sign: SIGN_NAN,
            expn: 0,
            digits: Vec::new(),
        }
    }

    /// Creates a value from raw parts.  The digit buffer may carry
    /// leading and trailing zeros; the value is canonicalized.
    #[inline]
    pub(crate) fn from_parts(sign: u8, expn: i32, digits: Vec<u8>) -> Self {
        let mut var = DecimalVar { sign, expn, digits };
        var.strip();
        var
    }

    /// Turns `self` into `NaN` in place.
    #[inline]
    pub fn set_nan(&mut self) {
        self.sign = SIGN_NAN;
        self.expn = 0;
        self.digits.clear();
    }

    /// Checks if `self` is `NaN`.
    #[inline]
    pub const fn is_nan(&self) -> bool {
        self.sign == SIGN_NAN
    }

    /// Checks if `self` is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.sign != SIGN_NAN && self.digits.is_empty()
    }

    /// Count of digits before the decimal point for a magnitude >= 1.
    #[inline]
    pub fn expn(&self) -> i32 {
        self.expn
    }

    /// Number of limbs in the exposed digit encoding; zero for the
    /// value zero and for `NaN`.
    #[inline]
    pub fn limb_count(&self) -> usize {
        (self.digits.len() + LIMB_DIGITS as usize - 1) / LIMB_DIGITS as usize
    }

    /// Numeric value of the least significant limb.
    ///
    /// The stored digit string is right-padded with zeros to a full
    /// 19-digit limb, so a value of `102` exposes the limb
    /// `1020000000000000000`.
    pub fn low_limb(&self) -> u64 {
        let n = self.digits.len();
        if n == 0 {
            return 0;
        }
        let start = (self.limb_count() - 1) * LIMB_DIGITS as usize;
        let mut limb: u64 = 0;
        for &d in &self.digits[start..] {
            limb = limb * 10 + d as u64;
        }
        let padding = self.limb_count() * LIMB_DIGITS as usize - n;
        for _ in 0..padding {
            limb *= 10;
        }
        limb
    }

    /// Returns `self` with the sign flipped.  Zero and `NaN` are
    /// unaffected.
    pub(crate) fn negated(&self) -> Self {
        let mut res = self.clone();
        if !res.is_nan() && !res.is_zero() {
            res.sign = if res.sign == SIGN_POS { SIGN_NEG } else { SIGN_POS };
        }
        res
    }

    /// Digit at decimal place `place`; the digit multiplying
    /// `10^place`.  Zero outside the stored range.
    #[inline]
    fn digit_at(&self, place: i32) -> u8 {
        let i = self.expn - 1 - place;
        if i < 0 || i >= self.digits.len() as i32 {
            0
        } else {
            self.digits[i as usize]
        }
    }

    /// Strips leading and trailing zero digits and normalizes zero.
    fn strip(&mut self) {
        let leading = self.digits.iter().take_while(|&&d| d == 0).count();
        if leading > 0 {
            self.digits.drain(..leading);
            self.expn -= leading as i32;
        }
        while self.digits.last() == Some(&0) {
            self.digits.pop();
        }
        if self.digits.is_empty() && !self.is_nan() {
            self.sign = SIGN_POS;
            self.expn = 0;
        }
    }

    /// Cuts the value back to no more than `precision` significant
    /// digits, rounding the first dropped digit per `rounding`.
    pub(crate) fn apply_round(&mut self, precision: u32, rounding: Rounding) {
        let precision = precision as usize;
        if self.digits.len() <= precision {
            return;
        }

        let round_up = match rounding {
            Rounding::TowardZero => false,
            Rounding::HalfEven => match self.digits[precision].cmp(&5) {
                Ordering::Less => false,
                Ordering::Greater => true,
                Ordering::Equal => {
                    self.digits[precision + 1..].iter().any(|&d| d != 0)
                        || self.digits[precision - 1] % 2 == 1
                }
            },
        };

        self.digits.truncate(precision);

        if round_up {
            let mut carry = true;
            for d in self.digits.iter_mut().rev() {
                if *d == 9 {
                    *d = 0;
                } else {
                    *d += 1;
                    carry = false;
                    break;
                }
            }
            if carry {
                // The whole prefix was nines; the value rounds up to a
                // single leading one with a higher magnitude.
                self.digits.clear();
                self.digits.push(1);
                self.expn += 1;
            }
        }

        self.strip();
    }

    /// Compares the absolute values of `self` and `other`.
    fn cmp_abs(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => match self.expn.cmp(&other.expn) {
                Ordering::Equal => {
                    let n = self.digits.len().max(other.digits.len());
                    for i in 0..n {
                        let da = self.digits.get(i).copied().unwrap_or(0);
                        let db = other.digits.get(i).copied().unwrap_or(0);
                        match da.cmp(&db) {
                            Ordering::Equal => continue,
                            ord => return ord,
                        }
                    }
                    Ordering::Equal
                }
                ord => ord,
            },
        }
    }

    /// Adds the absolute values of two non-zero variables.
    fn add_abs(&self, other: &Self) -> Self {
        debug_assert!(!self.is_zero() && !other.is_zero());

        let hp = self.expn.max(other.expn) - 1;
        let lp = (self.expn - self.digits.len() as i32)
            .min(other.expn - other.digits.len() as i32);
        let ndigits = (hp - lp + 1) as usize;

        // One extra slot in front for a carry out of the top digit.
        let mut res = vec![0u8; ndigits + 1];
        let mut carry = 0u8;
        for (i, place) in (lp..=hp).enumerate() {
            let sum = self.digit_at(place) + other.digit_at(place) + carry;
            res[ndigits - i] = sum % 10;
            carry = sum / 10;
        }
        res[0] = carry;

        DecimalVar::from_parts(SIGN_POS, hp + 2, res)
    }

    /// Subtracts the absolute value of `other` from the absolute value
    /// of `self`, which must be the larger of the two.
    fn sub_abs(&self, other: &Self) -> Self {
        debug_assert!(!self.is_zero() && !other.is_zero());
        debug_assert_eq!(self.cmp_abs(other), Ordering::Greater);

        let hp = self.expn - 1;
        let lp = (self.expn - self.digits.len() as i32)
            .min(other.expn - other.digits.len() as i32);
        let ndigits = (hp - lp + 1) as usize;

        let mut res = vec![0u8; ndigits];
        let mut borrow = 0i8;
        for (i, place) in (lp..=hp).enumerate() {
            let mut d = self.digit_at(place) as i8 - other.digit_at(place) as i8 - borrow;
            if d < 0 {
                d += 10;
                borrow = 1;
            } else {
                borrow = 0;
            }
            res[ndigits - 1 - i] = d as u8;
        }
        debug_assert_eq!(borrow, 0); // else caller gave us self < other

        DecimalVar::from_parts(SIGN_POS, hp + 1, res)
    }

    /// Exact, sign-aware addition.
    pub(crate) fn add(&self, other: &Self) -> Self {
        debug_assert!(!self.is_nan() && !other.is_nan());

        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }

        if self.sign == other.sign {
            let mut res = self.add_abs(other);
            res.sign = self.sign;
            return res;
        }

        match self.cmp_abs(other) {
            Ordering::Equal => DecimalVar::zero(),
            Ordering::Greater => {
                let mut res = self.sub_abs(other);
                res.sign = self.sign;
                res
            }
            Ordering::Less => {
                let mut res = other.sub_abs(self);
                res.sign = other.sign;
                res
            }
        }
    }

    /// Exact multiplication.
    pub(crate) fn mul(&self, other: &Self) -> Self {
        debug_assert!(!self.is_nan() && !other.is_nan());

        if self.is_zero() || other.is_zero() {
            return DecimalVar::zero();
        }

        let la = self.digits.len();
        let lb = other.digits.len();

        // Schoolbook convolution; column sums stay well below u32 range
        // for any precision the context admits.
        let mut acc = vec![0u32; la + lb];
        for i in 0..la {
            let da = self.digits[i] as u32;
            if da == 0 {
                continue;
            }
            for j in 0..lb {
                acc[i + j + 1] += da * other.digits[j] as u32;
            }
        }

        let mut digits = vec![0u8; la + lb];
        let mut carry = 0u32;
        for k in (0..la + lb).rev() {
            let v = acc[k] + carry;
            digits[k] = (v % 10) as u8;
            carry = v / 10;
        }
        debug_assert_eq!(carry, 0);

        let sign = if self.sign == other.sign {
            SIGN_POS
        } else {
            SIGN_NEG
        };
        DecimalVar::from_parts(sign, self.expn + other.expn, digits)
    }
}

impl fmt::Display for DecimalVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if self.is_nan() {
            return write!(f, "NaN");
        }
        if self.digits.is_empty() {
            return write!(f, "0");
        }

        if self.sign == SIGN_NEG {
            write!(f, "-")?;
        }

        let ndigits = self.digits.len() as i32;
        if self.expn <= 0 {
            write!(f, "0.")?;
            for _ in 0..-self.expn {
                write!(f, "0")?;
            }
            for &d in &self.digits {
                write!(f, "{}", d)?;
            }
        } else if self.expn >= ndigits {
            for &d in &self.digits {
                write!(f, "{}", d)?;
            }
            for _ in 0..self.expn - ndigits {
                write!(f, "0")?;
            }
        } else {
            let point = self.expn as usize;
            for &d in &self.digits[..point] {
                write!(f, "{}", d)?;
            }
            write!(f, ".")?;
            for &d in &self.digits[point..] {
                write!(f, "{}", d)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(s: &str) -> DecimalVar {
        crate::parse::parse_str(s).unwrap()
    }

    fn assert_add<E: AsRef<str>>(a: &str, b: &str, expected: E) {
        let ctx = Context::new();
        let res = ctx
            .add(&var(a), &var(b), MAX_PRECISION, Rounding::HalfEven)
            .unwrap();
        assert_eq!(res.to_string(), expected.as_ref());
    }

    fn assert_sub<E: AsRef<str>>(a: &str, b: &str, expected: E) {
        let ctx = Context::new();
        let res = ctx
            .sub(&var(a), &var(b), MAX_PRECISION, Rounding::HalfEven)
            .unwrap();
        assert_eq!(res.to_string(), expected.as_ref());
    }

    fn assert_mul<E: AsRef<str>>(a: &str, b: &str, expected: E) {
        let ctx = Context::new();
        let res = ctx
            .mul(&var(a), &var(b), MAX_PRECISION, Rounding::HalfEven)
            .unwrap();
        assert_eq!(res.to_string(), expected.as_ref());
    }

    #[test]
    fn add() {
        assert_add("0", "0", "0");
        assert_add("0", "123.456", "123.456");
        assert_add("123.456", "0", "123.456");
        assert_add("123.456", "2456.7", "2580.156");
        assert_add("53", "49", "102");
        assert_add("0.5", "0.5", "1");
        assert_add("-0.5", "0.5", "0");
        assert_add("-123.456", "123.456", "0");
        assert_add("-123.456", "23.456", "-100");
        assert_add("1e10", "0.5", "10000000000.5");
        assert_add("99999999999999999999", "1", "100000000000000000000");
        assert_add("-5", "-5", "-10");
    }

    #[test]
    fn sub() {
        assert_sub("0", "0", "0");
        assert_sub("1", "1", "0");
        assert_sub("123.456", "23.456", "100");
        assert_sub("23.456", "123.456", "-100");
        assert_sub("100", "0.001", "99.999");
        assert_sub("-1", "1", "-2");
        assert_sub("0", "5", "-5");
    }

    #[test]
    fn mul() {
        assert_mul("0", "123", "0");
        assert_mul("123", "0", "0");
        assert_mul("12.3", "4.567", "56.1741");
        assert_mul("2", "3", "6");
        assert_mul("-2", "3", "-6");
        assert_mul("-2", "-3", "6");
        assert_mul("0.5", "0.5", "0.25");
        assert_mul("0.001", "0.01", "0.00001");
        assert_mul("1250", "8", "10000");
        assert_mul(
            "12345678901234567890",
            "98765432109876543210",
            "1219326311370217952237463801111263526900",
        );
    }

    #[test]
    fn rounding() {
        let mut v = var("2.5");
        v.apply_round(1, Rounding::HalfEven);
        assert_eq!(v.to_string(), "2");

        let mut v = var("3.5");
        v.apply_round(1, Rounding::HalfEven);
        assert_eq!(v.to_string(), "4");

        let mut v = var("2.51");
        v.apply_round(1, Rounding::HalfEven);
        assert_eq!(v.to_string(), "3");

        let mut v = var("199.6");
        v.apply_round(3, Rounding::HalfEven);
        assert_eq!(v.to_string(), "200");

        let mut v = var("999.9");
        v.apply_round(3, Rounding::HalfEven);
        assert_eq!(v.to_string(), "1000");

        let mut v = var("2.9");
        v.apply_round(1, Rounding::TowardZero);
        assert_eq!(v.to_string(), "2");

        let mut v = var("123.456");
        v.apply_round(6, Rounding::HalfEven);
        assert_eq!(v.to_string(), "123.456");
    }

    #[test]
    fn precision_cap() {
        let ctx = Context::with_max_precision(4);
        assert_eq!(
            ctx.add(&var("1"), &var("2"), 5, Rounding::HalfEven)
                .unwrap_err(),
            DecimalError::overflow()
        );
        let res = ctx.add(&var("1"), &var("2"), 4, Rounding::HalfEven).unwrap();
        assert_eq!(res.to_string(), "3");
    }

    #[test]
    fn nan_operands() {
        let ctx = Context::new();
        let nan = DecimalVar::nan();
        assert_eq!(
            ctx.add(&nan, &var("1"), 4, Rounding::HalfEven).unwrap_err(),
            DecimalError::invalid()
        );
        assert_eq!(
            ctx.mul(&var("1"), &nan, 4, Rounding::HalfEven).unwrap_err(),
            DecimalError::invalid()
        );
        assert_eq!(nan.to_string(), "NaN");
    }

    #[test]
    fn limb_view() {
        // 102 occupies a single limb, right-padded with zeros.
        let v = var("102");
        assert_eq!(v.limb_count(), 1);
        assert_eq!(v.low_limb(), 1_020_000_000_000_000_000);
        assert_eq!(v.expn(), 3);

        // Twenty significant digits spill into a second limb.
        let v = var("12345678901234567891");
        assert_eq!(v.limb_count(), 2);
        assert_eq!(v.low_limb(), 1_000_000_000_000_000_000);
        assert_eq!(v.expn(), 20);

        // Trailing zeros of an integer are absorbed into the exponent,
        // not kept as digit data.
        let v = var("1680");
        assert_eq!(v.limb_count(), 1);
        assert_eq!(v.low_limb(), 1_680_000_000_000_000_000);
        assert_eq!(v.expn(), 4);

        // Zero has an empty limb sequence.
        let v = var("0");
        assert_eq!(v.limb_count(), 0);
        assert_eq!(v.low_limb(), 0);
    }

    #[test]
    fn display() {
        assert_eq!(var("0").to_string(), "0");
        assert_eq!(var("-0").to_string(), "0");
        assert_eq!(var("0.5").to_string(), "0.5");
        assert_eq!(var("-0.5").to_string(), "-0.5");
        assert_eq!(var("0.05").to_string(), "0.05");
        assert_eq!(var("1680").to_string(), "1680");
        assert_eq!(var("0123.4500").to_string(), "123.45");
        assert_eq!(var("1e10").to_string(), "10000000000");
        assert_eq!(var("-1e-10").to_string(), "-0.0000000001");
    }

    #[test]
    fn cmp_abs() {
        assert_eq!(var("0").cmp_abs(&var("0")), Ordering::Equal);
        assert_eq!(var("0").cmp_abs(&var("1")), Ordering::Less);
        assert_eq!(var("10").cmp_abs(&var("9.999")), Ordering::Greater);
        assert_eq!(var("-10").cmp_abs(&var("10")), Ordering::Equal);
        assert_eq!(var("123.45").cmp_abs(&var("123.456")), Ordering::Less);
    }
}
