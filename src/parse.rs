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

//! Text parsing for the arithmetic engine.

use crate::error::DecimalError;
use crate::var::{DecimalVar, SIGN_NEG, SIGN_POS};
use smallvec::SmallVec;
use std::convert::TryInto;

/// The interesting parts of a decimal literal.
#[derive(Debug)]
struct Literal<'a> {
    sign: u8,
    integral: &'a [u8],
    fractional: &'a [u8],
    exp: i32,
}

/// Checks if the input is a valid decimal literal and if so, locates the
/// integral part, the fractional part, and the exponent in it.
fn parse_literal(s: &[u8]) -> Result<(Literal, &[u8]), DecimalError> {
    let (sign, s) = extract_sign(s);

    if s.is_empty() {
        return Err(DecimalError::invalid());
    }

    let (integral, s) = eat_digits(s);

    let (fractional, exp, s) = match s.first() {
        Some(&b'e') | Some(&b'E') => {
            if integral.is_empty() {
                return Err(DecimalError::invalid());
            }

            let (exp, s) = extract_exponent(&s[1..])?;
            (b"".as_ref(), exp, s)
        }
        Some(&b'.') => {
            let (fractional, s) = eat_digits(&s[1..]);
            if integral.is_empty() && fractional.is_empty() {
                return Err(DecimalError::invalid());
            }

            match s.first() {
                Some(&b'e') | Some(&b'E') => {
                    let (exp, s) = extract_exponent(&s[1..])?;
                    (fractional, exp, s)
                }
                _ => (fractional, 0, s),
            }
        }
        _ => {
            if integral.is_empty() {
                return Err(DecimalError::invalid());
            }

            (b"".as_ref(), 0, s)
        }
    };

    Ok((
        Literal {
            sign,
            integral,
            fractional,
            exp,
        },
        s,
    ))
}

/// Carves off whitespaces up to the first non-whitespace character.
#[inline]
fn eat_whitespaces(s: &[u8]) -> &[u8] {
    let i = s.iter().take_while(|&i| i.is_ascii_whitespace()).count();
    &s[i..]
}

/// Carves off decimal digits up to the first non-digit character.
#[inline]
fn eat_digits(s: &[u8]) -> (&[u8], &[u8]) {
    let i = s.iter().take_while(|&i| i.is_ascii_digit()).count();
    (&s[..i], &s[i..])
}

/// Extracts a `NaN` literal.
#[inline]
fn extract_nan(s: &[u8]) -> (bool, &[u8]) {
    if s.len() < 3 {
        (false, s)
    } else {
        let mut buf: [u8; 3] = s[0..3].try_into().unwrap();
        buf.make_ascii_lowercase();
        if &buf == b"nan" {
            (true, &s[3..])
        } else {
            (false, s)
        }
    }
}

/// Splits the literal into sign and the rest, without inspecting or
/// validating the rest.
#[inline]
fn extract_sign(s: &[u8]) -> (u8, &[u8]) {
    match s.first() {
        Some(b'+') => (SIGN_POS, &s[1..]),
        Some(b'-') => (SIGN_NEG, &s[1..]),
        _ => (SIGN_POS, s),
    }
}

/// Extracts the exponent, if any.
fn extract_exponent(s: &[u8]) -> Result<(i32, &[u8]), DecimalError> {
    let (sign, s) = extract_sign(s);
    let (mut number, s) = eat_digits(s);

    if number.is_empty() {
        return Err(DecimalError::invalid());
    }

    while number.first() == Some(&b'0') {
        number = &number[1..];
    }

    if number.len() > 10 {
        return Err(DecimalError::overflow());
    }

    let exp = {
        let mut result: i64 = 0;
        for &n in number {
            result = result * 10 + (n - b'0') as i64;
        }
        match sign {
            SIGN_NEG => -result,
            _ => result,
        }
    };

    // The digit counts derived from the exponent feed i32 arithmetic
    // later, so constrain it well inside that range.
    if exp >= i32::max_value() as i64 / 2 || exp <= -(i32::max_value() as i64 / 2) {
        return Err(DecimalError::overflow());
    }

    Ok((exp as i32, s))
}

/// Parses a string into an engine value.
///
/// Handles surrounding whitespace and accepts `NaN` in any casing.
/// The result carries every digit of the input; the caller rounds it to
/// its target precision.
pub(crate) fn parse_str(s: &str) -> Result<DecimalVar, DecimalError> {
    let s = eat_whitespaces(s.as_bytes());
    if s.is_empty() {
        return Err(DecimalError::empty());
    }

    let (is_nan, s) = extract_nan(s);
    if is_nan {
        if s.iter().any(|n| !n.is_ascii_whitespace()) {
            return Err(DecimalError::invalid());
        }
        return Ok(DecimalVar::nan());
    }

    let (literal, s) = parse_literal(s)?;
    if s.iter().any(|n| !n.is_ascii_whitespace()) {
        return Err(DecimalError::invalid());
    }

    let mut dec_digits: SmallVec<[u8; 64]> =
        SmallVec::with_capacity(literal.integral.len() + literal.fractional.len());
    dec_digits.extend(literal.integral.iter().map(|&i| i - b'0'));
    dec_digits.extend(literal.fractional.iter().map(|&i| i - b'0'));

    // The digit point sits after the integral part, shifted by the
    // exponent; leading and trailing zeros are stripped off by the
    // constructor, which keeps the exponent consistent.
    let expn = literal.integral.len() as i32 + literal.exp;

    Ok(DecimalVar::from_parts(
        literal.sign,
        expn,
        dec_digits.into_vec(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_parse_empty(s: &str) {
        assert_eq!(parse_str(s).unwrap_err(), DecimalError::empty());
    }

    fn assert_parse_invalid(s: &str) {
        assert_eq!(parse_str(s).unwrap_err(), DecimalError::invalid());
    }

    fn assert_parse_overflow(s: &str) {
        assert_eq!(parse_str(s).unwrap_err(), DecimalError::overflow());
    }

    #[test]
    fn parse_error() {
        assert_parse_empty("");
        assert_parse_empty("   ");
        assert_parse_invalid("-");
        assert_parse_invalid("   -   ");
        assert_parse_invalid("-.");
        assert_parse_invalid("- 1");
        assert_parse_invalid("-NaN");
        assert_parse_invalid("NaN.");
        assert_parse_invalid("NaN1");
        assert_parse_invalid(".");
        assert_parse_invalid("e");
        assert_parse_invalid("-e");
        assert_parse_invalid("-1e");
        assert_parse_invalid("1e1.1");
        assert_parse_invalid("-1 e1");
        assert_parse_invalid("   x   ");
        assert_parse_invalid("12abc");
        assert_parse_overflow("1e10000000000");
        assert_parse_overflow("1e2147483648");
        assert_parse_overflow("1e-2147483648");
    }

    fn assert_parse(s: &str, expected: &str) {
        assert_eq!(parse_str(s).unwrap().to_string(), expected);
    }

    #[test]
    fn parse_valid() {
        // NaN
        assert_parse("NaN", "NaN");
        assert_parse("nan", "NaN");
        assert_parse("NAN", "NaN");
        assert_parse("   NaN   ", "NaN");

        // Integers
        assert_parse("0", "0");
        assert_parse("-0", "0");
        assert_parse("   -0   ", "0");
        assert_parse("00000.", "0");
        assert_parse("128", "128");
        assert_parse("-128", "-128");
        assert_parse("1230", "1230");
        assert_parse("000000000123", "123");
        assert_parse("18446744073709551616", "18446744073709551616");

        // Fractions
        assert_parse("0.0", "0");
        assert_parse(".0", "0");
        assert_parse("-.0", "0");
        assert_parse(".5", "0.5");
        assert_parse("0.05", "0.05");
        assert_parse("128.128", "128.128");
        assert_parse("-128.128", "-128.128");
        assert_parse("0123.4500", "123.45");
        assert_parse("-000000000123.000000000123", "-123.000000000123");

        // Scientific notation
        assert_parse("0e0", "0");
        assert_parse("-0E-0", "0");
        assert_parse("1e10", "10000000000");
        assert_parse("-1e-10", "-0.0000000001");
        assert_parse("0000001.23456000e3", "1234.56");
        assert_parse("-0000001.23456000E-3", "-0.00123456");
    }
}
