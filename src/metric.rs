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

//! Precision and scale computed directly from a textual numeral.
//!
//! These functions never touch the arithmetic engine; they are pure
//! string measurements, and they are what fixes the metadata of a
//! freshly parsed decimal value.

use std::cmp;

/// Computes the precision of a decimal literal: the minimum number of
/// digits, not counting the sign or the decimal point, required to
/// represent the number.
///
/// Trailing zeros only count for integers; a decimal point switches on
/// trailing-zero trimming:
///
/// * `"0"` and `"0.0"` have precision 1
/// * `"1230"` has precision 4
/// * `"0123.4500"` has precision 5
/// * `"-123.45"` has precision 5
///
/// The input is assumed to be a well-formed signed decimal number.
/// Anything else produces an unspecified result, not an error.
pub fn text_precision(s: &str) -> u32 {
    // Trim the optional sign and any leading zeros; neither counts,
    // whether the number is an integer or a decimal.
    let t = s.trim_start_matches(|c| c == '-' || c == '0');

    match t.find('.') {
        // No decimal point, so an integer: every remaining digit is
        // significant.  An all-zero input trims to nothing but still
        // has the one digit "0".
        None => cmp::max(t.len(), 1) as u32,
        Some(_) => {
            // Trim trailing zeros, never the point itself; the final
            // "- 1" discounts the point from the length.
            let t = t.trim_end_matches('0');
            cmp::max(t.len() - 1, 1) as u32
        }
    }
}

/// Computes the scale of a decimal literal: the number of digits after
/// the decimal point, excluding trailing zeros.
///
/// * `"0"`, `"123"`, `"1230"` and `"123.0"` have scale 0
/// * `"0123.4500"` has scale 2
///
/// The input is assumed to be a well-formed signed decimal number.
/// Anything else produces an unspecified result, not an error.
pub fn text_scale(s: &str) -> u32 {
    match s.find('.') {
        None => 0,
        Some(pos) => {
            // Everything between the point and the last non-zero digit
            // counts, which is why the sign and the integral part need
            // no trimming here.
            let frac = s[pos..].trim_end_matches('0');
            (frac.len() - 1) as u32
        }
    }
}
