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

//! The host engine's value container.
//!
//! SQL functions receive their arguments and produce their results in
//! these cells.  This mirrors the host side of the boundary: a dynamic
//! type tag plus readers that coerce rather than fail.

use std::borrow::Cow;

/// A dynamically typed SQL value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    /// Checks if `self` is the SQL NULL.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the contained text, for text values only.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Reads `self` as a floating-point number, coercing freely: text
    /// that does not look numeric reads as `0.0`, as does NULL.
    pub fn as_real(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Integer(i) => *i as f64,
            Value::Real(f) => *f,
            Value::Text(s) => s.trim().parse().unwrap_or(0.0),
        }
    }

    /// Renders `self` as decimal text for the exact arithmetic opcodes.
    /// NULL has no rendering.
    pub fn coerce_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Null => None,
            Value::Integer(i) => Some(Cow::Owned(i.to_string())),
            Value::Real(f) => Some(Cow::Owned(f.to_string())),
            Value::Text(s) => Some(Cow::Borrowed(s.as_str())),
        }
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(f: f64) -> Self {
        Value::Real(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readers() {
        assert!(Value::Null.is_null());
        assert!(!Value::Integer(0).is_null());

        assert_eq!(Value::from("1.5").as_text(), Some("1.5"));
        assert_eq!(Value::Integer(1).as_text(), None);
        assert_eq!(Value::Null.as_text(), None);

        assert_eq!(Value::Integer(2).as_real(), 2.0);
        assert_eq!(Value::Real(2.5).as_real(), 2.5);
        assert_eq!(Value::from(" 2.5 ").as_real(), 2.5);
        assert_eq!(Value::from("pears").as_real(), 0.0);
        assert_eq!(Value::Null.as_real(), 0.0);
    }

    #[test]
    fn coerce_text() {
        assert_eq!(Value::Null.coerce_text(), None);
        assert_eq!(Value::Integer(42).coerce_text().unwrap(), "42");
        assert_eq!(Value::Real(4.5).coerce_text().unwrap(), "4.5");
        assert_eq!(Value::from("123.45").coerce_text().unwrap(), "123.45");
    }
}
