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

//! Error types.

use std::error::Error;
use std::fmt;

/// An error which can be returned by the decimal arithmetic engine,
/// when parsing a literal or when computing a result.
///
/// Callers of the SQL-level functions never see this error; the
/// arithmetic orchestrator absorbs it into a `NaN` result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalError {
    kind: DecimalErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DecimalErrorKind {
    Empty,
    Invalid,
    Overflow,
}

impl fmt::Display for DecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.kind {
            DecimalErrorKind::Empty => write!(f, "cannot parse decimal from empty string"),
            DecimalErrorKind::Invalid => write!(f, "invalid decimal literal or operand"),
            DecimalErrorKind::Overflow => write!(f, "value exceeds the working precision"),
        }
    }
}

impl Error for DecimalError {}

impl DecimalError {
    #[inline]
    pub(crate) const fn new(kind: DecimalErrorKind) -> Self {
        DecimalError { kind }
    }

    #[inline]
    pub(crate) const fn empty() -> Self {
        Self::new(DecimalErrorKind::Empty)
    }

    #[inline]
    pub(crate) const fn invalid() -> Self {
        Self::new(DecimalErrorKind::Invalid)
    }

    #[inline]
    pub(crate) const fn overflow() -> Self {
        Self::new(DecimalErrorKind::Overflow)
    }
}
