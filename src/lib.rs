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

//! Exact decimal arithmetic SQL functions with precision/scale tracking.
//!
//! This crate provides the scalar-function layer a SQL engine needs for
//! exact decimal math over text-encoded numbers: addition, subtraction
//! and multiplication that track the result's *precision* (total
//! significant digits) and *scale* (fractional digits, trailing zeros
//! excluded), the introspection functions `precision()` and `scale()`,
//! and a set of floating-point convenience functions.
//!
//! Invalid numeric input and arithmetic failure never abort the caller;
//! they surface as a `NaN` result, and NULL arguments propagate NULL.
//!
//! ```
//! use sqldecimal::{Context, Decimal};
//!
//! let ctx = Context::new();
//! let a = Decimal::parse(&ctx, "123.456");
//! let b = Decimal::parse(&ctx, "2456.7");
//!
//! let sum = Decimal::add(&ctx, &a, &b);
//! assert_eq!(sum.to_string(), "2580.156");
//! assert_eq!(sum.precision(), 7);
//! assert_eq!(sum.scale(), 3);
//! ```

mod decimal;
mod error;
mod func;
mod math;
mod metric;
mod ops;
mod parse;
mod value;
mod var;

pub use crate::decimal::Decimal;
pub use crate::error::DecimalError;
pub use crate::func::{
    eval_arith, register_decimal_functions, ArithOp, FuncDef, FunctionRegistry, ScalarFn, BUILTINS,
};
pub use crate::math::register_math_functions;
pub use crate::metric::{text_precision, text_scale};
pub use crate::value::Value;
pub use crate::var::{Context, Rounding, MAX_PRECISION};

#[cfg(test)]
mod tests {
    use super::*;

    // The end-to-end paths a SQL engine drives: introspection over
    // value containers and arithmetic opcodes producing text.

    #[test]
    fn introspection_end_to_end() {
        let arg = [Value::from("-123.45")];
        assert_eq!(BUILTINS.call("precision", &arg), Some(Value::Integer(5)));
        assert_eq!(BUILTINS.call("scale", &arg), Some(Value::Integer(2)));

        let arg = [Value::Integer(42)];
        assert_eq!(BUILTINS.call("precision", &arg), Some(Value::Null));
    }

    #[test]
    fn arithmetic_end_to_end() {
        let sum = eval_arith(
            ArithOp::Add,
            &Value::from("123.456"),
            &Value::from("2456.7"),
        );
        assert_eq!(sum, Value::from("2580.156"));

        let product = eval_arith(
            ArithOp::Multiply,
            &Value::from("12.3"),
            &Value::from("4.567"),
        );
        assert_eq!(product, Value::from("56.1741"));
    }
}
