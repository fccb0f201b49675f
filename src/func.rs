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

//! SQL-level function surface and registration.

use crate::decimal::Decimal;
use crate::math;
use crate::metric::{text_precision, text_scale};
use crate::value::Value;
use crate::var::Context;
use lazy_static::lazy_static;
use std::collections::HashMap;

/// A scalar SQL function implementation.
pub type ScalarFn = fn(&[Value]) -> Value;

/// One registrable scalar function: name, argument count, and the
/// implementation.
#[derive(Debug, Clone, Copy)]
pub struct FuncDef {
    pub name: &'static str,
    pub arity: u8,
    pub func: ScalarFn,
}

/// A lookup table of scalar functions keyed by name and arity.
/// Names are case-insensitive, as SQL function names are.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    funcs: HashMap<(String, u8), ScalarFn>,
}

impl FunctionRegistry {
    #[inline]
    pub fn new() -> Self {
        FunctionRegistry {
            funcs: HashMap::new(),
        }
    }

    /// Registers one function, replacing any previous registration of
    /// the same name and arity.
    pub fn insert(&mut self, def: &FuncDef) {
        self.funcs
            .insert((def.name.to_ascii_lowercase(), def.arity), def.func);
    }

    /// Registers a batch of functions.
    pub fn insert_all(&mut self, defs: &[FuncDef]) {
        for def in defs {
            self.insert(def);
        }
    }

    /// Looks up a function by name and arity.
    pub fn lookup(&self, name: &str, arity: u8) -> Option<ScalarFn> {
        self.funcs
            .get(&(name.to_ascii_lowercase(), arity))
            .copied()
    }

    /// Invokes a registered function on `args`; `None` if no function
    /// matches the name and argument count.
    pub fn call(&self, name: &str, args: &[Value]) -> Option<Value> {
        self.lookup(name, args.len() as u8).map(|f| f(args))
    }
}

lazy_static! {
    /// The builtin function set: the decimal introspection functions
    /// and the floating-point convenience functions.
    pub static ref BUILTINS: FunctionRegistry = {
        let mut registry = FunctionRegistry::new();
        register_decimal_functions(&mut registry);
        math::register_math_functions(&mut registry);
        registry
    };
}

/// The arithmetic operations wired to the exact decimal engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Subtract,
    Multiply,
}

/// Evaluates an exact decimal arithmetic operation over two value
/// containers, producing a text-formatted exact decimal.
///
/// NULL operands propagate NULL; any engine-level failure, including
/// operands that do not parse as numbers, surfaces as the text `NaN`.
pub fn eval_arith(op: ArithOp, lhs: &Value, rhs: &Value) -> Value {
    let (lhs_text, rhs_text) = match (lhs.coerce_text(), rhs.coerce_text()) {
        (Some(a), Some(b)) => (a, b),
        _ => return Value::Null,
    };

    let ctx = Context::new();
    let a = Decimal::parse(&ctx, &lhs_text);
    let b = Decimal::parse(&ctx, &rhs_text);

    let result = match op {
        ArithOp::Add => Decimal::add(&ctx, &a, &b),
        ArithOp::Subtract => Decimal::sub(&ctx, &a, &b),
        ArithOp::Multiply => Decimal::mul(&ctx, &a, &b),
    };

    Value::Text(result.to_string())
}

/// precision(X) returns the number of significant digits in the text
/// value *X*, not counting the sign or the decimal point.  Trailing
/// zeros count only in the integer case.
///
/// NULL for any non-text argument; a non-numeric text argument produces
/// an unspecified integer rather than an error.
fn precision_func(args: &[Value]) -> Value {
    debug_assert_eq!(args.len(), 1);

    match args[0].as_text() {
        Some(s) => Value::Integer(text_precision(s) as i64),
        None => Value::Null,
    }
}

/// scale(X) returns the number of digits after the decimal point of the
/// text value *X*, excluding trailing zeros.
///
/// NULL for any non-text argument; a non-numeric text argument produces
/// an unspecified integer rather than an error.
fn scale_func(args: &[Value]) -> Value {
    debug_assert_eq!(args.len(), 1);

    match args[0].as_text() {
        Some(s) => Value::Integer(text_scale(s) as i64),
        None => Value::Null,
    }
}

const DECIMAL_FUNCS: &[FuncDef] = &[
    FuncDef {
        name: "precision",
        arity: 1,
        func: precision_func,
    },
    FuncDef {
        name: "scale",
        arity: 1,
        func: scale_func,
    },
];

/// Registers the decimal introspection functions.
pub fn register_decimal_functions(registry: &mut FunctionRegistry) {
    registry.insert_all(DECIMAL_FUNCS);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::from(s)
    }

    #[test]
    fn precision_and_scale_funcs() {
        let call = |name: &str, arg: Value| BUILTINS.call(name, &[arg]).unwrap();

        assert_eq!(call("precision", text("0")), Value::Integer(1));
        assert_eq!(call("precision", text("0.0")), Value::Integer(1));
        assert_eq!(call("precision", text("1230")), Value::Integer(4));
        assert_eq!(call("precision", text("0123.4500")), Value::Integer(5));
        assert_eq!(call("precision", text("-123.45")), Value::Integer(5));
        assert_eq!(call("PRECISION", text("-123.45")), Value::Integer(5));

        assert_eq!(call("scale", text("1230")), Value::Integer(0));
        assert_eq!(call("scale", text("0123.4500")), Value::Integer(2));
        assert_eq!(call("scale", text("-123.45")), Value::Integer(2));

        // Non-text arguments, including NULL, give NULL.
        assert_eq!(call("precision", Value::Integer(42)), Value::Null);
        assert_eq!(call("precision", Value::Real(1.5)), Value::Null);
        assert_eq!(call("precision", Value::Null), Value::Null);
        assert_eq!(call("scale", Value::Integer(42)), Value::Null);
    }

    #[test]
    fn registry_lookup() {
        assert!(BUILTINS.lookup("precision", 1).is_some());
        assert!(BUILTINS.lookup("scale", 1).is_some());
        assert!(BUILTINS.lookup("precision", 2).is_none());
        assert!(BUILTINS.lookup("no_such_func", 1).is_none());
        assert!(BUILTINS.lookup("pow", 2).is_some());
        assert!(BUILTINS.call("precision", &[]).is_none());
    }

    #[test]
    fn arith() {
        let result = eval_arith(ArithOp::Add, &text("123.456"), &text("2456.7"));
        assert_eq!(result, text("2580.156"));

        let result = eval_arith(ArithOp::Subtract, &text("123.456"), &text("23.456"));
        assert_eq!(result, text("100"));

        let result = eval_arith(ArithOp::Multiply, &text("12.3"), &text("4.567"));
        assert_eq!(result, text("56.1741"));

        let result = eval_arith(ArithOp::Add, &text("53"), &text("49"));
        assert_eq!(result, text("102"));

        // Non-text operands are read through their text rendering.
        let result = eval_arith(ArithOp::Add, &Value::Integer(2), &Value::Integer(40));
        assert_eq!(result, text("42"));
    }

    #[test]
    fn arith_null_and_nan() {
        assert_eq!(
            eval_arith(ArithOp::Add, &Value::Null, &text("1")),
            Value::Null
        );
        assert_eq!(
            eval_arith(ArithOp::Multiply, &text("1"), &Value::Null),
            Value::Null
        );

        let result = eval_arith(ArithOp::Add, &text("pears"), &text("1"));
        assert_eq!(result, text("NaN"));
    }
}
