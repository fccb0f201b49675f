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

//! Floating-point convenience SQL functions.
//!
//! Unlike the exact decimal operations, these are thin wrappers over
//! the `f64` primitives.  All of them propagate NULL; non-numeric
//! arguments read as `0.0` through the value container's coercion.

use crate::func::{FuncDef, FunctionRegistry};
use crate::value::Value;

macro_rules! unary_math_func {
    ($name:ident, $method:ident) => {
        fn $name(args: &[Value]) -> Value {
            debug_assert_eq!(args.len(), 1);

            if args[0].is_null() {
                return Value::Null;
            }
            Value::Real(args[0].as_real().$method())
        }
    };
}

unary_math_func!(acos_func, acos);
unary_math_func!(asin_func, asin);
unary_math_func!(atan_func, atan);
unary_math_func!(ceil_func, ceil);
unary_math_func!(cos_func, cos);
unary_math_func!(cosh_func, cosh);
unary_math_func!(exp_func, exp);
unary_math_func!(floor_func, floor);
unary_math_func!(log_func, ln);
unary_math_func!(log10_func, log10);
unary_math_func!(sin_func, sin);
unary_math_func!(sinh_func, sinh);
unary_math_func!(sqrt_func, sqrt);
unary_math_func!(tan_func, tan);
unary_math_func!(tanh_func, tanh);

/// atan2(Y, X) in radians.
fn atan2_func(args: &[Value]) -> Value {
    debug_assert_eq!(args.len(), 2);

    if args[0].is_null() || args[1].is_null() {
        return Value::Null;
    }
    Value::Real(args[0].as_real().atan2(args[1].as_real()))
}

/// pow(X, Y) is *X* raised to *Y*, always as a floating-point value.
/// No overflow protection beyond what `f64` itself provides.
fn pow_func(args: &[Value]) -> Value {
    debug_assert_eq!(args.len(), 2);

    if args[0].is_null() || args[1].is_null() {
        return Value::Null;
    }
    Value::Real(args[0].as_real().powf(args[1].as_real()))
}

/// pi() is approximately 3.14159.
fn pi_func(args: &[Value]) -> Value {
    debug_assert!(args.is_empty());

    Value::Real(std::f64::consts::PI)
}

/// e() is approximately 2.71828.
fn e_func(args: &[Value]) -> Value {
    debug_assert!(args.is_empty());

    Value::Real(std::f64::consts::E)
}

const MATH_FUNCS: &[FuncDef] = &[
    FuncDef { name: "acos", arity: 1, func: acos_func },
    FuncDef { name: "asin", arity: 1, func: asin_func },
    FuncDef { name: "atan", arity: 1, func: atan_func },
    FuncDef { name: "atan2", arity: 2, func: atan2_func },
    FuncDef { name: "ceil", arity: 1, func: ceil_func },
    FuncDef { name: "cos", arity: 1, func: cos_func },
    FuncDef { name: "cosh", arity: 1, func: cosh_func },
    FuncDef { name: "e", arity: 0, func: e_func },
    FuncDef { name: "exp", arity: 1, func: exp_func },
    FuncDef { name: "floor", arity: 1, func: floor_func },
    FuncDef { name: "log", arity: 1, func: log_func },
    FuncDef { name: "log10", arity: 1, func: log10_func },
    FuncDef { name: "pi", arity: 0, func: pi_func },
    FuncDef { name: "pow", arity: 2, func: pow_func },
    FuncDef { name: "sin", arity: 1, func: sin_func },
    FuncDef { name: "sinh", arity: 1, func: sinh_func },
    FuncDef { name: "sqrt", arity: 1, func: sqrt_func },
    FuncDef { name: "tan", arity: 1, func: tan_func },
    FuncDef { name: "tanh", arity: 1, func: tanh_func },
];

/// Registers the floating-point convenience functions.
pub fn register_math_functions(registry: &mut FunctionRegistry) {
    registry.insert_all(MATH_FUNCS);
}
