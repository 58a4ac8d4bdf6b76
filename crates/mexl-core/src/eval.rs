// Dweve MEXL - Model Expression Language
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Numeric evaluation of closed expression trees.
//!
//! [`eval`] reduces an expression with no free symbols to a single
//! [`Number`], staying exact as long as every step is exact: integer and
//! rational arithmetic, integer powers, `abs`/`floor`/`ceiling` of exact
//! values, and `gamma` of positive integers all produce exact results.
//! Constants and transcendental functions drop to `f64` and stay there.
//!
//! Boolean-valued nodes are not numbers; evaluating a comparison, a logical
//! connective or a piecewise selection reports [`EvalError::NonNumeric`]
//! rather than guessing a 0/1 encoding.

use num_bigint::BigInt;
use num_traits::Signed;

use crate::error::{EvalError, EvalResult};
use crate::expr::{Constant, Expr};
use crate::number::Number;

/// Evaluate a closed expression tree to a number.
pub fn eval(expr: &Expr) -> EvalResult<Number> {
    match expr {
        Expr::Integer(i) => Ok(Number::Integer(i.clone())),
        Expr::Rational(r) => Ok(Number::from_rational(r.clone())),
        Expr::Real(f) => Ok(Number::Real(*f)),
        Expr::Constant(c) => Ok(Number::Real(constant_value(*c))),
        Expr::Symbol(name) => Err(EvalError::NonNumeric(format!("free symbol `{name}`"))),
        Expr::Boolean(_)
        | Expr::Lt(_, _)
        | Expr::Le(_, _)
        | Expr::Eq(_, _)
        | Expr::Ne(_, _)
        | Expr::And(_)
        | Expr::Or(_)
        | Expr::Xor(_)
        | Expr::Nand(_)
        | Expr::Nor(_)
        | Expr::Xnor(_)
        | Expr::Not(_) => Err(EvalError::NonNumeric("boolean expression".to_string())),
        Expr::Piecewise(_) => Err(EvalError::NonNumeric("piecewise selection".to_string())),
        Expr::Add(args) => {
            let mut acc = Number::Integer(BigInt::from(0));
            for arg in args {
                acc = acc.add(&eval(arg)?);
            }
            Ok(acc)
        }
        Expr::Mul(args) => {
            let mut acc = Number::Integer(BigInt::from(1));
            for arg in args {
                acc = acc.mul(&eval(arg)?);
            }
            Ok(acc)
        }
        Expr::Neg(operand) => Ok(eval(operand)?.neg()),
        Expr::Div(n, d) => eval(n)?.div(&eval(d)?),
        Expr::Rem(n, d) => eval(n)?.rem(&eval(d)?),
        Expr::Pow(b, e) => eval(b)?.pow(&eval(e)?),
        Expr::Call(name, args) => eval_call(name, args),
    }
}

/// `f64` approximation of a named constant.
pub fn constant_value(constant: Constant) -> f64 {
    match constant {
        Constant::Pi => std::f64::consts::PI,
        Constant::Exp1 => std::f64::consts::E,
        Constant::EulerGamma => 0.577_215_664_901_532_9,
        Constant::Inf => f64::INFINITY,
        Constant::Nan => f64::NAN,
    }
}

fn eval_call(name: &str, args: &[Expr]) -> EvalResult<Number> {
    // min/max are the only variadic numeric functions.
    match name {
        "min" if !args.is_empty() => return eval_extremum(args, false),
        "max" if !args.is_empty() => return eval_extremum(args, true),
        _ => {}
    }

    if args.len() == 2 && name == "log" {
        // log(base, x): stays exact in neither operand.
        let base = eval(&args[0])?.to_f64();
        let x = eval(&args[1])?.to_f64();
        return Ok(Number::Real(x.ln() / base.ln()));
    }

    if args.len() != 1 {
        return Err(EvalError::UnsupportedFunction(name.to_string()));
    }
    let arg = eval(&args[0])?;

    // Exact-preserving functions first.
    match name {
        "abs" => {
            return Ok(match arg {
                Number::Integer(i) => Number::Integer(i.abs()),
                Number::Rational(r) => Number::Rational(r.abs()),
                Number::Real(f) => Number::Real(f.abs()),
            });
        }
        "floor" => {
            return Ok(match arg {
                Number::Integer(i) => Number::Integer(i),
                Number::Rational(r) => Number::Integer(r.floor().to_integer()),
                Number::Real(f) => Number::Real(f.floor()),
            });
        }
        "ceiling" => {
            return Ok(match arg {
                Number::Integer(i) => Number::Integer(i),
                Number::Rational(r) => Number::Integer(r.ceil().to_integer()),
                Number::Real(f) => Number::Real(f.ceil()),
            });
        }
        "gamma" => return eval_gamma(&arg),
        _ => {}
    }

    let x = arg.to_f64();
    let value = match name {
        "sin" => x.sin(),
        "cos" => x.cos(),
        "tan" => x.tan(),
        "sec" => x.cos().recip(),
        "csc" => x.sin().recip(),
        "cot" => x.tan().recip(),
        "asin" => x.asin(),
        "acos" => x.acos(),
        "atan" => x.atan(),
        "asec" => x.recip().acos(),
        "acsc" => x.recip().asin(),
        "acot" => x.recip().atan(),
        "sinh" => x.sinh(),
        "cosh" => x.cosh(),
        "tanh" => x.tanh(),
        "sech" => x.cosh().recip(),
        "csch" => x.sinh().recip(),
        "coth" => x.tanh().recip(),
        "asinh" => x.asinh(),
        "acosh" => x.acosh(),
        "atanh" => x.atanh(),
        "asech" => x.recip().acosh(),
        "acsch" => x.recip().asinh(),
        "acoth" => x.recip().atanh(),
        "ln" => x.ln(),
        "log" => x.log10(),
        _ => return Err(EvalError::UnsupportedFunction(name.to_string())),
    };
    Ok(Number::Real(value))
}

/// Gamma of a positive integer is the exact factorial of `n - 1`; other
/// arguments are out of scope for exact evaluation.
fn eval_gamma(arg: &Number) -> EvalResult<Number> {
    match arg {
        Number::Integer(n) if n.is_positive() => {
            let mut acc = BigInt::from(1);
            let mut k = BigInt::from(2);
            while &k < n {
                acc *= &k;
                k += 1;
            }
            Ok(Number::Integer(acc))
        }
        _ => Err(EvalError::Domain(
            "gamma is only evaluated for positive integers".to_string(),
        )),
    }
}

fn eval_extremum(args: &[Expr], want_max: bool) -> EvalResult<Number> {
    let mut best: Option<Number> = None;
    for arg in args {
        let candidate = eval(arg)?;
        best = Some(match best {
            None => candidate,
            Some(current) => {
                let beats = if want_max {
                    candidate.to_f64() > current.to_f64()
                } else {
                    candidate.to_f64() < current.to_f64()
                };
                if beats {
                    candidate
                } else {
                    current
                }
            }
        });
    }
    match best {
        Some(value) => Ok(value),
        None => Err(EvalError::UnsupportedFunction(if want_max {
            "max".to_string()
        } else {
            "min".to_string()
        })),
    }
}
