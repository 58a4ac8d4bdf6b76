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

//! Numeric values shared by literals and the evaluator.
//!
//! MEXL distinguishes exact numbers (arbitrary-precision integers and
//! rationals) from floating numbers (`f64`). The distinction is made at lex
//! time, where a digit run with no decimal point and no exponent marker is
//! exact, and preserved through evaluation: arithmetic stays exact until a
//! floating operand forces a downgrade.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::error::{EvalError, EvalResult};

/// A numeric value: exact integer, exact rational, or floating.
///
/// Rationals are always reduced with a positive denominator (the invariant
/// `num-rational` maintains), and a rational with denominator 1 is never
/// constructed; [`Number::from_rational`] collapses it to an integer.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// Exact arbitrary-precision integer.
    Integer(BigInt),
    /// Exact reduced rational with non-unit denominator.
    Rational(BigRational),
    /// IEEE double-precision floating value.
    Real(f64),
}

impl Number {
    /// Wraps a rational, collapsing denominator-1 values to integers.
    pub fn from_rational(value: BigRational) -> Self {
        if value.is_integer() {
            Number::Integer(value.to_integer())
        } else {
            Number::Rational(value)
        }
    }

    /// Exact view of this number, when it has one.
    pub fn as_rational(&self) -> Option<BigRational> {
        match self {
            Number::Integer(i) => Some(BigRational::from_integer(i.clone())),
            Number::Rational(r) => Some(r.clone()),
            Number::Real(_) => None,
        }
    }

    /// Floating approximation of this number.
    pub fn to_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => i.to_f64().unwrap_or_else(|| {
                if i.is_negative() {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                }
            }),
            Number::Rational(r) => r.to_f64().unwrap_or(f64::NAN),
            Number::Real(f) => *f,
        }
    }

    /// True for an exact zero or a floating zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Number::Integer(i) => i.is_zero(),
            Number::Rational(r) => r.is_zero(),
            Number::Real(f) => *f == 0.0,
        }
    }

    /// Addition, exact when both operands are exact.
    pub fn add(&self, other: &Number) -> Number {
        match (self.as_rational(), other.as_rational()) {
            (Some(a), Some(b)) => Number::from_rational(a + b),
            _ => Number::Real(self.to_f64() + other.to_f64()),
        }
    }

    /// Multiplication, exact when both operands are exact.
    pub fn mul(&self, other: &Number) -> Number {
        match (self.as_rational(), other.as_rational()) {
            (Some(a), Some(b)) => Number::from_rational(a * b),
            _ => Number::Real(self.to_f64() * other.to_f64()),
        }
    }

    /// Negation, always exact for exact operands.
    pub fn neg(&self) -> Number {
        match self {
            Number::Integer(i) => Number::Integer(-i),
            Number::Rational(r) => Number::Rational(-r),
            Number::Real(f) => Number::Real(-f),
        }
    }

    /// Division. Exact division by an exact zero is an error; floating
    /// division follows IEEE semantics.
    pub fn div(&self, other: &Number) -> EvalResult<Number> {
        match (self.as_rational(), other.as_rational()) {
            (Some(a), Some(b)) => {
                if b.is_zero() {
                    Err(EvalError::DivisionByZero)
                } else {
                    Ok(Number::from_rational(a / b))
                }
            }
            _ => Ok(Number::Real(self.to_f64() / other.to_f64())),
        }
    }

    /// Truncating remainder: the result takes the sign of the left operand,
    /// matching C-style truncated division (`-15 % 4 == -3`, `15 % -4 == 3`).
    pub fn rem(&self, other: &Number) -> EvalResult<Number> {
        match (self.as_rational(), other.as_rational()) {
            (Some(a), Some(b)) => {
                if b.is_zero() {
                    Err(EvalError::DivisionByZero)
                } else {
                    let quotient = (&a / &b).trunc();
                    Ok(Number::from_rational(a - b * quotient))
                }
            }
            _ => Ok(Number::Real(self.to_f64() % other.to_f64())),
        }
    }

    /// Power. Exact when the base is exact and the exponent is an exact
    /// integer that fits in 32 bits; floating `powf` otherwise.
    pub fn pow(&self, other: &Number) -> EvalResult<Number> {
        if let (Some(base), Number::Integer(exp)) = (self.as_rational(), other) {
            let e = exp.to_i32().ok_or(EvalError::ExponentOverflow)?;
            if e >= 0 {
                return Ok(Number::from_rational(num_traits::pow(base, e as usize)));
            }
            if base.is_zero() {
                return Err(EvalError::DivisionByZero);
            }
            let positive = num_traits::pow(base, (-(e as i64)) as usize);
            return Ok(Number::from_rational(positive.recip()));
        }
        Ok(Number::Real(self.to_f64().powf(other.to_f64())))
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(BigInt::from(value))
    }
}

/// Renders the value as the literal the canonical printer would write:
/// plain digits, `n/d`, or a float spelling from [`format_real`].
impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Rational(r) => write!(f, "{}", r),
            Number::Real(v) => f.write_str(&format_real(*v)),
        }
    }
}

/// Converts an exact-literal lexeme (a pure digit run) into a big integer.
pub fn parse_exact_literal(lexeme: &str) -> Option<BigInt> {
    lexeme.parse::<BigInt>().ok()
}

/// Converts a floating-literal lexeme into an `f64`.
///
/// The lexer may produce forms `str::parse` rejects (`"2."`, `"1.e5"`); a
/// decimal point with no following digit is dropped before conversion.
pub fn parse_float_literal(lexeme: &str) -> Option<f64> {
    let normalized: String = if let Some(dot) = lexeme.find('.') {
        let after = &lexeme[dot + 1..];
        if after.chars().next().map(|c| c.is_ascii_digit()) == Some(true) {
            lexeme.to_string()
        } else {
            let mut s = String::with_capacity(lexeme.len());
            s.push_str(&lexeme[..dot]);
            s.push_str(after);
            s
        }
    } else {
        lexeme.to_string()
    };
    normalized.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Formats a floating value as a literal the lexer classifies as floating.
///
/// Whole values keep a trailing `.0`, and magnitudes outside the plain-digit
/// range switch to exponent form, so the literal kind survives a round trip
/// (`1e300` must never be printed as a 301-digit integer literal).
pub fn format_real(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    let magnitude = value.abs();
    if magnitude != 0.0 && (magnitude >= 1e16 || magnitude < 1e-5) {
        return format!("{:e}", value);
    }
    if value.fract() == 0.0 {
        return format!("{:.1}", value);
    }
    format!("{}", value)
}
