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

//! Immutable expression-tree nodes and their construction capabilities.
//!
//! Every parse path converges on [`Expr`]: the parser builds nodes directly
//! during descent through the free constructor functions in this module, and
//! the printers walk the same nodes back out. There is no separate AST.
//!
//! Constructors perform a small, fixed set of structural normalizations and
//! nothing more:
//!
//! - [`add`]/[`mul`] flatten nested sums/products into one n-ary node;
//! - [`neg`] folds the sign into numeric literals and cancels a direct
//!   double negation (`x^--y` must equal `x^y`);
//! - [`div`] of two exact integers with a nonzero denominator folds to an
//!   exact rational literal, collapsing to an integer when the reduced
//!   denominator is 1;
//! - [`not`] folds boolean literals, cancels double negation, and fuses with
//!   the n-ary connectives into their complements (`!and(..)` is `nand(..)`).
//!
//! Anything further, such as combining like terms or reordering operands, is
//! outside the constructors. Logical `and`/`or`/`xor` do *not* flatten
//! nested same-kind arguments: a parenthesized sub-chain stays a nested node,
//! which is what makes `x && (y && z)` distinct from `x && y && z`.

use std::hash::{Hash, Hasher};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

/// Named mathematical constants with dedicated nodes.
///
/// `Avogadro` and `TIME` are deliberately *not* here: the grammar maps them
/// to the plain symbols `avogadro` and `time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    /// The circle constant pi.
    Pi,
    /// Euler's number e.
    Exp1,
    /// The Euler-Mascheroni constant.
    EulerGamma,
    /// Positive infinity.
    Inf,
    /// Not-a-number.
    Nan,
}

impl Constant {
    /// Canonical infix spelling, accepted case-insensitively by the parser.
    pub fn name(&self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::Exp1 => "exponentiale",
            Constant::EulerGamma => "eulergamma",
            Constant::Inf => "inf",
            Constant::Nan => "nan",
        }
    }
}

/// An immutable symbolic expression tree node.
///
/// Structural equality is total: floating values compare by bit pattern, so
/// trees containing reals still satisfy `Eq` and hash consistently.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Exact arbitrary-precision integer literal.
    Integer(BigInt),
    /// Exact reduced rational literal with non-unit denominator.
    Rational(BigRational),
    /// Floating literal.
    Real(f64),
    /// Free symbol.
    Symbol(String),
    /// Built-in constant.
    Constant(Constant),
    /// Boolean literal.
    Boolean(bool),
    /// N-ary sum. Subtraction is a negated addend.
    Add(Vec<Expr>),
    /// N-ary product.
    Mul(Vec<Expr>),
    /// Arithmetic negation of a non-literal operand.
    Neg(Box<Expr>),
    /// Quotient that did not fold to a rational literal.
    Div(Box<Expr>, Box<Expr>),
    /// Truncating remainder (C-style, sign of the left operand).
    Rem(Box<Expr>, Box<Expr>),
    /// Power.
    Pow(Box<Expr>, Box<Expr>),
    /// Strict less-than. `x > y` is stored as `Lt(y, x)`.
    Lt(Box<Expr>, Box<Expr>),
    /// Less-or-equal. `x >= y` is stored as `Le(y, x)`.
    Le(Box<Expr>, Box<Expr>),
    /// Equality comparison.
    Eq(Box<Expr>, Box<Expr>),
    /// Inequality comparison.
    Ne(Box<Expr>, Box<Expr>),
    /// N-ary logical conjunction, always at least two operands.
    And(Vec<Expr>),
    /// N-ary logical disjunction, always at least two operands.
    Or(Vec<Expr>),
    /// N-ary logical exclusive-or, always at least two operands.
    Xor(Vec<Expr>),
    /// Complement of [`Expr::And`].
    Nand(Vec<Expr>),
    /// Complement of [`Expr::Or`].
    Nor(Vec<Expr>),
    /// Complement of [`Expr::Xor`].
    Xnor(Vec<Expr>),
    /// Logical negation of a non-connective operand.
    Not(Box<Expr>),
    /// Ordered (value, condition) branches; the first true condition selects.
    Piecewise(Vec<(Expr, Expr)>),
    /// Named function application: built-ins by canonical lower-case name,
    /// generic function symbols by their original spelling.
    Call(String, Vec<Expr>),
}

impl Expr {
    /// True for integer, rational and real literals.
    pub fn is_numeric_literal(&self) -> bool {
        matches!(self, Expr::Integer(_) | Expr::Rational(_) | Expr::Real(_))
    }

    /// True for numeric literals that render with a leading minus sign.
    pub fn is_negative_literal(&self) -> bool {
        match self {
            Expr::Integer(i) => i.is_negative(),
            Expr::Rational(r) => r.is_negative(),
            Expr::Real(f) => f.is_sign_negative() && !f.is_nan(),
            _ => false,
        }
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        use Expr::*;
        match (self, other) {
            (Integer(a), Integer(b)) => a == b,
            (Rational(a), Rational(b)) => a == b,
            (Real(a), Real(b)) => a.to_bits() == b.to_bits(),
            (Symbol(a), Symbol(b)) => a == b,
            (Constant(a), Constant(b)) => a == b,
            (Boolean(a), Boolean(b)) => a == b,
            (Add(a), Add(b)) => a == b,
            (Mul(a), Mul(b)) => a == b,
            (Neg(a), Neg(b)) => a == b,
            (Div(a1, a2), Div(b1, b2)) => a1 == b1 && a2 == b2,
            (Rem(a1, a2), Rem(b1, b2)) => a1 == b1 && a2 == b2,
            (Pow(a1, a2), Pow(b1, b2)) => a1 == b1 && a2 == b2,
            (Lt(a1, a2), Lt(b1, b2)) => a1 == b1 && a2 == b2,
            (Le(a1, a2), Le(b1, b2)) => a1 == b1 && a2 == b2,
            (Eq(a1, a2), Eq(b1, b2)) => a1 == b1 && a2 == b2,
            (Ne(a1, a2), Ne(b1, b2)) => a1 == b1 && a2 == b2,
            (And(a), And(b)) => a == b,
            (Or(a), Or(b)) => a == b,
            (Xor(a), Xor(b)) => a == b,
            (Nand(a), Nand(b)) => a == b,
            (Nor(a), Nor(b)) => a == b,
            (Xnor(a), Xnor(b)) => a == b,
            (Not(a), Not(b)) => a == b,
            (Piecewise(a), Piecewise(b)) => a == b,
            (Call(n1, a1), Call(n2, a2)) => n1 == n2 && a1 == a2,
            _ => false,
        }
    }
}

impl Eq for Expr {}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        use Expr::*;
        // Variant tag first so nodes with identical children stay distinct.
        match self {
            Integer(a) => {
                state.write_u8(0);
                a.hash(state);
            }
            Rational(a) => {
                state.write_u8(1);
                a.hash(state);
            }
            Real(a) => {
                state.write_u8(2);
                state.write_u64(a.to_bits());
            }
            Symbol(a) => {
                state.write_u8(3);
                a.hash(state);
            }
            Constant(a) => {
                state.write_u8(4);
                a.hash(state);
            }
            Boolean(a) => {
                state.write_u8(5);
                a.hash(state);
            }
            Add(args) => {
                state.write_u8(6);
                args.hash(state);
            }
            Mul(args) => {
                state.write_u8(7);
                args.hash(state);
            }
            Neg(a) => {
                state.write_u8(8);
                a.hash(state);
            }
            Div(a, b) => {
                state.write_u8(9);
                a.hash(state);
                b.hash(state);
            }
            Rem(a, b) => {
                state.write_u8(10);
                a.hash(state);
                b.hash(state);
            }
            Pow(a, b) => {
                state.write_u8(11);
                a.hash(state);
                b.hash(state);
            }
            Lt(a, b) => {
                state.write_u8(12);
                a.hash(state);
                b.hash(state);
            }
            Le(a, b) => {
                state.write_u8(13);
                a.hash(state);
                b.hash(state);
            }
            Eq(a, b) => {
                state.write_u8(14);
                a.hash(state);
                b.hash(state);
            }
            Ne(a, b) => {
                state.write_u8(15);
                a.hash(state);
                b.hash(state);
            }
            And(args) => {
                state.write_u8(16);
                args.hash(state);
            }
            Or(args) => {
                state.write_u8(17);
                args.hash(state);
            }
            Xor(args) => {
                state.write_u8(18);
                args.hash(state);
            }
            Nand(args) => {
                state.write_u8(19);
                args.hash(state);
            }
            Nor(args) => {
                state.write_u8(20);
                args.hash(state);
            }
            Xnor(args) => {
                state.write_u8(21);
                args.hash(state);
            }
            Not(a) => {
                state.write_u8(22);
                a.hash(state);
            }
            Piecewise(branches) => {
                state.write_u8(23);
                branches.hash(state);
            }
            Call(name, args) => {
                state.write_u8(24);
                name.hash(state);
                args.hash(state);
            }
        }
    }
}

// ==================== Leaf constructors ====================

/// Exact integer literal.
pub fn integer(value: impl Into<BigInt>) -> Expr {
    Expr::Integer(value.into())
}

/// Exact rational literal: reduces, collapses unit denominators, and keeps a
/// zero denominator as an unfolded [`Expr::Div`].
pub fn rational(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> Expr {
    div(Expr::Integer(numerator.into()), Expr::Integer(denominator.into()))
}

/// Floating literal.
pub fn real(value: f64) -> Expr {
    Expr::Real(value)
}

/// Free symbol.
pub fn symbol(name: impl Into<String>) -> Expr {
    Expr::Symbol(name.into())
}

/// Boolean literal.
pub fn boolean(value: bool) -> Expr {
    Expr::Boolean(value)
}

/// The circle constant pi.
pub fn pi() -> Expr {
    Expr::Constant(Constant::Pi)
}

/// Euler's number e.
pub fn exp1() -> Expr {
    Expr::Constant(Constant::Exp1)
}

/// The Euler-Mascheroni constant.
pub fn euler_gamma() -> Expr {
    Expr::Constant(Constant::EulerGamma)
}

/// Positive infinity.
pub fn inf() -> Expr {
    Expr::Constant(Constant::Inf)
}

/// Not-a-number.
pub fn nan() -> Expr {
    Expr::Constant(Constant::Nan)
}

// ==================== Arithmetic capabilities ====================

/// N-ary sum. Nested sums flatten into the parent; an empty argument list is
/// the exact integer zero and a single argument is returned unchanged.
pub fn add(args: Vec<Expr>) -> Expr {
    let mut flat = Vec::with_capacity(args.len());
    for arg in args {
        if let Expr::Add(inner) = arg {
            flat.extend(inner);
        } else {
            flat.push(arg);
        }
    }
    match flat.len() {
        0 => integer(0),
        1 => match flat.pop() {
            Some(only) => only,
            None => integer(0),
        },
        _ => Expr::Add(flat),
    }
}

/// N-ary product. Nested products flatten; empty is the exact integer one.
pub fn mul(args: Vec<Expr>) -> Expr {
    let mut flat = Vec::with_capacity(args.len());
    for arg in args {
        if let Expr::Mul(inner) = arg {
            flat.extend(inner);
        } else {
            flat.push(arg);
        }
    }
    match flat.len() {
        0 => integer(1),
        1 => match flat.pop() {
            Some(only) => only,
            None => integer(1),
        },
        _ => Expr::Mul(flat),
    }
}

/// Arithmetic negation. Folds into numeric literals and cancels a direct
/// double negation; everything else is wrapped in a [`Expr::Neg`] node.
pub fn neg(operand: Expr) -> Expr {
    match operand {
        Expr::Integer(i) => Expr::Integer(-i),
        Expr::Rational(r) => Expr::Rational(-r),
        Expr::Real(f) => Expr::Real(-f),
        Expr::Neg(inner) => *inner,
        other => Expr::Neg(Box::new(other)),
    }
}

/// Subtraction: `a - b` is the sum of `a` and the negation of `b`, so
/// additive runs flatten into a single n-ary sum.
pub fn sub(minuend: Expr, subtrahend: Expr) -> Expr {
    add(vec![minuend, neg(subtrahend)])
}

/// Quotient. Two exact integers with a nonzero denominator fold to an exact
/// rational literal (an integer when the reduced denominator is 1); any
/// other operands build an unevaluated [`Expr::Div`].
pub fn div(numerator: Expr, denominator: Expr) -> Expr {
    match (numerator, denominator) {
        (Expr::Integer(n), Expr::Integer(d)) if !d.is_zero() => {
            let ratio = BigRational::new(n, d);
            if ratio.is_integer() {
                Expr::Integer(ratio.to_integer())
            } else {
                Expr::Rational(ratio)
            }
        }
        (n, d) => Expr::Div(Box::new(n), Box::new(d)),
    }
}

/// Truncating remainder node.
pub fn rem(dividend: Expr, divisor: Expr) -> Expr {
    Expr::Rem(Box::new(dividend), Box::new(divisor))
}

/// Power node. Never evaluated at construction.
pub fn pow(base: Expr, exponent: Expr) -> Expr {
    Expr::Pow(Box::new(base), Box::new(exponent))
}

// ==================== Comparison capabilities ====================

/// Strict less-than node. Callers encode `>` by swapping operands.
pub fn lt(left: Expr, right: Expr) -> Expr {
    Expr::Lt(Box::new(left), Box::new(right))
}

/// Less-or-equal node. Callers encode `>=` by swapping operands.
pub fn le(left: Expr, right: Expr) -> Expr {
    Expr::Le(Box::new(left), Box::new(right))
}

/// Equality node.
pub fn eq(left: Expr, right: Expr) -> Expr {
    Expr::Eq(Box::new(left), Box::new(right))
}

/// Inequality node.
pub fn ne(left: Expr, right: Expr) -> Expr {
    Expr::Ne(Box::new(left), Box::new(right))
}

// ==================== Logical capabilities ====================

/// N-ary conjunction. A single operand is returned unchanged; nested
/// conjunctions are preserved (parentheses are meaningful).
pub fn and(args: Vec<Expr>) -> Expr {
    nary_connective(args, Expr::And)
}

/// N-ary disjunction, same shape rules as [`and`].
pub fn or(args: Vec<Expr>) -> Expr {
    nary_connective(args, Expr::Or)
}

/// N-ary exclusive-or, same shape rules as [`and`].
pub fn xor(args: Vec<Expr>) -> Expr {
    nary_connective(args, Expr::Xor)
}

/// Complemented conjunction: `nand(x)` is `not(x)`.
pub fn nand(args: Vec<Expr>) -> Expr {
    not(and(args))
}

/// Complemented disjunction.
pub fn nor(args: Vec<Expr>) -> Expr {
    not(or(args))
}

/// Complemented exclusive-or.
pub fn xnor(args: Vec<Expr>) -> Expr {
    not(xor(args))
}

/// Logical negation. Boolean literals fold, double negation cancels, and
/// negating an n-ary connective fuses into its complement instead of
/// wrapping a generic [`Expr::Not`].
pub fn not(operand: Expr) -> Expr {
    match operand {
        Expr::Boolean(b) => Expr::Boolean(!b),
        Expr::Not(inner) => *inner,
        Expr::And(args) => Expr::Nand(args),
        Expr::Or(args) => Expr::Nor(args),
        Expr::Xor(args) => Expr::Xnor(args),
        Expr::Nand(args) => Expr::And(args),
        Expr::Nor(args) => Expr::Or(args),
        Expr::Xnor(args) => Expr::Xor(args),
        other => Expr::Not(Box::new(other)),
    }
}

fn nary_connective(mut args: Vec<Expr>, build: fn(Vec<Expr>) -> Expr) -> Expr {
    match args.len() {
        1 => match args.pop() {
            Some(only) => only,
            None => build(args),
        },
        _ => build(args),
    }
}

// ==================== Structured capabilities ====================

/// Piecewise selection over ordered (value, condition) branches.
pub fn piecewise(branches: Vec<(Expr, Expr)>) -> Expr {
    Expr::Piecewise(branches)
}

/// Named function application.
pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Expr {
    Expr::Call(name.into(), args)
}
