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

//! Precedence-aware infix rendering.
//!
//! Each node carries a binding rank mirroring the parser's ladder; an
//! operand is parenthesized exactly when its rank is below what its
//! position requires. The asymmetric positions encode associativity:
//! `a/b/c` prints bare because division re-associates to the left, while
//! `a/(b/c)` keeps its parentheses; `a^b^c` prints bare because the parser
//! leans right.
//!
//! Three printing choices keep output inside the grammar the parser
//! accepts:
//!
//! - a negated addend prints as subtraction (`x - y*z`), and a negative
//!   literal addend folds its sign into the operator (`x - 2`);
//! - a sign directly after `^` stays bare only for the forms the tight
//!   exponent sign can re-absorb (`x^-3`, `x^-y`); rational literals
//!   parenthesize there (`x^(1/2)`) since `x^-1/2` would re-associate;
//! - connectives without an infix spelling (`xor`, `nand`, `nor`, `xnor`)
//!   print in function form, which dispatch folds back to the same node.

use mexl_core::{format_real, Expr};

use crate::config::CanonicalConfig;

const PREC_OR: u8 = 1;
const PREC_AND: u8 = 2;
const PREC_NOT: u8 = 3;
const PREC_CMP: u8 = 4;
const PREC_ADD: u8 = 5;
const PREC_MUL: u8 = 6;
const PREC_SIGN: u8 = 7;
const PREC_POW: u8 = 8;
const PREC_ATOM: u8 = 9;

/// Binding rank of a node as the parser sees its printed form.
fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Or(_) => PREC_OR,
        Expr::And(_) => PREC_AND,
        Expr::Not(_) => PREC_NOT,
        Expr::Lt(_, _) | Expr::Le(_, _) | Expr::Eq(_, _) | Expr::Ne(_, _) => PREC_CMP,
        Expr::Add(_) => PREC_ADD,
        Expr::Mul(_) | Expr::Div(_, _) | Expr::Rem(_, _) => PREC_MUL,
        // Rationals print as a quotient, whatever their sign.
        Expr::Rational(_) => PREC_MUL,
        Expr::Neg(_) => PREC_SIGN,
        Expr::Integer(_) | Expr::Real(_) if expr.is_negative_literal() => PREC_SIGN,
        Expr::Pow(_, _) => PREC_POW,
        _ => PREC_ATOM,
    }
}

/// Reusable infix renderer.
pub struct InfixWriter {
    config: CanonicalConfig,
    out: String,
}

impl InfixWriter {
    pub fn new(config: CanonicalConfig) -> Self {
        Self {
            config,
            out: String::with_capacity(128),
        }
    }

    /// Render one expression, returning the buffer.
    pub fn write_expr(&mut self, expr: &Expr) -> String {
        self.out.clear();
        self.write(expr, PREC_OR);
        std::mem::take(&mut self.out)
    }

    fn write(&mut self, expr: &Expr, required: u8) {
        if precedence(expr) < required {
            self.out.push('(');
            self.write_node(expr);
            self.out.push(')');
        } else {
            self.write_node(expr);
        }
    }

    fn write_node(&mut self, expr: &Expr) {
        match expr {
            Expr::Integer(i) => self.out.push_str(&i.to_string()),
            Expr::Rational(r) => {
                self.out.push_str(&r.numer().to_string());
                self.out.push('/');
                self.out.push_str(&r.denom().to_string());
            }
            Expr::Real(f) => self.out.push_str(&format_real(*f)),
            Expr::Symbol(name) => self.out.push_str(name),
            Expr::Constant(c) => self.out.push_str(c.name()),
            Expr::Boolean(true) => self.out.push_str("true"),
            Expr::Boolean(false) => self.out.push_str("false"),
            Expr::Add(args) => self.write_sum(args),
            Expr::Mul(args) => self.write_product(args),
            Expr::Neg(inner) => {
                self.out.push('-');
                self.write(inner, PREC_POW);
            }
            Expr::Div(n, d) => {
                self.write(n, PREC_MUL);
                self.out.push('/');
                self.write(d, PREC_SIGN);
            }
            Expr::Rem(n, d) => {
                self.write(n, PREC_MUL);
                self.out.push('%');
                self.write(d, PREC_SIGN);
            }
            Expr::Pow(base, exponent) => {
                self.write(base, PREC_ATOM);
                self.out.push('^');
                self.write_exponent(exponent);
            }
            Expr::Lt(a, b) => self.write_comparison(a, "<", b),
            Expr::Le(a, b) => self.write_comparison(a, "<=", b),
            Expr::Eq(a, b) => self.write_comparison(a, "==", b),
            Expr::Ne(a, b) => self.write_comparison(a, "!=", b),
            Expr::And(args) => self.write_connective(args, "&&", PREC_NOT),
            Expr::Or(args) => self.write_connective(args, "||", PREC_AND),
            Expr::Not(inner) => {
                self.out.push('!');
                self.write(inner, PREC_ATOM);
            }
            Expr::Xor(args) => self.write_call("xor", args),
            Expr::Nand(args) => self.write_call("nand", args),
            Expr::Nor(args) => self.write_call("nor", args),
            Expr::Xnor(args) => self.write_call("xnor", args),
            Expr::Piecewise(branches) => self.write_piecewise(branches),
            Expr::Call(name, args) => self.write_call(name, args),
        }
    }

    fn write_sum(&mut self, args: &[Expr]) {
        for (i, arg) in args.iter().enumerate() {
            if i == 0 {
                self.write(arg, PREC_MUL);
                continue;
            }
            match arg {
                Expr::Neg(inner) => {
                    self.push_spaced("-");
                    self.write(inner, PREC_MUL);
                }
                literal if literal.is_negative_literal() => {
                    self.push_spaced("-");
                    self.push_stripped_literal(literal);
                }
                _ => {
                    self.push_spaced("+");
                    self.write(arg, PREC_MUL);
                }
            }
        }
    }

    fn write_product(&mut self, args: &[Expr]) {
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.out.push('*');
            }
            // Later factors must bind at least as tight as a signed unit,
            // otherwise `x*a/b` would re-associate into `(x*a)/b`.
            let required = if i == 0 { PREC_MUL } else { PREC_SIGN };
            self.write(arg, required);
        }
    }

    fn write_comparison(&mut self, left: &Expr, op: &str, right: &Expr) {
        self.write(left, PREC_CMP);
        self.push_spaced(op);
        self.write(right, PREC_ADD);
    }

    fn write_connective(&mut self, args: &[Expr], op: &str, operand_required: u8) {
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.push_spaced(op);
            }
            self.write(arg, operand_required);
        }
    }

    /// A sign directly after `^` binds to the exponent alone, so negated
    /// exponents print bare where the parser re-absorbs them.
    fn write_exponent(&mut self, exponent: &Expr) {
        match exponent {
            Expr::Neg(inner) => {
                self.out.push('-');
                self.write(inner, PREC_POW);
            }
            Expr::Integer(_) | Expr::Real(_) if exponent.is_negative_literal() => {
                self.out.push('-');
                self.push_stripped_literal(exponent);
            }
            _ => self.write(exponent, PREC_POW),
        }
    }

    fn write_call(&mut self, name: &str, args: &[Expr]) {
        self.out.push_str(name);
        self.out.push('(');
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.push_comma();
            }
            self.write(arg, PREC_OR);
        }
        self.out.push(')');
    }

    /// Every branch prints its condition, the default included, so the
    /// printed form re-enters dispatch with an even argument count.
    fn write_piecewise(&mut self, branches: &[(Expr, Expr)]) {
        self.out.push_str("piecewise(");
        let mut first = true;
        for (value, condition) in branches {
            if !first {
                self.push_comma();
            }
            first = false;
            self.write(value, PREC_OR);
            self.push_comma();
            self.write(condition, PREC_OR);
        }
        self.out.push(')');
    }

    /// Render a negative literal without its sign; the caller has already
    /// emitted the operator that absorbs it.
    fn push_stripped_literal(&mut self, literal: &Expr) {
        let rendered = match literal {
            Expr::Integer(i) => i.to_string(),
            Expr::Rational(r) => format!("{}/{}", r.numer(), r.denom()),
            Expr::Real(f) => format_real(*f),
            other => {
                // Not a literal; render in place as a fallback.
                self.write(other, PREC_MUL);
                return;
            }
        };
        match rendered.strip_prefix('-') {
            Some(stripped) => self.out.push_str(stripped),
            None => self.out.push_str(&rendered),
        }
    }

    fn push_spaced(&mut self, op: &str) {
        if self.config.compact {
            self.out.push_str(op);
        } else {
            self.out.push(' ');
            self.out.push_str(op);
            self.out.push(' ');
        }
    }

    fn push_comma(&mut self) {
        self.out.push(',');
        if !self.config.compact {
            self.out.push(' ');
        }
    }
}
