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

//! Frozen dispatch tables for recognized function and constant names.
//!
//! Lookup keys are lower-case; callers fold the spelling they saw before
//! probing, which is what makes recognition case-insensitive (`SIN`, `Sin`
//! and `sin` all hit the same entry). Names absent from both tables are
//! plain symbols or generic function applications and keep their original
//! spelling.
//!
//! Each function entry carries an [`Arity`] for argument-count validation
//! with a usable error message, and a [`Builder`] that lowers the call onto
//! expression nodes. Several entries are rewrites rather than applications:
//! `sqrt`, `sqr`, `root` and `exp` become powers, `factorial(x)` becomes
//! `gamma(x + 1)`, and the relational chains become conjunctions of
//! pairwise comparisons.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::expr::{self, Constant, Expr};

/// Accepted argument counts for a dispatch entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// This many arguments or more.
    AtLeast(usize),
    /// An inclusive range of argument counts.
    Range(usize, usize),
}

impl Arity {
    /// Whether `count` arguments satisfy this arity.
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == *n,
            Arity::AtLeast(n) => count >= *n,
            Arity::Range(lo, hi) => count >= *lo && count <= *hi,
        }
    }

    /// Phrase used in argument-count error messages.
    pub fn describe(&self) -> String {
        match self {
            Arity::Exact(1) => "exactly 1 argument".to_string(),
            Arity::Exact(n) => format!("exactly {n} arguments"),
            Arity::AtLeast(1) => "at least 1 argument".to_string(),
            Arity::AtLeast(n) => format!("at least {n} arguments"),
            Arity::Range(lo, hi) => format!("{lo} to {hi} arguments"),
        }
    }
}

/// Pairwise comparison emitted by a relational chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Lt,
    Le,
    Gt,
    Ge,
}

/// Lowering strategy for a recognized function name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builder {
    /// N-ary sum; empty is 0.
    Add,
    /// N-ary product; empty is 1.
    Mul,
    /// One argument negates, two subtract.
    Minus,
    Div,
    Rem,
    Pow,
    /// `root(n, x)` is `x^(1/n)`.
    Root,
    /// `sqrt(x)` is `x^(1/2)`.
    Sqrt,
    /// `sqr(x)` is `x^2`.
    Sqr,
    /// `exp(x)` is `exponentiale^x`.
    Exp,
    /// `factorial(x)` is `gamma(x + 1)`.
    Factorial,
    /// One-argument application under a canonical name.
    Unary(&'static str),
    /// Variadic application under a canonical name, at least one argument.
    Variadic(&'static str),
    /// `log(x)` is base 10; `log(b, x)` keeps the explicit base first.
    Log,
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Xnor,
    Not,
    Eq,
    Ne,
    /// N-ary relational chain: adjacent pairs conjoined.
    Chain(Relation),
    /// Alternating value/condition arguments; a trailing unpaired value
    /// becomes the default branch.
    Piecewise,
}

impl Builder {
    /// Lower a validated argument list onto expression nodes. Returns
    /// `None` when the argument count does not fit the builder shape;
    /// callers that check [`Arity::accepts`] first never see that.
    pub fn apply(&self, args: Vec<Expr>) -> Option<Expr> {
        match self {
            Builder::Add => Some(expr::add(args)),
            Builder::Mul => Some(expr::mul(args)),
            Builder::Minus => {
                if args.len() == 1 {
                    let [x] = <[Expr; 1]>::try_from(args).ok()?;
                    Some(expr::neg(x))
                } else {
                    let [a, b] = <[Expr; 2]>::try_from(args).ok()?;
                    Some(expr::sub(a, b))
                }
            }
            Builder::Div => {
                let [a, b] = <[Expr; 2]>::try_from(args).ok()?;
                Some(expr::div(a, b))
            }
            Builder::Rem => {
                let [a, b] = <[Expr; 2]>::try_from(args).ok()?;
                Some(expr::rem(a, b))
            }
            Builder::Pow => {
                let [a, b] = <[Expr; 2]>::try_from(args).ok()?;
                Some(expr::pow(a, b))
            }
            Builder::Root => {
                let [degree, x] = <[Expr; 2]>::try_from(args).ok()?;
                Some(expr::pow(x, expr::div(expr::integer(1), degree)))
            }
            Builder::Sqrt => {
                let [x] = <[Expr; 1]>::try_from(args).ok()?;
                Some(expr::pow(x, expr::rational(1, 2)))
            }
            Builder::Sqr => {
                let [x] = <[Expr; 1]>::try_from(args).ok()?;
                Some(expr::pow(x, expr::integer(2)))
            }
            Builder::Exp => {
                let [x] = <[Expr; 1]>::try_from(args).ok()?;
                Some(expr::pow(expr::exp1(), x))
            }
            Builder::Factorial => {
                let [x] = <[Expr; 1]>::try_from(args).ok()?;
                Some(expr::call(
                    "gamma",
                    vec![expr::add(vec![x, expr::integer(1)])],
                ))
            }
            Builder::Unary(name) => {
                let [x] = <[Expr; 1]>::try_from(args).ok()?;
                Some(expr::call(*name, vec![x]))
            }
            Builder::Variadic(name) => {
                if args.is_empty() {
                    return None;
                }
                Some(expr::call(*name, args))
            }
            Builder::Log => match args.len() {
                1 | 2 => Some(expr::call("log", args)),
                _ => None,
            },
            Builder::And => Some(if args.is_empty() {
                expr::boolean(true)
            } else {
                expr::and(args)
            }),
            Builder::Or => Some(if args.is_empty() {
                expr::boolean(false)
            } else {
                expr::or(args)
            }),
            Builder::Xor => Some(if args.is_empty() {
                expr::boolean(false)
            } else {
                expr::xor(args)
            }),
            Builder::Nand => Some(if args.is_empty() {
                expr::boolean(false)
            } else {
                expr::nand(args)
            }),
            Builder::Nor => Some(if args.is_empty() {
                expr::boolean(true)
            } else {
                expr::nor(args)
            }),
            Builder::Xnor => Some(if args.is_empty() {
                expr::boolean(true)
            } else {
                expr::xnor(args)
            }),
            Builder::Not => {
                let [x] = <[Expr; 1]>::try_from(args).ok()?;
                Some(expr::not(x))
            }
            Builder::Eq => {
                let [a, b] = <[Expr; 2]>::try_from(args).ok()?;
                Some(expr::eq(a, b))
            }
            Builder::Ne => {
                let [a, b] = <[Expr; 2]>::try_from(args).ok()?;
                Some(expr::ne(a, b))
            }
            Builder::Chain(relation) => {
                if args.len() < 2 {
                    return None;
                }
                let mut pairs = Vec::with_capacity(args.len() - 1);
                for window in args.windows(2) {
                    let (a, b) = (window[0].clone(), window[1].clone());
                    pairs.push(match relation {
                        Relation::Lt => expr::lt(a, b),
                        Relation::Le => expr::le(a, b),
                        Relation::Gt => expr::lt(b, a),
                        Relation::Ge => expr::le(b, a),
                    });
                }
                Some(expr::and(pairs))
            }
            Builder::Piecewise => {
                if args.is_empty() {
                    return None;
                }
                let mut branches = Vec::with_capacity(args.len() / 2 + 1);
                let mut remaining = args.into_iter();
                while let Some(value) = remaining.next() {
                    match remaining.next() {
                        Some(condition) => branches.push((value, condition)),
                        None => {
                            branches.push((value, expr::boolean(true)));
                            break;
                        }
                    }
                }
                Some(expr::piecewise(branches))
            }
        }
    }
}

/// A recognized function name: arity contract plus lowering.
#[derive(Debug, Clone, Copy)]
pub struct DispatchEntry {
    pub arity: Arity,
    pub builder: Builder,
}

const fn entry(arity: Arity, builder: Builder) -> DispatchEntry {
    DispatchEntry { arity, builder }
}

/// Recognized function names, keyed by lower-case spelling.
pub static FUNCTIONS: Lazy<HashMap<&'static str, DispatchEntry>> = Lazy::new(|| {
    let mut t = HashMap::new();

    // Arithmetic.
    t.insert("plus", entry(Arity::AtLeast(0), Builder::Add));
    t.insert("times", entry(Arity::AtLeast(0), Builder::Mul));
    t.insert("minus", entry(Arity::Range(1, 2), Builder::Minus));
    t.insert("divide", entry(Arity::Exact(2), Builder::Div));
    t.insert("rem", entry(Arity::Exact(2), Builder::Rem));
    t.insert("pow", entry(Arity::Exact(2), Builder::Pow));
    t.insert("power", entry(Arity::Exact(2), Builder::Pow));
    t.insert("root", entry(Arity::Exact(2), Builder::Root));
    t.insert("sqrt", entry(Arity::Exact(1), Builder::Sqrt));
    t.insert("sqr", entry(Arity::Exact(1), Builder::Sqr));
    t.insert("exp", entry(Arity::Exact(1), Builder::Exp));
    t.insert("ln", entry(Arity::Exact(1), Builder::Unary("ln")));
    t.insert("log", entry(Arity::Range(1, 2), Builder::Log));
    t.insert("factorial", entry(Arity::Exact(1), Builder::Factorial));
    t.insert("abs", entry(Arity::Exact(1), Builder::Unary("abs")));
    t.insert("floor", entry(Arity::Exact(1), Builder::Unary("floor")));
    t.insert("ceiling", entry(Arity::Exact(1), Builder::Unary("ceiling")));
    t.insert("ceil", entry(Arity::Exact(1), Builder::Unary("ceiling")));
    t.insert("gamma", entry(Arity::Exact(1), Builder::Unary("gamma")));
    t.insert("min", entry(Arity::AtLeast(1), Builder::Variadic("min")));
    t.insert("max", entry(Arity::AtLeast(1), Builder::Variadic("max")));

    // Trigonometric and hyperbolic families. MathML-style `arc` prefixes
    // are aliases of the short `a` spellings.
    for name in [
        "sin", "cos", "tan", "sec", "csc", "cot", "sinh", "cosh", "tanh", "sech", "csch",
        "coth", "asin", "acos", "atan", "asec", "acsc", "acot", "asinh", "acosh", "atanh",
        "asech", "acsch", "acoth",
    ] {
        t.insert(name, entry(Arity::Exact(1), Builder::Unary(name)));
    }
    for (alias, canonical) in [
        ("arcsin", "asin"),
        ("arccos", "acos"),
        ("arctan", "atan"),
        ("arcsec", "asec"),
        ("arccsc", "acsc"),
        ("arccot", "acot"),
        ("arcsinh", "asinh"),
        ("arccosh", "acosh"),
        ("arctanh", "atanh"),
        ("arcsech", "asech"),
        ("arccsch", "acsch"),
        ("arccoth", "acoth"),
    ] {
        t.insert(alias, entry(Arity::Exact(1), Builder::Unary(canonical)));
    }

    // Logical connectives. Zero arguments yield the connective identity.
    t.insert("and", entry(Arity::AtLeast(0), Builder::And));
    t.insert("or", entry(Arity::AtLeast(0), Builder::Or));
    t.insert("xor", entry(Arity::AtLeast(0), Builder::Xor));
    t.insert("nand", entry(Arity::AtLeast(0), Builder::Nand));
    t.insert("nor", entry(Arity::AtLeast(0), Builder::Nor));
    t.insert("xnor", entry(Arity::AtLeast(0), Builder::Xnor));
    t.insert("xnand", entry(Arity::AtLeast(0), Builder::Xnor));
    t.insert("not", entry(Arity::Exact(1), Builder::Not));

    // Relational.
    t.insert("eq", entry(Arity::Exact(2), Builder::Eq));
    t.insert("neq", entry(Arity::Exact(2), Builder::Ne));
    t.insert("lt", entry(Arity::AtLeast(2), Builder::Chain(Relation::Lt)));
    t.insert("leq", entry(Arity::AtLeast(2), Builder::Chain(Relation::Le)));
    t.insert("gt", entry(Arity::AtLeast(2), Builder::Chain(Relation::Gt)));
    t.insert("geq", entry(Arity::AtLeast(2), Builder::Chain(Relation::Ge)));

    // Structured.
    t.insert("piecewise", entry(Arity::AtLeast(1), Builder::Piecewise));

    t
});

/// What a recognized constant name denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantEntry {
    /// A dedicated constant node.
    Constant(Constant),
    /// A boolean literal.
    Boolean(bool),
    /// A reserved name that parses as a plain symbol with this spelling.
    Symbol(&'static str),
}

impl ConstantEntry {
    pub fn build(&self) -> Expr {
        match self {
            ConstantEntry::Constant(c) => Expr::Constant(*c),
            ConstantEntry::Boolean(b) => expr::boolean(*b),
            ConstantEntry::Symbol(name) => expr::symbol(*name),
        }
    }
}

/// Recognized constant names, keyed by lower-case spelling.
pub static CONSTANTS: Lazy<HashMap<&'static str, ConstantEntry>> = Lazy::new(|| {
    HashMap::from([
        ("true", ConstantEntry::Boolean(true)),
        ("false", ConstantEntry::Boolean(false)),
        ("pi", ConstantEntry::Constant(Constant::Pi)),
        ("exponentiale", ConstantEntry::Constant(Constant::Exp1)),
        ("eulergamma", ConstantEntry::Constant(Constant::EulerGamma)),
        ("inf", ConstantEntry::Constant(Constant::Inf)),
        ("infinity", ConstantEntry::Constant(Constant::Inf)),
        ("nan", ConstantEntry::Constant(Constant::Nan)),
        ("notanumber", ConstantEntry::Constant(Constant::Nan)),
        ("avogadro", ConstantEntry::Symbol("avogadro")),
        ("time", ConstantEntry::Symbol("time")),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Expr;

    fn lower(name: &str, args: Vec<Expr>) -> Expr {
        FUNCTIONS[name].builder.apply(args).unwrap()
    }

    // ==================== Arity tests ====================

    #[test]
    fn test_arity_accepts() {
        assert!(Arity::Exact(2).accepts(2));
        assert!(!Arity::Exact(2).accepts(3));
        assert!(Arity::AtLeast(1).accepts(5));
        assert!(!Arity::AtLeast(1).accepts(0));
        assert!(Arity::Range(1, 2).accepts(1));
        assert!(Arity::Range(1, 2).accepts(2));
        assert!(!Arity::Range(1, 2).accepts(3));
    }

    #[test]
    fn test_arity_describe() {
        assert_eq!(Arity::Exact(1).describe(), "exactly 1 argument");
        assert_eq!(Arity::AtLeast(2).describe(), "at least 2 arguments");
        assert_eq!(Arity::Range(1, 2).describe(), "1 to 2 arguments");
    }

    // ==================== Rewrite tests ====================

    #[test]
    fn test_sqrt_and_root_become_powers() {
        assert_eq!(
            lower("sqrt", vec![expr::symbol("x")]),
            expr::pow(expr::symbol("x"), expr::rational(1, 2))
        );
        assert_eq!(
            lower("root", vec![expr::integer(3), expr::symbol("x")]),
            expr::pow(expr::symbol("x"), expr::rational(1, 3))
        );
        assert_eq!(
            lower("sqr", vec![expr::symbol("x")]),
            expr::pow(expr::symbol("x"), expr::integer(2))
        );
    }

    #[test]
    fn test_exp_becomes_power_of_e() {
        assert_eq!(
            lower("exp", vec![expr::symbol("x")]),
            expr::pow(expr::exp1(), expr::symbol("x"))
        );
    }

    #[test]
    fn test_factorial_becomes_gamma() {
        assert_eq!(
            lower("factorial", vec![expr::symbol("n")]),
            expr::call(
                "gamma",
                vec![expr::add(vec![expr::symbol("n"), expr::integer(1)])]
            )
        );
    }

    #[test]
    fn test_minus_is_negation_or_subtraction() {
        assert_eq!(
            lower("minus", vec![expr::symbol("x")]),
            expr::neg(expr::symbol("x"))
        );
        assert_eq!(
            lower("minus", vec![expr::symbol("x"), expr::symbol("y")]),
            expr::sub(expr::symbol("x"), expr::symbol("y"))
        );
    }

    // ==================== Chain tests ====================

    #[test]
    fn test_two_argument_chain_is_single_comparison() {
        assert_eq!(
            lower("lt", vec![expr::symbol("a"), expr::symbol("b")]),
            expr::lt(expr::symbol("a"), expr::symbol("b"))
        );
    }

    #[test]
    fn test_greater_chains_swap_operands() {
        assert_eq!(
            lower("gt", vec![expr::symbol("a"), expr::symbol("b")]),
            expr::lt(expr::symbol("b"), expr::symbol("a"))
        );
        assert_eq!(
            lower("geq", vec![expr::symbol("a"), expr::symbol("b")]),
            expr::le(expr::symbol("b"), expr::symbol("a"))
        );
    }

    #[test]
    fn test_long_chain_conjoins_adjacent_pairs() {
        let lowered = lower(
            "lt",
            vec![expr::symbol("a"), expr::symbol("b"), expr::symbol("c")],
        );
        let expected = expr::and(vec![
            expr::lt(expr::symbol("a"), expr::symbol("b")),
            expr::lt(expr::symbol("b"), expr::symbol("c")),
        ]);
        assert_eq!(lowered, expected);
    }

    // ==================== Connective identity tests ====================

    #[test]
    fn test_empty_connectives_yield_identities() {
        assert_eq!(lower("and", vec![]), expr::boolean(true));
        assert_eq!(lower("or", vec![]), expr::boolean(false));
        assert_eq!(lower("xor", vec![]), expr::boolean(false));
        assert_eq!(lower("plus", vec![]), expr::integer(0));
        assert_eq!(lower("times", vec![]), expr::integer(1));
    }

    #[test]
    fn test_empty_complements_yield_complemented_identities() {
        assert_eq!(lower("nand", vec![]), expr::boolean(false));
        assert_eq!(lower("nor", vec![]), expr::boolean(true));
        assert_eq!(lower("xnor", vec![]), expr::boolean(true));
    }

    #[test]
    fn test_xnand_is_xnor() {
        let a = lower("xnand", vec![expr::symbol("p"), expr::symbol("q")]);
        let b = lower("xnor", vec![expr::symbol("p"), expr::symbol("q")]);
        assert_eq!(a, b);
    }

    // ==================== Piecewise tests ====================

    #[test]
    fn test_piecewise_pairs_and_default() {
        let lowered = lower(
            "piecewise",
            vec![expr::symbol("a"), expr::symbol("p"), expr::symbol("b")],
        );
        let expected = expr::piecewise(vec![
            (expr::symbol("a"), expr::symbol("p")),
            (expr::symbol("b"), expr::boolean(true)),
        ]);
        assert_eq!(lowered, expected);
    }

    #[test]
    fn test_piecewise_single_value_is_default_only() {
        let lowered = lower("piecewise", vec![expr::symbol("a")]);
        assert_eq!(
            lowered,
            expr::piecewise(vec![(expr::symbol("a"), expr::boolean(true))])
        );
    }

    // ==================== Alias tests ====================

    #[test]
    fn test_arc_aliases_share_canonical_names() {
        assert_eq!(
            lower("arcsin", vec![expr::symbol("x")]),
            lower("asin", vec![expr::symbol("x")])
        );
        assert_eq!(
            lower("ceil", vec![expr::symbol("x")]),
            lower("ceiling", vec![expr::symbol("x")])
        );
    }

    #[test]
    fn test_constant_entries() {
        assert_eq!(CONSTANTS["pi"].build(), expr::pi());
        assert_eq!(CONSTANTS["true"].build(), expr::boolean(true));
        assert_eq!(CONSTANTS["avogadro"].build(), expr::symbol("avogadro"));
        assert_eq!(CONSTANTS["notanumber"].build(), expr::nan());
    }
}
