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

//! Core expression model and infix parser for MEXL notations.
//!
//! This crate owns the [`Expr`] tree and the parser for the infix notation
//! used in systems-biology models: C-like operator precedence, n-ary sums
//! and connectives, case-insensitive function and constant names, and exact
//! numeric literals (a bare digit run is an arbitrary-precision integer, a
//! point or exponent makes it a float).
//!
//! # Parsing
//!
//! [`parse`] covers the common case; [`parse_with_options`] adds the strict
//! boolean dialect and a configurable nesting depth limit:
//!
//! ```
//! use mexl_core::{parse, expr};
//!
//! let e = parse("x + 2 * y").unwrap();
//! assert_eq!(
//!     e,
//!     expr::add(vec![
//!         expr::symbol("x"),
//!         expr::mul(vec![expr::integer(2), expr::symbol("y")]),
//!     ])
//! );
//! ```
//!
//! # Evaluation
//!
//! [`eval`] reduces closed trees to a [`Number`], staying exact wherever
//! integer and rational arithmetic allow.
//!
//! Printing lives in the companion crates: `mexl-c14n` renders the infix
//! form back out and `mexl-mathml` converts to and from Content MathML.

pub mod expr;

mod error;
mod eval;
mod lex;
mod number;
mod parser;
mod table;

pub use error::{EvalError, EvalResult, ParseError, ParseResult};
pub use eval::{constant_value, eval};
pub use expr::{Constant, Expr};
pub use number::{format_real, Number};
pub use parser::{parse, parse_with_options, ParseOptions};
