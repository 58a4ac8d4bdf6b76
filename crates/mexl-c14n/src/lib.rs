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

//! Canonical infix rendering for MEXL expression trees.
//!
//! The rendered text always re-parses, and re-parsing reproduces the tree
//! that was printed:
//!
//! - **Round-trip preservation**: `parse(to_infix(e)) == e` for every tree
//!   the parser can produce.
//! - **Idempotency**: printing is deterministic, so
//!   `to_infix(parse(to_infix(e))) == to_infix(e)`.
//! - **Minimal parentheses**: groups appear only where precedence or
//!   associativity would otherwise reshape the tree, plus the explicit
//!   nesting of same-kind connectives, which is meaningful.
//!
//! One caveat applies to hand-built trees: a non-finite `Real` renders as
//! the constant spelling (`inf`, `nan`), which re-parses as the constant
//! node. The parser never produces non-finite reals, so trees that came
//! from parsing are unaffected.
//!
//! # Examples
//!
//! ```
//! use mexl_c14n::{to_infix, to_infix_with_config, CanonicalConfig};
//! use mexl_core::parse;
//!
//! let e = parse("2 ^ -3 * x").unwrap();
//! assert_eq!(to_infix(&e), "2^-3*x");
//!
//! let config = CanonicalConfig::new().with_compact(true);
//! let e = parse("x + 2 * y").unwrap();
//! assert_eq!(to_infix_with_config(&e, &config), "x+2*y");
//! ```

mod config;
mod writer;

pub use config::CanonicalConfig;
pub use writer::InfixWriter;

use mexl_core::Expr;

/// Render an expression in canonical infix form with default configuration.
pub fn to_infix(expr: &Expr) -> String {
    to_infix_with_config(expr, &CanonicalConfig::default())
}

/// Render an expression in canonical infix form.
pub fn to_infix_with_config(expr: &Expr, config: &CanonicalConfig) -> String {
    let mut writer = InfixWriter::new(*config);
    writer.write_expr(expr)
}
