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

//! # MEXL - Model Expression Language
//!
//! MEXL is the text front end of a symbolic model framework: an SBML-style
//! infix notation and a Content MathML bridge over one shared expression
//! tree. Parse either notation, canonicalize, render back, or hand the tree
//! to downstream analysis.
//!
//! ## Quick Start
//!
//! ```rust
//! use mexl::{eval_f64, parse, to_infix};
//!
//! // Parse the infix notation
//! let tree = parse("k1 * S1 / (Km + S1)")?;
//!
//! // Render the canonical spelling
//! assert_eq!(to_infix(&tree), "k1*S1/(Km + S1)");
//!
//! // Numeric evaluation of closed expressions
//! assert_eq!(eval_f64(&parse("2^10")?)?, 1024.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Features
//!
//! - **Exact literals**: integers at arbitrary precision, quotients of
//!   integer literals as exact rationals, float markers preserved
//! - **Case-insensitive dispatch**: `Sin`, `SIN` and `sin` resolve to one
//!   canonical function; unknown names stay generic calls
//! - **Structural trees**: subtraction as negated addends, comparison
//!   chains as conjunctions, complemented connectives fused
//! - **Round trips**: rendering any parsed tree reproduces an equal tree,
//!   in both the infix notation and Content MathML
//!
//! ## Modules
//!
//! - [`expr`]: Tree constructors and node types
//! - [`c14n`](mod@c14n): Canonical infix rendering
//! - [`mathml`](mod@mathml): Content MathML conversion (feature = "mathml",
//!   enabled by default)

// Re-export core types
pub use mexl_core::{
    constant_value,
    eval,
    format_real,
    // Functions
    parse,
    parse_with_options,
    Constant,
    EvalError,
    EvalResult,
    // Main types
    Expr,
    Number,
    // Errors
    ParseError,
    // Parser
    ParseOptions,
    ParseResult,
};

// Tree constructors
pub use mexl_core::expr;

// Error handling extensions
mod error_ext;
pub use error_ext::{MexlError, MexlResult, MexlResultExt};

// Headline conversions at the crate root
pub use mexl_c14n::{to_infix, to_infix_with_config, CanonicalConfig};

#[cfg(feature = "mathml")]
pub use mexl_mathml::{parse_mathml, to_mathml};

// Re-export canonical rendering
pub mod c14n {
    //! Canonical infix rendering utilities
    pub use mexl_c14n::{to_infix, to_infix_with_config, CanonicalConfig, InfixWriter};
}

/// Content MathML conversion utilities (requires `mathml` feature, enabled
/// by default).
#[cfg(feature = "mathml")]
pub mod mathml {
    pub use mexl_mathml::{
        parse_mathml, to_mathml, to_mathml_with_config, MathmlError, MathmlResult, ToMathmlConfig,
        MATHML_NS,
    };
}

// Convenience functions at crate root

/// Evaluate a closed expression and return the result as a float.
///
/// Exact results widen to `f64` at the end, so `eval_f64` of `1/3 + 1/3`
/// is the float nearest two thirds rather than the sum of two rounded
/// thirds. Use [`eval`] directly to keep exactness.
///
/// # Examples
///
/// ```rust
/// use mexl::{eval_f64, parse};
///
/// let tree = parse("gamma(5) + 2^-3")?;
/// assert_eq!(eval_f64(&tree)?, 24.125);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[inline]
pub fn eval_f64(expr: &Expr) -> EvalResult<f64> {
    mexl_core::eval(expr).map(|n| n.to_f64())
}

/// Validate notation text without keeping the tree.
///
/// Returns `Ok(())` if the input parses, `Err` with details if not.
#[inline]
pub fn validate(input: &str) -> Result<(), ParseError> {
    parse(input).map(|_| ())
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
