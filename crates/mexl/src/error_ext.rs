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

//! Error context helpers for improved ergonomics.
//!
//! The per-crate error types stay precise; this module folds them into one
//! [`MexlError`] and provides an extension trait for annotating failures with
//! caller context as they propagate up the call stack.
//!
//! # Examples
//!
//! ## Basic Context
//!
//! ```rust
//! use mexl::{parse, MexlResult, MexlResultExt};
//!
//! fn load_rate_law(name: &str, formula: &str) -> MexlResult<mexl::Expr> {
//!     parse(formula).context(format!("in rate law {name}"))
//! }
//!
//! let err = load_rate_law("J1", "k1 * (").unwrap_err();
//! assert!(err.to_string().starts_with("in rate law J1:"));
//! ```
//!
//! ## Lazy Context with Closures
//!
//! Use `with_context` when the context message is expensive to compute:
//!
//! ```rust
//! use mexl::{parse, MexlResult, MexlResultExt};
//!
//! fn process(id: u64, formula: &str) -> MexlResult<()> {
//!     let tree = parse(formula)
//!         .with_context(|| format!("expression {id} ({} bytes)", formula.len()))?;
//!     let _ = tree;
//!     Ok(())
//! }
//! ```

use std::fmt;

use mexl_core::{EvalError, ParseError};
use thiserror::Error;

/// Unified error for the umbrella crate.
///
/// Wraps the per-crate errors and carries optional context frames added via
/// [`MexlResultExt`]. The innermost error stays reachable through
/// [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum MexlError {
    /// Notation text was rejected by the parser.
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// Numeric evaluation failed.
    #[error("{0}")]
    Eval(#[from] EvalError),

    /// MathML reading or writing failed.
    #[cfg(feature = "mathml")]
    #[error("{0}")]
    Mathml(#[from] mexl_mathml::MathmlError),

    /// An error annotated with caller context.
    #[error("{context}: {source}")]
    Context {
        /// Description of what the caller was doing.
        context: String,
        /// The annotated error.
        #[source]
        source: Box<MexlError>,
    },
}

/// Result alias for the umbrella crate.
pub type MexlResult<T> = Result<T, MexlError>;

/// Extension trait for adding context to results carrying MEXL errors.
///
/// Implemented for any `Result` whose error converts into [`MexlError`], so
/// parse, evaluation and markup results can all be annotated with the same
/// two methods. Context frames nest; the most recent annotation prints first.
pub trait MexlResultExt<T> {
    /// Add context to an error.
    ///
    /// The message is evaluated immediately. For expensive messages prefer
    /// [`with_context`](MexlResultExt::with_context).
    fn context<C>(self, context: C) -> MexlResult<T>
    where
        C: fmt::Display;

    /// Add context to an error using a closure.
    ///
    /// The closure only runs on the error path.
    fn with_context<C, F>(self, f: F) -> MexlResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> MexlResultExt<T> for Result<T, E>
where
    E: Into<MexlError>,
{
    fn context<C>(self, context: C) -> MexlResult<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| wrap(e.into(), context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> MexlResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| wrap(e.into(), f().to_string()))
    }
}

/// Empty context strings annotate nothing.
fn wrap(error: MexlError, context: String) -> MexlError {
    if context.is_empty() {
        return error;
    }
    MexlError::Context {
        context,
        source: Box::new(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mexl_core::parse;

    // ==================== context() tests ====================

    #[test]
    fn test_context_on_error() {
        let err = parse("2 +").context("in function foo").unwrap_err();
        assert!(err.to_string().starts_with("in function foo:"));
        assert!(matches!(err, MexlError::Context { .. }));
    }

    #[test]
    fn test_context_on_ok() {
        let result: Result<i32, ParseError> = Ok(42);
        let value = result.context("this should not be evaluated").unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_context_chaining() {
        let err = parse("k1 * (")
            .context("in reaction J1")
            .context("while loading model")
            .unwrap_err();

        let rendered = err.to_string();
        assert!(rendered.starts_with("while loading model:"));
        assert!(rendered.contains("in reaction J1"));
    }

    #[test]
    fn test_context_preserves_inner_error() {
        let err = parse("2 +").context("outer").unwrap_err();
        match err {
            MexlError::Context { source, .. } => {
                assert!(matches!(*source, MexlError::Parse(_)));
            }
            other => panic!("expected context frame, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_context_not_added() {
        let err = parse("2 +").context("").unwrap_err();
        assert!(matches!(err, MexlError::Parse(_)));
    }

    #[test]
    fn test_eval_error_context() {
        let tree = parse("1/0").unwrap();
        let err = mexl_core::eval(&tree)
            .context("evaluating initial assignment")
            .unwrap_err();
        assert!(err.to_string().starts_with("evaluating initial assignment:"));
    }

    #[cfg(feature = "mathml")]
    #[test]
    fn test_mathml_error_context() {
        let err = mexl_mathml::parse_mathml("<apply>")
            .context("reading kinetic law markup")
            .unwrap_err();
        assert!(err.to_string().contains("reading kinetic law markup"));
    }

    // ==================== with_context() tests ====================

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut evaluated = false;
        let result: Result<i32, ParseError> = Ok(42);

        let value = result
            .with_context(|| {
                evaluated = true;
                "expensive computation"
            })
            .unwrap();

        assert_eq!(value, 42);
        assert!(!evaluated, "context must not be evaluated on Ok");
    }

    #[test]
    fn test_with_context_on_error() {
        let mut evaluated = false;
        let err = parse("~~~")
            .with_context(|| {
                evaluated = true;
                "this should be evaluated"
            })
            .unwrap_err();

        assert!(evaluated, "context must be evaluated on Err");
        assert!(err.to_string().contains("this should be evaluated"));
    }

    #[test]
    fn test_with_context_closure_captures() {
        let filename = "model.xml";
        let err = parse("2 +")
            .with_context(|| format!("in file {filename}"))
            .unwrap_err();
        assert!(err.to_string().contains("model.xml"));
    }

    // ==================== error chain tests ====================

    #[test]
    fn test_source_chain_reaches_parse_error() {
        use std::error::Error;

        let err = parse("2 +")
            .context("inner")
            .context("outer")
            .unwrap_err();

        let mut depth = 0;
        let mut current: &dyn Error = &err;
        while let Some(next) = current.source() {
            current = next;
            depth += 1;
        }
        // Two context frames plus the converted parse error.
        assert!(depth >= 2, "expected a chained source, got depth {depth}");
    }

    #[test]
    fn test_nested_function_context() {
        fn inner() -> MexlResult<mexl_core::Expr> {
            parse("@").context("in inner layer")
        }

        fn outer() -> MexlResult<mexl_core::Expr> {
            inner().context("in outer layer")
        }

        let rendered = outer().unwrap_err().to_string();
        assert!(rendered.starts_with("in outer layer:"));
        assert!(rendered.contains("in inner layer"));
    }

    #[test]
    fn test_unicode_in_context() {
        let err = parse("2 +").context("モデル読み込み").unwrap_err();
        assert!(err.to_string().contains("モデル読み込み"));
    }
}
