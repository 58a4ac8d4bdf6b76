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

//! Error types for MEXL parsing and evaluation.
//!
//! Parsing has a single failure mode: a [`ParseError`] carrying a message, the
//! byte offset the failure was detected at, and (when one exists) the lexeme
//! that was found there. Errors propagate immediately: the parser performs no
//! recovery or speculative backtracking, so a failed parse never produces a
//! partial tree.
//!
//! Evaluation failures are described by [`EvalError`], raised by the exact
//! evaluator in [`crate::eval`] when an expression has no numeric value.

use thiserror::Error;

/// Error raised when infix input cannot be parsed.
///
/// Covers every rejection the grammar defines: malformed numeric literals,
/// unbalanced parentheses, adjacent primaries with no joining operator,
/// missing list elements between commas, trailing or dangling operators, an
/// operator where a primary was expected, zero-argument calls to unrecognized
/// names, and recursion-depth exhaustion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at byte {position}: {message}")]
pub struct ParseError {
    /// Human-readable description of the violation.
    pub message: String,
    /// Byte offset into the input where the violation was detected.
    pub position: usize,
    /// The offending lexeme, when the failure is tied to a concrete token.
    pub found: Option<String>,
}

impl ParseError {
    /// Creates a parse error with a message and byte position.
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
            found: None,
        }
    }

    /// Attaches the offending lexeme to an existing error.
    pub fn with_found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    /// Convenience constructor: an unexpected token appeared.
    pub fn unexpected(found: impl Into<String>, position: usize) -> Self {
        let found = found.into();
        Self {
            message: format!("unexpected token `{}`", found),
            position,
            found: Some(found),
        }
    }

    /// Convenience constructor: something specific was expected but a
    /// different token was found.
    pub fn expected(what: &str, found: impl Into<String>, position: usize) -> Self {
        let found = found.into();
        Self {
            message: format!("expected {}, found `{}`", what, found),
            position,
            found: Some(found),
        }
    }

    /// Convenience constructor: input ended while something was expected.
    pub fn at_end(what: &str, position: usize) -> Self {
        Self {
            message: format!("unexpected end of input, expected {}", what),
            position,
            found: None,
        }
    }
}

/// Result alias for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Error raised when an expression cannot be evaluated to a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Division or remainder by an exact zero.
    #[error("division by zero")]
    DivisionByZero,
    /// The expression contains a term with no numeric value (a free symbol,
    /// a boolean, a comparison, ...).
    #[error("expression contains non-numeric term `{0}`")]
    NonNumeric(String),
    /// A call to a function the evaluator does not cover.
    #[error("cannot evaluate call to `{0}`")]
    UnsupportedFunction(String),
    /// The argument lies outside the function's numeric domain.
    #[error("domain error in `{0}`")]
    Domain(String),
    /// An exact power whose exponent does not fit the supported range.
    #[error("exponent out of range")]
    ExponentOverflow,
}

/// Result alias for evaluation operations.
pub type EvalResult<T> = Result<T, EvalError>;
