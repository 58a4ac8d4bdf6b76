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

//! Error types for MathML conversion.

use mexl_core::ParseError;
use thiserror::Error;

/// Errors that can occur while reading or writing Content MathML.
#[derive(Debug, Error)]
pub enum MathmlError {
    /// The input is not well-formed XML.
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The document is well-formed XML but does not describe an expression.
    #[error("invalid MathML structure: {0}")]
    Structure(String),

    /// The infix rendering of the markup was rejected by the core parser.
    ///
    /// Markup that reaches this stage named an operator or function the
    /// grammar does not accept, or applied one with the wrong operand count.
    #[error("MathML content error: {0}")]
    Content(#[from] ParseError),

    /// The XML writer failed.
    #[error("XML write error: {0}")]
    Write(#[from] quick_xml::Error),

    /// The XML writer produced bytes that are not valid UTF-8.
    #[error("XML output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result alias for MathML conversion.
pub type MathmlResult<T> = Result<T, MathmlError>;

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== MathmlError tests ====================

    #[test]
    fn test_structure_error_display() {
        let err = MathmlError::Structure("unexpected <bvar> element".to_string());
        assert_eq!(
            err.to_string(),
            "invalid MathML structure: unexpected <bvar> element"
        );
    }

    #[test]
    fn test_content_error_wraps_parse_error() {
        let parse_err = ParseError::new("unrecognized identifier 'bogus'", 4);
        let err = MathmlError::from(parse_err);
        assert!(err.to_string().starts_with("MathML content error:"));
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_xml_error_from_malformed_document() {
        let result = roxmltree::Document::parse("<apply><plus/>");
        let err = MathmlError::from(result.unwrap_err());
        assert!(err.to_string().starts_with("malformed XML:"));
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let parse_err = ParseError::new("trailing input", 9);
        let err = MathmlError::from(parse_err);
        assert!(err.source().is_some());
    }
}
