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

//! Content MathML support for MEXL expression trees.
//!
//! This crate converts between the expression trees of [`mexl_core`] and the
//! Content MathML markup used by SBML and related model exchange formats.
//!
//! # Features
//!
//! - **Reading**: `<apply>` operator and function applications, typed `<cn>`
//!   literals (including `rational`, `e-notation` and `complex-cartesian`
//!   with `<sep/>`), `<ci>` identifiers, SBML `<csymbol>` definitions,
//!   nullary constant elements and `<piecewise>` branches.
//! - **Writing**: every tree the notation parsers produce renders to markup
//!   that reads back as an equal tree. Functions without a MathML element are
//!   written as `<csymbol>` applications.
//! - **One grammar**: the reader renders markup to infix text and reuses the
//!   core parser, so arity checking, literal exactness and name resolution
//!   behave identically across both notations.
//!
//! # Examples
//!
//! Reading markup:
//!
//! ```
//! use mexl_core::parse;
//! use mexl_mathml::parse_mathml;
//!
//! let tree = parse_mathml(
//!     "<math xmlns=\"http://www.w3.org/1998/Math/MathML\">\
//!      <apply><power/><ci>x</ci><cn type=\"integer\">2</cn></apply>\
//!      </math>",
//! )?;
//! assert_eq!(tree, parse("x^2")?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Writing markup:
//!
//! ```
//! use mexl_core::parse;
//! use mexl_mathml::{parse_mathml, to_mathml};
//!
//! let tree = parse("piecewise(x, x < 1, 0)")?;
//! let xml = to_mathml(&tree)?;
//! assert_eq!(parse_mathml(&xml)?, tree);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod from_mathml;
mod to_mathml;

pub use error::{MathmlError, MathmlResult};
pub use from_mathml::parse_mathml;
pub use to_mathml::{to_mathml, to_mathml_with_config, ToMathmlConfig, MATHML_NS};
