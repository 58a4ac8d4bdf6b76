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


#![no_main]

//! Fuzz target for the MEXL infix parser.
//!
//! This fuzzer tests the parser for crashes, panics, and memory safety issues
//! with arbitrary input data. It exercises the full parsing pipeline including:
//!
//! - Lexing (operators, identifiers, exact and floating numeric literals)
//! - The precedence ladder from boolean disjunction down to exponentiation
//! - Function-call lowering through the name registry
//! - Arity checking and argument rewrites
//! - Error handling with byte-offset positions
//!
//! # Security Testing
//!
//! The fuzzer specifically targets security-critical paths:
//!
//! - Nesting depth enforcement (stack safety under deep parentheses)
//! - Numeric literal range checks (overflowing exponents must error)
//! - Arbitrary-precision integer allocation from long digit runs
//! - Strict boolean-position validation
//!
//! # Running the Fuzzer
//!
//! ```bash
//! # Install cargo-fuzz if not already installed
//! cargo install cargo-fuzz
//!
//! # Run the fuzzer (from the mexl-core directory)
//! cargo fuzz run fuzz_parse
//!
//! # Run with specific options
//! cargo fuzz run fuzz_parse -- -max_len=65536 -max_total_time=300
//!
//! # Run on multiple cores
//! cargo fuzz run fuzz_parse -- -jobs=8
//! ```
//!
//! # Expected Behavior
//!
//! - The parser should never panic on any input
//! - All failures must surface as `ParseError` values
//! - Inputs deeper than the configured limit must be rejected, not overflow
//!   the stack
//! - Out-of-range numeric literals must be rejected, not become infinities

use libfuzzer_sys::fuzz_target;
use mexl_core::{parse, parse_with_options, ParseOptions};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Test 1: Parse with default options
    // This exercises the main parser path with production defaults
    let _ = parse(text);

    // Test 2: Parse with a very low depth limit
    // This helps find issues with the nesting guard firing mid-expression
    let shallow = ParseOptions::new().with_max_depth(8);
    let _ = parse_with_options(text, &shallow);

    // Test 3: Parse with strict boolean positions
    // This exercises the validation pass that rejects numeric operands in
    // logical connectives and piecewise conditions
    let strict = ParseOptions::new().with_strict_booleans(true);
    let _ = parse_with_options(text, &strict);
});
