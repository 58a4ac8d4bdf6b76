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

//! Fuzz target for the parse/print round trip.
//!
//! Every expression that parses must survive canonical printing: the printed
//! text has to parse again, and the reparsed tree has to equal the original.
//! This fuzzer hunts for inputs that break that contract, which is how
//! precedence mistakes in the writer (a dropped parenthesis, a sign glued to
//! the wrong operand, a literal reformatted into a different token kind)
//! show up as concrete counterexamples instead of field reports.
//!
//! Both render modes are checked, since compact output removes the optional
//! whitespace that can mask adjacency bugs between a sign and a literal.
//!
//! # Running the Fuzzer
//!
//! ```bash
//! # Run the fuzzer (from the mexl-core directory)
//! cargo fuzz run fuzz_roundtrip
//!
//! # Seed with realistic rate laws for faster coverage
//! cargo fuzz run fuzz_roundtrip corpus/rate_laws
//! ```
//!
//! # Expected Behavior
//!
//! - Canonical output of any parsed expression must itself parse
//! - Reparsing canonical output must reproduce the identical tree
//! - The same holds in compact mode

use libfuzzer_sys::fuzz_target;
use mexl_c14n::{to_infix, to_infix_with_config, CanonicalConfig};
use mexl_core::parse;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(expr) = parse(text) else {
        return;
    };

    let canonical = to_infix(&expr);
    match parse(&canonical) {
        Ok(reparsed) => assert_eq!(
            expr, reparsed,
            "canonical text {canonical:?} reparsed to a different tree"
        ),
        Err(err) => panic!("canonical text {canonical:?} failed to parse: {err}"),
    }

    let compact = to_infix_with_config(&expr, &CanonicalConfig::new().with_compact(true));
    match parse(&compact) {
        Ok(reparsed) => assert_eq!(
            expr, reparsed,
            "compact text {compact:?} reparsed to a different tree"
        ),
        Err(err) => panic!("compact text {compact:?} failed to parse: {err}"),
    }
});
