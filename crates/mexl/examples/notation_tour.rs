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

//! Tour of the two MEXL notations over one expression tree.
//!
//! This example parses an infix rate law, renders it canonically in both
//! layouts, evaluates a closed formula exactly, and crosses over to
//! Content MathML and back.
//!
//! Run with: cargo run --example notation_tour

use mexl::mathml::{parse_mathml, to_mathml_with_config, ToMathmlConfig};
use mexl::{eval, eval_f64, parse, to_infix, to_infix_with_config, CanonicalConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("MEXL Notation Tour\n");

    // Example 1: Parse and render canonically
    println!("1. Canonical Rendering:");
    let law = parse("Vmax * S1 ^ n / ( Kh ^ n + S1 ^ n )")?;
    println!("   Input:     Vmax * S1 ^ n / ( Kh ^ n + S1 ^ n )");
    println!("   Canonical: {}", to_infix(&law));
    let compact = CanonicalConfig::new().with_compact(true);
    println!("   Compact:   {}\n", to_infix_with_config(&law, &compact));

    // Example 2: Exact evaluation
    println!("2. Exact Evaluation:");
    let closed = parse("1/3 + 1/6 + 2^-3")?;
    println!("   1/3 + 1/6 + 2^-3 = {} (exact)", eval(&closed)?);
    println!("   as a double      = {}\n", eval_f64(&closed)?);

    // Example 3: Export to Content MathML
    println!("3. Content MathML Export:");
    let pretty = ToMathmlConfig {
        pretty: true,
        ..ToMathmlConfig::default()
    };
    let xml = to_mathml_with_config(&law, &pretty)?;
    println!("{}\n", xml);

    // Example 4: Import and round trip
    println!("4. Round Trip:");
    let back = parse_mathml(&xml)?;
    println!("   Reimported: {}", to_infix(&back));
    assert_eq!(law, back, "MathML round trip must reproduce the tree");
    println!("   Trees are identical\n");

    // Example 5: Unknown names survive as generic calls
    println!("5. Generic Calls:");
    let custom = parse("michaelis(S, Km) + sin(x)")?;
    println!("   {}", to_infix(&custom));
    let xml = to_mathml_with_config(&custom, &ToMathmlConfig::default())?;
    println!("   {}", xml);
    assert_eq!(parse_mathml(&xml)?, custom);

    Ok(())
}
