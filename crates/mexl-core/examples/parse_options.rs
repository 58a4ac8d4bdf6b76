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

//! Example demonstrating parser configuration.
//!
//! This example shows how to configure the recursion-depth limit and the
//! strict boolean-position check when parsing formulas from sources with
//! different trust levels.
//!
//! Run with: cargo run --example parse_options

use mexl_core::{eval, parse, parse_with_options, ParseOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("MEXL Parse Options Example\n");

    // Example 1: Default options (depth limit 255, permissive booleans)
    println!("1. Default Options:");
    let tree = parse("k1 * S1 / (Km + S1)")?;
    println!("   Parsed a Michaelis-Menten rate law: {:?}\n", tree);

    // Example 2: Shallow depth limit for untrusted input
    println!("2. Shallow Depth Limit for Untrusted Input:");
    let mut hostile = String::new();
    for _ in 0..64 {
        hostile.push('(');
    }
    hostile.push('x');
    for _ in 0..64 {
        hostile.push(')');
    }

    let shallow = ParseOptions::new().with_max_depth(16);
    match parse_with_options(&hostile, &shallow) {
        Ok(_) => println!("   Unexpected success!\n"),
        Err(e) => println!("   Expected error (nesting too deep): {}\n", e),
    }

    // The same input is fine under the default limit.
    match parse(&hostile) {
        Ok(_) => println!("   Default limit accepts 64 nested parentheses\n"),
        Err(e) => println!("   Error: {}\n", e),
    }

    // Example 3: Strict boolean positions
    println!("3. Strict Boolean Positions:");
    let strict = ParseOptions::new().with_strict_booleans(true);

    // A numeric literal has no truth value, so strict mode rejects it as
    // a connective operand.
    match parse_with_options("1 && x", &strict) {
        Ok(_) => println!("   Unexpected success!"),
        Err(e) => println!("   Strict mode:  {}", e),
    }

    // The default defers typing to the engine and accepts the same text.
    match parse("1 && x") {
        Ok(tree) => println!("   Default mode: parsed as {:?}\n", tree),
        Err(e) => println!("   Error: {}\n", e),
    }

    // Example 4: Error positions are byte offsets into the input
    println!("4. Error Positions:");
    let broken = "k1 * (S1 + ";
    match parse(broken) {
        Ok(_) => println!("   Unexpected success!"),
        Err(e) => {
            println!("   Input:  {:?}", broken);
            println!("   Error:  {}", e);
            println!("   Offset: byte {} of {}\n", e.position, broken.len());
        }
    }

    // Example 5: Exact evaluation of closed formulas
    println!("5. Exact Evaluation:");
    let closed = parse("1/3 + 1/6")?;
    println!("   1/3 + 1/6 = {} (exact)", eval(&closed)?);
    let power = parse("2^-3 * 2")?;
    println!("   2^-3 * 2  = {} (exact)", eval(&power)?);

    Ok(())
}
