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

//! Property-based tests for exact numeric behavior.
//!
//! These tests use proptest to cross-check the parse → eval pipeline against
//! host arithmetic over wide input ranges: integer literals of any magnitude
//! survive parsing exactly, sums and powers agree with `BigInt` results, the
//! truncating remainder agrees with the host `%` on every sign combination,
//! and a single floating operand downgrades an otherwise exact computation.

use mexl_core::{eval, expr, parse, Number};
use num_bigint::BigInt;
use num_rational::BigRational;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Property: every decimal integer literal parses to exactly that value,
    /// sign included, with no magnitude limit below `i128`.
    #[test]
    fn prop_integer_literals_parse_exactly(n in any::<i128>()) {
        let text = n.to_string();
        let parsed = parse(&text);
        prop_assert!(parsed.is_ok(), "failed to parse `{}`: {:?}", text, parsed);
        prop_assert_eq!(parsed.unwrap(), expr::integer(n));
    }

    /// Property: a sum of integer terms evaluates to the exact big-integer
    /// total, whatever the signs.
    #[test]
    fn prop_integer_sums_stay_exact(terms in prop::collection::vec(any::<i64>(), 2..6)) {
        let text = terms
            .iter()
            .map(|t| format!("({t})"))
            .collect::<Vec<_>>()
            .join(" + ");
        let total: BigInt = terms.iter().map(|&t| BigInt::from(t)).sum();
        let value = eval(&parse(&text).unwrap()).unwrap();
        prop_assert_eq!(value, Number::Integer(total), "mismatch for `{}`", text);
    }

    /// Property: `%` matches the host truncating remainder on every sign
    /// combination of the operands.
    #[test]
    fn prop_remainder_matches_host(n in any::<i32>(), d in any::<i32>()) {
        prop_assume!(d != 0);
        let text = format!("({n}) % ({d})");
        let expected = i64::from(n) % i64::from(d);
        let value = eval(&parse(&text).unwrap()).unwrap();
        prop_assert_eq!(value, Number::from(expected), "mismatch for `{}`", text);
    }

    /// Property: squaring through the parser agrees with host arithmetic.
    #[test]
    fn prop_squares_match_host(n in any::<i32>()) {
        let text = format!("({n})^2");
        let expected = i64::from(n) * i64::from(n);
        let value = eval(&parse(&text).unwrap()).unwrap();
        prop_assert_eq!(value, Number::from(expected), "mismatch for `{}`", text);
    }

    /// Property: an integer quotient folds to the reduced rational at parse
    /// time and evaluates to the same exact value.
    #[test]
    fn prop_quotients_reduce_exactly(n in any::<i64>(), d in 1..100_000i64) {
        let text = format!("({n})/({d})");
        let parsed = parse(&text).unwrap();
        prop_assert_eq!(&parsed, &expr::rational(n, d));
        let value = eval(&parsed).unwrap();
        let exact = BigRational::new(BigInt::from(n), BigInt::from(d));
        prop_assert_eq!(value, Number::from_rational(exact), "mismatch for `{}`", text);
    }

    /// Property: one floating operand downgrades the whole computation to a
    /// floating result, by the same IEEE operation the host performs.
    #[test]
    fn prop_floating_operand_downgrades(n in any::<i32>()) {
        let text = format!("({n}) + 0.5");
        let value = eval(&parse(&text).unwrap()).unwrap();
        prop_assert_eq!(value, Number::Real(f64::from(n) + 0.5), "mismatch for `{}`", text);
    }

    /// Property: the parser returns on every printable-ASCII input instead
    /// of panicking, whether or not the input is well formed.
    #[test]
    fn prop_parser_is_total(input in "[ -~]{0,48}") {
        let _ = parse(&input);
    }
}
