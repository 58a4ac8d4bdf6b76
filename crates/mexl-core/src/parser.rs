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

//! Recursive-descent parser for the infix notation.
//!
//! Binding strength, loosest first:
//!
//! 1. `||` (n-ary, a run flattens into one disjunction)
//! 2. `&&` (n-ary, same flattening)
//! 3. prefix `!`
//! 4. `<` `<=` `>` `>=` `==` `!=` (left-associative; the greater forms are
//!    stored operand-swapped as their less-family duals)
//! 5. `+` `-` (left-associative, a run flattens into one n-ary sum)
//! 6. `*` `/` `%` (left-associative, `*` runs flatten)
//! 7. loose prefix sign: `-x^2` negates the whole power
//! 8. `^` (right-associative; a sign directly after `^` binds to the
//!    exponent alone, so `2^-3*2` is `(2^-3)*2`)
//! 9. literals, names, calls and parenthesized groups
//!
//! Parentheses restart the whole ladder, which is also what keeps an
//! explicitly grouped connective as a nested operand instead of merging it
//! into the surrounding run.

use crate::error::{ParseError, ParseResult};
use crate::expr::{self, Expr};
use crate::lex::{tokenize, Spanned, Token};
use crate::table::{CONSTANTS, FUNCTIONS};

/// Knobs for [`parse_with_options`].
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Reject numeric literals as direct operands of `||`, `&&` and `!`.
    /// Off by default: the notation traditionally lets `1 && x` through
    /// and leaves the interpretation to the consumer.
    pub strict_booleans: bool,
    /// Maximum nesting depth before parsing aborts. Bounds recursion on
    /// adversarial inputs such as ten thousand opening parentheses.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict_booleans: false,
            max_depth: 255,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle rejection of numeric literals in boolean positions.
    pub fn with_strict_booleans(mut self, strict: bool) -> Self {
        self.strict_booleans = strict;
        self
    }

    /// Override the nesting depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Parse an infix expression with default options.
pub fn parse(input: &str) -> ParseResult<Expr> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse an infix expression. The whole input must be consumed: trailing
/// tokens after a complete expression are an error, which is what rejects
/// forms like `12x` and `(2)(3)` that tokenize but juxtapose operands.
pub fn parse_with_options(input: &str, options: &ParseOptions) -> ParseResult<Expr> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        options,
    };
    let expr = parser.parse_expr(0)?;
    parser.expect_end()?;
    Ok(expr)
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    options: &'a ParseOptions,
}

impl<'a> Parser<'a> {
    fn current(&self) -> &Spanned {
        match self.tokens.get(self.pos) {
            Some(spanned) => spanned,
            // The stream always ends with an unconsumed End token.
            None => &self.tokens[self.tokens.len() - 1],
        }
    }

    fn offset(&self) -> usize {
        self.current().offset
    }

    fn eat(&mut self, token: &Token) -> bool {
        if &self.current().token == token {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_end(&self) -> ParseResult<()> {
        let current = self.current();
        if current.token == Token::End {
            Ok(())
        } else {
            Err(ParseError::unexpected(
                current.token.describe(),
                current.offset,
            ))
        }
    }

    fn check_depth(&self, depth: usize) -> ParseResult<()> {
        if depth > self.options.max_depth {
            Err(ParseError::new(
                "expression nesting exceeds the depth limit".to_string(),
                self.offset(),
            ))
        } else {
            Ok(())
        }
    }

    fn parse_expr(&mut self, depth: usize) -> ParseResult<Expr> {
        self.check_depth(depth)?;
        self.parse_or(depth)
    }

    fn parse_or(&mut self, depth: usize) -> ParseResult<Expr> {
        let first_offset = self.offset();
        let first = self.parse_and(depth)?;
        if self.current().token != Token::Or {
            return Ok(first);
        }
        let mut offsets = vec![first_offset];
        let mut operands = vec![first];
        while self.eat(&Token::Or) {
            offsets.push(self.offset());
            operands.push(self.parse_and(depth)?);
        }
        self.check_boolean_operands(&operands, &offsets)?;
        Ok(expr::or(operands))
    }

    fn parse_and(&mut self, depth: usize) -> ParseResult<Expr> {
        let first_offset = self.offset();
        let first = self.parse_not(depth)?;
        if self.current().token != Token::And {
            return Ok(first);
        }
        let mut offsets = vec![first_offset];
        let mut operands = vec![first];
        while self.eat(&Token::And) {
            offsets.push(self.offset());
            operands.push(self.parse_not(depth)?);
        }
        self.check_boolean_operands(&operands, &offsets)?;
        Ok(expr::and(operands))
    }

    fn parse_not(&mut self, depth: usize) -> ParseResult<Expr> {
        self.check_depth(depth)?;
        if self.eat(&Token::Not) {
            let operand_offset = self.offset();
            let operand = self.parse_not(depth + 1)?;
            if self.options.strict_booleans && operand.is_numeric_literal() {
                return Err(ParseError::new(
                    "numeric literal used as a boolean operand".to_string(),
                    operand_offset,
                ));
            }
            Ok(expr::not(operand))
        } else {
            self.parse_relational(depth)
        }
    }

    fn parse_relational(&mut self, depth: usize) -> ParseResult<Expr> {
        let mut left = self.parse_additive(depth)?;
        loop {
            let op = self.current().token.clone();
            let build: fn(Expr, Expr) -> Expr = match op {
                Token::Lt => expr::lt,
                Token::Le => expr::le,
                // The greater forms swap operands into their less-family
                // duals instead of getting nodes of their own.
                Token::Gt => |a, b| expr::lt(b, a),
                Token::Ge => |a, b| expr::le(b, a),
                Token::EqEq => expr::eq,
                Token::Ne => expr::ne,
                _ => return Ok(left),
            };
            self.pos += 1;
            let right = self.parse_additive(depth)?;
            left = build(left, right);
        }
    }

    fn parse_additive(&mut self, depth: usize) -> ParseResult<Expr> {
        let mut left = self.parse_multiplicative(depth)?;
        loop {
            if self.eat(&Token::Plus) {
                let right = self.parse_multiplicative(depth)?;
                left = expr::add(vec![left, right]);
            } else if self.eat(&Token::Minus) {
                let right = self.parse_multiplicative(depth)?;
                left = expr::sub(left, right);
            } else {
                return Ok(left);
            }
        }
    }

    fn parse_multiplicative(&mut self, depth: usize) -> ParseResult<Expr> {
        let mut left = self.parse_signed(depth)?;
        loop {
            if self.eat(&Token::Star) {
                let right = self.parse_signed(depth)?;
                left = expr::mul(vec![left, right]);
            } else if self.eat(&Token::Slash) {
                let right = self.parse_signed(depth)?;
                left = expr::div(left, right);
            } else if self.eat(&Token::Percent) {
                let right = self.parse_signed(depth)?;
                left = expr::rem(left, right);
            } else {
                return Ok(left);
            }
        }
    }

    /// The loose prefix sign: binds below `^`, so `-1^2` negates the power.
    fn parse_signed(&mut self, depth: usize) -> ParseResult<Expr> {
        self.check_depth(depth)?;
        if self.eat(&Token::Minus) {
            Ok(expr::neg(self.parse_signed(depth + 1)?))
        } else if self.eat(&Token::Plus) {
            self.parse_signed(depth + 1)
        } else {
            self.parse_power(depth)
        }
    }

    fn parse_power(&mut self, depth: usize) -> ParseResult<Expr> {
        let base = self.parse_primary(depth)?;
        if self.eat(&Token::Caret) {
            let exponent = self.parse_exponent(depth + 1)?;
            Ok(expr::pow(base, exponent))
        } else {
            Ok(base)
        }
    }

    /// The tight exponent sign: directly after `^` a sign binds to the
    /// exponent alone (`2^-3*2` is `(2^-3)*2`), and the tail stays
    /// right-associative (`a^b^c` is `a^(b^c)`).
    fn parse_exponent(&mut self, depth: usize) -> ParseResult<Expr> {
        self.check_depth(depth)?;
        if self.eat(&Token::Minus) {
            Ok(expr::neg(self.parse_exponent(depth + 1)?))
        } else if self.eat(&Token::Plus) {
            self.parse_exponent(depth + 1)
        } else {
            self.parse_power(depth)
        }
    }

    fn parse_primary(&mut self, depth: usize) -> ParseResult<Expr> {
        let Spanned { token, offset } = self.current().clone();
        match token {
            Token::Integer(value) => {
                self.pos += 1;
                Ok(Expr::Integer(value))
            }
            Token::Real(value) => {
                self.pos += 1;
                Ok(Expr::Real(value))
            }
            Token::Ident(name) => {
                self.pos += 1;
                if self.eat(&Token::LParen) {
                    let args = self.parse_args(depth)?;
                    self.dispatch_call(&name, args, offset)
                } else {
                    let lower = name.to_ascii_lowercase();
                    match CONSTANTS.get(lower.as_str()) {
                        Some(entry) => Ok(entry.build()),
                        None => Ok(expr::symbol(name)),
                    }
                }
            }
            Token::LParen => {
                self.pos += 1;
                let inner = self.parse_expr(depth + 1)?;
                self.expect_rparen()?;
                Ok(inner)
            }
            Token::End => Err(ParseError::at_end("an expression", offset)),
            other => Err(ParseError::expected(
                "an expression",
                other.describe(),
                offset,
            )),
        }
    }

    /// Comma-separated argument list after a consumed `(`. Empty lists are
    /// allowed here; per-function arity is enforced by dispatch.
    fn parse_args(&mut self, depth: usize) -> ParseResult<Vec<Expr>> {
        let mut args = Vec::new();
        if self.eat(&Token::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr(depth + 1)?);
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        self.expect_rparen()?;
        Ok(args)
    }

    fn expect_rparen(&mut self) -> ParseResult<()> {
        if self.eat(&Token::RParen) {
            Ok(())
        } else {
            let current = self.current();
            if current.token == Token::End {
                Err(ParseError::at_end("`)`", current.offset))
            } else {
                Err(ParseError::expected(
                    "`)`",
                    current.token.describe(),
                    current.offset,
                ))
            }
        }
    }

    /// Lower a call through the recognized-name table. Unrecognized names
    /// with arguments stay generic applications under their original
    /// spelling; with no arguments there is nothing they could denote.
    fn dispatch_call(&self, name: &str, args: Vec<Expr>, offset: usize) -> ParseResult<Expr> {
        let lower = name.to_ascii_lowercase();
        if let Some(entry) = FUNCTIONS.get(lower.as_str()) {
            if !entry.arity.accepts(args.len()) {
                return Err(ParseError::new(
                    format!(
                        "`{lower}` expects {}, got {}",
                        entry.arity.describe(),
                        args.len()
                    ),
                    offset,
                ));
            }
            return entry.builder.apply(args).ok_or_else(|| {
                ParseError::new(format!("`{lower}` cannot take these arguments"), offset)
            });
        }
        if args.is_empty() {
            return Err(ParseError::new(
                format!("unknown function `{name}` called with no arguments"),
                offset,
            ));
        }
        Ok(expr::call(name, args))
    }

    fn check_boolean_operands(&self, operands: &[Expr], offsets: &[usize]) -> ParseResult<()> {
        if !self.options.strict_booleans {
            return Ok(());
        }
        for (operand, offset) in operands.iter().zip(offsets) {
            if operand.is_numeric_literal() {
                return Err(ParseError::new(
                    "numeric literal used as a boolean operand".to_string(),
                    *offset,
                ));
            }
        }
        Ok(())
    }
}
