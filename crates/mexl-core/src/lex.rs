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

//! Tokenizer for the infix notation.
//!
//! The lexer decides exactness: a bare digit run becomes an arbitrary
//! precision [`Token::Integer`], while any decimal point or exponent makes
//! the literal a [`Token::Real`] even when the value happens to be whole
//! (`2.` and `1e5` are floats, `12345` is exact at any length).
//!
//! The lexer is permissive about adjacency: `12x` tokenizes as the integer
//! `12` followed by the identifier `x`, and the parser rejects the missing
//! operator. A lone `&` or `|` is accepted as its doubled form.

use num_bigint::BigInt;

use crate::error::{ParseError, ParseResult};
use crate::number::{parse_exact_literal, parse_float_literal};

/// A single lexeme of the infix notation.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Exact integer literal (no point, no exponent).
    Integer(BigInt),
    /// Floating literal.
    Real(f64),
    /// Identifier: symbol, constant, boolean or function name.
    Ident(String),
    /// `||` or `|`.
    Or,
    /// `&&` or `&`.
    And,
    /// `!`.
    Not,
    /// `<`.
    Lt,
    /// `<=`.
    Le,
    /// `>`.
    Gt,
    /// `>=`.
    Ge,
    /// `==`.
    EqEq,
    /// `!=`.
    Ne,
    /// `+`.
    Plus,
    /// `-`.
    Minus,
    /// `*`.
    Star,
    /// `/`.
    Slash,
    /// `%`.
    Percent,
    /// `^`.
    Caret,
    /// `(`.
    LParen,
    /// `)`.
    RParen,
    /// `,`.
    Comma,
    /// Virtual end-of-input token, always last in the stream.
    End,
}

impl Token {
    /// Lexeme rendering used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Integer(i) => i.to_string(),
            Token::Real(f) => crate::number::format_real(*f),
            Token::Ident(name) => name.clone(),
            Token::Or => "||".to_string(),
            Token::And => "&&".to_string(),
            Token::Not => "!".to_string(),
            Token::Lt => "<".to_string(),
            Token::Le => "<=".to_string(),
            Token::Gt => ">".to_string(),
            Token::Ge => ">=".to_string(),
            Token::EqEq => "==".to_string(),
            Token::Ne => "!=".to_string(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Percent => "%".to_string(),
            Token::Caret => "^".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::Comma => ",".to_string(),
            Token::End => "end of input".to_string(),
        }
    }
}

/// A token with the byte offset where its lexeme starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub offset: usize,
}

/// Tokenize an input string. The returned stream always ends with a single
/// [`Token::End`] positioned at the input length.
pub fn tokenize(input: &str) -> ParseResult<Vec<Spanned>> {
    let mut scanner = Scanner::new(input);
    let mut tokens = Vec::new();
    loop {
        scanner.skip_whitespace();
        let offset = scanner.offset();
        let Some(c) = scanner.peek() else { break };
        let token = if c.is_ascii_digit() {
            scanner.lex_number(offset)?
        } else if c == '.' && scanner.peek_second().is_some_and(|d| d.is_ascii_digit()) {
            scanner.lex_number(offset)?
        } else if c.is_ascii_alphabetic() || c == '_' {
            scanner.lex_ident(offset)
        } else {
            scanner.lex_operator(offset)?
        };
        tokens.push(Spanned { token, offset });
    }
    tokens.push(Spanned {
        token: Token::End,
        offset: input.len(),
    });
    Ok(tokens)
}

struct Scanner<'a> {
    input: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().collect(),
            pos: 0,
        }
    }

    /// Byte offset of the next unconsumed character.
    fn offset(&self) -> usize {
        match self.chars.get(self.pos) {
            Some((offset, _)) => *offset,
            None => self.input.len(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|(_, c)| *c)
    }

    fn peek_second(&self) -> Option<char> {
        self.chars.get(self.pos + 1).map(|(_, c)| *c)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    /// Consume the next character when it matches, reporting success.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn lex_number(&mut self, start: usize) -> ParseResult<Token> {
        let mut exact = true;

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.eat('.') {
            exact = false;
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        // An exponent needs at least one digit; otherwise the `e` is left
        // for the identifier lexer (`2e` is the integer 2 then the symbol e).
        if self.peek() == Some('e') || self.peek() == Some('E') {
            let saved = self.pos;
            self.pos += 1;
            if self.peek() == Some('+') || self.peek() == Some('-') {
                self.pos += 1;
            }
            if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                exact = false;
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.pos += 1;
                }
            } else {
                self.pos = saved;
            }
        }

        // Nothing in the grammar puts a point directly after a number, so a
        // second `.` here is a malformed literal such as `2..33`.
        if self.peek() == Some('.') {
            let lexeme = &self.input[start..self.offset()];
            return Err(ParseError::new(
                format!("numeric literal `{lexeme}` has a second decimal point"),
                start,
            ));
        }

        let lexeme = &self.input[start..self.offset()];
        if exact {
            match parse_exact_literal(lexeme) {
                Some(value) => Ok(Token::Integer(value)),
                None => Err(ParseError::new(
                    format!("invalid integer literal `{lexeme}`"),
                    start,
                )),
            }
        } else {
            match parse_float_literal(lexeme) {
                Some(value) => Ok(Token::Real(value)),
                None => Err(ParseError::new(
                    format!("numeric literal `{lexeme}` is out of range"),
                    start,
                )),
            }
        }
    }

    fn lex_ident(&mut self, start: usize) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.pos += 1;
        }
        Token::Ident(self.input[start..self.offset()].to_string())
    }

    fn lex_operator(&mut self, start: usize) -> ParseResult<Token> {
        let Some(c) = self.advance() else {
            return Err(ParseError::at_end("a token", start));
        };
        let token = match c {
            '&' => {
                self.eat('&');
                Token::And
            }
            '|' => {
                self.eat('|');
                Token::Or
            }
            '=' => {
                if self.eat('=') {
                    Token::EqEq
                } else {
                    return Err(ParseError::new(
                        "unexpected character `=` (use `==` for equality)".to_string(),
                        start,
                    ));
                }
            }
            '!' => {
                if self.eat('=') {
                    Token::Ne
                } else {
                    Token::Not
                }
            }
            '<' => {
                if self.eat('=') {
                    Token::Le
                } else {
                    Token::Lt
                }
            }
            '>' => {
                if self.eat('=') {
                    Token::Ge
                } else {
                    Token::Gt
                }
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '%' => Token::Percent,
            '^' => Token::Caret,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            other => {
                return Err(ParseError::new(
                    format!("unexpected character `{other}`"),
                    start,
                ))
            }
        };
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    // ==================== Literal tests ====================

    #[test]
    fn test_bare_digits_are_exact() {
        let tokens = kinds("12345678901234567890123");
        assert_eq!(
            tokens,
            vec![
                Token::Integer("12345678901234567890123".parse().unwrap()),
                Token::End
            ]
        );
    }

    #[test]
    fn test_point_or_exponent_forces_float() {
        assert_eq!(kinds("2.")[0], Token::Real(2.0));
        assert_eq!(kinds(".5")[0], Token::Real(0.5));
        assert_eq!(kinds("1e5")[0], Token::Real(1e5));
        assert_eq!(kinds("1.2E-3")[0], Token::Real(1.2e-3));
        assert_eq!(kinds("2.e2")[0], Token::Real(200.0));
    }

    #[test]
    fn test_exponent_without_digits_is_not_consumed() {
        assert_eq!(
            kinds("2e"),
            vec![
                Token::Integer(2.into()),
                Token::Ident("e".to_string()),
                Token::End
            ]
        );
    }

    #[test]
    fn test_adjacent_number_and_ident_both_lex() {
        assert_eq!(
            kinds("12x"),
            vec![
                Token::Integer(12.into()),
                Token::Ident("x".to_string()),
                Token::End
            ]
        );
    }

    #[test]
    fn test_double_decimal_point_is_an_error() {
        let err = tokenize("2..33").unwrap_err();
        assert!(err.message.contains("second decimal point"));
        assert_eq!(err.position, 0);
    }

    #[test]
    fn test_overflowing_float_is_an_error() {
        let err = tokenize("1e999").unwrap_err();
        assert!(err.message.contains("out of range"));
    }

    // ==================== Operator tests ====================

    #[test]
    fn test_single_and_double_connectives() {
        assert_eq!(kinds("a && b"), kinds("a & b"));
        assert_eq!(kinds("a || b"), kinds("a | b"));
    }

    #[test]
    fn test_comparison_operators() {
        assert_eq!(
            kinds("a <= b != c"),
            vec![
                Token::Ident("a".to_string()),
                Token::Le,
                Token::Ident("b".to_string()),
                Token::Ne,
                Token::Ident("c".to_string()),
                Token::End
            ]
        );
    }

    #[test]
    fn test_lone_equals_is_rejected() {
        let err = tokenize("a = b").unwrap_err();
        assert_eq!(err.position, 2);
        assert!(err.message.contains("=="));
    }

    #[test]
    fn test_unknown_character_reports_offset() {
        let err = tokenize("x + #").unwrap_err();
        assert_eq!(err.position, 4);
        assert!(err.message.contains('#'));
    }

    #[test]
    fn test_end_token_sits_at_input_length() {
        let tokens = tokenize("x + y").unwrap();
        let last = tokens.last().unwrap();
        assert_eq!(last.token, Token::End);
        assert_eq!(last.offset, 5);
    }

    #[test]
    fn test_whitespace_is_insignificant() {
        assert_eq!(kinds("x\t+\n y"), kinds("x+y"));
    }
}
