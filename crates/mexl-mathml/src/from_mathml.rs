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

//! Content MathML to expression-tree conversion.
//!
//! The reader does not build tree nodes from the markup directly. It walks
//! the document once and re-renders it as infix text: operator applies become
//! parenthesized operator runs, every other apply becomes a named call, and
//! number parts separated by `<sep/>` are joined with the separator their
//! `type` attribute selects. The rendered text is then handed to the core
//! parser, so both notations converge on a single grammar, one arity table
//! and one set of literal rules.

use mexl_core::{expr, parse, Expr};
use roxmltree::{Document, Node};

use crate::error::{MathmlError, MathmlResult};

/// Maximum element nesting depth.
const MAX_RECURSION_DEPTH: usize = 255;

/// Join token for call arguments and for the document root.
const COMMA_JOIN: &str = ", ";

/// Parse a Content MathML document or fragment into an expression tree.
///
/// The `<math>` wrapper is optional and its namespace is not enforced; a bare
/// `<apply>` or a single `<cn>` fragment is accepted as well. An empty
/// document, or markup with no expression content at all, parses to the
/// exact integer zero.
///
/// # Examples
///
/// ```
/// use mexl_mathml::parse_mathml;
/// use mexl_core::parse;
///
/// let tree = parse_mathml(
///     "<apply><plus/><ci>x</ci><cn type=\"integer\">2</cn></apply>",
/// )?;
/// assert_eq!(tree, parse("x + 2")?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_mathml(xml: &str) -> MathmlResult<Expr> {
    if xml.trim().is_empty() {
        return Ok(expr::integer(0));
    }
    let doc = Document::parse(xml)?;
    let mut emitter = InfixEmitter::new();
    emitter.walk(doc.root_element(), 0)?;
    if emitter.out.trim().is_empty() {
        return Ok(expr::integer(0));
    }
    Ok(parse(&emitter.out)?)
}

/// One open parenthesis level and the token that joins items inside it.
struct Level {
    join: &'static str,
    emitted: bool,
}

/// Streaming MathML-to-infix renderer.
///
/// `levels` carries one entry per open parenthesis; the root entry is never
/// popped. `sep` is the joiner the next `<sep/>` will emit, selected by the
/// `type` attribute of the enclosing `<cn>`.
struct InfixEmitter {
    out: String,
    levels: Vec<Level>,
    sep: &'static str,
}

impl InfixEmitter {
    fn new() -> Self {
        Self {
            out: String::new(),
            levels: vec![Level {
                join: COMMA_JOIN,
                emitted: false,
            }],
            sep: COMMA_JOIN,
        }
    }

    /// Emit the current level's join token ahead of a new item.
    fn begin_item(&mut self) {
        if let Some(level) = self.levels.last_mut() {
            if level.emitted {
                self.out.push_str(level.join);
            }
            level.emitted = true;
        }
    }

    fn emit_atom(&mut self, text: &str) {
        self.begin_item();
        self.out.push_str(text);
    }

    fn open_level(&mut self, prefix: &str, join: &'static str) {
        self.begin_item();
        self.out.push_str(prefix);
        self.levels.push(Level {
            join,
            emitted: false,
        });
    }

    fn close_level(&mut self) {
        self.out.push(')');
        if self.levels.len() > 1 {
            self.levels.pop();
        }
    }

    fn walk(&mut self, node: Node<'_, '_>, depth: usize) -> MathmlResult<()> {
        if depth > MAX_RECURSION_DEPTH {
            return Err(MathmlError::Structure(format!(
                "maximum nesting depth exceeded (limit: {MAX_RECURSION_DEPTH})"
            )));
        }

        if node.is_text() {
            if let Some(text) = node.text() {
                // Indentation between elements is not content.
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    self.emit_atom(trimmed);
                }
            }
            return Ok(());
        }
        if !node.is_element() {
            return Ok(());
        }

        match node.tag_name().name() {
            // Structural wrappers contribute no text of their own.
            "math" | "piece" | "otherwise" | "degree" | "logbase" => {
                self.walk_children(node, depth)?;
            }
            "apply" => {
                self.walk_children(node, depth)?;
                // The paren opened by the operator child closes with its apply.
                if first_element_child(node).map_or(false, opens_level) {
                    self.close_level();
                }
            }
            "cn" => self.walk_number(node, depth)?,
            "ci" => {
                if is_operator_position(node) {
                    self.open_level(&format!("{}(", element_text(node)), COMMA_JOIN);
                } else {
                    self.walk_children(node, depth)?;
                }
            }
            "csymbol" => {
                let label = csymbol_label(node);
                if is_operator_position(node) {
                    self.open_level(&format!("{label}("), COMMA_JOIN);
                } else {
                    self.emit_atom(&label);
                }
            }
            "sep" => {
                self.out.push_str(self.sep);
                if let Some(level) = self.levels.last_mut() {
                    level.emitted = false;
                }
            }
            name => {
                if let Some(token) = constant_token(name) {
                    self.emit_atom(token);
                } else if let Some(join) = join_operator(name) {
                    if name == "minus" && operand_count(node) == 1 {
                        self.open_level("-(", join);
                    } else {
                        self.open_level("(", join);
                    }
                    self.walk_children(node, depth)?;
                    if !is_operator_position(node) {
                        self.close_level();
                    }
                } else {
                    let canonical = renamed(name).unwrap_or(name);
                    self.open_level(&format!("{canonical}("), COMMA_JOIN);
                    self.walk_children(node, depth)?;
                    if !is_operator_position(node) {
                        self.close_level();
                    }
                }
            }
        }
        Ok(())
    }

    fn walk_children(&mut self, node: Node<'_, '_>, depth: usize) -> MathmlResult<()> {
        for child in node.children() {
            self.walk(child, depth + 1)?;
        }
        Ok(())
    }

    /// Render a `<cn>` literal.
    ///
    /// Single-part kinds emit their text as one token; `e-notation` joins the
    /// mantissa and exponent into one token through `<sep/>`. Rational and
    /// complex-cartesian literals expand to a `/` or ` + I*` run, which gets
    /// its own parentheses so the literal binds as a unit wherever it appears.
    fn walk_number(&mut self, node: Node<'_, '_>, depth: usize) -> MathmlResult<()> {
        let kind = node.attribute("type");
        match kind {
            Some("rational") => self.sep = "/",
            Some("complex-cartesian") => self.sep = " + I*",
            Some("e-notation") => self.sep = "e",
            _ => {}
        }
        let multipart = matches!(kind, Some("rational") | Some("complex-cartesian"));
        if multipart {
            self.open_level("(", COMMA_JOIN);
        }
        self.walk_children(node, depth)?;
        if multipart {
            self.close_level();
        }
        Ok(())
    }
}

fn first_element_child<'a, 'i>(node: Node<'a, 'i>) -> Option<Node<'a, 'i>> {
    node.children().find(Node::is_element)
}

/// True when `node` is the operator of an `<apply>`, i.e. its first element
/// child.
fn is_operator_position(node: Node<'_, '_>) -> bool {
    match node.parent() {
        Some(parent) if parent.is_element() && parent.tag_name().name() == "apply" => {
            first_element_child(parent) == Some(node)
        }
        _ => false,
    }
}

/// True when rendering `node` pushes a parenthesis level that its enclosing
/// `<apply>` must close.
fn opens_level(node: Node<'_, '_>) -> bool {
    let name = node.tag_name().name();
    match name {
        "math" | "apply" | "piece" | "otherwise" | "degree" | "logbase" | "cn" | "sep" => false,
        "ci" | "csymbol" => is_operator_position(node),
        _ => constant_token(name).is_none(),
    }
}

/// Operand count of an operator element: the remaining element children of
/// its `<apply>`, or its own element children when it appears standalone.
fn operand_count(node: Node<'_, '_>) -> usize {
    if is_operator_position(node) {
        if let Some(parent) = node.parent() {
            return parent
                .children()
                .filter(Node::is_element)
                .count()
                .saturating_sub(1);
        }
    }
    node.children().filter(Node::is_element).count()
}

fn element_text(node: Node<'_, '_>) -> String {
    let mut text = String::new();
    for child in node.children() {
        if child.is_text() {
            if let Some(t) = child.text() {
                text.push_str(t);
            }
        }
    }
    text.trim().to_string()
}

/// Label for a `<csymbol>`.
///
/// SBML identifies csymbols by `definitionURL` and treats the element text as
/// a display name, so a recognized URL wins over the text. Anything else keeps
/// its text and round-trips as an ordinary call or symbol.
fn csymbol_label(node: Node<'_, '_>) -> String {
    if let Some(url) = node.attribute("definitionURL") {
        for known in ["time", "delay", "avogadro", "rateOf"] {
            if url.ends_with(known) {
                return known.to_string();
            }
        }
    }
    element_text(node)
}

/// Infix join for the four operator elements.
fn join_operator(name: &str) -> Option<&'static str> {
    Some(match name {
        "plus" => " + ",
        "minus" => " - ",
        "times" => " * ",
        "divide" => " / ",
        _ => return None,
    })
}

/// Nullary constant elements and their grammar spellings.
fn constant_token(name: &str) -> Option<&'static str> {
    Some(match name {
        "true" => "true",
        "false" => "false",
        "pi" => "pi",
        "exponentiale" => "exponentiale",
        "eulergamma" => "eulergamma",
        "infinity" => "inf",
        "notanumber" => "nan",
        _ => return None,
    })
}

/// MathML element names whose grammar spelling differs.
fn renamed(name: &str) -> Option<&'static str> {
    Some(match name {
        "power" => "pow",
        "arcsin" => "asin",
        "arccos" => "acos",
        "arctan" => "atan",
        "arcsec" => "asec",
        "arccsc" => "acsc",
        "arccot" => "acot",
        "arcsinh" => "asinh",
        "arccosh" => "acosh",
        "arctanh" => "atanh",
        "arcsech" => "asech",
        "arccsch" => "acsch",
        "arccoth" => "acoth",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mexl_core::expr;

    fn parsed(xml: &str) -> Expr {
        match parse_mathml(xml) {
            Ok(tree) => tree,
            Err(err) => panic!("failed to parse {xml:?}: {err}"),
        }
    }

    // ==================== number tests ====================

    #[test]
    fn test_integer_literal() {
        assert_eq!(parsed("<cn type=\"integer\">42</cn>"), expr::integer(42));
    }

    #[test]
    fn test_untyped_literal_is_integer() {
        assert_eq!(parsed("<cn>12345</cn>"), expr::integer(12345));
    }

    #[test]
    fn test_untyped_decimal_literal_is_real() {
        assert_eq!(parsed("<cn>1.2</cn>"), expr::real(1.2));
    }

    #[test]
    fn test_huge_integer_stays_exact() {
        let tree = parsed("<cn type=\"integer\">10000000000000000000000000</cn>");
        let back = match &tree {
            Expr::Integer(i) => i.to_string(),
            other => panic!("expected integer, got {other:?}"),
        };
        assert_eq!(back, "10000000000000000000000000");
    }

    #[test]
    fn test_rational_literal_with_sep() {
        let tree = parsed("<cn type=\"rational\">1<sep/>3</cn>");
        assert_eq!(tree, expr::rational(1, 3));
    }

    #[test]
    fn test_rational_literal_with_padding() {
        // Leading and trailing whitespace around each part is not content.
        let tree = parsed("<cn type=\"rational\"> 12342 <sep/> 2342342 </cn>");
        assert_eq!(tree, expr::rational(12342, 2342342));
    }

    #[test]
    fn test_e_notation_literal() {
        let tree = parsed("<cn type=\"e-notation\">5<sep/>2</cn>");
        assert_eq!(tree, expr::real(5e2));
    }

    #[test]
    fn test_complex_cartesian_builds_symbolic_form() {
        // No complex node exists; 3 + 4i becomes 3 + I*4.
        let tree = parsed("<cn type=\"complex-cartesian\">3<sep/>4</cn>");
        let expected = expr::add(vec![
            expr::integer(3),
            expr::mul(vec![expr::symbol("I"), expr::integer(4)]),
        ]);
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_rational_binds_as_a_unit_in_division() {
        let xml = "<apply><divide/><ci>x</ci><cn type=\"rational\">1<sep/>2</cn></apply>";
        assert_eq!(
            parsed(xml),
            expr::div(expr::symbol("x"), expr::rational(1, 2))
        );
    }

    // ==================== identifier and constant tests ====================

    #[test]
    fn test_identifier() {
        assert_eq!(parsed("<ci>abc</ci>"), expr::symbol("abc"));
    }

    #[test]
    fn test_identifier_preserves_case() {
        assert_eq!(parsed("<ci> Veq </ci>"), expr::symbol("Veq"));
    }

    #[test]
    fn test_constant_elements() {
        assert_eq!(parsed("<true/>"), expr::boolean(true));
        assert_eq!(parsed("<false/>"), expr::boolean(false));
        assert_eq!(parsed("<pi/>"), expr::pi());
        assert_eq!(parsed("<exponentiale/>"), expr::exp1());
        assert_eq!(parsed("<eulergamma/>"), expr::euler_gamma());
        assert_eq!(parsed("<infinity/>"), expr::inf());
        assert!(matches!(parsed("<notanumber/>"), Expr::Constant(_)));
    }

    // ==================== operator apply tests ====================

    #[test]
    fn test_nary_plus() {
        let xml = "<apply><plus/><ci>x</ci><ci>y</ci><ci>z</ci></apply>";
        let expected = expr::add(vec![
            expr::symbol("x"),
            expr::symbol("y"),
            expr::symbol("z"),
        ]);
        assert_eq!(parsed(xml), expected);
    }

    #[test]
    fn test_binary_minus() {
        let xml = "<apply><minus/><ci>x</ci><cn>1</cn></apply>";
        assert_eq!(
            parsed(xml),
            expr::sub(expr::symbol("x"), expr::integer(1))
        );
    }

    #[test]
    fn test_unary_minus_negates() {
        let xml = "<apply><minus/><ci>x</ci></apply>";
        assert_eq!(parsed(xml), expr::neg(expr::symbol("x")));
    }

    #[test]
    fn test_unary_minus_on_literal_folds() {
        let xml = "<apply><minus/><cn type=\"integer\">5</cn></apply>";
        assert_eq!(parsed(xml), expr::integer(-5));
    }

    #[test]
    fn test_nested_operator_applies() {
        let xml = "<apply><times/>\
                   <apply><plus/><ci>a</ci><ci>b</ci></apply>\
                   <ci>c</ci></apply>";
        let expected = expr::mul(vec![
            expr::add(vec![expr::symbol("a"), expr::symbol("b")]),
            expr::symbol("c"),
        ]);
        assert_eq!(parsed(xml), expected);
    }

    #[test]
    fn test_division_by_zero_stays_symbolic() {
        let xml = "<apply><divide/><cn>1</cn><cn>0</cn></apply>";
        assert_eq!(
            parsed(xml),
            expr::div(expr::integer(1), expr::integer(0))
        );
    }

    // ==================== function apply tests ====================

    #[test]
    fn test_power_renames_to_pow() {
        let xml = "<apply><power/><ci>x</ci><cn>2</cn></apply>";
        assert_eq!(
            parsed(xml),
            expr::pow(expr::symbol("x"), expr::integer(2))
        );
    }

    #[test]
    fn test_arc_names_rename() {
        let xml = "<apply><arcsin/><ci>x</ci></apply>";
        assert_eq!(parsed(xml), expr::call("asin", vec![expr::symbol("x")]));

        let xml = "<apply><arccoth/><ci>x</ci></apply>";
        assert_eq!(parsed(xml), expr::call("acoth", vec![expr::symbol("x")]));
    }

    #[test]
    fn test_plain_function_names_pass_through() {
        let xml = "<apply><sin/><ci>x</ci></apply>";
        assert_eq!(parsed(xml), expr::call("sin", vec![expr::symbol("x")]));
    }

    #[test]
    fn test_relational_apply() {
        let xml = "<apply><leq/><ci>x</ci><cn>3</cn></apply>";
        assert_eq!(parsed(xml), expr::le(expr::symbol("x"), expr::integer(3)));
    }

    #[test]
    fn test_not_apply_fuses_over_and() {
        let xml = "<apply><not/><apply><and/><ci>p</ci><ci>q</ci></apply></apply>";
        let expected = expr::nand(vec![expr::symbol("p"), expr::symbol("q")]);
        assert_eq!(parsed(xml), expected);
    }

    #[test]
    fn test_log_with_logbase() {
        let xml = "<apply><log/><logbase><cn>2</cn></logbase><ci>x</ci></apply>";
        assert_eq!(
            parsed(xml),
            expr::call("log", vec![expr::integer(2), expr::symbol("x")])
        );
    }

    #[test]
    fn test_root_with_degree() {
        // degree is transparent, so root(n, x) keeps the MathML operand order.
        let xml = "<apply><root/><degree><cn>3</cn></degree><ci>x</ci></apply>";
        assert_eq!(
            parsed(xml),
            expr::pow(
                expr::symbol("x"),
                expr::div(expr::integer(1), expr::integer(3))
            )
        );
    }

    #[test]
    fn test_ci_in_operator_position_is_a_call() {
        let xml = "<apply><ci>f</ci><ci>x</ci><cn>2</cn></apply>";
        assert_eq!(
            parsed(xml),
            expr::call("f", vec![expr::symbol("x"), expr::integer(2)])
        );
    }

    #[test]
    fn test_unknown_element_becomes_call() {
        let xml = "<apply><gamma/><ci>x</ci></apply>";
        assert_eq!(parsed(xml), expr::call("gamma", vec![expr::symbol("x")]));
    }

    #[test]
    fn test_wrong_arity_is_content_error() {
        let xml = "<apply><sin/><ci>x</ci><ci>y</ci></apply>";
        assert!(matches!(
            parse_mathml(xml),
            Err(MathmlError::Content(_))
        ));
    }

    // ==================== csymbol tests ====================

    #[test]
    fn test_csymbol_function_by_definition_url() {
        let xml = "<apply>\
                   <csymbol definitionURL=\"http://www.sbml.org/sbml/symbols/delay\"> d </csymbol>\
                   <ci>x</ci><cn>2</cn></apply>";
        assert_eq!(
            parsed(xml),
            expr::call("delay", vec![expr::symbol("x"), expr::integer(2)])
        );
    }

    #[test]
    fn test_csymbol_time_value() {
        let xml = "<csymbol definitionURL=\"http://www.sbml.org/sbml/symbols/time\">t</csymbol>";
        assert_eq!(parsed(xml), expr::symbol("time"));
    }

    #[test]
    fn test_csymbol_without_url_uses_text() {
        let xml = "<apply><csymbol>atan2</csymbol><ci>y</ci><ci>z</ci></apply>";
        assert_eq!(
            parsed(xml),
            expr::call("atan2", vec![expr::symbol("y"), expr::symbol("z")])
        );
    }

    // ==================== piecewise tests ====================

    #[test]
    fn test_piecewise_with_otherwise() {
        let xml = "<piecewise>\
                   <piece><ci>x</ci><apply><lt/><ci>x</ci><cn>1</cn></apply></piece>\
                   <otherwise><cn>0</cn></otherwise>\
                   </piecewise>";
        let expected = expr::piecewise(vec![
            (
                expr::symbol("x"),
                expr::lt(expr::symbol("x"), expr::integer(1)),
            ),
            (expr::integer(0), expr::boolean(true)),
        ]);
        assert_eq!(parsed(xml), expected);
    }

    #[test]
    fn test_piecewise_inside_expression() {
        let xml = "<apply><plus/><ci>x</ci>\
                   <piecewise><piece><cn>1</cn><true/></piece></piecewise>\
                   </apply>";
        let expected = expr::add(vec![
            expr::symbol("x"),
            expr::piecewise(vec![(expr::integer(1), expr::boolean(true))]),
        ]);
        assert_eq!(parsed(xml), expected);
    }

    // ==================== document shape tests ====================

    #[test]
    fn test_math_wrapper_with_namespace() {
        let xml = "<math xmlns=\"http://www.w3.org/1998/Math/MathML\">\
                   <apply><plus/><ci>x</ci><cn>2</cn></apply></math>";
        assert_eq!(
            parsed(xml),
            expr::add(vec![expr::symbol("x"), expr::integer(2)])
        );
    }

    #[test]
    fn test_pretty_printed_markup() {
        let xml = "<math xmlns=\"http://www.w3.org/1998/Math/MathML\">\n\
                   \x20 <apply>\n\
                   \x20   <times/>\n\
                   \x20   <ci>a</ci>\n\
                   \x20   <cn type=\"integer\">4</cn>\n\
                   \x20 </apply>\n\
                   </math>";
        assert_eq!(
            parsed(xml),
            expr::mul(vec![expr::symbol("a"), expr::integer(4)])
        );
    }

    #[test]
    fn test_empty_input_is_zero() {
        assert_eq!(parsed(""), expr::integer(0));
        assert_eq!(parsed("   \n "), expr::integer(0));
    }

    #[test]
    fn test_empty_math_is_zero() {
        assert_eq!(parsed("<math/>"), expr::integer(0));
        assert_eq!(parsed("<math> </math>"), expr::integer(0));
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        assert!(matches!(
            parse_mathml("<apply><plus/>"),
            Err(MathmlError::Xml(_))
        ));
    }

    #[test]
    fn test_depth_limit() {
        let mut xml = String::new();
        for _ in 0..300 {
            xml.push_str("<apply><minus/>");
        }
        xml.push_str("<ci>x</ci>");
        for _ in 0..300 {
            xml.push_str("</apply>");
        }
        assert!(matches!(
            parse_mathml(&xml),
            Err(MathmlError::Structure(_))
        ));
    }
}
