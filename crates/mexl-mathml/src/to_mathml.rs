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

//! Expression-tree to Content MathML conversion.
//!
//! Every node the parsers produce has a markup form that reads back to an
//! equal tree. Operators become `<apply>` with an operator element, built-in
//! functions use their MathML element names, and anything the MathML
//! vocabulary has no element for is written as a `<csymbol>` apply, which the
//! reader turns back into a generic call.

use std::io::{Cursor, Write};

use mexl_core::{format_real, Constant, Expr};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::MathmlResult;

/// W3C MathML namespace, carried on the `<math>` wrapper.
pub const MATHML_NS: &str = "http://www.w3.org/1998/Math/MathML";

/// Configuration for MathML output.
#[derive(Debug, Clone)]
pub struct ToMathmlConfig {
    /// Pretty-print with one element per line.
    pub pretty: bool,
    /// Indentation string for pretty output (default: two spaces).
    pub indent: String,
    /// Wrap the expression in a namespaced `<math>` element (default: true).
    pub math_element: bool,
    /// Emit an XML declaration (default: false).
    pub xml_declaration: bool,
}

impl Default for ToMathmlConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: "  ".to_string(),
            math_element: true,
            xml_declaration: false,
        }
    }
}

/// Render an expression tree as Content MathML with default configuration.
///
/// # Examples
///
/// ```
/// use mexl_core::parse;
/// use mexl_mathml::to_mathml;
///
/// let tree = parse("x + 2")?;
/// let xml = to_mathml(&tree)?;
/// assert!(xml.contains("<apply><plus/>"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn to_mathml(expr: &Expr) -> MathmlResult<String> {
    to_mathml_with_config(expr, &ToMathmlConfig::default())
}

/// Render an expression tree as Content MathML.
pub fn to_mathml_with_config(expr: &Expr, config: &ToMathmlConfig) -> MathmlResult<String> {
    let mut writer = if config.pretty {
        Writer::new_with_indent(Cursor::new(Vec::new()), b' ', config.indent.len())
    } else {
        Writer::new(Cursor::new(Vec::new()))
    };

    if config.xml_declaration {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    }
    if config.math_element {
        let mut root = BytesStart::new("math");
        root.push_attribute(("xmlns", MATHML_NS));
        writer.write_event(Event::Start(root))?;
    }
    write_expr(&mut writer, expr)?;
    if config.math_element {
        writer.write_event(Event::End(BytesEnd::new("math")))?;
    }

    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8(bytes)?)
}

fn write_expr<W: Write>(writer: &mut Writer<W>, expr: &Expr) -> MathmlResult<()> {
    match expr {
        Expr::Integer(i) => write_cn(writer, "integer", &i.to_string()),
        Expr::Rational(r) => write_rational(writer, &r.numer().to_string(), &r.denom().to_string()),
        Expr::Real(f) if f.is_nan() => write_empty(writer, "notanumber"),
        Expr::Real(f) if f.is_infinite() => {
            // Reads back as the infinity constant, possibly negated.
            if f.is_sign_negative() {
                writer.write_event(Event::Start(BytesStart::new("apply")))?;
                write_empty(writer, "minus")?;
                write_empty(writer, "infinity")?;
                writer.write_event(Event::End(BytesEnd::new("apply")))?;
                Ok(())
            } else {
                write_empty(writer, "infinity")
            }
        }
        Expr::Real(f) => write_cn(writer, "real", &format_real(*f)),
        Expr::Symbol(name) => write_text_element(writer, "ci", name),
        Expr::Constant(c) => write_empty(writer, constant_element(*c)),
        Expr::Boolean(b) => write_empty(writer, if *b { "true" } else { "false" }),

        Expr::Add(args) => write_apply(writer, "plus", args),
        Expr::Mul(args) => write_apply(writer, "times", args),
        Expr::Neg(operand) => write_apply(writer, "minus", std::slice::from_ref(operand.as_ref())),
        Expr::Div(num, den) => write_binary_apply(writer, "divide", num, den),
        Expr::Rem(num, den) => write_binary_apply(writer, "rem", num, den),
        Expr::Pow(base, exponent) => write_binary_apply(writer, "power", base, exponent),

        Expr::Lt(lhs, rhs) => write_binary_apply(writer, "lt", lhs, rhs),
        Expr::Le(lhs, rhs) => write_binary_apply(writer, "leq", lhs, rhs),
        Expr::Eq(lhs, rhs) => write_binary_apply(writer, "eq", lhs, rhs),
        Expr::Ne(lhs, rhs) => write_binary_apply(writer, "neq", lhs, rhs),

        Expr::And(args) => write_apply(writer, "and", args),
        Expr::Or(args) => write_apply(writer, "or", args),
        Expr::Xor(args) => write_apply(writer, "xor", args),
        // MathML has no complemented connectives; not-wrapping reads back to
        // the complement through connective fusion.
        Expr::Nand(args) => write_complement(writer, "and", args),
        Expr::Nor(args) => write_complement(writer, "or", args),
        Expr::Xnor(args) => write_complement(writer, "xor", args),
        Expr::Not(operand) => write_apply(writer, "not", std::slice::from_ref(operand.as_ref())),

        Expr::Piecewise(branches) => {
            writer.write_event(Event::Start(BytesStart::new("piecewise")))?;
            for (value, condition) in branches {
                writer.write_event(Event::Start(BytesStart::new("piece")))?;
                write_expr(writer, value)?;
                write_expr(writer, condition)?;
                writer.write_event(Event::End(BytesEnd::new("piece")))?;
            }
            writer.write_event(Event::End(BytesEnd::new("piecewise")))?;
            Ok(())
        }

        Expr::Call(name, args) => write_call(writer, name, args),
    }
}

fn write_call<W: Write>(writer: &mut Writer<W>, name: &str, args: &[Expr]) -> MathmlResult<()> {
    // log(b, x) gets its base back as <logbase>, which the reader strips.
    if name == "log" && args.len() == 2 {
        writer.write_event(Event::Start(BytesStart::new("apply")))?;
        write_empty(writer, "log")?;
        writer.write_event(Event::Start(BytesStart::new("logbase")))?;
        write_expr(writer, &args[0])?;
        writer.write_event(Event::End(BytesEnd::new("logbase")))?;
        write_expr(writer, &args[1])?;
        writer.write_event(Event::End(BytesEnd::new("apply")))?;
        return Ok(());
    }
    if let Some(element) = function_element(name) {
        return write_apply(writer, element, args);
    }
    writer.write_event(Event::Start(BytesStart::new("apply")))?;
    write_text_element(writer, "csymbol", name)?;
    for arg in args {
        write_expr(writer, arg)?;
    }
    writer.write_event(Event::End(BytesEnd::new("apply")))?;
    Ok(())
}

fn write_apply<W: Write>(
    writer: &mut Writer<W>,
    operator: &str,
    operands: &[Expr],
) -> MathmlResult<()> {
    writer.write_event(Event::Start(BytesStart::new("apply")))?;
    write_empty(writer, operator)?;
    for operand in operands {
        write_expr(writer, operand)?;
    }
    writer.write_event(Event::End(BytesEnd::new("apply")))?;
    Ok(())
}

fn write_binary_apply<W: Write>(
    writer: &mut Writer<W>,
    operator: &str,
    lhs: &Expr,
    rhs: &Expr,
) -> MathmlResult<()> {
    writer.write_event(Event::Start(BytesStart::new("apply")))?;
    write_empty(writer, operator)?;
    write_expr(writer, lhs)?;
    write_expr(writer, rhs)?;
    writer.write_event(Event::End(BytesEnd::new("apply")))?;
    Ok(())
}

fn write_complement<W: Write>(
    writer: &mut Writer<W>,
    positive: &str,
    args: &[Expr],
) -> MathmlResult<()> {
    writer.write_event(Event::Start(BytesStart::new("apply")))?;
    write_empty(writer, "not")?;
    write_apply(writer, positive, args)?;
    writer.write_event(Event::End(BytesEnd::new("apply")))?;
    Ok(())
}

fn write_cn<W: Write>(writer: &mut Writer<W>, kind: &str, text: &str) -> MathmlResult<()> {
    let mut elem = BytesStart::new("cn");
    elem.push_attribute(("type", kind));
    writer.write_event(Event::Start(elem))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new("cn")))?;
    Ok(())
}

fn write_rational<W: Write>(writer: &mut Writer<W>, numer: &str, denom: &str) -> MathmlResult<()> {
    let mut elem = BytesStart::new("cn");
    elem.push_attribute(("type", "rational"));
    writer.write_event(Event::Start(elem))?;
    writer.write_event(Event::Text(BytesText::new(numer)))?;
    writer.write_event(Event::Empty(BytesStart::new("sep")))?;
    writer.write_event(Event::Text(BytesText::new(denom)))?;
    writer.write_event(Event::End(BytesEnd::new("cn")))?;
    Ok(())
}

fn write_empty<W: Write>(writer: &mut Writer<W>, name: &str) -> MathmlResult<()> {
    writer.write_event(Event::Empty(BytesStart::new(name)))?;
    Ok(())
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> MathmlResult<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn constant_element(constant: Constant) -> &'static str {
    match constant {
        Constant::Pi => "pi",
        Constant::Exp1 => "exponentiale",
        Constant::EulerGamma => "eulergamma",
        Constant::Inf => "infinity",
        Constant::Nan => "notanumber",
    }
}

/// MathML element for a canonical function name, where one exists.
///
/// The inverse trigonometric and hyperbolic families write their full `arc`
/// spellings; the reader renames them back. Names absent here are written as
/// `<csymbol>` applies.
fn function_element(name: &str) -> Option<&'static str> {
    Some(match name {
        "sin" => "sin",
        "cos" => "cos",
        "tan" => "tan",
        "sec" => "sec",
        "csc" => "csc",
        "cot" => "cot",
        "sinh" => "sinh",
        "cosh" => "cosh",
        "tanh" => "tanh",
        "sech" => "sech",
        "csch" => "csch",
        "coth" => "coth",
        "asin" => "arcsin",
        "acos" => "arccos",
        "atan" => "arctan",
        "asec" => "arcsec",
        "acsc" => "arccsc",
        "acot" => "arccot",
        "asinh" => "arcsinh",
        "acosh" => "arccosh",
        "atanh" => "arctanh",
        "asech" => "arcsech",
        "acsch" => "arccsch",
        "acoth" => "arccoth",
        "ln" => "ln",
        "log" => "log",
        "abs" => "abs",
        "floor" => "floor",
        "ceiling" => "ceiling",
        "min" => "min",
        "max" => "max",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mexl_core::expr;

    /// Bare fragment without the `<math>` wrapper, for exact-string checks.
    fn fragment(expr: &Expr) -> String {
        let config = ToMathmlConfig {
            math_element: false,
            ..ToMathmlConfig::default()
        };
        match to_mathml_with_config(expr, &config) {
            Ok(xml) => xml,
            Err(err) => panic!("failed to render {expr:?}: {err}"),
        }
    }

    // ==================== literal tests ====================

    #[test]
    fn test_integer() {
        assert_eq!(fragment(&expr::integer(42)), "<cn type=\"integer\">42</cn>");
    }

    #[test]
    fn test_negative_integer() {
        assert_eq!(
            fragment(&expr::integer(-7)),
            "<cn type=\"integer\">-7</cn>"
        );
    }

    #[test]
    fn test_rational_with_sep() {
        assert_eq!(
            fragment(&expr::rational(1, 3)),
            "<cn type=\"rational\">1<sep/>3</cn>"
        );
    }

    #[test]
    fn test_real() {
        assert_eq!(fragment(&expr::real(2.5)), "<cn type=\"real\">2.5</cn>");
        assert_eq!(fragment(&expr::real(2.0)), "<cn type=\"real\">2.0</cn>");
    }

    #[test]
    fn test_non_finite_reals_use_constant_elements() {
        assert_eq!(fragment(&expr::real(f64::NAN)), "<notanumber/>");
        assert_eq!(fragment(&expr::real(f64::INFINITY)), "<infinity/>");
        assert_eq!(
            fragment(&expr::real(f64::NEG_INFINITY)),
            "<apply><minus/><infinity/></apply>"
        );
    }

    #[test]
    fn test_symbol() {
        assert_eq!(fragment(&expr::symbol("Veq")), "<ci>Veq</ci>");
    }

    #[test]
    fn test_constants() {
        assert_eq!(fragment(&expr::pi()), "<pi/>");
        assert_eq!(fragment(&expr::exp1()), "<exponentiale/>");
        assert_eq!(fragment(&expr::euler_gamma()), "<eulergamma/>");
        assert_eq!(fragment(&expr::inf()), "<infinity/>");
        assert_eq!(fragment(&expr::boolean(true)), "<true/>");
        assert_eq!(fragment(&expr::boolean(false)), "<false/>");
    }

    // ==================== operator tests ====================

    #[test]
    fn test_nary_plus() {
        let tree = expr::add(vec![
            expr::symbol("x"),
            expr::symbol("y"),
            expr::integer(2),
        ]);
        assert_eq!(
            fragment(&tree),
            "<apply><plus/><ci>x</ci><ci>y</ci><cn type=\"integer\">2</cn></apply>"
        );
    }

    #[test]
    fn test_negation_is_unary_minus() {
        assert_eq!(
            fragment(&expr::neg(expr::symbol("x"))),
            "<apply><minus/><ci>x</ci></apply>"
        );
    }

    #[test]
    fn test_subtraction_shape() {
        // x - y is a sum with a negated addend.
        let tree = expr::sub(expr::symbol("x"), expr::symbol("y"));
        assert_eq!(
            fragment(&tree),
            "<apply><plus/><ci>x</ci><apply><minus/><ci>y</ci></apply></apply>"
        );
    }

    #[test]
    fn test_power() {
        let tree = expr::pow(expr::symbol("x"), expr::integer(2));
        assert_eq!(
            fragment(&tree),
            "<apply><power/><ci>x</ci><cn type=\"integer\">2</cn></apply>"
        );
    }

    #[test]
    fn test_relation_elements() {
        assert_eq!(
            fragment(&expr::le(expr::symbol("x"), expr::integer(3))),
            "<apply><leq/><ci>x</ci><cn type=\"integer\">3</cn></apply>"
        );
        assert_eq!(
            fragment(&expr::ne(expr::symbol("x"), expr::integer(3))),
            "<apply><neq/><ci>x</ci><cn type=\"integer\">3</cn></apply>"
        );
    }

    #[test]
    fn test_complemented_connectives_write_as_not() {
        let tree = expr::nand(vec![expr::symbol("p"), expr::symbol("q")]);
        assert_eq!(
            fragment(&tree),
            "<apply><not/><apply><and/><ci>p</ci><ci>q</ci></apply></apply>"
        );
    }

    // ==================== function tests ====================

    #[test]
    fn test_inverse_trig_uses_arc_spelling() {
        let tree = expr::call("asin", vec![expr::symbol("x")]);
        assert_eq!(fragment(&tree), "<apply><arcsin/><ci>x</ci></apply>");
    }

    #[test]
    fn test_log_base_ten_is_plain_log() {
        let tree = expr::call("log", vec![expr::symbol("x")]);
        assert_eq!(fragment(&tree), "<apply><log/><ci>x</ci></apply>");
    }

    #[test]
    fn test_log_with_base_writes_logbase() {
        let tree = expr::call("log", vec![expr::integer(2), expr::symbol("x")]);
        assert_eq!(
            fragment(&tree),
            "<apply><log/><logbase><cn type=\"integer\">2</cn></logbase><ci>x</ci></apply>"
        );
    }

    #[test]
    fn test_unknown_function_is_csymbol() {
        let tree = expr::call("delay", vec![expr::symbol("x"), expr::integer(2)]);
        assert_eq!(
            fragment(&tree),
            "<apply><csymbol>delay</csymbol><ci>x</ci><cn type=\"integer\">2</cn></apply>"
        );
    }

    #[test]
    fn test_piecewise_with_explicit_conditions() {
        let tree = expr::piecewise(vec![
            (
                expr::symbol("x"),
                expr::lt(expr::symbol("x"), expr::integer(1)),
            ),
            (expr::integer(0), expr::boolean(true)),
        ]);
        assert_eq!(
            fragment(&tree),
            "<piecewise>\
             <piece><ci>x</ci><apply><lt/><ci>x</ci><cn type=\"integer\">1</cn></apply></piece>\
             <piece><cn type=\"integer\">0</cn><true/></piece>\
             </piecewise>"
        );
    }

    // ==================== configuration tests ====================

    #[test]
    fn test_default_config_wraps_in_math() {
        let xml = match to_mathml(&expr::integer(1)) {
            Ok(xml) => xml,
            Err(err) => panic!("render failed: {err}"),
        };
        assert_eq!(
            xml,
            "<math xmlns=\"http://www.w3.org/1998/Math/MathML\">\
             <cn type=\"integer\">1</cn></math>"
        );
    }

    #[test]
    fn test_xml_declaration() {
        let config = ToMathmlConfig {
            xml_declaration: true,
            ..ToMathmlConfig::default()
        };
        let xml = match to_mathml_with_config(&expr::integer(1), &config) {
            Ok(xml) => xml,
            Err(err) => panic!("render failed: {err}"),
        };
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    }

    #[test]
    fn test_pretty_output_has_line_breaks() {
        let config = ToMathmlConfig {
            pretty: true,
            ..ToMathmlConfig::default()
        };
        let tree = expr::add(vec![expr::symbol("x"), expr::integer(2)]);
        let xml = match to_mathml_with_config(&tree, &config) {
            Ok(xml) => xml,
            Err(err) => panic!("render failed: {err}"),
        };
        assert!(xml.contains('\n'));
        assert!(xml.contains("<plus/>"));
    }
}
