//! Evaluation of attribute argument expressions to typed constants.

use ast_grep_core::{Doc, Node};
use symck_core::{ConstantValue, TypedConstant};

/// Evaluate an argument expression. Never fails: anything that is not a
/// compile-time constant the front end understands is kept as an
/// [`ConstantValue::Expression`].
pub(crate) fn evaluate<D: Doc>(node: &Node<D>) -> TypedConstant {
    let text = node.text();
    let text = text.trim();
    match node.kind().as_ref() {
        "integer_literal" => integer(text),
        "real_literal" => real(text),
        "boolean_literal" | "true" | "false" => {
            TypedConstant::new("bool", ConstantValue::Bool(text == "true"))
        }
        "character_literal" => character(text),
        "string_literal" => {
            let body = text
                .strip_prefix('"')
                .and_then(|t| t.strip_suffix('"'))
                .unwrap_or(text);
            TypedConstant::string(unescape(body))
        }
        "verbatim_string_literal" => {
            let body = text
                .trim_start_matches('@')
                .strip_prefix('"')
                .and_then(|t| t.strip_suffix('"'))
                .unwrap_or(text);
            TypedConstant::string(body.replace("\"\"", "\""))
        }
        "raw_string_literal" => TypedConstant::string(text.trim_matches('"').trim()),
        "null_literal" => TypedConstant::new("object", ConstantValue::Null),
        "typeof_expression" => {
            let ty = text
                .trim_start_matches("typeof")
                .trim()
                .trim_start_matches('(')
                .trim_end_matches(')')
                .trim();
            TypedConstant::new("System.Type", ConstantValue::Type(ty.to_string()))
        }
        "parenthesized_expression" => node
            .children()
            .find(|child| child.is_named())
            .map_or_else(|| expression(text), |inner| evaluate(&inner)),
        "prefix_unary_expression" => unary(node, text),
        "cast_expression" => {
            let Some(value) = node.field("value") else {
                return expression(text);
            };
            let mut constant = evaluate(&value);
            if let Some(ty) = node.field("type") {
                constant.type_name = ty.text().trim().to_string();
            }
            constant
        }
        "array_creation_expression" => {
            let elements = array_elements(node);
            let type_name = node
                .field("type")
                .map_or_else(|| "object[]".to_string(), |ty| ty.text().trim().to_string());
            TypedConstant::new(type_name, ConstantValue::Array(elements))
        }
        "implicit_array_creation_expression" => {
            let elements = array_elements(node);
            let type_name = elements
                .first()
                .map_or_else(|| "object[]".to_string(), |first| format!("{}[]", first.type_name));
            TypedConstant::new(type_name, ConstantValue::Array(elements))
        }
        "member_access_expression" => {
            let owner = text.rsplit_once('.').map_or("object", |(owner, _)| owner);
            TypedConstant::new(owner, ConstantValue::Expression(text.to_string()))
        }
        "invocation_expression" if text.starts_with("nameof") => {
            let inner = text
                .trim_start_matches("nameof")
                .trim()
                .trim_start_matches('(')
                .trim_end_matches(')');
            let last = inner.rsplit('.').next().unwrap_or(inner).trim();
            TypedConstant::string(last)
        }
        _ => expression(text),
    }
}

fn expression(text: &str) -> TypedConstant {
    TypedConstant::new("object", ConstantValue::Expression(text.to_string()))
}

fn integer(text: &str) -> TypedConstant {
    let lower = text.to_ascii_lowercase();
    let digits = lower.trim_end_matches(['u', 'l']);
    let suffix = &lower[digits.len()..];
    let cleaned = digits.replace('_', "");

    let parsed = if let Some(hex) = cleaned.strip_prefix("0x") {
        u64::from_str_radix(hex, 16)
    } else if let Some(bin) = cleaned.strip_prefix("0b") {
        u64::from_str_radix(bin, 2)
    } else {
        cleaned.parse::<u64>()
    };
    let Ok(value) = parsed else {
        return expression(text);
    };

    let fits_int = value <= u64::from(i32::MAX.unsigned_abs());
    let fits_uint = value <= u64::from(u32::MAX);
    let fits_long = i64::try_from(value).is_ok();
    let type_name = match (suffix.contains('u'), suffix.contains('l')) {
        (false, false) if fits_int => "int",
        (false, false) if fits_uint => "uint",
        (false, false) if fits_long => "long",
        (true, false) if fits_uint => "uint",
        (false, true) if fits_long => "long",
        _ => "ulong",
    };

    let constant = match (type_name, i64::try_from(value)) {
        ("int" | "long", Ok(signed)) => ConstantValue::Int(signed),
        _ => ConstantValue::UInt(value),
    };
    TypedConstant::new(type_name, constant)
}

fn real(text: &str) -> TypedConstant {
    let cleaned = text.replace('_', "").to_ascii_lowercase();
    let (body, type_name) = match cleaned.chars().last() {
        Some('f') => (&cleaned[..cleaned.len() - 1], "float"),
        Some('d') => (&cleaned[..cleaned.len() - 1], "double"),
        Some('m') => (&cleaned[..cleaned.len() - 1], "decimal"),
        _ => (cleaned.as_str(), "double"),
    };
    if type_name == "decimal" {
        return TypedConstant::new(type_name, ConstantValue::Decimal(body.to_string()));
    }
    body.parse::<f64>().map_or_else(
        |_| expression(text),
        |value| TypedConstant::new(type_name, ConstantValue::Float(value)),
    )
}

fn character(text: &str) -> TypedConstant {
    let body = text
        .strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .unwrap_or(text);
    unescape(body).chars().next().map_or_else(
        || expression(text),
        |ch| TypedConstant::new("char", ConstantValue::Char(ch)),
    )
}

fn unary<D: Doc>(node: &Node<D>, text: &str) -> TypedConstant {
    let operator = node
        .children()
        .find(|child| !child.is_named())
        .map(|op| op.text().trim().to_string())
        .unwrap_or_default();
    let Some(operand) = node.children().filter(|child| child.is_named()).last() else {
        return expression(text);
    };
    let inner = evaluate(&operand);

    let value = match (operator.as_str(), inner.value) {
        ("+", value) => value,
        ("-", ConstantValue::Int(v)) => ConstantValue::Int(-v),
        ("-", ConstantValue::Float(v)) => ConstantValue::Float(-v),
        ("-", ConstantValue::Decimal(v)) => ConstantValue::Decimal(format!("-{v}")),
        ("-", ConstantValue::UInt(v)) => {
            // -2147483648 and -9223372036854775808 are the only literals
            // whose magnitude is unsigned before negation
            return match i64::try_from(-i128::from(v)) {
                Ok(negated) if negated >= i64::from(i32::MIN) => {
                    TypedConstant::new("int", ConstantValue::Int(negated))
                }
                Ok(negated) => TypedConstant::new("long", ConstantValue::Int(negated)),
                Err(_) => expression(text),
            };
        }
        ("!", ConstantValue::Bool(v)) => ConstantValue::Bool(!v),
        ("~", ConstantValue::Int(v)) => ConstantValue::Int(!v),
        _ => return expression(text),
    };
    TypedConstant::new(inner.type_name, value)
}

fn array_elements<D: Doc>(node: &Node<D>) -> Vec<TypedConstant> {
    node.children()
        .find(|child| child.kind().as_ref() == "initializer_expression")
        .map(|init| {
            init.children()
                .filter(|child| child.is_named())
                .map(|element| evaluate(&element))
                .collect()
        })
        .unwrap_or_default()
}

/// Resolve C# escape sequences in a string or char literal body.
pub(crate) fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            Some('a') => out.push('\u{7}'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some('u') => push_code_point(&mut out, &mut chars, 4, 4),
            Some('U') => push_code_point(&mut out, &mut chars, 8, 8),
            Some('x') => push_code_point(&mut out, &mut chars, 1, 4),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn push_code_point(
    out: &mut String,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    min: usize,
    max: usize,
) {
    let mut hex = String::new();
    while hex.len() < max {
        match chars.peek() {
            Some(c) if c.is_ascii_hexdigit() => {
                hex.push(*c);
                chars.next();
            }
            _ => break,
        }
    }
    let decoded = (hex.len() >= min)
        .then(|| u32::from_str_radix(&hex, 16).ok())
        .flatten()
        .and_then(char::from_u32);
    match decoded {
        Some(ch) => out.push(ch),
        None => out.push(char::REPLACEMENT_CHARACTER),
    }
}
