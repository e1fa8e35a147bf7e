//! Parameter engine: split a parameter list, then name, direct and describe
//! each parameter.

use super::balance::count_pairs;
use super::rules::describe_name;
use crate::error::{Invalid, Result};
use crate::model::{Direction, Parameter, ReturnCategory};
use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

/// `type (*name)(` or `type (*name[N])(`: the declared name of a function pointer.
static RE_FN_POINTER_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w\s\*]*\(\s*\*?\s*([A-Za-z_]\w*)\s*(?:\[[^\]]*\]\s*)*\)\s*\(").unwrap()
});

static RE_TRAILING_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z_]\w*)\s*$").unwrap());

static RE_CONST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bconst\b").unwrap());

static RE_VOID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bvoid\b").unwrap());

const VARIADIC: &str = "...";

// -- Public API ---------------------------------------------------------------

/// Name declared by a function-pointer declarator such as `int (*cb)(int)`.
pub fn function_pointer_name(text: &str) -> Option<&str> {
    RE_FN_POINTER_NAME
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Trailing identifier of `text`, ignoring trailing whitespace.
pub fn trailing_identifier(text: &str) -> Option<&str> {
    RE_TRAILING_IDENT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Split a parameter list on commas outside nested parentheses.
///
/// An empty list and a list of exactly `void` both yield no parameters.
pub fn split_params(list: &str) -> Vec<&str> {
    let trimmed = list.trim();
    if trimmed.is_empty() || trimmed == "void" {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut begin = 0usize;
    for (i, c) in list.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(list[begin..i].trim());
                begin = i + 1;
            }
            _ => {}
        }
    }
    parts.push(list[begin..].trim());
    parts
}

/// Declared name of a single parameter.
pub fn param_name(text: &str) -> Option<&str> {
    let text = text.trim();
    if text == VARIADIC {
        return Some(VARIADIC);
    }
    if text.contains('(') {
        return function_pointer_name(text);
    }
    let unbounded = text.split('[').next().unwrap_or(text);
    trailing_identifier(unbounded)
}

/// Direction of a parameter, inferred from its type syntax.
///
/// | shape                           | direction |
/// |---------------------------------|-----------|
/// | contains `(` (function pointer) | In        |
/// | no `*` or `[`                   | In        |
/// | `*`/`[` and no `const`          | Out       |
/// | `const` before the first marker | In        |
/// | `const` after the first marker  | Out       |
pub fn infer_direction(text: &str) -> Direction {
    if text.contains('(') {
        return Direction::In;
    }
    let Some(marker) = text.find(['*', '[']) else {
        return Direction::In;
    };
    match RE_CONST.find(text) {
        Some(qualifier) if qualifier.start() < marker => Direction::In,
        _ => Direction::Out,
    }
}

/// The first parameter's `Out` is rendered as `InOut`. No other parameter
/// and no other direction is touched.
pub fn promote_first(params: &mut [Parameter]) {
    if let Some(first) = params.first_mut() {
        if first.direction == Direction::Out {
            first.direction = Direction::InOut;
        }
    }
}

/// Description for one parameter; `None` means the default text.
pub fn describe(name: &str, text: &str, returns: ReturnCategory) -> Option<String> {
    if count_pairs(text).is_some_and(|pairs| pairs >= 1) {
        let phrase = if returns == ReturnCategory::FunctionPointer {
            "A pointer to a function"
        } else {
            "A pointer to function"
        };
        return Some(phrase.to_string());
    }
    if name == VARIADIC {
        return Some("Variable arguments".to_string());
    }
    describe_name(name)
}

/// Category of a function's return type text.
pub fn return_category(ret: &str) -> ReturnCategory {
    if RE_VOID.is_match(ret) && !ret.contains('*') && !ret.contains('(') {
        return ReturnCategory::Void;
    }
    match count_pairs(ret) {
        Some(pairs) if pairs >= 2 => ReturnCategory::FunctionPointer,
        _ => ReturnCategory::Value,
    }
}

/// Parse a parameter list (the text between the outer parentheses).
pub fn parse_params(list: &str, returns: ReturnCategory) -> Result<Vec<Parameter>> {
    let mut params = split_params(list)
        .into_iter()
        .map(|text| -> Result<Parameter> {
            let name = param_name(text).ok_or(Invalid::Parameter)?;
            Ok(Parameter {
                name: name.to_string(),
                direction: infer_direction(text),
                description: describe(name, text, returns),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    promote_first(&mut params);
    Ok(params)
}
