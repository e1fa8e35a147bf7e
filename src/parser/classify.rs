//! Declaration classifier: one dispatch step on the leading keyword.
//!
//! Macro lines are recognized from the line itself; brace-bodied types are
//! matched against the text that follows the offset; everything else goes
//! through the statement extractor and the function-or-variable path.

use super::balance::{count_pairs, last_block};
use super::params::{function_pointer_name, parse_params, return_category, trailing_identifier};
use super::rules::describe_name;
use super::statement::{code_chars, extract, scan, ExtractOptions};
use crate::error::{Invalid, Result};
use crate::model::*;
use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_DEFINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[[:blank:]]*#[[:blank:]]*define[[:blank:]]+([A-Za-z_]\w*)").unwrap());

static RE_FIRST_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z_]\w*)").unwrap());

static RE_TYPEDEF_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*typedef\s+(enum|struct)\b\s*(?:[A-Za-z_]\w*)?\s*\{").unwrap()
});

static RE_TAG_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(enum|struct)\s+([A-Za-z_]\w*)\s*\{").unwrap());

/// `ALIAS ;` following the closing brace of a typedef body.
static RE_ALIAS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z_]\w*)\s*;").unwrap());

static RE_CLOSING_SEMI: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*;").unwrap());

/// `typedef T1 T2 ... name;`
static RE_TYPEDEF_FLAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^typedef\s+[\w\s\*]*?[\w\*][\s\*]+([A-Za-z_]\w*)\s*;$").unwrap()
});

/// `T1 T2 ... name;` or `T1 T2 ... name =`
static RE_VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w\s\*]*?[\w\*][\s\*]+([A-Za-z_]\w*)\s*[=;]$").unwrap()
});

static RE_SIMPLE_FN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)([A-Za-z_]\w*)\s*\((.*)\)$").unwrap());

/// Statements that start with one of these are code, not declarations.
const CONTROL_KEYWORDS: &[&str] = &[
    "return", "if", "else", "while", "for", "do", "switch", "case", "goto", "break", "continue",
];

// -- Public API ---------------------------------------------------------------

/// A classified declaration and the byte offset where its text ends.
#[derive(Debug)]
pub(crate) struct Classified {
    pub declaration: ParsedDeclaration,
    pub end: usize,
}

/// Classify the declaration whose first line starts at `start`.
pub(crate) fn classify(source: &str, start: usize, full: bool) -> Result<Classified> {
    let window = source.get(start..).ok_or(Invalid::FixYourCode)?;
    let line = window.lines().next().unwrap_or_default();
    if line.trim().is_empty() {
        return Err(Invalid::Statement);
    }

    if let Some(caps) = RE_DEFINE.captures(line) {
        return Ok(Classified {
            declaration: ParsedDeclaration::Macro {
                name: caps[1].to_string(),
            },
            end: start + macro_len(window),
        });
    }

    let first = RE_FIRST_WORD
        .captures(line)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default();
    if CONTROL_KEYWORDS.contains(&first.as_str()) {
        return Err(Invalid::Statement);
    }

    match first.as_str() {
        "typedef" => typedef(source, start, full),
        "enum" | "struct" => match tagged(source, start, full)? {
            Some(classified) => Ok(classified),
            None => function_or_variable(source, start),
        },
        _ => function_or_variable(source, start),
    }
}

/// True when a body line should carry a trailing member comment.
pub fn is_documentable(line: &str) -> bool {
    let line = line.trim_end();
    !line.trim_start().is_empty() && !line.ends_with('{') && !line.ends_with('}')
}

// -- Typedef and tagged bodies ------------------------------------------------

fn typedef(source: &str, start: usize, full: bool) -> Result<Classified> {
    let window = &source[start..];
    if let Some(caps) = RE_TYPEDEF_BLOCK.captures(window) {
        let tag = TypeTag::from_keyword(&caps[1]).ok_or(Invalid::Typedef)?;
        let open = start + caps.get(0).map_or(0, |m| m.end()) - 1;
        let close = matching_brace(source, open).ok_or(Invalid::Typedef)?;
        check_parens(&source[start..=close])?;
        let alias = RE_ALIAS
            .captures(&source[close + 1..])
            .ok_or(Invalid::Typedef)?;
        let end = close + 1 + alias.get(0).map_or(0, |m| m.end());
        let kind = match tag {
            TypeTag::Enum => DeclarationKind::TypedefEnum,
            TypeTag::Struct => DeclarationKind::TypedefStruct,
        };
        return Ok(Classified {
            declaration: ParsedDeclaration::Tagged {
                kind,
                keyword: tag,
                name: alias[1].to_string(),
                members: members(source, start, open, close, full),
            },
            end,
        });
    }

    let stmt = extract(source, start, ExtractOptions::default())?;
    let text = stmt.as_str();
    count_pairs(text).ok_or(Invalid::FixYourCode)?;

    let name = if text.contains('(') {
        function_pointer_name(text)
    } else {
        RE_TYPEDEF_FLAT
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    };
    let name = name.ok_or(Invalid::Typedef)?;
    Ok(Classified {
        declaration: ParsedDeclaration::Typedef {
            name: name.to_string(),
        },
        end: statement_end(source, start),
    })
}

/// `enum NAME { ... };` or `struct NAME { ... };`. `None` when the keyword
/// has no body, so the statement is a variable or function using the type.
fn tagged(source: &str, start: usize, full: bool) -> Result<Option<Classified>> {
    let window = &source[start..];
    let Some(caps) = RE_TAG_BLOCK.captures(window) else {
        return Ok(None);
    };
    let tag = TypeTag::from_keyword(&caps[1]).ok_or(Invalid::Block)?;
    let open = start + caps.get(0).map_or(0, |m| m.end()) - 1;
    let close = matching_brace(source, open).ok_or(Invalid::Block)?;
    check_parens(&source[start..=close])?;
    let semi = RE_CLOSING_SEMI
        .find(&source[close + 1..])
        .ok_or(Invalid::Block)?;
    let kind = match tag {
        TypeTag::Enum => DeclarationKind::Enum,
        TypeTag::Struct => DeclarationKind::Struct,
    };
    Ok(Some(Classified {
        declaration: ParsedDeclaration::Tagged {
            kind,
            keyword: tag,
            name: caps[2].to_string(),
            members: members(source, start, open, close, full),
        },
        end: close + 1 + semi.end(),
    }))
}

/// Byte offset of the `}` closing the `{` at `open`. Braces inside string
/// and character literals do not count.
fn matching_brace(source: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in code_chars(&source[open..]) {
        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parentheses of a braced body must balance outside literals.
fn check_parens(text: &str) -> Result<()> {
    let code: String = code_chars(text).map(|(_, c)| c).collect();
    count_pairs(&code).map(|_| ()).ok_or(Invalid::FixYourCode)
}

/// Documentable lines strictly between the lines holding `open` and `close`.
fn members(source: &str, start: usize, open: usize, close: usize, full: bool) -> Vec<Member> {
    if !full {
        return Vec::new();
    }
    let open_line = source[start..open].matches('\n').count();
    let close_line = source[start..close].matches('\n').count();
    source[start..]
        .lines()
        .enumerate()
        .skip(open_line + 1)
        .take(close_line.saturating_sub(open_line + 1))
        .filter(|(_, line)| is_documentable(line))
        .map(|(line, text)| Member {
            line,
            text: text.trim_end().to_string(),
        })
        .collect()
}

// -- Functions and variables --------------------------------------------------

fn function_or_variable(source: &str, start: usize) -> Result<Classified> {
    let stmt = extract(source, start, ExtractOptions::default())?;
    let text = stmt.as_str();
    let pairs = count_pairs(text).ok_or(Invalid::FixYourCode)?;
    let end = statement_end(source, start);

    if pairs == 0 || text.ends_with('=') {
        return Ok(Classified {
            declaration: variable(text)?,
            end,
        });
    }

    let body = text.trim_end_matches(';').trim_end();
    let attempt = if pairs == 1 {
        simple_function(body)
    } else {
        complex_function(body)
    };
    match attempt {
        Ok(record) => Ok(Classified {
            declaration: ParsedDeclaration::Function {
                complex: pairs > 1,
                record,
            },
            end,
        }),
        // A function-pointer variable looks like a failed complex function.
        Err(err) => match function_pointer_name(text) {
            Some(name) => Ok(Classified {
                declaration: ParsedDeclaration::Variable {
                    name: name.to_string(),
                    description: describe_name(name),
                },
                end,
            }),
            None => Err(err),
        },
    }
}

fn variable(text: &str) -> Result<ParsedDeclaration> {
    let name = if text.contains('(') {
        function_pointer_name(text)
    } else {
        RE_VARIABLE
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    };
    let name = name.ok_or(Invalid::Statement)?;
    Ok(ParsedDeclaration::Variable {
        name: name.to_string(),
        description: describe_name(name),
    })
}

/// `RET NAME(PARAMS)` with exactly one parenthesis pair.
fn simple_function(body: &str) -> Result<FunctionRecord> {
    let caps = RE_SIMPLE_FN.captures(body).ok_or(Invalid::Function)?;
    let ret = caps[1].trim();
    if ret.is_empty() {
        return Err(Invalid::Function);
    }
    let returns = return_category(ret);
    Ok(FunctionRecord {
        name: caps[2].to_string(),
        returns,
        params: parse_params(&caps[3], returns)?,
    })
}

/// A declaration with nested parenthesized types.
///
/// The last block is the parameter list unless the text before it ends in
/// `)`, in which case the block is the call signature of a returned function
/// pointer and the function itself is nested inside the preceding group:
/// `int (*make_adder(int))(int)` descends into `*make_adder(int)`.
fn complex_function(body: &str) -> Result<FunctionRecord> {
    let mut text = body;
    let mut returned: Option<(&str, &str)> = None;
    loop {
        let block = last_block(text).ok_or(Invalid::ComplexFunction)?;
        let prefix = text[..block.start].trim_end();
        if prefix.ends_with(')') {
            let outer = last_block(prefix).ok_or(Invalid::ComplexFunction)?;
            if returned.is_none() {
                returned = Some((prefix[..outer.start].trim(), block.text));
            }
            text = outer.inner();
            continue;
        }

        let name = trailing_identifier(prefix).ok_or(Invalid::ComplexFunction)?;
        let own = prefix[..prefix.len() - name.len()].trim();
        let ret = match returned {
            Some((head, signature)) => format!("{head} (*){signature}"),
            None => own.to_string(),
        };
        if ret.is_empty() {
            return Err(Invalid::ComplexFunction);
        }
        let returns = return_category(&ret);
        return Ok(FunctionRecord {
            name: name.to_string(),
            returns,
            params: parse_params(block.inner(), returns)?,
        });
    }
}

// -- Helpers ------------------------------------------------------------------

/// Length of a macro definition, following `\` line continuations.
fn macro_len(window: &str) -> usize {
    let mut len = 0;
    for line in window.split_inclusive('\n') {
        len += line.len();
        if !line.trim_end().ends_with('\\') {
            return len - (line.len() - line.trim_end_matches(['\n', '\r']).len());
        }
    }
    len
}

fn statement_end(source: &str, start: usize) -> usize {
    scan(source, start).map_or(source.len(), |s| s.terminator + 1)
}
