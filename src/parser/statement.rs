//! Statement extraction: pull one declaration's raw text out of a document.
//!
//! A declaration's terminator depends on its shape. A plain declaration ends
//! at `;`, a definition or block type at `{`, an initialized variable is cut
//! right after its `=` so the initializer never reaches the classifier, and an
//! array variable is cut at its `[` so it reads as an ordinary variable.

use crate::error::{Invalid, Result};
use crate::model::RawStatement;

/// Knobs for [`extract`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Leave a depth-0 `[ ... ]` bound in the statement instead of cutting there.
    pub keep_brackets: bool,
}

/// Positions found by a forward scan from the statement start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Scan {
    /// Byte offset of the terminating `;` or `{`.
    pub terminator: usize,
    /// First `=` outside parentheses and literals.
    pub assign: Option<usize>,
    /// First `[` outside parentheses and literals.
    pub bracket: Option<usize>,
}

/// Characters of `text` outside string and character literals, with their
/// byte offsets. Quote delimiters are skipped too.
pub(crate) fn code_chars(text: &str) -> impl Iterator<Item = (usize, char)> + '_ {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    text.char_indices().filter(move |&(_, c)| {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            return false;
        }
        if c == '"' || c == '\'' {
            quote = Some(c);
            return false;
        }
        true
    })
}

/// Scan forward for the first unguarded `;` or `{`.
///
/// Characters inside parentheses, string literals and character literals
/// never terminate the statement.
pub(crate) fn scan(text: &str, start: usize) -> Option<Scan> {
    let rest = text.get(start..)?;
    let mut depth = 0usize;
    let mut assign = None;
    let mut bracket = None;

    for (i, c) in code_chars(rest) {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '=' if depth == 0 && assign.is_none() => assign = Some(start + i),
            '[' if depth == 0 && bracket.is_none() => bracket = Some(start + i),
            ';' | '{' if depth == 0 => {
                return Some(Scan {
                    terminator: start + i,
                    assign,
                    bracket,
                });
            }
            _ => {}
        }
    }
    None
}

/// Extract the declaration that starts at `start`.
pub fn extract(text: &str, start: usize, options: ExtractOptions) -> Result<RawStatement> {
    let scan = scan(text, start).ok_or(Invalid::FixYourCode)?;

    let bracket = scan.bracket.filter(|_| !options.keep_brackets);
    let captured = match (scan.assign, bracket) {
        (Some(eq), Some(br)) if br < eq => format!("{};", text[start..br].trim_end()),
        (Some(eq), _) => text[start..=eq].to_string(),
        (None, Some(br)) => format!("{};", text[start..br].trim_end()),
        (None, None) => format!("{};", text[start..scan.terminator].trim_end()),
    };

    let folded = captured.replace("\r\n", " ").replace(['\n', '\r'], " ");
    let trimmed = folded.trim();
    if trimmed.trim_end_matches(';').trim().is_empty() {
        return Err(Invalid::FixYourCode);
    }

    tracing::trace!(statement = trimmed, "extracted statement");
    Ok(RawStatement::new(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(text: &str) -> String {
        extract(text, 0, ExtractOptions::default())
            .unwrap()
            .as_str()
            .to_string()
    }

    #[test]
    fn stops_at_semicolon() {
        assert_eq!(raw("int add(int a, int b);\nint x;"), "int add(int a, int b);");
    }

    #[test]
    fn folds_newlines() {
        assert_eq!(
            raw("int add(int a,\n        int b);"),
            "int add(int a,         int b);"
        );
    }

    #[test]
    fn cuts_after_assignment() {
        assert_eq!(raw("static int count = f(1, 2);"), "static int count =");
    }

    #[test]
    fn cuts_array_bound() {
        assert_eq!(raw("char name[NAME_MAX + 1];"), "char name;");
        assert_eq!(raw("int table[3] = { 1, 2, 3 };"), "int table;");
    }

    #[test]
    fn keeps_array_bound_on_request() {
        let stmt = extract(
            "char name[16];",
            0,
            ExtractOptions {
                keep_brackets: true,
            },
        )
        .unwrap();
        assert_eq!(stmt.as_str(), "char name[16];");
    }

    #[test]
    fn brackets_inside_parameters_survive() {
        assert_eq!(raw("void fill(int buf[], size_t n);"), "void fill(int buf[], size_t n);");
    }

    #[test]
    fn brace_terminates_definition() {
        assert_eq!(raw("int main(void)\n{\n  return 0;\n}"), "int main(void);");
    }

    #[test]
    fn semicolon_in_literal_is_guarded() {
        assert_eq!(raw("const char *sep = \";\";"), "const char *sep =");
        assert_eq!(raw("void f(char c = ';');"), "void f(char c = ';');");
    }

    #[test]
    fn literals_are_hidden_from_code_scan() {
        let code: String = code_chars(r#"A = '}', B = "{\"}", C"#)
            .map(|(_, c)| c)
            .collect();
        assert_eq!(code, "A = , B = , C");
        let offsets: Vec<usize> = code_chars("'x'y").map(|(i, _)| i).collect();
        assert_eq!(offsets, vec![3]);
    }

    #[test]
    fn starts_at_offset() {
        let text = "int a;\nint b;\n";
        let stmt = extract(text, 7, ExtractOptions::default()).unwrap();
        assert_eq!(stmt.as_str(), "int b;");
    }

    #[test]
    fn missing_terminator_is_invalid() {
        assert_eq!(
            extract("int add(int a", 0, ExtractOptions::default()),
            Err(Invalid::FixYourCode)
        );
        assert_eq!(
            extract("   ;", 0, ExtractOptions::default()),
            Err(Invalid::FixYourCode)
        );
        assert_eq!(
            extract("int a;", 99, ExtractOptions::default()),
            Err(Invalid::FixYourCode)
        );
    }
}
