//! Apply a rendered comment to a document.
//!
//! Insertions are made bottom-up so earlier line indices stay valid: trailing
//! comments first, then the footer, then the block itself. A document using
//! `\r\n` keeps `\r\n` on every line, inserted ones included.

use crate::model::{RenderPlan, Rendered};

/// Return `source` with `rendered` inserted according to `plan`.
///
/// The block goes immediately before the declaration, indented like it, and
/// is separated from a preceding non-blank line by one empty line.
pub fn apply(source: &str, plan: &RenderPlan, rendered: &Rendered) -> String {
    edit_lines(source, plan, rendered, line_ending(source))
}

fn edit_lines(source: &str, plan: &RenderPlan, rendered: &Rendered, eol: &str) -> String {
    let crlf = eol == CRLF;
    let mut lines: Vec<String> = source
        .split('\n')
        .map(|line| match line.strip_suffix('\r') {
            Some(bare) if crlf => bare.to_string(),
            _ => line.to_string(),
        })
        .collect();

    for comment in &rendered.trailing {
        let Some(line) = lines.get_mut(plan.line + comment.line) else {
            continue;
        };
        let trimmed = line.trim_end();
        let pad = comment.column.saturating_sub(trimmed.chars().count()).max(1);
        let updated = format!("{}{}{}", trimmed, " ".repeat(pad), comment.text);
        *line = updated;
    }

    if let Some(footer) = &rendered.footer {
        let last = plan.line + source[plan.span.clone()].matches('\n').count();
        let at = (last + 1).min(lines.len());
        lines.splice(at..at, indented(footer, &plan.indent));
    }

    let mut block = indented(&rendered.text, &plan.indent);
    if plan.line > 0 && !lines[plan.line - 1].trim().is_empty() {
        block.insert(0, String::new());
    }
    lines.splice(plan.line..plan.line, block);

    lines.join(eol)
}

/// The declaration's own lines with `rendered` applied, without the rest of
/// the document.
pub fn preview(source: &str, plan: &RenderPlan, rendered: &Rendered) -> String {
    let start = plan.insert_at;
    let end = source[plan.span.end..]
        .find('\n')
        .map_or(source.len(), |i| plan.span.end + i);
    let local = RenderPlan {
        insert_at: 0,
        line: 0,
        indent: plan.indent.clone(),
        span: plan.span.start - start..plan.span.end - start,
    };
    edit_lines(&source[start..end], &local, rendered, line_ending(source))
}

const CRLF: &str = "\r\n";

fn line_ending(source: &str) -> &'static str {
    if source.contains(CRLF) {
        CRLF
    } else {
        "\n"
    }
}

fn indented(text: &str, indent: &str) -> Vec<String> {
    text.lines().map(|l| format!("{indent}{l}")).collect()
}
