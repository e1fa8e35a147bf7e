//! Groups of similarly shaped lines.
//!
//! A group is the run of consecutive lines whose first token equals the first
//! token of the starting line, e.g. a block of `#define` lines or a list of
//! `extern int` declarations. The group is wrapped in `@name`/`@{`/`@}`
//! delimiters and, in full mode, every line gets an aligned trailing comment.

use crate::error::{Invalid, Result};
use crate::model::{RenderPlan, Rendered};
use crate::render::block::{align_trailing, group_end, group_start};
use crate::render::RenderConfig;
use serde::Serialize;

/// A run of lines sharing their first token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    /// The shared first token.
    pub token: String,
    /// Member lines, trailing whitespace removed.
    pub rows: Vec<String>,
    pub plan: RenderPlan,
}

/// Find the group starting on zero-based line `line`.
pub fn find_group(source: &str, line: usize) -> Result<Group> {
    let insert_at = crate::parser::line_start(source, line).ok_or(Invalid::Parser)?;
    let mut lines = source[insert_at..].split('\n');
    let first = lines.next().ok_or(Invalid::Parser)?;
    let token = first_token(first).ok_or(Invalid::Parser)?.to_string();

    let mut rows = vec![first.trim_end().to_string()];
    let mut end = insert_at + first.len();
    for next in lines {
        if first_token(next) != Some(token.as_str()) {
            break;
        }
        rows.push(next.trim_end().to_string());
        end += 1 + next.len();
    }

    let indent: String = first
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect();
    tracing::debug!(token = %token, rows = rows.len(), line, "found group");

    Ok(Group {
        token,
        rows,
        plan: RenderPlan {
            insert_at,
            line,
            indent,
            span: insert_at..end,
        },
    })
}

/// Delimiters for `group`, plus aligned trailing comments in full mode.
pub fn render_group(group: &Group, full: bool, config: &RenderConfig) -> Rendered {
    let trailing = if full {
        let rows: Vec<(usize, &str)> = group
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| (i, row.as_str()))
            .collect();
        align_trailing(&rows, config)
    } else {
        Vec::new()
    };
    Rendered {
        text: group_start(config),
        trailing,
        footer: Some(group_end(config)),
    }
}

fn first_token(line: &str) -> Option<&str> {
    line.split_whitespace().next()
}
