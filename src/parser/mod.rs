//! Statement extraction, classification and parameter analysis.

pub mod balance;
pub mod classify;
pub mod params;
pub mod rules;
pub mod statement;

use crate::error::{Invalid, Result};
use crate::model::{Analysis, RenderPlan};

/// Classify the declaration on the line containing `start_offset` and work
/// out where its comment block belongs.
///
/// `full_mode` additionally collects enum/struct member lines for trailing
/// comments.
pub fn analyze_declaration(source: &str, start_offset: usize, full_mode: bool) -> Result<Analysis> {
    if start_offset > source.len() || !source.is_char_boundary(start_offset) {
        return Err(Invalid::FixYourCode);
    }
    let insert_at = source[..start_offset].rfind('\n').map_or(0, |i| i + 1);
    let line = source[..insert_at].matches('\n').count();
    let indent: String = source[insert_at..]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect();

    let classified = classify::classify(source, insert_at, full_mode)?;
    tracing::debug!(
        kind = ?classified.declaration.kind(),
        name = classified.declaration.name(),
        line,
        "classified declaration"
    );

    Ok(Analysis {
        declaration: classified.declaration,
        plan: RenderPlan {
            insert_at,
            line,
            indent,
            span: insert_at..classified.end,
        },
    })
}

/// Byte offset where zero-based line `line` starts.
pub fn line_start(source: &str, line: usize) -> Option<usize> {
    if line == 0 {
        return Some(0);
    }
    source
        .match_indices('\n')
        .nth(line - 1)
        .map(|(i, _)| i + 1)
}
