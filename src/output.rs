//! Output formats for the `cdoc` binary.

use anyhow::{anyhow, Result};
use cdoc::group::Group;
use cdoc::{DeclarationKind, Invalid, ParsedDeclaration, RenderPlan, Rendered};
use serde::Serialize;

/// Everything one command produced, ready to be formatted.
#[derive(Serialize)]
pub struct Report<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<DeclarationKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration: Option<&'a ParsedDeclaration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<&'a Group>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<&'a RenderPlan>,
    pub rendered: &'a Rendered,
    /// The commented source region, as `text` output shows it.
    #[serde(skip)]
    pub preview: String,
}

#[derive(Serialize)]
struct Rejection {
    kind: DeclarationKind,
    reason: String,
}

/// Trait for writing a [`Report`] in a specific output format.
pub trait Formatter {
    fn report(&self, report: &Report<'_>) -> Result<String>;

    /// Text for stdout when the declaration was rejected, if the format has any.
    fn invalid(&self, reason: Invalid) -> Result<Option<String>>;
}

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn report(&self, report: &Report<'_>) -> Result<String> {
        let mut out = report.preview.clone();
        if !out.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }

    fn invalid(&self, _reason: Invalid) -> Result<Option<String>> {
        Ok(None)
    }
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn report(&self, report: &Report<'_>) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)? + "\n")
    }

    fn invalid(&self, reason: Invalid) -> Result<Option<String>> {
        let rejection = Rejection {
            kind: DeclarationKind::Invalid,
            reason: reason.to_string(),
        };
        Ok(Some(serde_json::to_string_pretty(&rejection)? + "\n"))
    }
}

/// Create a formatter for the given format name.
pub fn create_formatter(format: &str) -> Result<Box<dyn Formatter>> {
    match format {
        "text" | "txt" => Ok(Box::new(TextFormatter)),
        "json" => Ok(Box::new(JsonFormatter)),
        _ => Err(anyhow!("unknown format: {}. Use text or json", format)),
    }
}
