//! Comment blocks, file headers and their configuration.

pub mod block;
pub mod header;

use serde::Serialize;

pub use block::render;

/// Character that introduces every Doxygen tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagLead {
    /// `@brief`
    #[default]
    At,
    /// `\brief`
    Backslash,
}

impl TagLead {
    pub fn as_char(self) -> char {
        match self {
            TagLead::At => '@',
            TagLead::Backslash => '\\',
        }
    }
}

/// The four user-facing rendering switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderConfig {
    pub tag_lead: TagLead,
    /// Placeholder text for anything no rule can describe.
    pub default_text: String,
    /// Emit a details section in function and header blocks.
    pub details: bool,
    /// Render details as an empty continuation line plus the text, instead
    /// of a tagged line. Only meaningful when `details` is set.
    pub blank_details: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tag_lead: TagLead::At,
            default_text: "TODO".to_string(),
            details: true,
            blank_details: false,
        }
    }
}
