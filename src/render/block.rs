//! Doxygen comment-block renderer.
//!
//! The opening `/**` carries the first tag, continuation lines start with
//! ` * `, and the block closes with ` */` on its own line.

use super::RenderConfig;
use crate::model::*;

/// Label of a function's brief line.
const SUMMARY: &str = "Summary";

/// Return text for functions that hand back a function pointer.
const FUNCTION_POINTER_RETURN: &str = "A pointer to a function";

/// Line-by-line builder for one comment block.
pub(crate) struct BlockWriter<'a> {
    config: &'a RenderConfig,
    lines: Vec<String>,
}

impl<'a> BlockWriter<'a> {
    /// Start a block whose first line is `/** <lead><tag> <text>`.
    pub fn open(config: &'a RenderConfig, tag: &str, text: &str) -> Self {
        let mut writer = Self {
            config,
            lines: Vec::new(),
        };
        let first = writer.tagged(tag, text);
        writer.lines.push(format!("/** {}", first));
        writer
    }

    fn tagged(&self, tag: &str, text: &str) -> String {
        let lead = self.config.tag_lead.as_char();
        if text.is_empty() {
            format!("{lead}{tag}")
        } else {
            format!("{lead}{tag} {text}")
        }
    }

    pub fn tag(&mut self, tag: &str, text: &str) -> &mut Self {
        let line = format!(" * {}", self.tagged(tag, text));
        self.lines.push(line);
        self
    }

    pub fn text(&mut self, text: &str) -> &mut Self {
        if text.is_empty() {
            self.lines.push(" *".to_string());
        } else {
            self.lines.push(format!(" * {text}"));
        }
        self
    }

    pub fn close(mut self) -> String {
        self.lines.push(" */".to_string());
        self.lines.join("\n")
    }
}

/// Render the comment block for a declaration.
pub fn render(decl: &ParsedDeclaration, config: &RenderConfig) -> Rendered {
    let default = config.default_text.as_str();
    match decl {
        ParsedDeclaration::Macro { name } => {
            let mut block = BlockWriter::open(config, "def", name);
            block.text(default);
            plain(block.close())
        }
        ParsedDeclaration::Tagged {
            keyword,
            name,
            members,
            ..
        } => {
            let mut block = BlockWriter::open(config, keyword.keyword(), name);
            block.text(default);
            let rows: Vec<(usize, &str)> = members.iter().map(|m| (m.line, m.text.as_str())).collect();
            Rendered {
                text: block.close(),
                trailing: align_trailing(&rows, config),
                footer: None,
            }
        }
        ParsedDeclaration::Typedef { name } => {
            let mut block = BlockWriter::open(config, "typedef", name);
            block.text(default);
            plain(block.close())
        }
        ParsedDeclaration::Variable { name, description } => {
            let mut block = BlockWriter::open(config, "var", name);
            block.tag("brief", description.as_deref().unwrap_or(default));
            plain(block.close())
        }
        ParsedDeclaration::Function { record, .. } => plain(render_function(record, config)),
    }
}

fn plain(text: String) -> Rendered {
    Rendered {
        text,
        ..Rendered::default()
    }
}

fn render_function(record: &FunctionRecord, config: &RenderConfig) -> String {
    let default = config.default_text.as_str();
    let mut block = BlockWriter::open(config, "brief", SUMMARY);
    push_details(&mut block, config);

    for param in &record.params {
        let tag = format!("param{}", param.direction.label());
        let text = format!(
            "{} {}",
            param.name,
            param.description.as_deref().unwrap_or(default)
        );
        block.tag(&tag, &text);
    }

    match record.returns {
        ReturnCategory::Void => {}
        ReturnCategory::Value => {
            block.tag("return", default);
        }
        ReturnCategory::FunctionPointer => {
            block.tag("return", FUNCTION_POINTER_RETURN);
        }
    }
    block.close()
}

/// Details section shared by function and header blocks.
pub(crate) fn push_details(block: &mut BlockWriter<'_>, config: &RenderConfig) {
    if !config.details {
        return;
    }
    if config.blank_details {
        block.text("").text(&config.default_text);
    } else {
        block.tag("details", &config.default_text);
    }
}

/// Text of one trailing member comment.
pub fn member_comment(config: &RenderConfig) -> String {
    format!("/**< {} */", config.default_text)
}

/// Trailing comments for `(line, text)` rows, all starting one column past
/// the widest row.
pub fn align_trailing(rows: &[(usize, &str)], config: &RenderConfig) -> Vec<TrailingComment> {
    let Some(width) = rows.iter().map(|(_, text)| text.trim_end().chars().count()).max() else {
        return Vec::new();
    };
    let text = member_comment(config);
    rows.iter()
        .map(|&(line, _)| TrailingComment {
            line,
            column: width + 1,
            text: text.clone(),
        })
        .collect()
}

/// Opening delimiter of a named member group.
pub fn group_start(config: &RenderConfig) -> String {
    let mut block = BlockWriter::open(config, "name", &config.default_text);
    block.tag("{", "");
    block.close()
}

/// Closing delimiter of a named member group.
pub fn group_end(config: &RenderConfig) -> String {
    format!("/** {}}} */", config.tag_lead.as_char())
}
