//! Whole-file header template.

use super::block::{push_details, BlockWriter};
use super::RenderConfig;

/// Header block for a source file named `file_name`.
pub fn render_header(file_name: &str, config: &RenderConfig) -> String {
    let mut block = BlockWriter::open(config, "file", file_name);
    block.tag("brief", &config.default_text);
    push_details(&mut block, config);
    block.close()
}
