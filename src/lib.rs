//! Generate Doxygen comment blocks for C declarations.
//!
//! The library classifies the declaration on a given line, extracts what a
//! comment needs (names, return category, parameter directions), and renders
//! the block. It never touches files; [`edit::apply`] produces the edited
//! text for callers that want it.
//!
//! ```
//! use cdoc::{analyze_declaration, render, RenderConfig};
//!
//! let analysis = analyze_declaration("int add(int a, int b);", 0, false).unwrap();
//! let rendered = render(&analysis.declaration, &RenderConfig::default());
//! assert!(rendered.text.contains("@param[in] a"));
//! ```

pub mod edit;
pub mod error;
pub mod group;
pub mod model;
pub mod parser;
pub mod render;

pub use error::Invalid;
pub use model::*;
pub use parser::{analyze_declaration, line_start};
pub use render::{render, RenderConfig, TagLead};
