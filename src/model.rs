//! Data model for analyzed declarations, independent of any renderer.

use serde::Serialize;
use std::ops::Range;

/// Text of one C declaration, newlines folded to spaces and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawStatement(String);

impl RawStatement {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The closed set of shapes a statement can be classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeclarationKind {
    Macro,
    TypedefEnum,
    TypedefStruct,
    TypedefGeneric,
    Enum,
    Struct,
    Variable,
    SimpleFunction,
    ComplexFunction,
    Invalid,
}

/// `enum` or `struct`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Enum,
    Struct,
}

impl TypeTag {
    pub fn keyword(self) -> &'static str {
        match self {
            TypeTag::Enum => "enum",
            TypeTag::Struct => "struct",
        }
    }

    pub(crate) fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "enum" => Some(TypeTag::Enum),
            "struct" => Some(TypeTag::Struct),
            _ => None,
        }
    }
}

/// A fully classified declaration. Never partially populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ParsedDeclaration {
    Macro {
        name: String,
    },
    /// Enum, Struct, TypedefEnum or TypedefStruct. For the typedef forms
    /// `name` is the trailing alias.
    Tagged {
        kind: DeclarationKind,
        keyword: TypeTag,
        name: String,
        /// Documentable member lines; empty unless full mode was requested.
        members: Vec<Member>,
    },
    Typedef {
        name: String,
    },
    Variable {
        name: String,
        /// Rule-table description for the name, if any rule matched.
        description: Option<String>,
    },
    Function {
        complex: bool,
        record: FunctionRecord,
    },
}

impl ParsedDeclaration {
    pub fn kind(&self) -> DeclarationKind {
        match self {
            ParsedDeclaration::Macro { .. } => DeclarationKind::Macro,
            ParsedDeclaration::Tagged { kind, .. } => *kind,
            ParsedDeclaration::Typedef { .. } => DeclarationKind::TypedefGeneric,
            ParsedDeclaration::Variable { .. } => DeclarationKind::Variable,
            ParsedDeclaration::Function { complex: false, .. } => DeclarationKind::SimpleFunction,
            ParsedDeclaration::Function { complex: true, .. } => DeclarationKind::ComplexFunction,
        }
    }

    /// The identifier the comment documents.
    pub fn name(&self) -> &str {
        match self {
            ParsedDeclaration::Macro { name }
            | ParsedDeclaration::Tagged { name, .. }
            | ParsedDeclaration::Typedef { name }
            | ParsedDeclaration::Variable { name, .. } => name,
            ParsedDeclaration::Function { record, .. } => &record.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionRecord {
    pub name: String,
    pub returns: ReturnCategory,
    pub params: Vec<Parameter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnCategory {
    Void,
    Value,
    FunctionPointer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub direction: Direction,
    /// Generated description; `None` renders as the configured default text.
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
    InOut,
}

impl Direction {
    /// Bracketed form used in `@param[...]`.
    pub fn label(self) -> &'static str {
        match self {
            Direction::In => "[in]",
            Direction::Out => "[out]",
            Direction::InOut => "[inout]",
        }
    }
}

/// A member line of an enum/struct body that receives a trailing comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    /// Line index relative to the declaration's first line.
    pub line: usize,
    /// The source line, trailing whitespace removed.
    pub text: String,
}

/// Where the rendered block belongs in the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderPlan {
    /// Byte offset of the declaration's first line.
    pub insert_at: usize,
    /// Zero-based line number of the declaration's first line.
    pub line: usize,
    /// Leading whitespace of the declaration's first line.
    pub indent: String,
    /// Byte span of the declaration in the source.
    pub span: Range<usize>,
}

/// Result of analyzing the declaration at an offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub declaration: ParsedDeclaration,
    pub plan: RenderPlan,
}

/// Output of the comment renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rendered {
    /// The comment block, lines joined with `\n`, no trailing newline.
    pub text: String,
    pub trailing: Vec<TrailingComment>,
    /// Closing block inserted after the last line of the span (groups only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

/// A comment appended to the end of an existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrailingComment {
    /// Line index relative to the declaration's first line.
    pub line: usize,
    /// Column (in chars) where the comment starts.
    pub column: usize,
    pub text: String,
}
