//! Error type for declaration analysis.
//!
//! Every failure is a short, user-visible reason. Nothing is retried: the
//! input is plain text, so a second attempt reproduces the same outcome.

use serde::Serialize;
use thiserror::Error;

/// Why a declaration could not be documented.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Invalid {
    /// No statement terminator, unbalanced parentheses, or an offset past the end.
    #[error("fix your code")]
    FixYourCode,

    #[error("invalid statement")]
    Statement,

    #[error("invalid typedef")]
    Typedef,

    #[error("invalid enum or struct")]
    Block,

    #[error("invalid function")]
    Function,

    #[error("invalid complex function")]
    ComplexFunction,

    #[error("invalid parameter")]
    Parameter,

    /// The group-boundary heuristic found nothing to group.
    #[error("parser error")]
    Parser,
}

/// Result alias for analysis operations.
pub type Result<T> = std::result::Result<T, Invalid>;
