//! Error types for the CSS data model.

use thiserror::Error;

/// Errors produced while building or interpreting CSS input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CssError {
    /// A parser fed this crate invalid text.
    #[error("parse error at {line}:{column}: {message}")]
    Parse {
        message: String,
        line: u32,
        column: u32,
    },

    /// A declaration named a property this crate does not model.
    #[error("unknown CSS property: {0:?}")]
    UnknownProperty(String),

    /// A type selector named an element outside the closed node-type set.
    #[error("unknown element name: {0:?}")]
    UnknownNodeType(String),
}

/// A specialized Result type for CSS operations.
pub type Result<T> = std::result::Result<T, CssError>;
