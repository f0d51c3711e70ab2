//! Error types for the document tree.

use std::fmt;

/// The main error type for document tree operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// A `NodeId` was out of range for the arena it was used with,
    /// or referred to a node from a previous tree generation.
    InvalidNodeId(InvalidNodeId),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNodeId(err) => write!(f, "Invalid node ID: {err}"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidNodeId(err) => Some(err),
        }
    }
}

/// An out-of-range or stale node index.
///
/// This is a programmer error: node ids are only valid for the arena
/// that created them, and only until the tree is rebuilt. Passes that
/// encounter this error must abort rather than produce partial output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidNodeId {
    /// The offending index.
    pub index: usize,
    /// Number of nodes in the arena at the time of the lookup.
    pub len: usize,
}

impl fmt::Display for InvalidNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "node index {} out of range for arena of length {}",
            self.index, self.len
        )
    }
}

impl std::error::Error for InvalidNodeId {}

impl From<InvalidNodeId> for CoreError {
    fn from(err: InvalidNodeId) -> Self {
        Self::InvalidNodeId(err)
    }
}

/// A specialized Result type for document tree operations.
pub type Result<T> = std::result::Result<T, CoreError>;
