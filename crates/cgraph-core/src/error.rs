//! Error types shared by the graph engines.

use thiserror::Error;

use crate::graph::NodeId;

/// Result type alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors raised for malformed input.
///
/// A search that completes without finding anything is not an error; the
/// engines report that through an empty path or `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A node referenced by the caller does not appear in the graph.
    #[error("node not found: {node}")]
    UnknownNode { node: NodeId },

    /// An edge endpoint lies outside the dense `0..node_count` range.
    #[error("node {node} is out of range for a graph of {node_count} nodes")]
    NodeOutOfRange { node: NodeId, node_count: usize },

    /// Requested clique size exceeds the number of nodes.
    #[error("invalid clique size {size} for a graph of {node_count} nodes")]
    InvalidCliqueSize { size: usize, node_count: usize },

    /// Wire annotation code outside of {-1, 0, 1}.
    #[error("invalid annotation code {code} (expected -1, 0 or 1)")]
    InvalidAnnotation { code: i64 },

    /// Grid level could not be interpreted.
    #[error("invalid grid: {message}")]
    InvalidGrid { message: String },
}

impl GraphError {
    /// Create an invalid grid error.
    pub fn invalid_grid(message: impl Into<String>) -> Self {
        Self::InvalidGrid {
            message: message.into(),
        }
    }
}
