//! Error types for the style tree engine
//!
//! Recoverable conditions (bad ranges, stale handles, unparsable markup) are
//! reported through [`StyleError`]. Collapsed ranges and styles that are not
//! present are not errors: the engine treats them as no-ops.

use crate::tree::NodeId;
use thiserror::Error;

/// Result alias used by every tree and engine operation
pub type StyleResult<T> = Result<T, StyleError>;

/// Errors reported by the tree model and the style engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// Range endpoints unreachable from the root, out of bounds, or reversed
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Handle does not refer to a live node
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    /// Operation requires a text leaf
    #[error("Node {0} is not a text leaf")]
    NotALeaf(NodeId),

    /// Operation requires a node that can hold children
    #[error("Node {0} cannot hold children")]
    NotAContainer(NodeId),

    /// Operation requires a node attached to a parent
    #[error("Node {0} has no parent")]
    Detached(NodeId),

    /// Character offset past the end of a leaf (or child offset past a container)
    #[error("Offset {offset} out of bounds for node {node} (length {len})")]
    OffsetOutOfBounds {
        node: NodeId,
        offset: usize,
        len: usize,
    },

    /// Linking would make a node its own ancestor
    #[error("Inserting node {0} would create a cycle")]
    WouldCycle(NodeId),

    /// The document root cannot be moved, wrapped or removed
    #[error("Cannot {0} the document root")]
    RootOperation(&'static str),

    /// Style name not in the style table
    #[error("Unknown style: {0}")]
    UnknownStyle(String),

    /// Markup could not be parsed into a tree
    #[error("Markup parsing failed: {0}")]
    Markup(String),

    /// Configuration could not be read
    #[error("Invalid configuration: {0}")]
    Config(String),
}
