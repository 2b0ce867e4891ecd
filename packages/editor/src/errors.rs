//! Error types for the editor

use crate::invariants::InvariantError;
use pageblocks_model::{BlockId, ModelError};
use pageblocks_registry::ContainmentError;
use thiserror::Error;

/// Rejected editing operation
///
/// Every variant is recoverable: the tree is left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NotFound(BlockId),

    #[error("Node is locked: {0}")]
    Locked(BlockId),

    #[error("Invalid parent {parent}: {reason}")]
    InvalidParent { parent: BlockId, reason: String },

    #[error("Placing {node} under {parent} would create a cycle")]
    Cycle { node: BlockId, parent: BlockId },

    #[error("Item node violation: {0}")]
    ItemNodeViolation(#[from] ContainmentError),

    #[error("Clipboard is empty")]
    ClipboardEmpty,

    #[error("Cannot {0} the root node")]
    RootProtected(&'static str),
}

impl MutationError {
    /// Stable code surfaced to the UI
    pub fn reason(&self) -> &'static str {
        match self {
            MutationError::NotFound(_) => "not-found",
            MutationError::Locked(_) => "locked",
            MutationError::InvalidParent { .. } | MutationError::RootProtected(_) => {
                "invalid-parent"
            }
            MutationError::Cycle { .. } => "cycle",
            MutationError::ItemNodeViolation(_) => "item-node-violation",
            MutationError::ClipboardEmpty => "clipboard-empty",
        }
    }

    pub(crate) fn invalid_parent(parent: &BlockId, reason: impl Into<String>) -> Self {
        MutationError::InvalidParent {
            parent: parent.clone(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Invariant violated: {0}")]
    Invariant(#[from] InvariantError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
