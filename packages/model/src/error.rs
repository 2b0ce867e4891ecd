use crate::BlockId;
use thiserror::Error;

/// Violation of the tree's structural invariants
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StructureError {
    #[error("Root node not found: {0}")]
    MissingRoot(BlockId),

    #[error("Root node {0} must not have a parent")]
    RootHasParent(BlockId),

    #[error("Node stored under key {key} has id {id}")]
    KeyMismatch { key: BlockId, id: BlockId },

    #[error("Node {parent} references missing child {child}")]
    DanglingChild { parent: BlockId, child: BlockId },

    #[error("Node {0} is listed as a child more than once")]
    DuplicateChild(BlockId),

    #[error("Node {node} claims parent {claimed:?} but is listed under {listed:?}")]
    ParentMismatch {
        node: BlockId,
        claimed: Option<BlockId>,
        listed: Option<BlockId>,
    },

    #[error("Node {0} is not reachable from the root")]
    Unreachable(BlockId),

    #[error("Cycle detected at node {0}")]
    Cycle(BlockId),
}

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Structure error: {0}")]
    Structure(#[from] StructureError),
}
