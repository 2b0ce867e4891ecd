//! # Mutations
//!
//! Serializable form of every editing operation, for UIs that send intents
//! as data (command palettes, keyboard shortcuts, replayed scripts).
//!
//! [`TreeMutationEngine::apply`](crate::TreeMutationEngine::apply) dispatches
//! each variant to the matching engine method, so both paths share the same
//! validation.

use pageblocks_model::BlockId;
use pageblocks_style::Breakpoint;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    AddBlock {
        parent_id: BlockId,
        #[serde(rename = "type")]
        block_type: String,
        #[serde(default)]
        index: Option<usize>,
    },

    MoveUp { id: BlockId },

    MoveDown { id: BlockId },

    /// Reparent; a same-parent index counts positions after removal
    MoveBlock {
        id: BlockId,
        new_parent_id: BlockId,
        index: usize,
    },

    /// Remove node and all descendants
    DeleteBlock { id: BlockId },

    CopyBlock { id: BlockId },

    PasteBlock {
        parent_id: BlockId,
        #[serde(default)]
        index: Option<usize>,
    },

    DuplicateBlock { id: BlockId },

    UpdateContent {
        id: BlockId,
        key: String,
        value: Value,
    },

    UpdateStyle {
        id: BlockId,
        #[serde(default)]
        breakpoint: Breakpoint,
        key: String,
        value: String,
    },

    ClearStyleOverride {
        id: BlockId,
        breakpoint: Breakpoint,
        key: String,
    },

    SetLocked { id: BlockId, locked: bool },

    SetHidden { id: BlockId, hidden: bool },

    SetLabel {
        id: BlockId,
        #[serde(default)]
        label: Option<String>,
    },

    Select { id: BlockId },

    ClearSelection,
}

impl Mutation {
    /// Whether applying this can change the tree's shape
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Mutation::AddBlock { .. }
                | Mutation::MoveUp { .. }
                | Mutation::MoveDown { .. }
                | Mutation::MoveBlock { .. }
                | Mutation::DeleteBlock { .. }
                | Mutation::PasteBlock { .. }
                | Mutation::DuplicateBlock { .. }
        )
    }
}

/// Result of a successfully applied mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new node (added, pasted or duplicated)
    Created(BlockId),
    Moved,
    /// Valid but nothing to do (moving past either end)
    Unchanged,
    /// Removed ids, subtree root first
    Deleted(Vec<BlockId>),
    Updated,
}

impl Outcome {
    pub fn created_id(&self) -> Option<&BlockId> {
        match self {
            Outcome::Created(id) => Some(id),
            _ => None,
        }
    }
}
