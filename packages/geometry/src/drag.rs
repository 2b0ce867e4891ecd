use crate::{DropTarget, InsertionResolver, Proposal};
use pageblocks_model::BlockId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum DragSource {
    /// A node already in the tree
    Existing(BlockId),
    /// A new block of the given type from the palette
    Palette(String),
    /// The current clipboard snapshot
    Clipboard,
}

/// How a drag session ended
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    Drop {
        source: DragSource,
        proposal: Proposal,
    },
    /// Released outside any valid drop target
    NoTarget { source: DragSource },
    Cancelled { source: DragSource },
}

impl DragOutcome {
    pub fn source(&self) -> &DragSource {
        match self {
            DragOutcome::Drop { source, .. }
            | DragOutcome::NoTarget { source }
            | DragOutcome::Cancelled { source } => source,
        }
    }

    pub fn is_drop(&self) -> bool {
        matches!(self, DragOutcome::Drop { .. })
    }
}

/// Pointer-driven drag state between pointer-down and pointer-up
///
/// Holds ids and geometry only. Proposals are speculative until the outcome
/// is applied by the editor.
#[derive(Debug, Clone)]
pub struct DragSession {
    source: DragSource,
    resolver: InsertionResolver,
    proposal: Option<Proposal>,
}

impl DragSession {
    pub fn new(source: DragSource, resolver: InsertionResolver) -> Self {
        Self {
            source,
            resolver,
            proposal: None,
        }
    }

    pub fn source(&self) -> &DragSource {
        &self.source
    }

    pub fn proposal(&self) -> Option<&Proposal> {
        self.proposal.as_ref()
    }

    /// Recompute the proposal for a pointer move
    ///
    /// `None` means the pointer is not over a valid drop target.
    pub fn update(&mut self, target: Option<&DropTarget>, pointer_y: f64) -> Option<&Proposal> {
        self.proposal = target.map(|target| self.resolver.propose(target, pointer_y));
        if let Some(proposal) = &self.proposal {
            debug!(parent_id = %proposal.parent_id, index = proposal.index, "drag proposal");
        }
        self.proposal.as_ref()
    }

    pub fn cancel(self) -> DragOutcome {
        DragOutcome::Cancelled {
            source: self.source,
        }
    }

    /// End the session at pointer-up
    pub fn finish(self) -> DragOutcome {
        match self.proposal {
            Some(proposal) => DragOutcome::Drop {
                source: self.source,
                proposal,
            },
            None => DragOutcome::NoTarget {
                source: self.source,
            },
        }
    }
}
