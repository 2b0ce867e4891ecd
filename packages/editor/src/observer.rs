//! # Change Notification
//!
//! Every successful engine operation emits one [`ChangeEvent`] to the
//! subscribed observers, synchronously and in subscription order, after the
//! tree has been updated. Rejected operations emit nothing.
//!
//! Renderers use this to refresh only what changed instead of diffing the
//! whole tree.

use pageblocks_model::{BlockId, BlockTree};
use serde::Serialize;
use std::fmt;
use std::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ChangeEvent {
    Added {
        id: BlockId,
        parent_id: BlockId,
        index: usize,
    },
    Moved {
        id: BlockId,
        from_parent: BlockId,
        from_index: usize,
        to_parent: BlockId,
        to_index: usize,
    },
    /// The removed ids, subtree root first
    Deleted { ids: Vec<BlockId> },
    Pasted {
        id: BlockId,
        parent_id: BlockId,
        index: usize,
    },
    PropsChanged { id: BlockId },
    MetaChanged { id: BlockId },
    SelectionChanged { selected: Option<BlockId> },
    Committed { sequence: u64, label: String },
    /// The whole tree was swapped (undo, redo, history replay)
    Replaced { label: String },
}

impl ChangeEvent {
    /// Node the event is about, if it is about a single node
    pub fn node_id(&self) -> Option<&BlockId> {
        match self {
            ChangeEvent::Added { id, .. }
            | ChangeEvent::Moved { id, .. }
            | ChangeEvent::Pasted { id, .. }
            | ChangeEvent::PropsChanged { id }
            | ChangeEvent::MetaChanged { id } => Some(id),
            ChangeEvent::Deleted { ids } => ids.first(),
            ChangeEvent::SelectionChanged { selected } => selected.as_ref(),
            ChangeEvent::Committed { .. } | ChangeEvent::Replaced { .. } => None,
        }
    }

    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ChangeEvent::Added { .. }
                | ChangeEvent::Moved { .. }
                | ChangeEvent::Deleted { .. }
                | ChangeEvent::Pasted { .. }
                | ChangeEvent::Replaced { .. }
        )
    }
}

/// Receives change events from the engine
pub trait TreeObserver {
    fn on_change(&mut self, event: &ChangeEvent, tree: &BlockTree);
}

/// Forward events over a channel, ignoring a dropped receiver
impl TreeObserver for mpsc::Sender<ChangeEvent> {
    fn on_change(&mut self, event: &ChangeEvent, _tree: &BlockTree) {
        let _ = self.send(event.clone());
    }
}

/// Adapts a closure into an observer
pub struct FnObserver<F>(pub F);

impl<F> TreeObserver for FnObserver<F>
where
    F: FnMut(&ChangeEvent, &BlockTree),
{
    fn on_change(&mut self, event: &ChangeEvent, tree: &BlockTree) {
        (self.0)(event, tree)
    }
}

/// Handle returned by `subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(ObserverId, Box<dyn TreeObserver>)>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, observer: Box<dyn TreeObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, event: &ChangeEvent, tree: &BlockTree) {
        for (_, observer) in &mut self.entries {
            observer.on_change(event, tree);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}
