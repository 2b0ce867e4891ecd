//! # Tree Mutation Engine
//!
//! The single owner of an editing session's tree, clipboard, selection and
//! commit history.
//!
//! ## Check, then commit
//!
//! Every operation first validates everything it needs (existence, locks,
//! cycles, parent capability, item-node containment) against the current
//! tree, and only then touches it. A rejected operation returns a
//! [`MutationError`] and leaves the session exactly as it was, so the tree
//! invariants hold after every call.
//!
//! ## Locks
//!
//! `meta.locked` guards a node's own structure: it cannot be moved, dragged
//! or deleted, and nothing can be added to or moved into or out of it.
//! Content, style and meta edits are still allowed.

use crate::clipboard::ClipboardSnapshot;
use crate::config::EngineConfig;
use crate::document::Document;
use crate::errors::{EditorError, MutationError};
use crate::history::{Commit, CommitHistory};
use crate::invariants::check_invariants;
use crate::mutations::{Mutation, Outcome};
use crate::observer::{ChangeEvent, ObserverId, Observers, TreeObserver};
use pageblocks_geometry::{DragOutcome, DragSession, DragSource, InsertionResolver};
use pageblocks_model::{BlockId, BlockNode, BlockTree, IdGenerator, Props};
use pageblocks_registry::{Registry, ROOT_TYPE};
use pageblocks_style::{self as style, Breakpoint};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Label of the commit recorded when a session starts
pub const INITIAL_COMMIT_LABEL: &str = "init";

/// Label of the commit recorded after a successful drop
pub const DRAG_COMMIT_LABEL: &str = "drag";

#[derive(Debug)]
pub struct TreeMutationEngine {
    tree: BlockTree,
    registry: Arc<Registry>,
    ids: IdGenerator,
    clipboard: Option<ClipboardSnapshot>,
    selection: Option<BlockId>,
    history: CommitHistory,
    observers: Observers,
    config: EngineConfig,
}

fn fresh_id(ids: &mut IdGenerator, tree: &BlockTree) -> BlockId {
    loop {
        let id = ids.new_id();
        if !tree.contains(&id) {
            return id;
        }
    }
}

fn log_rejection<T>(op: &'static str, result: Result<T, MutationError>) -> Result<T, MutationError> {
    if let Err(err) = &result {
        warn!(op, reason = err.reason(), error = %err, "mutation rejected");
    }
    result
}

impl TreeMutationEngine {
    /// Start a session on an existing tree
    ///
    /// The tree must satisfy every invariant. Ids are generated under a seed
    /// derived from the root id, past any counter already in use.
    pub fn new(tree: BlockTree, registry: Arc<Registry>) -> Result<Self, EditorError> {
        Self::with_config(tree, registry, EngineConfig::default())
    }

    pub fn with_config(
        tree: BlockTree,
        registry: Arc<Registry>,
        config: EngineConfig,
    ) -> Result<Self, EditorError> {
        check_invariants(&tree, &registry)?;
        let ids = IdGenerator::resume(tree.root_id().as_str(), tree.ids());
        Ok(Self::assemble(tree, registry, ids, config))
    }

    /// Start a session on a fresh document holding only a root block
    pub fn new_document(key: &str, registry: Arc<Registry>, config: EngineConfig) -> Self {
        let mut ids = IdGenerator::new(key);
        let tree = BlockTree::new_document(ROOT_TYPE, &mut ids);
        Self::assemble(tree, registry, ids, config)
    }

    pub fn from_document(document: Document, registry: Arc<Registry>) -> Result<Self, EditorError> {
        Self::new(document.tree, registry)
    }

    fn assemble(
        tree: BlockTree,
        registry: Arc<Registry>,
        ids: IdGenerator,
        config: EngineConfig,
    ) -> Self {
        let history = CommitHistory::new(tree.clone(), INITIAL_COMMIT_LABEL, config.history_limit);
        info!(root_id = %tree.root_id(), nodes = tree.len(), "editing session started");
        Self {
            tree,
            registry,
            ids,
            clipboard: None,
            selection: None,
            history,
            observers: Observers::default(),
            config,
        }
    }

    pub fn tree(&self) -> &BlockTree {
        &self.tree
    }

    pub fn into_tree(self) -> BlockTree {
        self.tree
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clipboard(&self) -> Option<&ClipboardSnapshot> {
        self.clipboard.as_ref()
    }

    pub fn selected(&self) -> Option<&BlockId> {
        self.selection.as_ref()
    }

    pub fn history(&self) -> &CommitHistory {
        &self.history
    }

    /// Retained commits, oldest first
    pub fn commits(&self) -> impl Iterator<Item = &Commit> {
        self.history.commits()
    }

    /// Whether the tree differs from the snapshot at the history cursor
    pub fn has_uncommitted_changes(&self) -> bool {
        self.history.current().map_or(true, |c| c.tree != self.tree)
    }

    // Observers

    pub fn subscribe(&mut self, observer: Box<dyn TreeObserver>) -> ObserverId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn emit(&mut self, event: ChangeEvent) {
        self.observers.notify(&event, &self.tree);
    }

    // Validation helpers

    fn node(&self, id: &str) -> Result<&BlockNode, MutationError> {
        self.tree
            .get(id)
            .ok_or_else(|| MutationError::NotFound(BlockId::from(id)))
    }

    /// Capability and containment of `parent` for a new child of `child_type`
    fn check_capability(&self, parent: &BlockNode, child_type: &str) -> Result<(), MutationError> {
        match self.registry.get_definition(&parent.block_type) {
            None => Err(MutationError::invalid_parent(
                &parent.id,
                format!("unknown block type '{}'", parent.block_type),
            )),
            Some(def) if !def.can_have_children => Err(MutationError::invalid_parent(
                &parent.id,
                format!("'{}' cannot have children", parent.block_type),
            )),
            Some(_) => {
                self.registry
                    .check_containment(child_type, &parent.block_type)?;
                Ok(())
            }
        }
    }

    /// Full legality check for inserting a new child of `child_type`
    fn check_insert(&self, parent_id: &str, child_type: &str) -> Result<(), MutationError> {
        let parent = self.node(parent_id)?;
        if parent.meta.locked {
            return Err(MutationError::Locked(parent.id.clone()));
        }
        self.check_capability(parent, child_type)
    }

    /// First locked node among `id` and its ancestors
    fn locked_in_chain(&self, id: &str) -> Option<BlockId> {
        std::iter::once(BlockId::from(id))
            .chain(self.tree.ancestors(id))
            .find(|candidate| self.tree.get(candidate).map_or(false, |n| n.meta.locked))
    }

    // Structural operations

    /// Insert a new block with the registry's default props
    ///
    /// Types without a definition are accepted and treated as leaves.
    pub fn add_block(
        &mut self,
        parent_id: &str,
        block_type: &str,
        index: Option<usize>,
    ) -> Result<BlockId, MutationError> {
        log_rejection("add_block", self.add_block_inner(parent_id, block_type, index))
    }

    fn add_block_inner(
        &mut self,
        parent_id: &str,
        block_type: &str,
        index: Option<usize>,
    ) -> Result<BlockId, MutationError> {
        self.check_insert(parent_id, block_type)?;

        let props = self
            .registry
            .get_definition(block_type)
            .map(|def| def.default_props.clone())
            .unwrap_or_default();
        let id = fresh_id(&mut self.ids, &self.tree);
        let node = BlockNode::new(id.clone(), block_type, props);
        let index = self
            .tree
            .insert_child(parent_id, index, node)
            .ok_or_else(|| MutationError::NotFound(BlockId::from(parent_id)))?;

        debug!(node_id = %id, parent_id, index, block_type, "block added");
        self.emit(ChangeEvent::Added {
            id: id.clone(),
            parent_id: BlockId::from(parent_id),
            index,
        });
        Ok(id)
    }

    pub fn move_block_up(&mut self, id: &str) -> Result<Outcome, MutationError> {
        log_rejection("move_block_up", self.shift_block(id, -1))
    }

    pub fn move_block_down(&mut self, id: &str) -> Result<Outcome, MutationError> {
        log_rejection("move_block_down", self.shift_block(id, 1))
    }

    /// Swap with the previous (`-1`) or next (`1`) sibling
    fn shift_block(&mut self, id: &str, step: isize) -> Result<Outcome, MutationError> {
        let node = self.node(id)?;
        let Some(parent_id) = node.parent_id.clone() else {
            return Err(MutationError::RootProtected("move"));
        };
        if node.meta.locked {
            return Err(MutationError::Locked(node.id.clone()));
        }
        if self.node(&parent_id)?.meta.locked {
            return Err(MutationError::Locked(parent_id));
        }

        let index = self
            .tree
            .index_in_parent(id)
            .ok_or_else(|| MutationError::NotFound(BlockId::from(id)))?;
        let sibling_count = self.tree.children_of(&parent_id).len();
        let target = match index.checked_add_signed(step) {
            Some(target) if target < sibling_count => target,
            _ => return Ok(Outcome::Unchanged),
        };

        self.tree.swap_children(&parent_id, index, target);
        debug!(node_id = id, from = index, to = target, "block shifted");
        self.emit(ChangeEvent::Moved {
            id: BlockId::from(id),
            from_parent: parent_id.clone(),
            from_index: index,
            to_parent: parent_id,
            to_index: target,
        });
        Ok(Outcome::Moved)
    }

    /// Reparent `id` under `new_parent_id` at `index`
    ///
    /// Within the same parent, `index` counts positions in the sibling list
    /// with the node already removed. The index is clamped.
    pub fn move_block(
        &mut self,
        id: &str,
        new_parent_id: &str,
        index: usize,
    ) -> Result<Outcome, MutationError> {
        log_rejection("move_block", self.move_block_inner(id, new_parent_id, index))
    }

    fn move_block_inner(
        &mut self,
        id: &str,
        new_parent_id: &str,
        index: usize,
    ) -> Result<Outcome, MutationError> {
        let node = self.node(id)?;
        let destination = self.node(new_parent_id)?;

        let Some(old_parent_id) = node.parent_id.clone() else {
            return Err(MutationError::RootProtected("move"));
        };

        if node.meta.locked {
            return Err(MutationError::Locked(node.id.clone()));
        }
        if self.node(&old_parent_id)?.meta.locked {
            return Err(MutationError::Locked(old_parent_id));
        }
        if destination.meta.locked {
            return Err(MutationError::Locked(destination.id.clone()));
        }

        if self.tree.is_ancestor_or_self(id, new_parent_id) {
            return Err(MutationError::Cycle {
                node: node.id.clone(),
                parent: destination.id.clone(),
            });
        }

        self.check_capability(destination, &node.block_type)?;

        let (from_parent, from_index) = self
            .tree
            .detach(id)
            .ok_or_else(|| MutationError::NotFound(BlockId::from(id)))?;
        let to_index = self
            .tree
            .attach(id, new_parent_id, Some(index))
            .ok_or_else(|| MutationError::NotFound(BlockId::from(new_parent_id)))?;

        if from_parent.as_str() == new_parent_id && from_index == to_index {
            return Ok(Outcome::Unchanged);
        }

        debug!(node_id = id, %from_parent, to_parent = new_parent_id, to_index, "block moved");
        self.emit(ChangeEvent::Moved {
            id: BlockId::from(id),
            from_parent,
            from_index,
            to_parent: BlockId::from(new_parent_id),
            to_index,
        });
        Ok(Outcome::Moved)
    }

    /// Remove `id` and its whole subtree, returning the removed ids
    ///
    /// Refused if `id` or any of its ancestors is locked. Locked descendants
    /// go with their parent.
    pub fn delete_block(&mut self, id: &str) -> Result<Vec<BlockId>, MutationError> {
        log_rejection("delete_block", self.delete_block_inner(id))
    }

    fn delete_block_inner(&mut self, id: &str) -> Result<Vec<BlockId>, MutationError> {
        if self.node(id)?.is_root() {
            return Err(MutationError::RootProtected("delete"));
        }
        if let Some(locked) = self.locked_in_chain(id) {
            return Err(MutationError::Locked(locked));
        }

        let removed: Vec<BlockId> = self
            .tree
            .remove_subtree(id)
            .into_iter()
            .map(|node| node.id)
            .collect();

        debug!(node_id = id, removed = removed.len(), "block deleted");
        self.emit(ChangeEvent::Deleted {
            ids: removed.clone(),
        });

        if self
            .selection
            .as_ref()
            .is_some_and(|selected| removed.contains(selected))
        {
            self.selection = None;
            self.emit(ChangeEvent::SelectionChanged { selected: None });
        }
        Ok(removed)
    }

    /// Snapshot `id` and its descendants into the clipboard
    pub fn copy_block(&mut self, id: &str) -> Result<(), MutationError> {
        let snapshot = ClipboardSnapshot::capture(&self.tree, id)
            .ok_or_else(|| MutationError::NotFound(BlockId::from(id)));
        let snapshot = log_rejection("copy_block", snapshot)?;
        debug!(node_id = id, nodes = snapshot.node_count(), "block copied");
        self.clipboard = Some(snapshot);
        Ok(())
    }

    /// Instantiate the clipboard under `parent_id` with fresh ids
    ///
    /// The clipboard is kept, so repeated pastes create independent copies.
    pub fn paste_block(
        &mut self,
        parent_id: &str,
        index: Option<usize>,
    ) -> Result<BlockId, MutationError> {
        let result = match self.clipboard.clone() {
            Some(snapshot) => self.insert_snapshot(&snapshot, parent_id, index),
            None => Err(MutationError::ClipboardEmpty),
        };
        log_rejection("paste_block", result)
    }

    /// Copy `id` right after itself, leaving the clipboard alone
    pub fn duplicate_block(&mut self, id: &str) -> Result<BlockId, MutationError> {
        log_rejection("duplicate_block", self.duplicate_block_inner(id))
    }

    fn duplicate_block_inner(&mut self, id: &str) -> Result<BlockId, MutationError> {
        let Some(parent_id) = self.node(id)?.parent_id.clone() else {
            return Err(MutationError::RootProtected("duplicate"));
        };
        let snapshot = ClipboardSnapshot::capture(&self.tree, id)
            .ok_or_else(|| MutationError::NotFound(BlockId::from(id)))?;
        let index = self.tree.index_in_parent(id).map(|i| i + 1);
        self.insert_snapshot(&snapshot, &parent_id, index)
    }

    fn insert_snapshot(
        &mut self,
        snapshot: &ClipboardSnapshot,
        parent_id: &str,
        index: Option<usize>,
    ) -> Result<BlockId, MutationError> {
        self.check_insert(parent_id, snapshot.root_type())?;

        let ids = &mut self.ids;
        let tree = &self.tree;
        let (root, descendants) = snapshot.instantiate(|| fresh_id(ids, tree));

        let id = root.id.clone();
        for node in descendants {
            self.tree.insert_detached(node);
        }
        let index = self
            .tree
            .insert_child(parent_id, index, root)
            .ok_or_else(|| MutationError::NotFound(BlockId::from(parent_id)))?;

        debug!(node_id = %id, parent_id, index, nodes = snapshot.node_count(), "snapshot pasted");
        self.emit(ChangeEvent::Pasted {
            id: id.clone(),
            parent_id: BlockId::from(parent_id),
            index,
        });
        Ok(id)
    }

    // Property edits (allowed on locked nodes)

    fn edit_props(
        &mut self,
        op: &'static str,
        id: &str,
        edit: impl FnOnce(&mut Props) -> bool,
    ) -> Result<bool, MutationError> {
        let changed = match self.tree.get_mut(id) {
            Some(node) => edit(&mut node.props),
            None => return log_rejection(op, Err(MutationError::NotFound(BlockId::from(id)))),
        };
        if changed {
            debug!(node_id = id, op, "props changed");
            self.emit(ChangeEvent::PropsChanged {
                id: BlockId::from(id),
            });
        }
        Ok(changed)
    }

    pub fn update_content(
        &mut self,
        id: &str,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), MutationError> {
        let (key, value) = (key.into(), value.into());
        self.edit_props("update_content", id, |props| {
            props.content.insert(key, value);
            true
        })
        .map(|_| ())
    }

    /// Set a style value at `breakpoint` (desktop writes the base map)
    pub fn update_style(
        &mut self,
        id: &str,
        breakpoint: Breakpoint,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), MutationError> {
        let (key, value) = (key.into(), value.into());
        self.edit_props("update_style", id, |props| {
            style::set_override(&mut props.style, breakpoint, key, value);
            true
        })
        .map(|_| ())
    }

    /// Drop an override so `key` falls back to the base value
    ///
    /// Returns whether an override was removed.
    pub fn clear_style_override(
        &mut self,
        id: &str,
        breakpoint: Breakpoint,
        key: &str,
    ) -> Result<bool, MutationError> {
        self.edit_props("clear_style_override", id, |props| {
            style::clear_override(&mut props.style, breakpoint, key)
        })
    }

    // Meta edits

    fn edit_meta(
        &mut self,
        op: &'static str,
        id: &str,
        edit: impl FnOnce(&mut BlockNode),
    ) -> Result<(), MutationError> {
        match self.tree.get_mut(id) {
            Some(node) => edit(node),
            None => return log_rejection(op, Err(MutationError::NotFound(BlockId::from(id)))),
        }
        debug!(node_id = id, op, "meta changed");
        self.emit(ChangeEvent::MetaChanged {
            id: BlockId::from(id),
        });
        Ok(())
    }

    pub fn set_locked(&mut self, id: &str, locked: bool) -> Result<(), MutationError> {
        self.edit_meta("set_locked", id, |node| node.meta.locked = locked)
    }

    pub fn set_hidden(&mut self, id: &str, hidden: bool) -> Result<(), MutationError> {
        self.edit_meta("set_hidden", id, |node| node.meta.hidden = hidden)
    }

    pub fn set_label(&mut self, id: &str, label: Option<String>) -> Result<(), MutationError> {
        let label = label.filter(|l| !l.trim().is_empty());
        self.edit_meta("set_label", id, |node| node.meta.label = label)
    }

    // Selection

    pub fn select_block(&mut self, id: &str) -> Result<(), MutationError> {
        let id = log_rejection("select_block", self.node(id).map(|n| n.id.clone()))?;
        if self.selection.as_ref() != Some(&id) {
            self.selection = Some(id.clone());
            self.emit(ChangeEvent::SelectionChanged { selected: Some(id) });
        }
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.emit(ChangeEvent::SelectionChanged { selected: None });
        }
    }

    // History

    /// Record a snapshot of the current tree
    pub fn commit(&mut self, label: impl Into<String>) -> u64 {
        let label = label.into();
        let sequence = self.history.record(label.clone(), self.tree.clone());
        info!(sequence, label = %label, nodes = self.tree.len(), "commit recorded");
        self.emit(ChangeEvent::Committed { sequence, label });
        sequence
    }

    /// Restore the previous commit
    ///
    /// Uncommitted changes are discarded first: with any pending, undo
    /// returns to the commit at the cursor instead of stepping back.
    pub fn undo(&mut self) -> bool {
        if self.has_uncommitted_changes() {
            if let Some(current) = self.history.current() {
                let (tree, label) = (current.tree.clone(), current.label.clone());
                self.restore(tree, label);
                return true;
            }
        }
        match self.history.undo() {
            Some(commit) => {
                let (tree, label) = (commit.tree.clone(), commit.label.clone());
                self.restore(tree, label);
                true
            }
            None => false,
        }
    }

    /// Restore the next commit, discarding uncommitted changes
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(commit) => {
                let (tree, label) = (commit.tree.clone(), commit.label.clone());
                self.restore(tree, label);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, tree: BlockTree, label: String) {
        self.tree = tree;
        debug!(label = %label, nodes = self.tree.len(), "tree restored");
        self.emit(ChangeEvent::Replaced { label });
        self.prune_selection();
    }

    fn prune_selection(&mut self) {
        let stale = self
            .selection
            .as_ref()
            .is_some_and(|selected| !self.tree.contains(selected));
        if stale {
            self.clear_selection();
        }
    }

    /// Swap in a whole tree (history replay) and record one commit for it
    pub fn replace_tree(
        &mut self,
        tree: BlockTree,
        label: impl Into<String>,
    ) -> Result<u64, EditorError> {
        if let Err(err) = check_invariants(&tree, &self.registry) {
            warn!(error = %err, "replacement tree rejected");
            return Err(err.into());
        }
        for id in tree.ids() {
            self.ids.observe(id);
        }

        let label = label.into();
        self.restore(tree, label.clone());
        Ok(self.commit(label))
    }

    // Intents

    /// Apply a serialized mutation through the matching operation
    pub fn apply(&mut self, mutation: Mutation) -> Result<Outcome, MutationError> {
        match mutation {
            Mutation::AddBlock {
                parent_id,
                block_type,
                index,
            } => self
                .add_block(&parent_id, &block_type, index)
                .map(Outcome::Created),
            Mutation::MoveUp { id } => self.move_block_up(&id),
            Mutation::MoveDown { id } => self.move_block_down(&id),
            Mutation::MoveBlock {
                id,
                new_parent_id,
                index,
            } => self.move_block(&id, &new_parent_id, index),
            Mutation::DeleteBlock { id } => self.delete_block(&id).map(Outcome::Deleted),
            Mutation::CopyBlock { id } => self.copy_block(&id).map(|_| Outcome::Unchanged),
            Mutation::PasteBlock { parent_id, index } => {
                self.paste_block(&parent_id, index).map(Outcome::Created)
            }
            Mutation::DuplicateBlock { id } => self.duplicate_block(&id).map(Outcome::Created),
            Mutation::UpdateContent { id, key, value } => self
                .update_content(&id, key, value)
                .map(|_| Outcome::Updated),
            Mutation::UpdateStyle {
                id,
                breakpoint,
                key,
                value,
            } => self
                .update_style(&id, breakpoint, key, value)
                .map(|_| Outcome::Updated),
            Mutation::ClearStyleOverride {
                id,
                breakpoint,
                key,
            } => self
                .clear_style_override(&id, breakpoint, &key)
                .map(|removed| if removed { Outcome::Updated } else { Outcome::Unchanged }),
            Mutation::SetLocked { id, locked } => {
                self.set_locked(&id, locked).map(|_| Outcome::Updated)
            }
            Mutation::SetHidden { id, hidden } => {
                self.set_hidden(&id, hidden).map(|_| Outcome::Updated)
            }
            Mutation::SetLabel { id, label } => self.set_label(&id, label).map(|_| Outcome::Updated),
            Mutation::Select { id } => self.select_block(&id).map(|_| Outcome::Updated),
            Mutation::ClearSelection => {
                self.clear_selection();
                Ok(Outcome::Updated)
            }
        }
    }

    // Drag and drop

    /// Begin a drag of `source`
    ///
    /// Locked nodes and the root cannot be dragged. Dragging the clipboard
    /// needs something in it.
    pub fn start_drag(&self, source: DragSource) -> Result<DragSession, MutationError> {
        let checked = match &source {
            DragSource::Existing(id) => match self.node(id) {
                Err(err) => Err(err),
                Ok(node) if node.is_root() => Err(MutationError::RootProtected("drag")),
                Ok(node) if node.meta.locked => Err(MutationError::Locked(node.id.clone())),
                Ok(_) => Ok(()),
            },
            DragSource::Clipboard if self.clipboard.is_none() => Err(MutationError::ClipboardEmpty),
            DragSource::Clipboard | DragSource::Palette(_) => Ok(()),
        };
        log_rejection("start_drag", checked)?;

        Ok(DragSession::new(
            source,
            InsertionResolver::new(self.config.marker_offset),
        ))
    }

    /// Commit a finished drag against the tree as it is now
    ///
    /// A drop applies one move, add or paste and records a `"drag"` commit.
    /// Cancelled drags, drops outside any target and drops of a node back
    /// onto its own slot change nothing and record no commit. Returns
    /// the id of the dropped node.
    pub fn apply_drop(&mut self, outcome: DragOutcome) -> Result<Option<BlockId>, MutationError> {
        let (source, proposal) = match outcome {
            DragOutcome::Drop { source, proposal } => (source, proposal),
            DragOutcome::Cancelled { source } | DragOutcome::NoTarget { source } => {
                debug!(?source, "drag ended without drop");
                return Ok(None);
            }
        };

        let parent_id = proposal.parent_id.as_str();
        let dropped = match source {
            DragSource::Existing(id) => {
                // Proposals count the dragged node in its own sibling list
                let mut index = proposal.index;
                if self.tree.parent_of(&id).map(BlockId::as_str) == Some(parent_id) {
                    if let Some(current) = self.tree.index_in_parent(&id) {
                        if index > current {
                            index -= 1;
                        }
                    }
                }
                if self.move_block(&id, parent_id, index)? == Outcome::Unchanged {
                    debug!(node_id = %id, "drop onto own slot");
                    return Ok(Some(id));
                }
                id
            }
            DragSource::Palette(block_type) => {
                self.add_block(parent_id, &block_type, Some(proposal.index))?
            }
            DragSource::Clipboard => self.paste_block(parent_id, Some(proposal.index))?,
        };

        self.commit(DRAG_COMMIT_LABEL);
        Ok(Some(dropped))
    }
}
