//! # Block Tree
//!
//! The document: a root id plus a flat map of id → node. Parent/child links
//! are stored on both sides (`parentId` and `childIds`) so that lookups in
//! either direction are cheap.
//!
//! ## Invariants
//!
//! `check_structure` verifies the registry-independent invariants:
//!
//! 1. Every id in some `childIds` appears exactly once across all lists
//! 2. `parentId` agrees with the single list that contains the node; the
//!    root has no parent
//! 3. The graph is acyclic and every node is reachable from the root
//!
//! The remaining invariants (leaf types have no children, item nodes live
//! under their container) need the block registry and are checked by the
//! editor.
//!
//! The structural primitives at the bottom of this file (`insert_child`,
//! `detach`, `attach`, ...) do not validate anything. They exist for the
//! mutation engine, which validates before calling them.

use crate::{BlockId, BlockNode, IdGenerator, ModelError, Props, StructureError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockTree {
    root_id: BlockId,
    nodes: BTreeMap<BlockId, BlockNode>,
}

impl BlockTree {
    /// Create a document holding only a root node
    pub fn new_document(root_type: impl Into<String>, ids: &mut IdGenerator) -> Self {
        let root = BlockNode::new(ids.new_id(), root_type, Props::default());
        Self::with_root(root)
    }

    /// Create a document from an existing root node
    pub fn with_root(mut root: BlockNode) -> Self {
        root.parent_id = None;
        root.child_ids.clear();
        let root_id = root.id.clone();
        let mut nodes = BTreeMap::new();
        nodes.insert(root_id.clone(), root);
        Self { root_id, nodes }
    }

    /// Assemble a tree from raw parts (not validated)
    pub fn from_parts(root_id: BlockId, nodes: impl IntoIterator<Item = BlockNode>) -> Self {
        Self {
            root_id,
            nodes: nodes.into_iter().map(|n| (n.id.clone(), n)).collect(),
        }
    }

    pub fn root_id(&self) -> &BlockId {
        &self.root_id
    }

    pub fn root(&self) -> Option<&BlockNode> {
        self.nodes.get(&self.root_id)
    }

    pub fn get(&self, id: &str) -> Option<&BlockNode> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut BlockNode> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in id order
    pub fn nodes(&self) -> impl Iterator<Item = &BlockNode> {
        self.nodes.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &BlockId> {
        self.nodes.keys()
    }

    pub fn parent_of(&self, id: &str) -> Option<&BlockId> {
        self.nodes.get(id).and_then(|n| n.parent_id.as_ref())
    }

    /// Ordered children (empty for unknown ids)
    pub fn children_of(&self, id: &str) -> &[BlockId] {
        self.nodes
            .get(id)
            .map(|n| n.child_ids.as_slice())
            .unwrap_or(&[])
    }

    pub fn index_in_parent(&self, id: &str) -> Option<usize> {
        let parent = self.parent_of(id)?;
        self.children_of(parent).iter().position(|c| c.as_str() == id)
    }

    /// Parent chain of `id`, nearest first
    ///
    /// Bounded by the node count so a malformed (cyclic) input terminates.
    pub fn ancestors(&self, id: &str) -> Vec<BlockId> {
        let mut chain = Vec::new();
        let mut current = self.parent_of(id);
        while let Some(parent) = current {
            if chain.len() >= self.nodes.len() {
                break;
            }
            chain.push(parent.clone());
            current = self.parent_of(parent);
        }
        chain
    }

    pub fn is_ancestor_or_self(&self, ancestor: &str, id: &str) -> bool {
        ancestor == id || self.ancestors(id).iter().any(|a| a.as_str() == ancestor)
    }

    /// Ids of `id` and all its descendants, depth-first pre-order
    pub fn subtree_ids(&self, id: &str) -> Vec<BlockId> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let Some(start) = self.nodes.get(id) else {
            return out;
        };

        let mut stack = vec![start.id.clone()];
        while let Some(current) = stack.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            if let Some(node) = self.nodes.get(&current) {
                stack.extend(node.child_ids.iter().rev().cloned());
            }
            out.push(current);
        }
        out
    }

    /// Verify the registry-independent invariants
    pub fn check_structure(&self) -> Result<(), StructureError> {
        let root = self
            .nodes
            .get(&self.root_id)
            .ok_or_else(|| StructureError::MissingRoot(self.root_id.clone()))?;
        if root.parent_id.is_some() {
            return Err(StructureError::RootHasParent(self.root_id.clone()));
        }

        // Who lists whom
        let mut listed_under: HashMap<&BlockId, &BlockId> = HashMap::new();
        for (key, node) in &self.nodes {
            if key != &node.id {
                return Err(StructureError::KeyMismatch {
                    key: key.clone(),
                    id: node.id.clone(),
                });
            }
            for child in &node.child_ids {
                if !self.nodes.contains_key(child) {
                    return Err(StructureError::DanglingChild {
                        parent: node.id.clone(),
                        child: child.clone(),
                    });
                }
                if child == &self.root_id {
                    return Err(StructureError::RootHasParent(child.clone()));
                }
                if listed_under.insert(child, &node.id).is_some() {
                    return Err(StructureError::DuplicateChild(child.clone()));
                }
            }
        }

        for node in self.nodes.values() {
            if node.id == self.root_id {
                continue;
            }
            let listed = listed_under.get(&node.id).copied();
            match (node.parent_id.as_ref(), listed) {
                (Some(claimed), Some(listed)) if claimed == listed => {}
                (None, None) => return Err(StructureError::Unreachable(node.id.clone())),
                (claimed, listed) => {
                    return Err(StructureError::ParentMismatch {
                        node: node.id.clone(),
                        claimed: claimed.cloned(),
                        listed: listed.cloned(),
                    })
                }
            }
        }

        // Every node has exactly one parent now, so anything the root cannot
        // reach sits on a detached cycle.
        let reached: HashSet<BlockId> = self.subtree_ids(&self.root_id).into_iter().collect();
        if let Some(lost) = self.nodes.keys().find(|id| !reached.contains(*id)) {
            return Err(StructureError::Cycle(lost.clone()));
        }

        Ok(())
    }

    pub fn from_json(source: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_value(value: Value) -> Result<Self, ModelError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> Result<Value, ModelError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Copy of the tree without hidden subtrees
    ///
    /// The root is always kept, whatever its own `hidden` flag says.
    pub fn published_view(&self) -> BlockTree {
        let mut nodes = BTreeMap::new();
        let mut stack = vec![self.root_id.clone()];

        while let Some(id) = stack.pop() {
            if nodes.contains_key(&id) {
                continue;
            }
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            let mut kept = node.clone();
            kept.child_ids
                .retain(|c| self.nodes.get(c).map_or(false, |child| !child.meta.hidden));
            stack.extend(kept.child_ids.iter().cloned());
            nodes.insert(id, kept);
        }

        BlockTree {
            root_id: self.root_id.clone(),
            nodes,
        }
    }

    // Structural primitives (unchecked)

    /// Insert `node` under `parent_id`, clamping `index` to the child count
    ///
    /// Returns the index actually used, or `None` if the parent is missing.
    pub fn insert_child(
        &mut self,
        parent_id: &str,
        index: Option<usize>,
        mut node: BlockNode,
    ) -> Option<usize> {
        let parent = self.nodes.get_mut(parent_id)?;
        let len = parent.child_ids.len();
        let at = index.unwrap_or(len).min(len);
        parent.child_ids.insert(at, node.id.clone());
        node.parent_id = Some(parent.id.clone());
        self.nodes.insert(node.id.clone(), node);
        Some(at)
    }

    /// Store a node whose links are already set up
    pub fn insert_detached(&mut self, node: BlockNode) {
        self.nodes.insert(node.id.clone(), node);
    }

    /// Unlink `id` from its parent, returning the old parent and index
    pub fn detach(&mut self, id: &str) -> Option<(BlockId, usize)> {
        let parent_id = self.nodes.get(id)?.parent_id.clone()?;
        let parent = self.nodes.get_mut(&parent_id)?;
        let index = parent.child_ids.iter().position(|c| c.as_str() == id)?;
        parent.child_ids.remove(index);
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent_id = None;
        }
        Some((parent_id, index))
    }

    /// Link a detached node under `parent_id`
    pub fn attach(&mut self, id: &str, parent_id: &str, index: Option<usize>) -> Option<usize> {
        let node_id = self.nodes.get(id)?.id.clone();
        let parent = self.nodes.get_mut(parent_id)?;
        let len = parent.child_ids.len();
        let at = index.unwrap_or(len).min(len);
        parent.child_ids.insert(at, node_id);
        let parent_id = parent.id.clone();
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent_id = Some(parent_id);
        }
        Some(at)
    }

    /// Unlink and drop `id` with all its descendants
    pub fn remove_subtree(&mut self, id: &str) -> Vec<BlockNode> {
        let ids = self.subtree_ids(id);
        self.detach(id);
        ids.iter().filter_map(|i| self.nodes.remove(i)).collect()
    }

    pub fn swap_children(&mut self, parent_id: &str, a: usize, b: usize) -> bool {
        match self.nodes.get_mut(parent_id) {
            Some(parent) if a < parent.child_ids.len() && b < parent.child_ids.len() => {
                parent.child_ids.swap(a, b);
                true
            }
            _ => false,
        }
    }
}
