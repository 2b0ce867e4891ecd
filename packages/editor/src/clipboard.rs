//! Deep subtree snapshots for copy and paste.
//!
//! A snapshot carries types, props and meta but no ids. Pasting
//! instantiates it with fresh ids, so one snapshot can be pasted any number
//! of times.

use pageblocks_model::{BlockId, BlockNode, BlockTree, Meta, Props};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotNode {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub props: Props,
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub children: Vec<SnapshotNode>,
}

impl SnapshotNode {
    fn capture(tree: &BlockTree, node: &BlockNode) -> Self {
        Self {
            block_type: node.block_type.clone(),
            props: node.props.clone(),
            meta: node.meta.clone(),
            children: node
                .child_ids
                .iter()
                .filter_map(|id| tree.get(id))
                .map(|child| Self::capture(tree, child))
                .collect(),
        }
    }

    fn count(&self) -> usize {
        1 + self.children.iter().map(SnapshotNode::count).sum::<usize>()
    }

    fn instantiate(
        &self,
        parent_id: Option<&BlockId>,
        next_id: &mut impl FnMut() -> BlockId,
        out: &mut Vec<BlockNode>,
    ) -> BlockNode {
        let mut node = BlockNode::new(next_id(), self.block_type.clone(), self.props.clone());
        node.meta = self.meta.clone();
        node.parent_id = parent_id.cloned();

        for child in &self.children {
            let child_node = child.instantiate(Some(&node.id), &mut *next_id, out);
            node.child_ids.push(child_node.id.clone());
            out.push(child_node);
        }
        node
    }
}

/// Clipboard contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipboardSnapshot {
    root: SnapshotNode,
}

impl ClipboardSnapshot {
    /// Snapshot `id` and its descendants, `None` if `id` is not in the tree
    pub fn capture(tree: &BlockTree, id: &str) -> Option<Self> {
        let node = tree.get(id)?;
        Some(Self {
            root: SnapshotNode::capture(tree, node),
        })
    }

    pub fn root(&self) -> &SnapshotNode {
        &self.root
    }

    pub fn root_type(&self) -> &str {
        &self.root.block_type
    }

    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    /// Build detached nodes with fresh ids
    ///
    /// Returns the new root (without a parent) and its descendants, already
    /// linked to each other.
    pub fn instantiate(&self, mut next_id: impl FnMut() -> BlockId) -> (BlockNode, Vec<BlockNode>) {
        let mut descendants = Vec::with_capacity(self.node_count().saturating_sub(1));
        let root = self.root.instantiate(None, &mut next_id, &mut descendants);
        (root, descendants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageblocks_model::IdGenerator;

    fn sample() -> BlockTree {
        let mut tree = BlockTree::with_root(BlockNode::new("root".into(), "page", Props::default()));
        tree.insert_child("root", None, BlockNode::new("section".into(), "section", Props::default()));
        tree.insert_child(
            "section",
            None,
            BlockNode::new("h".into(), "heading", Props::default().with_content("text", "Hi")),
        );
        tree.insert_child("section", None, BlockNode::new("t".into(), "text", Props::default()));
        tree
    }

    #[test]
    fn test_capture_is_deep() {
        let snapshot = ClipboardSnapshot::capture(&sample(), "section").unwrap();
        assert_eq!(snapshot.root_type(), "section");
        assert_eq!(snapshot.node_count(), 3);
        assert_eq!(snapshot.root().children[0].props.content_str("text"), Some("Hi"));
        assert!(ClipboardSnapshot::capture(&sample(), "nope").is_none());
    }

    #[test]
    fn test_instantiate_uses_fresh_linked_ids() {
        let snapshot = ClipboardSnapshot::capture(&sample(), "section").unwrap();
        let mut gen = IdGenerator::new("clip");

        let (root, descendants) = snapshot.instantiate(|| gen.new_id());
        assert!(root.parent_id.is_none());
        assert_eq!(root.child_ids.len(), 2);
        assert_eq!(descendants.len(), 2);
        for child in &descendants {
            assert_eq!(child.parent_id.as_ref(), Some(&root.id));
        }
        assert_eq!(root.child_ids[0], descendants[0].id);
        assert_eq!(descendants[0].block_type, "heading");

        // A second paste never reuses ids
        let (again, _) = snapshot.instantiate(|| gen.new_id());
        assert_ne!(again.id, root.id);
    }
}
