//! Registry-aware tree invariants.
//!
//! [`BlockTree::check_structure`] covers the shape of the tree on its own.
//! The checks here add the rules that depend on block definitions: leaf types
//! hold no children, and item nodes sit directly under their container.

use pageblocks_model::{BlockId, BlockTree, StructureError};
use pageblocks_registry::{ContainmentError, Registry};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantError {
    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error("Node {id} of type '{block_type}' cannot have children")]
    LeafHasChildren { id: BlockId, block_type: String },

    #[error("Node {id}: {source}")]
    ItemNodeViolation {
        id: BlockId,
        #[source]
        source: ContainmentError,
    },
}

/// Check every invariant an editing session relies on
///
/// Nodes whose type is not registered are tolerated.
pub fn check_invariants(tree: &BlockTree, registry: &Registry) -> Result<(), InvariantError> {
    tree.check_structure()?;

    for node in tree.nodes() {
        if let Some(def) = registry.get_definition(&node.block_type) {
            if !def.can_have_children && !node.child_ids.is_empty() {
                return Err(InvariantError::LeafHasChildren {
                    id: node.id.clone(),
                    block_type: node.block_type.clone(),
                });
            }
        }

        let parent_type = node
            .parent_id
            .as_ref()
            .and_then(|p| tree.get(p))
            .map(|p| p.block_type.as_str());
        let is_item = registry
            .get_definition(&node.block_type)
            .map_or(false, |d| d.is_item_node);

        match parent_type {
            Some(parent_type) => registry
                .check_containment(&node.block_type, parent_type)
                .map_err(|source| InvariantError::ItemNodeViolation {
                    id: node.id.clone(),
                    source,
                })?,
            // An item node cannot be the root
            None if is_item => {
                return Err(InvariantError::ItemNodeViolation {
                    id: node.id.clone(),
                    source: ContainmentError {
                        item_type: node.block_type.clone(),
                        required: registry
                            .containment()
                            .container_for(&node.block_type)
                            .unwrap_or_default()
                            .to_string(),
                        actual: String::new(),
                    },
                })
            }
            None => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageblocks_model::{BlockNode, Props};

    fn node(id: &str, block_type: &str, parent: Option<&str>, children: &[&str]) -> BlockNode {
        let mut node = BlockNode::new(id.into(), block_type, Props::default());
        node.parent_id = parent.map(BlockId::from);
        node.child_ids = children.iter().map(|c| BlockId::from(*c)).collect();
        node
    }

    #[test]
    fn test_valid_tree() {
        let tree = BlockTree::from_parts(
            "root".into(),
            vec![
                node("root", "page", None, &["tabs"]),
                node("tabs", "tabs", Some("root"), &["panel"]),
                node("panel", "tab-panel", Some("tabs"), &["legacy"]),
                node("legacy", "legacy-widget-v1", Some("panel"), &[]),
            ],
        );
        assert_eq!(check_invariants(&tree, &Registry::builtin()), Ok(()));
    }

    #[test]
    fn test_leaf_with_children() {
        let tree = BlockTree::from_parts(
            "root".into(),
            vec![
                node("root", "page", None, &["img"]),
                node("img", "image", Some("root"), &["t"]),
                node("t", "text", Some("img"), &[]),
            ],
        );
        assert!(matches!(
            check_invariants(&tree, &Registry::builtin()),
            Err(InvariantError::LeafHasChildren { .. })
        ));
    }

    #[test]
    fn test_misplaced_item_node() {
        let tree = BlockTree::from_parts(
            "root".into(),
            vec![
                node("root", "page", None, &["panel"]),
                node("panel", "tab-panel", Some("root"), &[]),
            ],
        );
        assert!(matches!(
            check_invariants(&tree, &Registry::builtin()),
            Err(InvariantError::ItemNodeViolation { .. })
        ));
    }

    #[test]
    fn test_structure_errors_surface() {
        let tree = BlockTree::from_parts("root".into(), vec![node("root", "page", None, &["ghost"])]);
        assert!(matches!(
            check_invariants(&tree, &Registry::builtin()),
            Err(InvariantError::Structure(StructureError::DanglingChild { .. }))
        ));
    }
}
