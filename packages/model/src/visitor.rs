use crate::{BlockNode, BlockTree};
use std::collections::HashSet;

/// Returned from `enter` to steer the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    Continue,
    SkipChildren,
}

/// Visitor pattern for traversing a block tree immutably
///
/// The default implementations visit everything and do nothing.
/// Override `enter`/`leave` to act on nodes.
pub trait TreeVisitor {
    fn enter(&mut self, _node: &BlockNode, _depth: usize) -> WalkControl {
        WalkControl::Continue
    }

    fn leave(&mut self, _node: &BlockNode, _depth: usize) {}

    /// Called for ids listed in `childIds` that have no node
    fn missing(&mut self, _id: &str, _depth: usize) {}
}

enum Step<'a> {
    Enter(&'a str, usize),
    Leave(&'a BlockNode, usize),
}

/// Walk the whole tree from the root, depth-first in document order
pub fn walk_tree<V: TreeVisitor>(visitor: &mut V, tree: &BlockTree) {
    walk_subtree(visitor, tree, tree.root_id());
}

/// Walk `start` and its descendants
///
/// Each node is entered at most once, so malformed input cannot loop.
pub fn walk_subtree<V: TreeVisitor>(visitor: &mut V, tree: &BlockTree, start: &str) {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut stack = vec![Step::Enter(start, 0)];

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(id, depth) => {
                let Some(node) = tree.get(id) else {
                    visitor.missing(id, depth);
                    continue;
                };
                if !seen.insert(node.id.as_str()) {
                    continue;
                }
                let control = visitor.enter(node, depth);
                stack.push(Step::Leave(node, depth));
                if control == WalkControl::Continue {
                    for child in node.child_ids.iter().rev() {
                        stack.push(Step::Enter(child.as_str(), depth + 1));
                    }
                }
            }
            Step::Leave(node, depth) => visitor.leave(node, depth),
        }
    }
}
