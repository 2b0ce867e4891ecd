//! # Pageblocks Model
//!
//! The block-tree document: nodes, property bags, ids and the structural
//! invariants every editing operation must preserve.
//!
//! The JSON form of [`BlockTree`] (`{ rootId, nodes }`) is the only durable
//! representation exchanged with persistence.

mod error;
mod id_generator;
mod node;
mod tree;
mod visitor;

pub use error::{ModelError, StructureError};
pub use id_generator::{get_document_seed, IdGenerator};
pub use node::{BlockId, BlockNode, ContentMap, Meta, Props, StyleMap, StyleProps};
pub use tree::BlockTree;
pub use visitor::{walk_subtree, walk_tree, TreeVisitor, WalkControl};
