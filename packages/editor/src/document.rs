//! # Document Handle
//!
//! The persisted form of a page: the block tree plus opaque metadata owned
//! by the persistence collaborator (title, slug, timestamps...).
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Validate → Edit → Commit → Save
//!   ↓       ↓         ↓       ↓       ↓
//! JSON  Invariants  Engine  History  JSON
//! ```

use crate::errors::EditorError;
use crate::invariants::check_invariants;
use pageblocks_model::BlockTree;
use pageblocks_registry::Registry;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::info;

/// Saved page document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(flatten)]
    pub tree: BlockTree,

    /// Round-tripped untouched
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl Document {
    pub fn new(tree: BlockTree) -> Self {
        Self {
            tree,
            metadata: Map::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Parse and validate a document
    ///
    /// A document that breaks any tree invariant is rejected.
    pub fn from_json(source: &str, registry: &Registry) -> Result<Self, EditorError> {
        let document: Document = serde_json::from_str(source)?;
        check_invariants(&document.tree, registry)?;
        info!(
            root_id = %document.tree.root_id(),
            nodes = document.tree.len(),
            "document loaded"
        );
        Ok(document)
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>, registry: &Registry) -> Result<Self, EditorError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&source, registry)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        info!(path = %path.as_ref().display(), nodes = self.tree.len(), "document saved");
        Ok(())
    }
}
