//! # Pageblocks Editor
//!
//! Editing session for a block-tree page document.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ UI events, pointer drags, serialized intents │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: TreeMutationEngine                  │
//! │  - Validate against registry + invariants   │
//! │  - Mutate the tree, notify observers        │
//! │  - Clipboard, selection, commit history     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer / validator read the BlockTree     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pageblocks_editor::{Document, TreeMutationEngine};
//!
//! let doc = Document::load("home.json", &registry)?;
//! let mut engine = TreeMutationEngine::from_document(doc, registry)?;
//!
//! let root = engine.tree().root_id().clone();
//! let heading = engine.add_block(&root, "heading", Some(0))?;
//! engine.update_content(&heading, "text", "Welcome")?;
//! engine.commit("add heading");
//! ```

mod clipboard;
mod config;
mod document;
mod engine;
mod errors;
mod history;
mod invariants;
mod mutations;
mod observer;

pub use clipboard::{ClipboardSnapshot, SnapshotNode};
pub use config::EngineConfig;
pub use document::Document;
pub use engine::{TreeMutationEngine, DRAG_COMMIT_LABEL, INITIAL_COMMIT_LABEL};
pub use errors::{EditorError, MutationError};
pub use history::{Commit, CommitHistory};
pub use invariants::{check_invariants, InvariantError};
pub use mutations::{Mutation, Outcome};
pub use observer::{ChangeEvent, FnObserver, ObserverId, TreeObserver};

// Re-export common types for convenience
pub use pageblocks_geometry::{DragOutcome, DragSession, DragSource, DropTarget, Rect};
pub use pageblocks_model::{BlockId, BlockNode, BlockTree};
pub use pageblocks_registry::Registry;
pub use pageblocks_style::Breakpoint;
