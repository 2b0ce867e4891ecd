//! Drag-and-drop geometry for the page builder canvas.

pub mod drag;
pub mod insertion;
pub mod rect;

pub use drag::{DragOutcome, DragSession, DragSource};
pub use insertion::{
    insertion_index, marker_position, DropTarget, InsertionResolver, Proposal,
    DEFAULT_MARKER_OFFSET,
};
pub use rect::{ParseRectError, Rect};
