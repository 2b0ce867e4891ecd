//! # Pageblocks Registry
//!
//! Catalog mapping a block type name to its capabilities: whether it can
//! contain children, whether it is an item node tied to a container, which
//! module gates it, its default props and its property-editor schema.

mod builtin;
mod containment;
mod definition;
mod registry;

pub use builtin::ROOT_TYPE;
pub use containment::{ContainmentError, ContainmentRules};
pub use definition::{Definition, FieldKind, PropField};
pub use registry::Registry;
