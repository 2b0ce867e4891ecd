pub mod apply;
pub mod init;
pub mod insertion;
pub mod inspect;
pub mod style;
pub mod validate;

pub use apply::{apply, ApplyArgs};
pub use init::{init, InitArgs};
pub use insertion::{insertion_index, InsertionArgs};
pub use inspect::{inspect, InspectArgs};
pub use style::{resolve_style, ResolveStyleArgs};
pub use validate::{validate, ValidateArgs};
