pub mod breakpoint;
pub mod resolver;

pub use breakpoint::{Breakpoint, BreakpointWidths, ParseBreakpointError};
pub use resolver::{
    clear_override, is_overridden, overridden_keys, resolve, set_override, StyleResolver,
};
