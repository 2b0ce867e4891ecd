//! Responsive style cascade.
//!
//! Desktop is the default tier and reads `style.base` unchanged. Tablet and
//! mobile each layer their own partial map over the base. Overrides never
//! leak from one tier into another, so mobile does not inherit tablet.

use crate::{Breakpoint, BreakpointWidths};
use pageblocks_model::{BlockNode, StyleMap, StyleProps};
use serde::{Deserialize, Serialize};

/// Effective style map for `breakpoint`
pub fn resolve(style: &StyleProps, breakpoint: Breakpoint) -> StyleMap {
    let mut resolved = style.base.clone();
    if breakpoint.is_default() {
        return resolved;
    }
    if let Some(overrides) = style.responsive.get(breakpoint.as_str()) {
        for (key, value) in overrides {
            resolved.insert(key.clone(), value.clone());
        }
    }
    resolved
}

/// Whether `key` is explicitly overridden at `breakpoint`
///
/// Always `false` for desktop, which has no override layer.
pub fn is_overridden(style: &StyleProps, breakpoint: Breakpoint, key: &str) -> bool {
    if breakpoint.is_default() {
        return false;
    }
    style
        .responsive
        .get(breakpoint.as_str())
        .is_some_and(|overrides| overrides.contains_key(key))
}

/// Keys carrying an explicit override at `breakpoint`, sorted
pub fn overridden_keys(style: &StyleProps, breakpoint: Breakpoint) -> Vec<&str> {
    if breakpoint.is_default() {
        return Vec::new();
    }
    style
        .responsive
        .get(breakpoint.as_str())
        .map(|overrides| overrides.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

/// Write a style value at `breakpoint`
///
/// Desktop writes go to the base map.
pub fn set_override(
    style: &mut StyleProps,
    breakpoint: Breakpoint,
    key: impl Into<String>,
    value: impl Into<String>,
) {
    if breakpoint.is_default() {
        style.base.insert(key.into(), value.into());
    } else {
        style
            .responsive
            .entry(breakpoint.as_str().to_string())
            .or_default()
            .insert(key.into(), value.into());
    }
}

/// Remove an override so the key falls back to the base value
///
/// Returns `true` if an override was removed. Empty override maps are dropped.
pub fn clear_override(style: &mut StyleProps, breakpoint: Breakpoint, key: &str) -> bool {
    if breakpoint.is_default() {
        return false;
    }
    let name = breakpoint.as_str();
    let Some(overrides) = style.responsive.get_mut(name) else {
        return false;
    };
    let removed = overrides.remove(key).is_some();
    if overrides.is_empty() {
        style.responsive.remove(name);
    }
    removed
}

/// Resolves styles for nodes, optionally from a viewport width
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleResolver {
    pub widths: BreakpointWidths,
}

impl StyleResolver {
    pub fn new(widths: BreakpointWidths) -> Self {
        Self { widths }
    }

    pub fn breakpoint_for_width(&self, width: f64) -> Breakpoint {
        self.widths.breakpoint_for_width(width)
    }

    pub fn resolve_node(&self, node: &BlockNode, breakpoint: Breakpoint) -> StyleMap {
        resolve(&node.props.style, breakpoint)
    }

    pub fn resolve_at_width(&self, node: &BlockNode, width: f64) -> StyleMap {
        self.resolve_node(node, self.breakpoint_for_width(width))
    }
}
