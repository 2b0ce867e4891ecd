//! Item-node containment rules
//!
//! Some block types only make sense directly inside one container (a tab
//! panel inside tabs, an accordion item inside an accordion). The rule table
//! is the single place that coupling is declared; the mutation engine asks
//! it instead of each block type carrying its own checks.

use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{item_type}' may only be placed directly inside '{required}', not '{actual}'")]
pub struct ContainmentError {
    pub item_type: String,
    pub required: String,
    pub actual: String,
}

/// Item type → required container type
#[derive(Debug, Clone, Default)]
pub struct ContainmentRules {
    containers: HashMap<String, String>,
}

impl ContainmentRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(&mut self, item_type: impl Into<String>, container_type: impl Into<String>) {
        self.containers.insert(item_type.into(), container_type.into());
    }

    pub fn container_for(&self, item_type: &str) -> Option<&str> {
        self.containers.get(item_type).map(String::as_str)
    }

    /// Item types that must live under `container_type`
    pub fn items_of<'a>(&'a self, container_type: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.containers
            .iter()
            .filter(move |(_, c)| c.as_str() == container_type)
            .map(|(item, _)| item.as_str())
    }

    /// Check placing `child_type` directly under `parent_type`
    ///
    /// Types without a rule may go anywhere.
    pub fn check(&self, child_type: &str, parent_type: &str) -> Result<(), ContainmentError> {
        match self.containers.get(child_type) {
            Some(required) if required != parent_type => Err(ContainmentError {
                item_type: child_type.to_string(),
                required: required.clone(),
                actual: parent_type.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules() {
        let mut rules = ContainmentRules::new();
        rules.require("tab-panel", "tabs");

        assert!(rules.check("tab-panel", "tabs").is_ok());
        assert!(rules.check("text", "tabs").is_ok());

        let err = rules.check("tab-panel", "section").unwrap_err();
        assert_eq!(err.required, "tabs");
        assert_eq!(err.actual, "section");
        assert_eq!(rules.items_of("tabs").collect::<Vec<_>>(), vec!["tab-panel"]);
    }
}
