//! # Block Registry
//!
//! Static catalog of block types. Lookups are O(1) and side-effect free.
//!
//! A node whose type has no entry is not an error: renderers show an
//! "unknown block" placeholder and the editor still allows deleting it, but
//! nothing may be placed inside it.

use crate::containment::{ContainmentError, ContainmentRules};
use crate::definition::Definition;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    definitions: HashMap<String, Definition>,
    containment: ContainmentRules,
}

impl Registry {
    /// Create an empty registry
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a definition (replacing any previous one of the same type)
    pub fn register(mut self, definition: Definition) -> Self {
        self.add(definition);
        self
    }

    /// Add an item-node definition and its required container
    pub fn register_item(mut self, definition: Definition, container_type: impl Into<String>) -> Self {
        self.add_item(definition, container_type);
        self
    }

    pub fn add(&mut self, definition: Definition) {
        self.definitions
            .insert(definition.type_name.clone(), definition);
    }

    pub fn add_item(&mut self, definition: Definition, container_type: impl Into<String>) {
        let definition = definition.as_item();
        self.containment
            .require(definition.type_name.clone(), container_type);
        self.add(definition);
    }

    pub fn get_definition(&self, block_type: &str) -> Option<&Definition> {
        self.definitions.get(block_type)
    }

    pub fn contains(&self, block_type: &str) -> bool {
        self.definitions.contains_key(block_type)
    }

    /// Unknown types cannot have children
    pub fn can_have_children(&self, block_type: &str) -> bool {
        self.get_definition(block_type)
            .map_or(false, |d| d.can_have_children)
    }

    pub fn containment(&self) -> &ContainmentRules {
        &self.containment
    }

    /// Check the item-node rule for placing `child_type` under `parent_type`
    ///
    /// An item node registered without a container rule is rejected
    /// everywhere.
    pub fn check_containment(&self, child_type: &str, parent_type: &str) -> Result<(), ContainmentError> {
        let is_item = self
            .get_definition(child_type)
            .map_or(false, |d| d.is_item_node);
        if is_item && self.containment.container_for(child_type).is_none() {
            return Err(ContainmentError {
                item_type: child_type.to_string(),
                required: String::new(),
                actual: parent_type.to_string(),
            });
        }
        self.containment.check(child_type, parent_type)
    }

    /// All definitions, sorted by type name
    pub fn definitions(&self) -> Vec<&Definition> {
        let mut defs: Vec<_> = self.definitions.values().collect();
        defs.sort_by(|a, b| a.type_name.cmp(&b.type_name));
        defs
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::empty()
            .register(Definition::container("accordion", "Accordion"))
            .register_item(Definition::container("accordion-item", "Item"), "accordion")
            .register(Definition::leaf("text", "Text"))
    }

    #[test]
    fn test_lookup() {
        let registry = registry();
        assert_eq!(registry.len(), 3);
        assert!(registry.get_definition("text").is_some());
        assert!(registry.get_definition("legacy-widget-v1").is_none());
        assert!(registry.can_have_children("accordion"));
        assert!(!registry.can_have_children("text"));
        assert!(!registry.can_have_children("legacy-widget-v1"));
    }

    #[test]
    fn test_register_item_sets_flag_and_rule() {
        let registry = registry();
        let item = registry.get_definition("accordion-item").unwrap();
        assert!(item.is_item_node);
        assert_eq!(registry.containment().container_for("accordion-item"), Some("accordion"));
        assert!(registry.check_containment("accordion-item", "accordion").is_ok());
        assert!(registry.check_containment("accordion-item", "text").is_err());
    }

    #[test]
    fn test_item_without_rule_is_rejected() {
        let registry = Registry::empty()
            .register(Definition::leaf("orphan-item", "Orphan").as_item());
        assert!(registry.check_containment("orphan-item", "page").is_err());
    }

    #[test]
    fn test_definitions_sorted() {
        let registry = registry();
        let names: Vec<_> = registry
            .definitions()
            .iter()
            .map(|d| d.type_name.as_str())
            .collect();
        assert_eq!(names, vec!["accordion", "accordion-item", "text"]);
    }
}
