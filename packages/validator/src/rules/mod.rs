mod image_alt;
mod module_gate;

pub use image_alt::ImageAltRule;
pub use module_gate::ModuleGateRule;

use crate::issue::ValidationIssue;
use pageblocks_model::{BlockNode, BlockTree};
use pageblocks_registry::Registry;
use std::collections::HashSet;

/// What a rule can see besides the node itself
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub registry: &'a Registry,
    pub enabled_modules: &'a HashSet<String>,
}

/// Trait for implementing publish rules
///
/// Rules only ever see the published view, so hidden nodes never reach them.
pub trait PublishRule {
    /// Unique identifier for this rule
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Check a single node
    fn check_node(&self, _node: &BlockNode, _ctx: &RuleContext<'_>) -> Vec<ValidationIssue> {
        Vec::new()
    }

    /// Check the page as a whole
    fn check_tree(&self, _tree: &BlockTree, _ctx: &RuleContext<'_>) -> Vec<ValidationIssue> {
        Vec::new()
    }
}

/// Ordered set of publish rules
pub struct RuleSet {
    rules: Vec<Box<dyn PublishRule>>,
}

impl RuleSet {
    /// Create a set with all built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![Box::new(ModuleGateRule), Box::new(ImageAltRule)],
        }
    }

    /// Create an empty set
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn PublishRule>] {
        &self.rules
    }

    /// Add a custom rule
    pub fn add_rule(&mut self, rule: Box<dyn PublishRule>) {
        self.rules.push(rule);
    }

    pub fn with_rule(mut self, rule: impl PublishRule + 'static) -> Self {
        self.add_rule(Box::new(rule));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &format!("{} rules", self.rules.len()))
            .finish()
    }
}
