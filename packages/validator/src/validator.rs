//! Pre-publish gate.
//!
//! The validator never mutates anything: it runs every rule over every
//! published node (hidden subtrees removed) and returns the issues as data.
//! Nodes unreachable from the root are still checked. Structural problems
//! in the input are not its concern; malformed or partial JSON is checked
//! on a best-effort basis.

use crate::issue::{ValidationIssue, ValidationReport};
use crate::rules::{RuleContext, RuleSet};
use pageblocks_model::{BlockId, BlockNode, BlockTree};
use pageblocks_registry::Registry;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[derive(Debug)]
pub struct PublishValidator {
    registry: Arc<Registry>,
    rules: RuleSet,
}

/// Whether `node` is left out of the published page
///
/// A node is unpublished when it or any ancestor other than the root is
/// hidden. The root itself is always published.
fn is_unpublished(tree: &BlockTree, node: &BlockNode) -> bool {
    let root_id = tree.root_id();
    std::iter::once(node.id.clone())
        .chain(tree.ancestors(&node.id))
        .filter(|id| id != root_id)
        .any(|id| tree.get(&id).is_some_and(|n| n.meta.hidden))
}

impl PublishValidator {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self::with_rules(registry, RuleSet::default())
    }

    pub fn with_rules(registry: Arc<Registry>, rules: RuleSet) -> Self {
        Self { registry, rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Check a tree against the set of enabled modules
    ///
    /// Every node in `nodes` is checked, whether or not it is reachable
    /// from the root. Hidden nodes and their descendants are skipped, so a
    /// hidden module-gated block passes. Issues are sorted by node id, then
    /// code.
    #[instrument(skip_all, fields(nodes = tree.len(), modules = enabled_modules.len()))]
    pub fn validate(&self, tree: &BlockTree, enabled_modules: &HashSet<String>) -> ValidationReport {
        let published = tree.published_view();
        let ctx = RuleContext {
            registry: &self.registry,
            enabled_modules,
        };

        let mut issues = Vec::new();
        let mut skipped_hidden = 0usize;
        for node in tree.nodes() {
            if is_unpublished(tree, node) {
                skipped_hidden += 1;
                continue;
            }
            for rule in self.rules.rules() {
                issues.extend(rule.check_node(node, &ctx));
            }
        }

        for rule in self.rules.rules() {
            issues.extend(rule.check_tree(&published, &ctx));
        }
        issues.sort_by(|a, b| {
            a.node_id
                .cmp(&b.node_id)
                .then_with(|| a.code.cmp(&b.code))
        });

        let report = ValidationReport::from_issues(issues);
        info!(
            valid = report.valid,
            issues = report.errors.len(),
            skipped_hidden,
            "publish validation finished"
        );
        report
    }

    /// Check a raw `{ rootId, nodes }` value
    ///
    /// Anything that is not an object with both keys has nothing to check
    /// and is valid. Nodes that fail to parse are skipped.
    #[instrument(skip_all)]
    pub fn validate_value(&self, value: &Value, enabled_modules: &HashSet<String>) -> ValidationReport {
        let Some(object) = value.as_object() else {
            debug!("input is not an object");
            return ValidationReport::empty();
        };
        let (Some(root_id), Some(nodes)) = (
            object.get("rootId").and_then(Value::as_str),
            object.get("nodes").and_then(Value::as_object),
        ) else {
            debug!("input has no rootId or nodes");
            return ValidationReport::empty();
        };

        if let Ok(tree) = BlockTree::from_value(value.clone()) {
            return self.validate(&tree, enabled_modules);
        }

        let parsed: Vec<BlockNode> = nodes
            .values()
            .filter_map(|node| serde_json::from_value(node.clone()).ok())
            .collect();
        debug!(
            parsed = parsed.len(),
            total = nodes.len(),
            "validating partially parsed tree"
        );
        let tree = BlockTree::from_parts(BlockId::new(root_id), parsed);
        self.validate(&tree, enabled_modules)
    }

    /// Parse `source` as JSON and check it
    pub fn validate_json(
        &self,
        source: &str,
        enabled_modules: &HashSet<String>,
    ) -> Result<ValidationReport, serde_json::Error> {
        let value: Value = serde_json::from_str(source)?;
        Ok(self.validate_value(&value, enabled_modules))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{ValidationIssue, MISSING_ALT, MODULE_DISABLED};
    use crate::rules::PublishRule;
    use serde_json::json;

    fn validator() -> PublishValidator {
        PublishValidator::new(Arc::new(Registry::builtin()))
    }

    fn modules(keys: &[&str]) -> HashSet<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    fn shop_page() -> Value {
        json!({
            "rootId": "root",
            "nodes": {
                "root": { "id": "root", "type": "page", "childIds": ["grid", "img"] },
                "grid": { "id": "grid", "type": "product-grid", "parentId": "root" },
                "img": {
                    "id": "img",
                    "type": "image",
                    "parentId": "root",
                    "props": { "content": { "src": "/hero.png", "alt": "Hero" } }
                }
            }
        })
    }

    #[test]
    fn test_module_gating() {
        let validator = validator();

        let report = validator.validate_value(&shop_page(), &modules(&[]));
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].code, MODULE_DISABLED);
        assert_eq!(report.errors[0].node_id.as_str(), "grid");

        let report = validator.validate_value(&shop_page(), &modules(&["shop"]));
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_issues_sorted_by_node() {
        let tree: BlockTree = serde_json::from_value(json!({
            "rootId": "root",
            "nodes": {
                "root": { "id": "root", "type": "page", "childIds": ["z-img", "a-form"] },
                "z-img": {
                    "id": "z-img",
                    "type": "image",
                    "parentId": "root",
                    "props": { "content": { "src": "/x.png" } }
                },
                "a-form": { "id": "a-form", "type": "form", "parentId": "root" }
            }
        }))
        .unwrap();

        let report = validator().validate(&tree, &modules(&[]));
        let found: Vec<(&str, &str)> = report
            .errors
            .iter()
            .map(|i| (i.node_id.as_str(), i.code.as_str()))
            .collect();
        assert_eq!(found, vec![("a-form", MODULE_DISABLED), ("z-img", MISSING_ALT)]);
    }

    #[test]
    fn test_hidden_subtrees_are_skipped() {
        let mut page = shop_page();
        page["nodes"]["grid"]["meta"] = json!({ "hidden": true });

        let report = validator().validate_value(&page, &modules(&[]));
        assert!(report.valid);
    }

    #[test]
    fn test_trivially_valid_inputs() {
        let validator = validator();
        for value in [json!(null), json!([1, 2]), json!({ "nodes": {} }), json!({ "rootId": "r" })] {
            let report = validator.validate_value(&value, &modules(&[]));
            assert!(report.valid, "{} should be trivially valid", value);
        }
    }

    #[test]
    fn test_partially_malformed_nodes_still_checked() {
        let value = json!({
            "rootId": "root",
            "nodes": {
                "root": { "id": "root", "type": "page", "childIds": ["grid", "bad"] },
                "grid": { "id": "grid", "type": "product-grid", "parentId": "root" },
                "bad": { "id": 42 }
            }
        });

        let report = validator().validate_value(&value, &modules(&[]));
        assert_eq!(report.fatal_count(), 1);
    }

    #[test]
    fn test_unreachable_nodes_are_checked() {
        let value = json!({
            "rootId": "root",
            "nodes": {
                "root": { "id": "root", "type": "page" },
                "grid": { "id": "grid", "type": "product-grid", "parentId": "root" }
            }
        });

        let report = validator().validate_value(&value, &modules(&[]));
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].code, MODULE_DISABLED);
        assert_eq!(report.errors[0].node_id.as_str(), "grid");
    }

    #[test]
    fn test_unparseable_root_still_checks_other_nodes() {
        let value = json!({
            "rootId": "root",
            "nodes": {
                "root": { "id": 7, "type": "page", "childIds": ["grid"] },
                "grid": { "id": "grid", "type": "product-grid", "parentId": "root" }
            }
        });

        let report = validator().validate_value(&value, &modules(&[]));
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].code, MODULE_DISABLED);
    }

    #[test]
    fn test_hidden_ancestor_skips_descendants() {
        let value = json!({
            "rootId": "root",
            "nodes": {
                "root": { "id": "root", "type": "page", "childIds": ["s1"], "meta": { "hidden": true } },
                "s1": {
                    "id": "s1",
                    "type": "section",
                    "parentId": "root",
                    "childIds": ["grid"],
                    "meta": { "hidden": true }
                },
                "grid": { "id": "grid", "type": "product-grid", "parentId": "s1" },
                "form": { "id": "form", "type": "form", "parentId": "root" }
            }
        });

        let report = validator().validate_value(&value, &modules(&[]));
        let flagged: Vec<&str> = report.errors.iter().map(|i| i.node_id.as_str()).collect();
        assert_eq!(flagged, vec!["form"]);
    }

    #[test]
    fn test_validate_json_reports_syntax_errors() {
        assert!(validator().validate_json("{ nope", &modules(&[])).is_err());
    }

    struct RequireTitle;

    impl PublishRule for RequireTitle {
        fn name(&self) -> &'static str {
            "missing_title"
        }

        fn description(&self) -> &'static str {
            "Require a page title"
        }

        fn check_tree(&self, tree: &BlockTree, _ctx: &RuleContext<'_>) -> Vec<ValidationIssue> {
            match tree.root() {
                Some(root) if root.props.content_str("title").is_none() => {
                    vec![ValidationIssue::fatal("missing_title", root, "Page has no title")]
                }
                _ => Vec::new(),
            }
        }
    }

    #[test]
    fn test_custom_rule() {
        let validator = PublishValidator::with_rules(
            Arc::new(Registry::builtin()),
            RuleSet::empty().with_rule(RequireTitle),
        );
        let report = validator.validate_value(&shop_page(), &modules(&[]));
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].code, "missing_title");
    }
}
