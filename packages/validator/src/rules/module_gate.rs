use crate::issue::{ValidationIssue, MODULE_DISABLED};
use crate::rules::{PublishRule, RuleContext};
use pageblocks_model::BlockNode;

/// Blocks whose module is not enabled for the site cannot be published
///
/// Nodes with no registry definition are skipped.
pub struct ModuleGateRule;

impl PublishRule for ModuleGateRule {
    fn name(&self) -> &'static str {
        MODULE_DISABLED
    }

    fn description(&self) -> &'static str {
        "Disallow blocks whose module is not enabled"
    }

    fn check_node(&self, node: &BlockNode, ctx: &RuleContext<'_>) -> Vec<ValidationIssue> {
        let Some(def) = ctx.registry.get_definition(&node.block_type) else {
            return Vec::new();
        };
        let Some(module) = def.module_key.as_deref() else {
            return Vec::new();
        };
        if ctx.enabled_modules.contains(module) {
            return Vec::new();
        }

        vec![ValidationIssue::fatal(
            MODULE_DISABLED,
            node,
            format!("'{}' requires the '{}' module", def.display_name, module),
        )
        .with_suggestion(format!(
            "Enable the '{}' module for this site or remove the block",
            module
        ))]
    }
}
