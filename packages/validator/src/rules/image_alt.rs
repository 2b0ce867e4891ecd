use crate::issue::{ValidationIssue, MISSING_ALT};
use crate::rules::{PublishRule, RuleContext};
use pageblocks_model::BlockNode;

const IMAGE_TYPE: &str = "image";

/// Images with a source need alternative text
pub struct ImageAltRule;

impl PublishRule for ImageAltRule {
    fn name(&self) -> &'static str {
        MISSING_ALT
    }

    fn description(&self) -> &'static str {
        "Require alt text on images that have a source"
    }

    fn check_node(&self, node: &BlockNode, _ctx: &RuleContext<'_>) -> Vec<ValidationIssue> {
        if node.block_type != IMAGE_TYPE {
            return Vec::new();
        }

        let has_src = node
            .props
            .content_str("src")
            .is_some_and(|src| !src.trim().is_empty());
        let has_alt = node
            .props
            .content_str("alt")
            .is_some_and(|alt| !alt.trim().is_empty());

        if has_src && !has_alt {
            vec![ValidationIssue::fatal(MISSING_ALT, node, "Image is missing alt text")
                .with_suggestion("Describe the image for screen readers in the 'alt' field")]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageblocks_model::Props;
    use pageblocks_registry::Registry;
    use std::collections::HashSet;

    fn check(props: Props) -> Vec<ValidationIssue> {
        let registry = Registry::builtin();
        let enabled = HashSet::new();
        let ctx = RuleContext {
            registry: &registry,
            enabled_modules: &enabled,
        };
        ImageAltRule.check_node(&BlockNode::new("img".into(), "image", props), &ctx)
    }

    #[test]
    fn test_detects_missing_alt() {
        let issues = check(Props::default().with_content("src", "/cat.png"));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, MISSING_ALT);

        let blank = check(
            Props::default()
                .with_content("src", "/cat.png")
                .with_content("alt", "   "),
        );
        assert_eq!(blank.len(), 1);
    }

    #[test]
    fn test_allows_described_or_empty_images() {
        assert!(check(
            Props::default()
                .with_content("src", "/cat.png")
                .with_content("alt", "A cat")
        )
        .is_empty());
        assert!(check(Props::default().with_content("src", "")).is_empty());
        assert!(check(Props::default()).is_empty());
    }
}
