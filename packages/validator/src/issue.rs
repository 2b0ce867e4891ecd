use pageblocks_model::{BlockId, BlockNode};
use serde::{Deserialize, Serialize};

/// Node uses a block type whose module is not enabled
pub const MODULE_DISABLED: &str = "module_disabled";

/// Image with a source but no alternative text
pub const MISSING_ALT: &str = "missing_alt";

/// Whether an issue blocks publishing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Fatal,
    Warning,
}

/// A problem found on the published view of a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Stable machine-readable code
    pub code: String,

    pub severity: Severity,

    pub node_id: BlockId,

    #[serde(rename = "type")]
    pub block_type: String,

    /// Human-readable message
    pub message: String,

    /// Optional suggestion for fixing the issue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    pub fn fatal(code: impl Into<String>, node: &BlockNode, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            severity: Severity::Fatal,
            node_id: node.id.clone(),
            block_type: node.block_type.clone(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn warning(code: impl Into<String>, node: &BlockNode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::fatal(code, node, message)
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

/// Outcome of a publish check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// `false` if any issue is fatal
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn from_issues(errors: Vec<ValidationIssue>) -> Self {
        Self {
            valid: !errors.iter().any(ValidationIssue::is_fatal),
            errors,
        }
    }

    /// Report for input with nothing to check
    pub fn empty() -> Self {
        Self::from_issues(Vec::new())
    }

    pub fn fatal_count(&self) -> usize {
        self.errors.iter().filter(|i| i.is_fatal()).count()
    }

    pub fn with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a ValidationIssue> + 'a {
        self.errors.iter().filter(move |i| i.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageblocks_model::Props;

    #[test]
    fn test_validity_follows_severity() {
        let node = BlockNode::new("n".into(), "text", Props::default());

        let warn_only = ValidationReport::from_issues(vec![ValidationIssue::warning("long_text", &node, "Long")]);
        assert!(warn_only.valid);

        let fatal = ValidationReport::from_issues(vec![
            ValidationIssue::warning("long_text", &node, "Long"),
            ValidationIssue::fatal(MISSING_ALT, &node, "Missing"),
        ]);
        assert!(!fatal.valid);
        assert_eq!(fatal.fatal_count(), 1);
    }

    #[test]
    fn test_issue_json_shape() {
        let node = BlockNode::new("img".into(), "image", Props::default());
        let issue = ValidationIssue::fatal(MISSING_ALT, &node, "Image has no alt text")
            .with_suggestion("Describe the image");
        let value = serde_json::to_value(&issue).unwrap();

        assert_eq!(value["code"], "missing_alt");
        assert_eq!(value["severity"], "fatal");
        assert_eq!(value["nodeId"], "img");
        assert_eq!(value["type"], "image");
        assert_eq!(value["suggestion"], "Describe the image");
    }
}
