//! # Pageblocks Validator
//!
//! Publish-time checks over a page's block tree.
//!
//! ```rust,ignore
//! let validator = PublishValidator::new(registry);
//! let report = validator.validate(&tree, &enabled_modules);
//! if !report.valid {
//!     // surface report.errors to the user
//! }
//! ```

mod issue;
mod rules;
mod validator;

pub use issue::{Severity, ValidationIssue, ValidationReport, MISSING_ALT, MODULE_DISABLED};
pub use rules::{ImageAltRule, ModuleGateRule, PublishRule, RuleContext, RuleSet};
pub use validator::PublishValidator;
