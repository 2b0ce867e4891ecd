//! # Block Nodes
//!
//! A single entry of the block tree plus its property bag.
//!
//! Property bags are deliberately open: `content` holds arbitrary JSON values
//! keyed by field name, `style` holds opaque string values. Block types are
//! extensible at the registry level, so only consumers that read a specific
//! field check its shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;

/// Flat style map (property → opaque value such as `"8px"` or `"#fff"`)
pub type StyleMap = BTreeMap<String, String>;

/// Open content map (field → JSON value)
pub type ContentMap = Map<String, Value>;

/// Opaque node identifier, stable for the lifetime of the node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for BlockId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for BlockId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Style part of the property bag: a base map plus per-breakpoint overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleProps {
    #[serde(default)]
    pub base: StyleMap,

    /// Breakpoint name → partial override map
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub responsive: BTreeMap<String, StyleMap>,
}

impl StyleProps {
    pub fn with_base(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.base.insert(key.into(), value.into());
        self
    }

    pub fn with_override(
        mut self,
        breakpoint: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.responsive
            .entry(breakpoint.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }
}

/// Two-part property bag
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Props {
    /// Semantic data: text, URLs, numeric values
    #[serde(default)]
    pub content: ContentMap,

    #[serde(default)]
    pub style: StyleProps,
}

impl Props {
    pub fn with_content(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.content.insert(key.into(), value.into());
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.base.insert(key.into(), value.into());
        self
    }

    /// String content field, `None` if absent or not a string
    pub fn content_str(&self, key: &str) -> Option<&str> {
        self.content.get(key).and_then(Value::as_str)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Optional editor flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Disables structural mutation and drag
    #[serde(default, skip_serializing_if = "is_false")]
    pub locked: bool,

    /// Excluded from published output but kept in the document
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,

    /// Display-only override of the type name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A single tree entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockNode {
    pub id: BlockId,

    /// Key into the block registry
    #[serde(rename = "type")]
    pub block_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<BlockId>,

    /// Document order of children
    #[serde(default)]
    pub child_ids: Vec<BlockId>,

    #[serde(default)]
    pub props: Props,

    #[serde(default)]
    pub meta: Meta,
}

impl BlockNode {
    /// Create a detached node with no parent and no children
    pub fn new(id: BlockId, block_type: impl Into<String>, props: Props) -> Self {
        Self {
            id,
            block_type: block_type.into(),
            parent_id: None,
            child_ids: Vec::new(),
            props,
            meta: Meta::default(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Label if set, otherwise the type name
    pub fn display_name(&self) -> &str {
        self.meta.label.as_deref().unwrap_or(&self.block_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_json_shape() {
        let node = BlockNode {
            id: BlockId::new("img-1"),
            block_type: "image".to_string(),
            parent_id: Some(BlockId::new("root")),
            child_ids: vec![],
            props: Props::default()
                .with_content("src", "/hero.png")
                .with_style("width", "100%"),
            meta: Meta {
                locked: true,
                ..Meta::default()
            },
        };

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type"], "image");
        assert_eq!(value["parentId"], "root");
        assert_eq!(value["childIds"], json!([]));
        assert_eq!(value["props"]["content"]["src"], "/hero.png");
        assert_eq!(value["props"]["style"]["base"]["width"], "100%");
        assert_eq!(value["meta"], json!({ "locked": true }));
    }

    #[test]
    fn test_node_defaults_when_fields_missing() {
        let node: BlockNode = serde_json::from_value(json!({
            "id": "t1",
            "type": "text"
        }))
        .unwrap();

        assert!(node.is_root());
        assert!(node.child_ids.is_empty());
        assert!(node.props.content.is_empty());
        assert!(!node.meta.hidden);
        assert_eq!(node.display_name(), "text");
    }

    #[test]
    fn test_label_overrides_display_name() {
        let mut node = BlockNode::new(BlockId::new("h"), "heading", Props::default());
        node.meta.label = Some("Hero title".to_string());
        assert_eq!(node.display_name(), "Hero title");
    }

    #[test]
    fn test_content_str_ignores_non_strings() {
        let props = Props::default()
            .with_content("alt", "A cat")
            .with_content("width", 320);
        assert_eq!(props.content_str("alt"), Some("A cat"));
        assert_eq!(props.content_str("width"), None);
        assert_eq!(props.content_str("missing"), None);
    }
}
