use pageblocks_model::Props;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of a property-editor field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldKind {
    Text,
    Number,
    Url,
    Bool,
    Color,
    Select { options: Vec<String> },
}

/// One entry of a block's declarative property schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropField {
    pub key: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
}

impl PropField {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Capabilities of a block type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    pub type_name: String,
    pub display_name: String,
    pub can_have_children: bool,

    /// May only appear directly under its designated container
    pub is_item_node: bool,

    /// External capability required to render or publish this type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_key: Option<String>,

    #[serde(default)]
    pub default_props: Props,

    #[serde(default)]
    pub props_schema: Vec<PropField>,
}

impl Definition {
    /// A leaf block (no children)
    pub fn leaf(type_name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            display_name: display_name.into(),
            can_have_children: false,
            is_item_node: false,
            module_key: None,
            default_props: Props::default(),
            props_schema: Vec::new(),
        }
    }

    /// A block that can contain children
    pub fn container(type_name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            can_have_children: true,
            ..Self::leaf(type_name, display_name)
        }
    }

    /// Mark as an item node (containment is declared on the registry)
    pub fn as_item(mut self) -> Self {
        self.is_item_node = true;
        self
    }

    pub fn with_module(mut self, module_key: impl Into<String>) -> Self {
        self.module_key = Some(module_key.into());
        self
    }

    pub fn with_content(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.default_props.content.insert(key.into(), value.into());
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_props.style.base.insert(key.into(), value.into());
        self
    }

    pub fn with_field(mut self, field: PropField) -> Self {
        self.props_schema.push(field);
        self
    }

    /// Whether `enabled` unlocks this type
    pub fn is_module_enabled<S: std::hash::BuildHasher>(
        &self,
        enabled: &std::collections::HashSet<String, S>,
    ) -> bool {
        self.module_key
            .as_ref()
            .map_or(true, |key| enabled.contains(key))
    }
}
