//! Catalog entries served by the backend.
//!
//! The same `{key, name, type}` triple describes task, gateway and event
//! definitions; conditions carry their own shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One selectable entry of the task, gateway or event catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
}

/// Reference to an external task definition.
pub type TaskRef = CatalogItem;
/// Reference to an external gateway definition.
pub type GatewayRef = CatalogItem;
/// Entry of the event catalog.
pub type EventRef = CatalogItem;

/// Gateway routing semantics.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GatewayType {
    Exclusive,
    Parallel,
    Inclusive,
}

impl CatalogItem {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        item_type: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            item_type: Some(item_type.into()),
        }
    }

    /// Gateway type of this entry, `None` when unset or not one of the known kinds.
    pub fn gateway_type(&self) -> Option<GatewayType> {
        self.item_type.as_deref().and_then(|t| t.to_ascii_lowercase().parse().ok())
    }
}

/// Reference to an external branching condition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionRef {
    pub condition_key: String,
    #[serde(default)]
    pub condition_name: String,
    #[serde(default)]
    pub condition_expression: String,
    #[serde(default)]
    pub description: String,
}

/// Body of `getNodeDetails`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NodeDetails {
    #[serde(default)]
    pub tasks: Vec<TaskRef>,
    #[serde(default)]
    pub gateways: Vec<GatewayRef>,
    #[serde(default)]
    pub events: Vec<EventRef>,
}

/// Body of `getAllConditions`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ConditionList {
    #[serde(default)]
    pub conditions: Vec<ConditionRef>,
}

/// Extract workflow names from the `all-workflows` body.
///
/// Entries may be bare strings or objects carrying `workflowName` or `name`;
/// anything else is skipped.
pub fn workflow_names(body: &Value) -> Vec<String> {
    let Some(entries) = body.as_array() else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(name) => Some(name.clone()),
            Value::Object(obj) => obj.get("workflowName").or_else(|| obj.get("name")).and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .collect()
}
