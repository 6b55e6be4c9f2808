use serde::{Deserialize, Serialize};

use crate::{
    FlowCanvasError, Result,
    model::{EdgeModel, NodeModel},
};

/// Canonical wire document exchanged with the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDocument {
    pub client_id: String,
    pub workflow_name: String,
    pub nodes: Vec<NodeModel>,
    pub edges: Vec<EdgeModel>,
}

impl WorkflowDocument {
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str::<WorkflowDocument>(s)?)
    }

    /// Pretty-printed document, as shown in the live preview.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Check the fields the backend requires before a save is attempted.
    pub fn validate_for_save(&self) -> Result<()> {
        if self.client_id.trim().is_empty() || self.workflow_name.trim().is_empty() {
            return Err(FlowCanvasError::Validation("Client ID and Workflow Name are required.".to_string()));
        }
        Ok(())
    }
}
