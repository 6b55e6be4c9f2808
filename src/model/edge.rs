use serde::{Deserialize, Serialize};

use crate::{graph::EdgeKind, model::ConditionRef};

/// Edge as sent to the workflow-generation backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeModel {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<ConditionRef>,
}
