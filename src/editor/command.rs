use crate::{
    graph::{EdgeId, NodeDataPatch, NodeId},
    model::ConditionRef,
};

/// Request from a side panel or edge widget to mutate the graph.
///
/// Sent through [`Editor::commands`](crate::Editor::commands) instead of
/// calling back into the editor directly.
#[derive(Debug, Clone, PartialEq, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum EditorCommand {
    /// Delete a node and its incident edges. Confirmation happens before sending.
    DeleteNode {
        node_id: NodeId,
    },
    UpdateNode {
        node_id: NodeId,
        patch: NodeDataPatch,
    },
    /// Set (`Some`) or clear (`None`) the condition of a condition edge.
    UpdateEdge {
        edge_id: EdgeId,
        condition: Option<ConditionRef>,
    },
}
