//! Projection of the canonical graph into the wire document.
//!
//! Pure and side-effect free: the same graph always yields the same document.
//! Selection state is internal and never leaves the editor.

use crate::{
    graph::{Binding, Edge, EventBinding, Graph, Node},
    model::{EdgeModel, EventModel, NodeDataModel, NodeModel, WorkflowDocument},
};

/// Build the document sent to the backend.
pub fn export(
    graph: &Graph,
    client_id: &str,
    workflow_name: &str,
) -> WorkflowDocument {
    WorkflowDocument {
        client_id: client_id.to_string(),
        workflow_name: workflow_name.to_string(),
        nodes: graph.nodes().iter().map(NodeModel::from).collect(),
        edges: graph.edges().iter().map(EdgeModel::from).collect(),
    }
}

impl From<&EventBinding> for EventModel {
    fn from(event: &EventBinding) -> Self {
        Self {
            event_type: event.event_type.clone(),
            event_name: event.event_name.clone(),
            time_duration: event.time_duration.clone(),
        }
    }
}

impl From<&Node> for NodeModel {
    fn from(node: &Node) -> Self {
        let mut data = NodeDataModel {
            label: node.label.clone(),
            ..Default::default()
        };

        match node.binding() {
            Binding::Task(task) => data.task = task.clone(),
            Binding::Gateway(gateway) => data.gateway = gateway.clone(),
            Binding::Event(event) if !event.is_empty() => data.event = Some(EventModel::from(event)),
            Binding::Event(_) => {}
        }

        Self {
            id: node.id.clone(),
            kind: node.kind(),
            position: node.position,
            data,
        }
    }
}

impl From<&Edge> for EdgeModel {
    fn from(edge: &Edge) -> Self {
        Self {
            id: edge.id.clone(),
            source: edge.source.clone(),
            target: edge.target.clone(),
            kind: edge.kind(),
            condition: edge.condition().cloned(),
        }
    }
}
