//! Normalization of externally sourced workflow JSON into the canonical graph.
//!
//! The backend hands back documents in more than one shape: the full wire
//! document, a bare `{nodes, edges}` pair, or nothing at all. The shape is
//! decided up front by schema validation; a value that matches none of them
//! is rejected instead of being silently replaced with an empty graph.

use std::sync::LazyLock;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::{
    FlowCanvasError, Result,
    graph::{Binding, Edge, EdgeKind, EventBinding, Graph, IdGenerator, Node, NodeKind, Position, ids},
    model::{ConditionRef, GatewayRef, TaskRef},
};

static DOCUMENT_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "type": "object",
        "properties": {
            "clientId": { "type": ["string", "null"] },
            "workflowName": { "type": ["string", "null"] },
            "nodes": { "type": ["array", "null"], "items": { "type": "object" } },
            "edges": { "type": ["array", "null"], "items": { "type": "object" } }
        },
        "anyOf": [
            { "required": ["clientId"] },
            { "required": ["workflowName"] }
        ]
    })
});

static BARE_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "type": "object",
        "properties": {
            "nodes": { "type": ["array", "null"], "items": { "type": "object" } },
            "edges": { "type": ["array", "null"], "items": { "type": "object" } }
        },
        "anyOf": [
            { "required": ["nodes"] },
            { "required": ["edges"] }
        ]
    })
});

/// Recognized shapes of an incoming workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ImportShape {
    /// `null` or no document at all.
    Empty,
    /// `{nodes, edges}` without document metadata.
    Bare,
    /// `{clientId, workflowName, nodes, edges}`.
    Document,
}

/// Result of a successful normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedWorkflow {
    pub shape: ImportShape,
    pub graph: Graph,
    pub workflow_name: String,
}

#[derive(Deserialize)]
struct IncomingNode {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type")]
    kind: NodeKind,
    #[serde(default)]
    position: Option<Position>,
    #[serde(default)]
    data: Option<IncomingNodeData>,
}

#[derive(Deserialize, Default)]
struct IncomingNodeData {
    #[serde(default)]
    label: Option<String>,
    #[serde(default, alias = "selectedTask")]
    task: Option<TaskRef>,
    #[serde(default, alias = "selectedGateway")]
    gateway: Option<GatewayRef>,
    #[serde(default)]
    event: Option<EventBinding>,
}

#[derive(Deserialize)]
struct IncomingEdge {
    #[serde(default)]
    id: Option<String>,
    source: String,
    target: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    condition: Option<ConditionRef>,
    #[serde(default)]
    data: Option<IncomingEdgeData>,
}

#[derive(Deserialize)]
struct IncomingEdgeData {
    #[serde(default)]
    condition: Option<ConditionRef>,
}

/// Decide which shape `value` has.
pub fn classify(value: Option<&Value>) -> Result<ImportShape> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Ok(ImportShape::Empty);
    };

    if jsonschema::is_valid(&DOCUMENT_SCHEMA, value) {
        return Ok(ImportShape::Document);
    }
    if jsonschema::is_valid(&BARE_SCHEMA, value) {
        return Ok(ImportShape::Bare);
    }

    let reason = jsonschema::validate(&BARE_SCHEMA, value).err().map(|e| e.to_string()).unwrap_or_else(|| "no nodes or edges".to_string());
    Err(FlowCanvasError::Import(format!("unrecognized workflow document: {}", reason)))
}

/// Convert an incoming workflow into a canonical graph.
///
/// `ids` is re-seeded above every `node_<n>` id found in the document and
/// used for nodes that arrive without an id. On error `ids` is left as it was.
pub fn normalize(
    value: Option<&Value>,
    ids: &mut IdGenerator,
) -> Result<LoadedWorkflow> {
    let shape = classify(value)?;
    let Some(obj) = value.and_then(Value::as_object).filter(|_| shape != ImportShape::Empty) else {
        return Ok(LoadedWorkflow {
            shape: ImportShape::Empty,
            graph: Graph::new(),
            workflow_name: String::new(),
        });
    };

    let workflow_name = obj.get("workflowName").and_then(Value::as_str).unwrap_or_default().to_string();
    let incoming_nodes: Vec<IncomingNode> = decode_list(obj.get("nodes"), "node")?;
    let incoming_edges: Vec<IncomingEdge> = decode_list(obj.get("edges"), "edge")?;

    let mut scratch = ids.clone();
    scratch.reseed(incoming_nodes.iter().filter_map(|n| n.id.as_deref()));

    let mut graph = Graph::new();
    for incoming in incoming_nodes {
        let id = match incoming.id {
            Some(id) if !id.is_empty() => id,
            _ => scratch.next_node_id(),
        };
        if graph.contains_node(&id) {
            return Err(FlowCanvasError::Import(format!("duplicate node id '{}'", id)));
        }
        graph.push_node(build_node(id, incoming.kind, incoming.position, incoming.data));
    }

    for incoming in incoming_edges {
        let kind = match incoming.kind.as_deref() {
            Some("condition") => EdgeKind::Condition,
            Some("default") => EdgeKind::Default,
            _ => graph.node(&incoming.source).map(|n| EdgeKind::for_source(n.kind())).unwrap_or(EdgeKind::Default),
        };
        let id = match incoming.id {
            Some(id) if !id.is_empty() => id,
            _ => ids::edge_id(&incoming.source, &incoming.target),
        };
        let condition = incoming.condition.or(incoming.data.and_then(|d| d.condition));

        let mut edge = Edge::new(id, incoming.source, incoming.target, kind);
        if condition.is_some() && !edge.set_condition(condition) {
            debug!(edge_id = %edge.id, "dropping condition on default edge");
        }
        if !graph.upsert_edge(edge.clone()) {
            warn!(edge_id = %edge.id, source = %edge.source, target = %edge.target, "dropping edge with unknown endpoint");
        }
    }

    *ids = scratch;

    Ok(LoadedWorkflow {
        shape,
        graph,
        workflow_name,
    })
}

fn decode_list<T: for<'de> Deserialize<'de>>(
    value: Option<&Value>,
    what: &str,
) -> Result<Vec<T>> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| T::deserialize(item).map_err(|e| FlowCanvasError::Import(format!("invalid {} #{}: {}", what, i, e))))
        .collect()
}

fn build_node(
    id: String,
    kind: NodeKind,
    position: Option<Position>,
    data: Option<IncomingNodeData>,
) -> Node {
    let data = data.unwrap_or_default();
    let label = data.label.filter(|l| !l.is_empty()).unwrap_or_else(|| kind.default_label());
    let binding = match kind {
        NodeKind::Task => Binding::Task(data.task),
        NodeKind::Gateway => Binding::Gateway(data.gateway),
        NodeKind::Event => Binding::Event(data.event.unwrap_or_default()),
    };

    Node::with_parts(id, position.unwrap_or_default(), label, binding)
}
