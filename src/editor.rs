//! Editing session - the main entry point for FlowCanvas.
//!
//! The editor owns the canonical graph and applies user gestures to it:
//! - Dropping nodes, connecting them, deleting them
//! - Updating node bindings and edge conditions from the side panels
//! - Linear undo through a bounded snapshot history
//! - Loading external workflow JSON and exporting the wire document
//!
//! Every mutation runs to completion on the caller's thread; a snapshot is
//! always taken strictly before the mutation it guards.

mod changes;
mod command;
mod history;

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    EditorBuilder, Result,
    common::Queue,
    graph::{Edge, EdgeId, EdgeKind, Graph, IdGenerator, Node, NodeDataPatch, NodeId, NodeKind, Position, ids},
    model::{ConditionRef, ImportShape, WorkflowDocument, export, import},
};

pub use changes::{EdgeChange, NodeChange};
pub use command::EditorCommand;
pub use history::{DEFAULT_HISTORY_CAPACITY, History, Snapshot};

/// One editing session over one workflow graph.
///
/// # Example
///
/// ```rust,ignore
/// let mut editor = EditorBuilder::new().client_id("client61").build();
///
/// let task = editor.add_node(NodeKind::Task, Position::new(0.0, 0.0));
/// let gateway = editor.add_node(NodeKind::Gateway, Position::new(100.0, 0.0));
/// editor.add_edge(&task, &gateway);
///
/// editor.set_workflow_name("onboarding");
/// let json = editor.export().to_json()?;
/// ```
pub struct Editor {
    /// Current graph.
    graph: Graph,
    /// Node id generator, re-seeded on every load.
    ids: IdGenerator,
    /// Undo snapshots.
    history: History,
    /// Set by every mutation, cleared by load and clear.
    modified: bool,
    client_id: String,
    workflow_name: String,
    /// Inbound commands from panels.
    commands: Arc<Queue<EditorCommand>>,
}

impl Default for Editor {
    fn default() -> Self {
        EditorBuilder::new().build()
    }
}

impl Editor {
    /// Creates an empty session. History starts with the empty graph as its
    /// base snapshot so the first mutation can be undone.
    pub fn new(
        client_id: String,
        history_capacity: usize,
        command_queue_capacity: usize,
    ) -> Self {
        let graph = Graph::new();
        let mut history = History::new(history_capacity);
        history.reset(&graph);

        Self {
            graph,
            ids: IdGenerator::new(),
            history,
            modified: false,
            client_id,
            workflow_name: String::new(),
            commands: Queue::new(command_queue_capacity),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn workflow_name(&self) -> &str {
        &self.workflow_name
    }

    pub fn set_client_id(
        &mut self,
        client_id: impl Into<String>,
    ) {
        self.client_id = client_id.into();
    }

    pub fn set_workflow_name(
        &mut self,
        workflow_name: impl Into<String>,
    ) {
        self.workflow_name = workflow_name.into();
    }

    /// Drop a new node of `kind` onto the canvas and return its id.
    pub fn add_node(
        &mut self,
        kind: NodeKind,
        position: Position,
    ) -> NodeId {
        self.history.snapshot(&self.graph);

        let mut id = self.ids.next_node_id();
        while self.graph.contains_node(&id) {
            id = self.ids.next_node_id();
        }
        self.graph.push_node(Node::new(id.clone(), kind, position));
        self.modified = true;

        debug!(node_id = %id, kind = kind.as_ref(), "node added");
        id
    }

    /// Apply one batch of canvas node changes.
    ///
    /// A batch removing at least one known node is snapshotted once, before
    /// any of its changes is applied. Removal cascades to incident edges.
    pub fn apply_node_changes(
        &mut self,
        changes: Vec<NodeChange>,
    ) {
        let removes_known = changes.iter().filter_map(NodeChange::removed).any(|id| self.graph.contains_node(id));
        if removes_known {
            self.history.snapshot(&self.graph);
        }

        for change in changes {
            match change {
                NodeChange::Position {
                    id,
                    position,
                    ..
                } => {
                    if let (Some(node), Some(position)) = (self.graph.node_mut(&id), position) {
                        node.position = position;
                        self.modified = true;
                    }
                }
                NodeChange::Select {
                    id,
                    selected,
                } => {
                    if let Some(node) = self.graph.node_mut(&id) {
                        node.selected = selected;
                    }
                }
                NodeChange::Remove {
                    id,
                } => {
                    if let Some(edges) = self.graph.remove_node(&id) {
                        self.modified = true;
                        debug!(node_id = %id, cascaded = edges.len(), "node removed");
                    }
                }
            }
        }
    }

    /// Apply one batch of canvas edge changes, snapshotting once before a
    /// batch that removes a known edge.
    pub fn apply_edge_changes(
        &mut self,
        changes: Vec<EdgeChange>,
    ) {
        let removes_known = changes.iter().filter_map(EdgeChange::removed).any(|id| self.graph.edge(id).is_some());
        if removes_known {
            self.history.snapshot(&self.graph);
        }

        for change in changes {
            match change {
                EdgeChange::Select {
                    id,
                    selected,
                } => {
                    if let Some(edge) = self.graph.edge_mut(&id) {
                        edge.selected = selected;
                    }
                }
                EdgeChange::Remove {
                    id,
                } => {
                    if self.graph.remove_edge(&id).is_some() {
                        self.modified = true;
                        debug!(edge_id = %id, "edge removed");
                    }
                }
            }
        }
    }

    /// Connect two nodes.
    ///
    /// The edge kind follows the source node: gateways produce condition
    /// edges (starting without a condition), everything else default edges.
    /// An existing edge with the same id is replaced. Returns `None` when
    /// either endpoint is unknown.
    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
    ) -> Option<EdgeId> {
        let Some(source_node) = self.graph.node(source) else {
            warn!(source, target, "connect from unknown node ignored");
            return None;
        };
        if !self.graph.contains_node(target) {
            warn!(source, target, "connect to unknown node ignored");
            return None;
        }

        let kind = EdgeKind::for_source(source_node.kind());
        let id = ids::edge_id(source, target);

        self.history.snapshot(&self.graph);
        self.graph.upsert_edge(Edge::new(id.clone(), source, target, kind));
        self.modified = true;

        debug!(edge_id = %id, kind = kind.as_ref(), "edge added");
        Some(id)
    }

    /// Merge a panel patch into a node's binding and recompute its label.
    pub fn update_node_data(
        &mut self,
        node_id: &str,
        patch: NodeDataPatch,
    ) -> bool {
        if !self.graph.contains_node(node_id) {
            debug!(node_id, "update of unknown node ignored");
            return false;
        }

        self.history.snapshot(&self.graph);
        if let Some(node) = self.graph.node_mut(node_id) {
            node.apply_patch(&patch);
            debug!(node_id, label = %node.label, "node updated");
        }
        self.modified = true;
        true
    }

    /// Set or clear the condition of a condition edge.
    ///
    /// Unknown edges and default edges are left alone.
    pub fn update_edge_condition(
        &mut self,
        edge_id: &str,
        condition: Option<ConditionRef>,
    ) -> bool {
        match self.graph.edge(edge_id).map(Edge::kind) {
            None => {
                debug!(edge_id, "update of unknown edge ignored");
                return false;
            }
            Some(EdgeKind::Default) => {
                warn!(edge_id, "condition on a default edge ignored");
                return false;
            }
            Some(EdgeKind::Condition) => {}
        }

        self.history.snapshot(&self.graph);
        if let Some(edge) = self.graph.edge_mut(edge_id) {
            edge.set_condition(condition);
        }
        self.modified = true;

        debug!(edge_id, "edge condition updated");
        true
    }

    /// Delete a node together with every edge touching it.
    pub fn delete_node(
        &mut self,
        node_id: &str,
    ) -> bool {
        if !self.graph.contains_node(node_id) {
            debug!(node_id, "delete of unknown node ignored");
            return false;
        }

        self.history.snapshot(&self.graph);
        let cascaded = self.graph.remove_node(node_id).map(|edges| edges.len()).unwrap_or_default();
        self.modified = true;

        debug!(node_id, cascaded, "node deleted");
        true
    }

    pub fn delete_edge(
        &mut self,
        edge_id: &str,
    ) -> bool {
        if self.graph.edge(edge_id).is_none() {
            debug!(edge_id, "delete of unknown edge ignored");
            return false;
        }

        self.history.snapshot(&self.graph);
        self.graph.remove_edge(edge_id);
        self.modified = true;

        debug!(edge_id, "edge deleted");
        true
    }

    /// Empty the canvas and start a fresh history.
    pub fn clear(&mut self) {
        self.graph = Graph::new();
        self.workflow_name.clear();
        self.modified = false;
        self.history.reset(&self.graph);

        info!("canvas cleared");
    }

    /// Restore the graph as it was before the latest guarded mutation.
    pub fn undo(&mut self) -> bool {
        let Some(graph) = self.history.undo() else {
            return false;
        };
        self.graph = graph;
        self.modified = true;

        debug!(nodes = self.graph.node_count(), edges = self.graph.edge_count(), "undo");
        true
    }

    /// Replace the session with an externally sourced workflow.
    ///
    /// `None` and `null` load an empty graph. A value of unknown shape is
    /// rejected and the session is left untouched.
    pub fn load(
        &mut self,
        value: Option<&Value>,
    ) -> Result<ImportShape> {
        let loaded = import::normalize(value, &mut self.ids)?;

        self.graph = loaded.graph;
        self.workflow_name = loaded.workflow_name;
        self.modified = false;
        self.history.reset(&self.graph);

        info!(
            shape = loaded.shape.as_ref(),
            workflow = %self.workflow_name,
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "workflow loaded"
        );
        Ok(loaded.shape)
    }

    pub fn load_json(
        &mut self,
        s: &str,
    ) -> Result<ImportShape> {
        let value: Value = serde_json::from_str(s)?;
        self.load(Some(&value))
    }

    /// Project the current graph into the wire document.
    pub fn export(&self) -> WorkflowDocument {
        export::export(&self.graph, &self.client_id, &self.workflow_name)
    }

    /// Apply one panel command.
    pub fn execute(
        &mut self,
        command: EditorCommand,
    ) -> bool {
        debug!(command = command.as_ref(), "execute command");
        match command {
            EditorCommand::DeleteNode {
                node_id,
            } => self.delete_node(&node_id),
            EditorCommand::UpdateNode {
                node_id,
                patch,
            } => self.update_node_data(&node_id, patch),
            EditorCommand::UpdateEdge {
                edge_id,
                condition,
            } => self.update_edge_condition(&edge_id, condition),
        }
    }

    /// Sending side of the command queue, handed to panels.
    pub fn commands(&self) -> Arc<Queue<EditorCommand>> {
        self.commands.clone()
    }

    /// Apply every queued command in arrival order, returning how many took effect.
    pub fn flush_commands(&mut self) -> usize {
        let mut applied = 0;
        while let Some(command) = self.commands.try_next() {
            if self.execute(command) {
                applied += 1;
            }
        }
        applied
    }
}
