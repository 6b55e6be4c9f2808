//! Graph aggregate: ordered nodes and edges.
//!
//! Insertion order is kept so the exported document is deterministic. The
//! graph enforces referential integrity on insert and cascades node removal
//! to incident edges; id uniqueness is left to the caller's id discipline.

use crate::graph::{
    edge::{Edge, EdgeId},
    node::{Node, NodeId},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// get node by id
    pub fn node(
        &self,
        id: &str,
    ) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub(crate) fn node_mut(
        &mut self,
        id: &str,
    ) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// get edge by id
    pub fn edge(
        &self,
        id: &str,
    ) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub(crate) fn edge_mut(
        &mut self,
        id: &str,
    ) -> Option<&mut Edge> {
        self.edges.iter_mut().find(|e| e.id == id)
    }

    pub fn contains_node(
        &self,
        id: &str,
    ) -> bool {
        self.node(id).is_some()
    }

    /// Append a node.
    pub(crate) fn push_node(
        &mut self,
        node: Node,
    ) {
        self.nodes.push(node);
    }

    /// Insert an edge, replacing any edge with the same id.
    ///
    /// The replaced edge is dropped from its old slot and the new one is
    /// appended, so the latest write also comes last. Returns `false` without
    /// touching the graph when either endpoint is missing.
    pub(crate) fn upsert_edge(
        &mut self,
        edge: Edge,
    ) -> bool {
        if !self.contains_node(&edge.source) || !self.contains_node(&edge.target) {
            return false;
        }
        self.edges.retain(|e| e.id != edge.id);
        self.edges.push(edge);
        true
    }

    /// Remove a node and every edge touching it.
    ///
    /// Returns the ids of the removed edges, or `None` when the node is unknown.
    pub(crate) fn remove_node(
        &mut self,
        id: &str,
    ) -> Option<Vec<EdgeId>> {
        let idx = self.nodes.iter().position(|n| n.id == id)?;
        self.nodes.remove(idx);

        let mut removed = Vec::new();
        self.edges.retain(|e| {
            if e.touches(id) {
                removed.push(e.id.clone());
                false
            } else {
                true
            }
        });
        Some(removed)
    }

    pub(crate) fn remove_edge(
        &mut self,
        id: &str,
    ) -> Option<Edge> {
        let idx = self.edges.iter().position(|e| e.id == id)?;
        Some(self.edges.remove(idx))
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter().map(|n| &n.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeKind, NodeKind, Position};

    fn sample() -> Graph {
        let mut graph = Graph::new();
        graph.push_node(Node::new("a", NodeKind::Task, Position::default()));
        graph.push_node(Node::new("b", NodeKind::Gateway, Position::default()));
        graph.push_node(Node::new("c", NodeKind::Event, Position::default()));
        assert!(graph.upsert_edge(Edge::new("ab", "a", "b", EdgeKind::Default)));
        assert!(graph.upsert_edge(Edge::new("bc", "b", "c", EdgeKind::Condition)));
        assert!(graph.upsert_edge(Edge::new("ca", "c", "a", EdgeKind::Default)));
        graph
    }

    #[test]
    fn test_remove_node_cascades() {
        let mut graph = sample();
        let removed = graph.remove_node("b").unwrap();
        assert_eq!(removed, vec!["ab".to_string(), "bc".to_string()]);
        assert_eq!(graph.node_count(), 2);
        assert!(graph.edges().iter().all(|e| !e.touches("b")));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_remove_unknown_node() {
        let mut graph = sample();
        assert!(graph.remove_node("zzz").is_none());
        assert_eq!(graph, sample());
    }

    #[test]
    fn test_upsert_rejects_dangling() {
        let mut graph = sample();
        assert!(!graph.upsert_edge(Edge::new("ax", "a", "x", EdgeKind::Default)));
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_upsert_replaces_same_id() {
        let mut graph = sample();
        assert!(graph.upsert_edge(Edge::new("ab", "a", "c", EdgeKind::Default)));
        assert_eq!(graph.edge_count(), 3);
        let last = graph.edges().last().unwrap();
        assert_eq!(last.id, "ab");
        assert_eq!(last.target, "c");
    }
}
