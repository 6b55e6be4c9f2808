//! Canonical edge representation.

use serde::{Deserialize, Serialize};

use crate::{
    graph::node::{NodeId, NodeKind},
    model::ConditionRef,
};

/// Unique identifier for an edge within a graph.
pub type EdgeId = String;

/// Edge flavour, fixed when the edge is created.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EdgeKind {
    /// Plain sequence flow.
    Default,
    /// Branch leaving a gateway, may carry a condition.
    Condition,
}

impl EdgeKind {
    /// Edges leaving a gateway are condition edges, everything else is a default edge.
    pub fn for_source(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Gateway => EdgeKind::Condition,
            NodeKind::Task | NodeKind::Event => EdgeKind::Default,
        }
    }
}

/// Directed connection between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Unique edge identifier.
    pub id: EdgeId,
    /// ID of the source node.
    pub source: NodeId,
    /// ID of the target node.
    pub target: NodeId,
    /// canvas selection state, never exported
    pub selected: bool,
    kind: EdgeKind,
    condition: Option<ConditionRef>,
}

impl Edge {
    /// Create an edge with no condition attached.
    pub fn new(
        id: impl Into<EdgeId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        kind: EdgeKind,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            selected: false,
            kind,
            condition: None,
        }
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub fn condition(&self) -> Option<&ConditionRef> {
        self.condition.as_ref()
    }

    /// Replace the condition. Only condition edges carry one, for default
    /// edges this is a no-op returning `false`.
    pub fn set_condition(
        &mut self,
        condition: Option<ConditionRef>,
    ) -> bool {
        if self.kind != EdgeKind::Condition {
            return false;
        }
        self.condition = condition;
        true
    }

    /// Whether the edge starts or ends at `node_id`.
    pub fn touches(
        &self,
        node_id: &str,
    ) -> bool {
        self.source == node_id || self.target == node_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_for_source() {
        assert_eq!(EdgeKind::for_source(NodeKind::Gateway), EdgeKind::Condition);
        assert_eq!(EdgeKind::for_source(NodeKind::Task), EdgeKind::Default);
        assert_eq!(EdgeKind::for_source(NodeKind::Event), EdgeKind::Default);
    }

    #[test]
    fn test_default_edge_rejects_condition() {
        let mut edge = Edge::new("edge_a_b", "a", "b", EdgeKind::Default);
        let cond = ConditionRef {
            condition_key: "c1".into(),
            ..Default::default()
        };
        assert!(!edge.set_condition(Some(cond)));
        assert!(edge.condition().is_none());
    }

    #[test]
    fn test_condition_edge_set_and_clear() {
        let mut edge = Edge::new("edge_a_b", "a", "b", EdgeKind::Condition);
        let cond = ConditionRef {
            condition_key: "c1".into(),
            ..Default::default()
        };
        assert!(edge.set_condition(Some(cond.clone())));
        assert_eq!(edge.condition(), Some(&cond));
        assert!(edge.set_condition(None));
        assert!(edge.condition().is_none());
    }
}
