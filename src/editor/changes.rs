//! Batched change sets emitted by the canvas.
//!
//! The canvas reports drags, selection and keyboard deletion as lists of
//! changes; the editor applies one list as a single batch.

use crate::graph::{EdgeId, NodeId, Position};

#[derive(Debug, Clone, PartialEq)]
pub enum NodeChange {
    /// Node dragged. `position` is `None` for intermediate pointer events
    /// that carry no coordinate.
    Position {
        id: NodeId,
        position: Option<Position>,
        dragging: bool,
    },
    Select {
        id: NodeId,
        selected: bool,
    },
    Remove {
        id: NodeId,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EdgeChange {
    Select {
        id: EdgeId,
        selected: bool,
    },
    Remove {
        id: EdgeId,
    },
}

impl NodeChange {
    /// Id of the node this change removes.
    pub fn removed(&self) -> Option<&NodeId> {
        match self {
            NodeChange::Remove {
                id,
            } => Some(id),
            _ => None,
        }
    }
}

impl EdgeChange {
    pub fn removed(&self) -> Option<&EdgeId> {
        match self {
            EdgeChange::Remove {
                id,
            } => Some(id),
            _ => None,
        }
    }
}
