//! Canonical in-memory graph of the workflow being edited.

pub mod edge;
mod graph;
pub mod ids;
pub mod node;

pub use edge::{Edge, EdgeId, EdgeKind};
pub use graph::Graph;
pub use ids::IdGenerator;
pub use node::{Binding, EventBinding, Node, NodeDataPatch, NodeId, NodeKind, Position};
