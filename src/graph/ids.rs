//! Identity generation for nodes and edges.

use crate::graph::{edge::EdgeId, node::NodeId};

const NODE_ID_PREFIX: &str = "node_";

/// Suffixes at or above this are not reseeded from, so the counter keeps headroom.
const MAX_RESEED_SUFFIX: u64 = u64::MAX / 2;

/// Monotonic `node_<n>` generator owned by one editing session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value the next generated id will carry.
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Hand out `node_<n>` and advance the counter.
    pub fn next_node_id(&mut self) -> NodeId {
        let id = format!("{}{}", NODE_ID_PREFIX, self.next);
        self.next += 1;
        id
    }

    /// Raise the counter above every numeric suffix in `ids`.
    ///
    /// The counter never moves backwards. Ids without a `node_<digits>`
    /// shape and suffixes at or above `u64::MAX / 2` are ignored.
    pub fn reseed<'a>(
        &mut self,
        ids: impl IntoIterator<Item = &'a str>,
    ) {
        if let Some(max) = ids.into_iter().filter_map(node_suffix).filter(|n| *n < MAX_RESEED_SUFFIX).max() {
            self.next = self.next.max(max + 1);
        }
    }
}

/// Numeric suffix of a `node_<n>` id.
pub fn node_suffix(id: &str) -> Option<u64> {
    let digits = id.strip_prefix(NODE_ID_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Deterministic id of the edge between two nodes.
pub fn edge_id(
    source: &str,
    target: &str,
) -> EdgeId {
    format!("edge_{}_{}", source, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_node_id(), "node_0");
        assert_eq!(ids.next_node_id(), "node_1");
        assert_eq!(ids.peek(), 2);
    }

    #[test]
    fn test_reseed_above_max_suffix() {
        let mut ids = IdGenerator::new();
        ids.reseed(["node_5", "node_2", "start", "node_x", "node_"]);
        assert_eq!(ids.next_node_id(), "node_6");
    }

    #[test]
    fn test_reseed_never_moves_backwards() {
        let mut ids = IdGenerator::new();
        for _ in 0..10 {
            ids.next_node_id();
        }
        ids.reseed(["node_3"]);
        assert_eq!(ids.next_node_id(), "node_10");
    }

    #[test]
    fn test_reseed_ignores_huge_suffixes() {
        let mut ids = IdGenerator::new();
        ids.reseed(["node_18446744073709551615", "node_18446744073709551614", "node_4"]);
        assert_eq!(ids.next_node_id(), "node_5");
        assert_eq!(ids.next_node_id(), "node_6");

        let mut ids = IdGenerator::new();
        ids.reseed(["node_9223372036854775806"]);
        assert_eq!(ids.next_node_id(), "node_9223372036854775807");
        assert_eq!(ids.peek(), 9_223_372_036_854_775_808);
    }

    #[test]
    fn test_node_suffix() {
        assert_eq!(node_suffix("node_007"), Some(7));
        assert_eq!(node_suffix("node_-1"), None);
        assert_eq!(node_suffix("edge_node_1"), None);
    }

    #[test]
    fn test_edge_id() {
        assert_eq!(edge_id("node_0", "node_1"), "edge_node_0_node_1");
    }
}
