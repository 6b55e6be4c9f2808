//! Bounded linear undo history.
//!
//! Snapshots are taken before each guarded mutation, so the snapshot under
//! the cursor is always the state the latest mutation started from. Undo
//! restores it and steps the cursor back. There is no redo.

use std::collections::VecDeque;

use tracing::trace;

use crate::{graph::Graph, utils};

/// Default number of snapshots kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Immutable copy of the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    graph: Graph,
    /// capture time in milliseconds
    taken_at: i64,
}

impl Snapshot {
    fn capture(graph: &Graph) -> Self {
        Self {
            graph: graph.clone(),
            taken_at: utils::time::time_millis(),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn taken_at(&self) -> i64 {
        self.taken_at
    }
}

#[derive(Debug, Clone)]
pub struct History {
    snapshots: VecDeque<Snapshot>,
    /// index of the newest live snapshot, `None` while empty
    cursor: Option<usize>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            cursor: None,
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Whether [`History::undo`] would restore anything.
    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    /// Record `graph` as the state preceding the next mutation.
    ///
    /// Snapshots past the cursor are discarded first; the oldest snapshot is
    /// evicted once the capacity is exceeded.
    pub fn snapshot(
        &mut self,
        graph: &Graph,
    ) {
        match self.cursor {
            Some(c) => self.snapshots.truncate(c + 1),
            None => self.snapshots.clear(),
        }

        self.snapshots.push_back(Snapshot::capture(graph));
        if self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
        self.cursor = Some(self.snapshots.len() - 1);

        trace!(len = self.snapshots.len(), cursor = self.snapshots.len() - 1, "history snapshot");
    }

    /// Step back one mutation, returning the graph to restore.
    ///
    /// No-op while the cursor is at the base snapshot or the history is empty.
    pub fn undo(&mut self) -> Option<Graph> {
        let cursor = self.cursor.filter(|c| *c > 0)?;
        let graph = self.snapshots[cursor].graph.clone();
        self.cursor = Some(cursor - 1);

        trace!(cursor = cursor - 1, "history undo");
        Some(graph)
    }

    /// Drop everything and keep `graph` as the only, base snapshot.
    pub fn reset(
        &mut self,
        graph: &Graph,
    ) {
        self.snapshots.clear();
        self.snapshots.push_back(Snapshot::capture(graph));
        self.cursor = Some(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Node, NodeKind, Position};

    fn graph_with(n: usize) -> Graph {
        let mut graph = Graph::new();
        for i in 0..n {
            graph.push_node(Node::new(format!("node_{i}"), NodeKind::Task, Position::default()));
        }
        graph
    }

    #[test]
    fn test_empty_history_cannot_undo() {
        let mut history = History::default();
        assert_eq!(history.cursor(), None);
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_base_snapshot_is_not_undone() {
        let mut history = History::default();
        history.reset(&graph_with(0));
        assert_eq!(history.cursor(), Some(0));
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_undo_walks_back() {
        let mut history = History::default();
        history.reset(&graph_with(0));
        history.snapshot(&graph_with(0));
        history.snapshot(&graph_with(1));
        history.snapshot(&graph_with(2));

        assert_eq!(history.undo(), Some(graph_with(2)));
        assert_eq!(history.undo(), Some(graph_with(1)));
        assert_eq!(history.undo(), Some(graph_with(0)));
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn test_snapshot_truncates_future() {
        let mut history = History::default();
        history.reset(&graph_with(0));
        history.snapshot(&graph_with(0));
        history.snapshot(&graph_with(1));
        history.undo();
        history.snapshot(&graph_with(5));
        assert_eq!(history.len(), 3);
        assert_eq!(history.undo(), Some(graph_with(5)));
        assert_eq!(history.undo(), Some(graph_with(0)));
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = History::new(3);
        for i in 0..5 {
            history.snapshot(&graph_with(i));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), Some(2));
        let kept: Vec<usize> = history.snapshots().map(|s| s.graph().node_count()).collect();
        assert_eq!(kept, vec![2, 3, 4]);
    }

    #[test]
    fn test_reset_keeps_single_snapshot() {
        let mut history = History::default();
        for i in 0..4 {
            history.snapshot(&graph_with(i));
        }
        history.reset(&graph_with(7));
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), Some(0));
        assert_eq!(history.snapshots().next().unwrap().graph().node_count(), 7);
        assert!(history.snapshots().next().unwrap().taken_at() > 0);
    }
}
