//! Bounded command queue between distant UI components and the editor.

use std::sync::Arc;

use crate::{FlowCanvasError, Result};

/// Bounded MPSC queue.
///
/// Producers never block: the editor drains the queue on the same thread that
/// feeds it, so a full queue is reported as an error instead of waiting.
/// Backed by flume for high-performance message passing.
pub struct Queue<T> {
    receiver: flume::Receiver<T>,
    sender: flume::Sender<T>,
}

impl<T> Queue<T> {
    /// create a new queue
    pub fn new(cap: usize) -> Arc<Self> {
        let (tx, rx) = flume::bounded(cap.max(1));

        Arc::new(Self {
            receiver: rx,
            sender: tx,
        })
    }

    /// send a message to the queue
    pub fn send(
        &self,
        msg: T,
    ) -> Result<()> {
        self.sender.try_send(msg).map_err(|e| FlowCanvasError::Queue(e.to_string()))
    }

    /// take the next message if one is waiting
    pub fn try_next(&self) -> Option<T> {
        self.receiver.try_recv().ok()
    }

    /// number of messages waiting
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}
