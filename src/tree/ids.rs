//! Node identity allocation
//!
//! Every node gets an identifier when it is created. Identifiers survive
//! cloning, which lets a renderer follow a node across consecutive snapshots
//! by id instead of by position.

/// Node identifier type
pub type NodeId = u64;

/// First identifier handed out after construction or reset
pub const FIRST_NODE_ID: NodeId = 1;

/// Monotonic identifier allocator, one per session
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: NodeId,
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator {
            next: FIRST_NODE_ID,
        }
    }

    /// Issue a fresh identifier
    pub fn next_id(&mut self) -> NodeId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Identifier the next call to [`next_id`](Self::next_id) will return
    pub fn peek(&self) -> NodeId {
        self.next
    }

    /// Restart the counter.
    ///
    /// Only valid once every snapshot produced under the old counter has been
    /// discarded, otherwise new ids collide with old ones.
    pub fn reset(&mut self) {
        self.next = FIRST_NODE_ID;
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
