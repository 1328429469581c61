// Tree algorithms that report their progress through a StepRecorder

pub mod binary;
pub mod bst;
pub mod traversal;

use crate::tree::ids::NodeId;
use crate::tree::value::Value;

/// Result of an insert
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    /// The tree was empty; nothing was recorded so the caller can announce the root
    Root { id: NodeId },
    Child { id: NodeId, parent: NodeId },
    /// An equal value already exists (BST only)
    Duplicate { id: NodeId },
}

/// Result of a search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub found: Option<NodeId>,
    /// Ids of every visited node, in visiting order
    pub path: Vec<NodeId>,
}

/// Result of a delete
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    NotFound,
    /// The target node itself was unlinked
    Removed { id: NodeId },
    /// The target took over `donor`'s value and `donor` was unlinked
    Replaced {
        id: NodeId,
        donor: NodeId,
        old: Value,
        new: Value,
    },
}
