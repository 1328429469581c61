// Snapshot management for step-by-step replay

pub mod recorder;

use crate::engine::constants::{BYTES_PER_NODE, SNAPSHOT_OVERHEAD};
use crate::errors::HistoryError;
use crate::tree::ids::NodeId;
use crate::tree::serial::{flatten, NodesById};
use crate::tree::Tree;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// What a snapshot is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightKind {
    Compare,
    Insert,
    Duplicate,
    Found,
    NotFound,
    Delete,
    Traverse,
    Skip,
    Done,
    Error,
}

impl HighlightKind {
    pub fn label(self) -> &'static str {
        match self {
            HighlightKind::Compare => "compare",
            HighlightKind::Insert => "insert",
            HighlightKind::Duplicate => "duplicate",
            HighlightKind::Found => "found",
            HighlightKind::NotFound => "notfound",
            HighlightKind::Delete => "delete",
            HighlightKind::Traverse => "traverse",
            HighlightKind::Skip => "skip",
            HighlightKind::Done => "done",
            HighlightKind::Error => "error",
        }
    }
}

/// The highlighted event of a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    #[serde(rename = "type")]
    pub kind: HighlightKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub path: Vec<NodeId>,
}

impl Highlight {
    pub fn new(kind: HighlightKind, message: impl Into<String>) -> Self {
        Highlight {
            kind,
            id: None,
            message: Some(message.into()),
            path: Vec::new(),
        }
    }

    pub fn with_node(mut self, id: NodeId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_path(mut self, path: Vec<NodeId>) -> Self {
        self.path = path;
        self
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

/// One immutable step of an action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub tree: Tree,
    pub nodes_by_id: NodesById,
    pub highlight: Highlight,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub done: bool,
}

impl Snapshot {
    /// Capture an intermediate step; `tree` is already a private copy
    pub fn step(tree: Tree, highlight: Highlight) -> Self {
        let nodes_by_id = flatten(&tree);
        Snapshot {
            tree,
            nodes_by_id,
            highlight,
            message: None,
            done: false,
        }
    }

    /// Capture the final step of an action
    pub fn terminal(tree: Tree, highlight: Highlight) -> Self {
        let mut snapshot = Self::step(tree, highlight);
        snapshot.finish();
        snapshot
    }

    /// Mark this snapshot as the one that ends its action
    pub fn finish(&mut self) {
        self.message = self.highlight.message.clone();
        self.done = true;
    }

    pub fn kind(&self) -> HighlightKind {
        self.highlight.kind
    }

    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        // Rough: each node lives twice (tree + flat record)
        let nodes = self.nodes_by_id.len() * BYTES_PER_NODE * 2;
        let text = self.highlight.message().len() + self.message.as_ref().map_or(0, |m| m.len());
        let path = self.highlight.path.len() * std::mem::size_of::<NodeId>();
        SNAPSHOT_OVERHEAD + nodes + text + path
    }
}

/// Execution history for replay, with a cursor
#[derive(Debug)]
pub struct SnapshotHistory {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
    position: usize,
}

impl SnapshotHistory {
    pub fn new(max_memory: usize) -> Self {
        SnapshotHistory {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
            position: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), HistoryError> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            tracing::warn!(
                current = self.current_memory,
                requested = snapshot_size,
                limit = self.max_memory,
                "snapshot history budget exhausted"
            );
            return Err(HistoryError::LimitExceeded {
                current: self.current_memory,
                requested: snapshot_size,
                limit: self.max_memory,
            });
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Append every snapshot of one action, or none of them.
    ///
    /// Returns the index range the action now occupies.
    pub fn push_action(&mut self, snapshots: Vec<Snapshot>) -> Result<Range<usize>, HistoryError> {
        let requested: usize = snapshots.iter().map(Snapshot::estimated_size).sum();
        if self.current_memory + requested > self.max_memory {
            tracing::warn!(
                current = self.current_memory,
                requested,
                limit = self.max_memory,
                "action does not fit in snapshot history"
            );
            return Err(HistoryError::LimitExceeded {
                current: self.current_memory,
                requested,
                limit: self.max_memory,
            });
        }

        let start = self.snapshots.len();
        self.current_memory += requested;
        self.snapshots.extend(snapshots);
        Ok(start..self.snapshots.len())
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Snapshot under the cursor
    pub fn current(&self) -> Option<&Snapshot> {
        self.snapshots.get(self.position)
    }

    /// Most recent snapshot
    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// The tree the next action starts from
    pub fn committed_tree(&self) -> Option<&Tree> {
        self.latest().map(|s| &s.tree)
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the cursor to `index`
    pub fn seek(&mut self, index: usize) -> Result<(), HistoryError> {
        if self.snapshots.is_empty() {
            return Err(HistoryError::NoSnapshots);
        }
        if index >= self.snapshots.len() {
            return Err(HistoryError::AtEnd);
        }
        self.position = index;
        Ok(())
    }

    pub fn step_forward(&mut self) -> Result<(), HistoryError> {
        if self.snapshots.is_empty() {
            return Err(HistoryError::NoSnapshots);
        }
        if self.position + 1 >= self.snapshots.len() {
            return Err(HistoryError::AtEnd);
        }
        self.position += 1;
        Ok(())
    }

    pub fn step_backward(&mut self) -> Result<(), HistoryError> {
        if self.snapshots.is_empty() {
            return Err(HistoryError::NoSnapshots);
        }
        if self.position == 0 {
            return Err(HistoryError::AtStart);
        }
        self.position -= 1;
        Ok(())
    }

    pub fn rewind_to_start(&mut self) -> Result<(), HistoryError> {
        self.seek(0)
    }

    pub fn jump_to_end(&mut self) -> Result<(), HistoryError> {
        let last = self.snapshots.len().checked_sub(1).ok_or(HistoryError::NoSnapshots)?;
        self.seek(last)
    }

    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.snapshots.len()
    }

    /// Index range of the action that produced the snapshot at `index`.
    ///
    /// Actions are delimited by terminal snapshots.
    pub fn action_range(&self, index: usize) -> Range<usize> {
        if index >= self.snapshots.len() {
            return index..index;
        }
        let start = self.snapshots[..index]
            .iter()
            .rposition(|s| s.done)
            .map_or(0, |i| i + 1);
        let end = self.snapshots[index..]
            .iter()
            .position(|s| s.done)
            .map_or(self.snapshots.len(), |i| index + i + 1);
        start..end
    }

    /// Drop everything, keeping the budget
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.current_memory = 0;
        self.position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(done: bool) -> Snapshot {
        let mut s = Snapshot::step(Tree::new(), Highlight::new(HighlightKind::Compare, "x"));
        if done {
            s.finish();
        }
        s
    }

    #[test]
    fn test_push_respects_limit() {
        let size = step(false).estimated_size();
        let mut history = SnapshotHistory::new(size * 2);
        assert!(history.push(step(false)).is_ok());
        assert!(history.push(step(false)).is_ok());
        assert!(matches!(
            history.push(step(false)),
            Err(HistoryError::LimitExceeded { .. })
        ));
        assert_eq!(history.len(), 2);
        assert_eq!(history.memory_usage(), size * 2);
    }

    #[test]
    fn test_push_action_is_all_or_nothing() {
        // A terminal step carries its message twice, so it costs more than a plain one
        let budget = step(false).estimated_size() + 2 * step(true).estimated_size();
        let mut history = SnapshotHistory::new(budget);
        assert_eq!(history.push_action(vec![step(false), step(true)]), Ok(0..2));
        assert!(history
            .push_action(vec![step(false), step(true)])
            .is_err());
        assert_eq!(history.len(), 2);
        assert_eq!(history.push_action(vec![step(true)]), Ok(2..3));
    }

    #[test]
    fn test_cursor_movement() {
        let mut history = SnapshotHistory::new(usize::MAX);
        assert_eq!(history.step_forward(), Err(HistoryError::NoSnapshots));
        for _ in 0..3 {
            history.push(step(false)).unwrap();
        }
        assert_eq!(history.step_backward(), Err(HistoryError::AtStart));
        history.step_forward().unwrap();
        history.jump_to_end().unwrap();
        assert_eq!(history.position(), 2);
        assert_eq!(history.step_forward(), Err(HistoryError::AtEnd));
        history.rewind_to_start().unwrap();
        assert_eq!(history.position(), 0);
    }

    #[test]
    fn test_action_range() {
        let mut history = SnapshotHistory::new(usize::MAX);
        for done in [false, true, true, false, false, true] {
            history.push(step(done)).unwrap();
        }
        assert_eq!(history.action_range(0), 0..2);
        assert_eq!(history.action_range(1), 0..2);
        assert_eq!(history.action_range(2), 2..3);
        assert_eq!(history.action_range(4), 3..6);
    }

    #[test]
    fn test_finish_copies_message() {
        let s = step(true);
        assert!(s.done);
        assert_eq!(s.message.as_deref(), Some("x"));
    }

    #[test]
    fn test_serialized_field_names() {
        let s = Snapshot::terminal(
            Tree::new(),
            Highlight::new(HighlightKind::NotFound, "missing").with_path(vec![1, 2]),
        );
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["highlight"]["type"], "notfound");
        assert_eq!(json["done"], true);
        assert!(json["nodesById"].is_object());
        assert!(json["tree"].is_null());
    }
}
