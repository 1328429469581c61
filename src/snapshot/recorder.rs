//! Step recording
//!
//! Algorithms report each step through a [`StepRecorder`]. The dispatcher hands
//! them a [`StepBuffer`], which copies the working tree at the moment of each
//! step and keeps the steps in FIFO order until they are drained into
//! snapshots.

use super::{Highlight, HighlightKind};
use crate::tree::Tree;
use std::collections::VecDeque;

/// Sink for algorithm steps
pub trait StepRecorder {
    /// Record one step; `tree` is the working tree as it is right now
    fn record(&mut self, tree: &Tree, highlight: Highlight);
}

/// A recorded step waiting to become a snapshot
#[derive(Debug, Clone)]
pub struct PendingStep {
    pub tree: Tree,
    pub highlight: Highlight,
}

/// Append-only FIFO of pending steps
#[derive(Debug, Default)]
pub struct StepBuffer {
    pending: VecDeque<PendingStep>,
}

impl StepBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Kind of the most recently recorded step
    pub fn last_kind(&self) -> Option<HighlightKind> {
        self.pending.back().map(|step| step.highlight.kind)
    }

    pub fn pop_front(&mut self) -> Option<PendingStep> {
        self.pending.pop_front()
    }

    pub fn pop_back(&mut self) -> Option<PendingStep> {
        self.pending.pop_back()
    }

    /// Kinds of all pending steps, oldest first
    pub fn kinds(&self) -> Vec<HighlightKind> {
        self.pending.iter().map(|step| step.highlight.kind).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingStep> {
        self.pending.iter()
    }
}

impl StepRecorder for StepBuffer {
    fn record(&mut self, tree: &Tree, highlight: Highlight) {
        tracing::trace!(
            kind = highlight.kind.label(),
            node = ?highlight.id,
            detail = highlight.message(),
            "step recorded"
        );
        self.pending.push_back(PendingStep {
            tree: tree.clone(),
            highlight,
        });
    }
}
