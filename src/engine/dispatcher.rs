// Action dispatcher: one action in, an ordered stream of snapshots out

use crate::action::{Action, TreeType};
use crate::engine::ops::traversal::{self, TraversalOrder};
use crate::engine::ops::{binary, bst, DeleteOutcome, InsertOutcome};
use crate::snapshot::recorder::{StepBuffer, StepRecorder};
use crate::snapshot::{Highlight, HighlightKind, Snapshot};
use crate::tree::builder::{normalize_item, LevelOrderBuilder, Placement};
use crate::tree::ids::IdAllocator;
use crate::tree::value::Value;
use crate::tree::Tree;

/// Owns the identifier allocator for one independent session
#[derive(Debug, Default)]
pub struct Session {
    ids: IdAllocator,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start over; every snapshot from this session must be discarded first
    pub fn reset(&mut self) {
        self.ids.reset();
    }

    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    /// Run `action` against `previous` (the committed tree, if any).
    ///
    /// Nothing happens until the returned iterator is first polled; `previous`
    /// is only read, never mutated.
    pub fn dispatch<'a>(&'a mut self, previous: Option<&'a Tree>, action: Action) -> Steps<'a> {
        Steps {
            ids: &mut self.ids,
            previous,
            state: State::Pending(action),
        }
    }
}

enum State {
    Pending(Action),
    Draining {
        buffer: StepBuffer,
        terminal: Snapshot,
    },
    Finished,
}

/// Lazy snapshot sequence for one action, ending with exactly one terminal snapshot
pub struct Steps<'a> {
    ids: &'a mut IdAllocator,
    previous: Option<&'a Tree>,
    state: State,
}

impl Iterator for Steps<'_> {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        loop {
            match std::mem::replace(&mut self.state, State::Finished) {
                State::Pending(action) => {
                    let working = self.previous.cloned().unwrap_or_default();
                    let run = Run {
                        ids: &mut *self.ids,
                        working,
                        buffer: StepBuffer::new(),
                    };
                    let (buffer, terminal) = run.execute(action);
                    self.state = State::Draining { buffer, terminal };
                }
                State::Draining {
                    mut buffer,
                    terminal,
                } => {
                    if let Some(step) = buffer.pop_front() {
                        self.state = State::Draining { buffer, terminal };
                        return Some(Snapshot::step(step.tree, step.highlight));
                    }
                    tracing::debug!(
                        kind = terminal.kind().label(),
                        detail = terminal.highlight.message(),
                        "action finished"
                    );
                    return Some(terminal);
                }
                State::Finished => return None,
            }
        }
    }
}

/// Private working state of one action
struct Run<'a> {
    ids: &'a mut IdAllocator,
    working: Tree,
    buffer: StepBuffer,
}

impl Run<'_> {
    fn execute(mut self, action: Action) -> (StepBuffer, Snapshot) {
        tracing::debug!(action = %action, "dispatching action");
        let terminal = match action {
            Action::BuildTree { list } => self.build(list, "Built tree"),
            Action::LoadDemo { demo } => self.build(demo, "Loaded demo"),
            Action::Insert { value, tree_type } => self.insert(value, tree_type),
            Action::Search { value, tree_type } => self.search(value, tree_type),
            Action::Delete { value, tree_type } => self.delete(value, tree_type),
            Action::Traverse { order } => self.traverse(order),
            Action::Clear => {
                self.working = Tree::new();
                Highlight::new(HighlightKind::Done, "Tree cleared")
            }
            Action::Noop => Highlight::new(HighlightKind::Done, "Nothing to do"),
        };
        self.finish(terminal)
    }

    /// Turn the terminal highlight into the terminal snapshot.
    ///
    /// If the last recorded step already has the terminal kind it becomes the
    /// terminal snapshot itself, so the sequence never repeats it.
    fn finish(mut self, terminal: Highlight) -> (StepBuffer, Snapshot) {
        if self.buffer.last_kind() == Some(terminal.kind) {
            if let Some(step) = self.buffer.pop_back() {
                return (self.buffer, Snapshot::terminal(step.tree, step.highlight));
            }
        }
        (self.buffer, Snapshot::terminal(self.working, terminal))
    }

    fn reject(&mut self, message: &str) -> Highlight {
        tracing::warn!(reason = message, "action rejected");
        Highlight::new(HighlightKind::Error, message)
    }

    fn operand(&mut self, value: Option<Value>) -> Result<Value, Highlight> {
        match value {
            Some(value) if !value.is_blank() => Ok(value.normalize()),
            _ => Err(self.reject("Please enter a value")),
        }
    }

    fn record(&mut self, highlight: Highlight) {
        self.buffer.record(&self.working, highlight);
    }

    /// Replay a level-order list one element at a time
    fn build(&mut self, list: Vec<Option<Value>>, verb: &str) -> Highlight {
        if list.is_empty() {
            return self.reject("Please enter a list of values");
        }

        let mut builder = LevelOrderBuilder::new();
        for (index, raw) in list.into_iter().enumerate() {
            let item = normalize_item(raw);
            let label = match &item {
                Some(value) => value.to_string(),
                None => "null".to_string(),
            };
            let placement = builder.push(item, self.ids);
            let tree = builder.tree();
            let highlight = match placement {
                Placement::Root { id } => {
                    Highlight::new(HighlightKind::Insert, format!("Inserted {} as root", label))
                        .with_node(id)
                        .with_path(vec![id])
                }
                Placement::Child { id, parent, side } => {
                    let parent_value = tree
                        .find_by_id(parent)
                        .map(|node| node.value.to_string())
                        .unwrap_or_default();
                    Highlight::new(
                        HighlightKind::Insert,
                        format!("Inserted {} as the {} child of {}", label, side, parent_value),
                    )
                    .with_node(id)
                    .with_path(vec![parent, id])
                }
                Placement::Gap { parent, side } => {
                    let highlight = Highlight::new(
                        HighlightKind::Skip,
                        match side {
                            Some(side) => {
                                format!("Item {} is empty, {} slot left open", index + 1, side)
                            }
                            None => "Root item is empty, the tree stays empty".to_string(),
                        },
                    );
                    match parent {
                        Some(parent) => highlight.with_node(parent).with_path(vec![parent]),
                        None => highlight,
                    }
                }
                Placement::Dropped => Highlight::new(
                    HighlightKind::Skip,
                    format!("No open slot left for item {} ({}), skipped", index + 1, label),
                ),
            };
            self.buffer.record(tree, highlight);
        }

        self.working = builder.into_tree();
        let count = self.working.len();
        Highlight::new(
            HighlightKind::Done,
            format!("{} with {} node{}", verb, count, if count == 1 { "" } else { "s" }),
        )
    }

    fn insert(&mut self, value: Option<Value>, tree_type: TreeType) -> Highlight {
        let value = match self.operand(value) {
            Ok(value) => value,
            Err(rejected) => return rejected,
        };
        let label = value.to_string();

        let outcome = match tree_type {
            TreeType::Bst => bst::insert(&mut self.working, value, self.ids, &mut self.buffer),
            TreeType::Binary => {
                binary::insert(&mut self.working, value, self.ids, &mut self.buffer)
            }
        };

        match outcome {
            InsertOutcome::Root { id } => {
                self.record(
                    Highlight::new(HighlightKind::Insert, format!("Inserted {} as root", label))
                        .with_node(id)
                        .with_path(vec![id]),
                );
                Highlight::new(HighlightKind::Done, format!("Inserted {}", label)).with_node(id)
            }
            InsertOutcome::Child { id, .. } => {
                Highlight::new(HighlightKind::Done, format!("Inserted {}", label)).with_node(id)
            }
            InsertOutcome::Duplicate { id } => Highlight::new(
                HighlightKind::Done,
                format!("{} is already in the tree, nothing inserted", label),
            )
            .with_node(id),
        }
    }

    fn search(&mut self, value: Option<Value>, tree_type: TreeType) -> Highlight {
        let value = match self.operand(value) {
            Ok(value) => value,
            Err(rejected) => return rejected,
        };
        if self.working.is_empty() {
            return self.reject("Tree empty");
        }

        let outcome = match tree_type {
            TreeType::Bst => bst::search(&self.working, &value, &mut self.buffer),
            TreeType::Binary => binary::search(&self.working, &value, &mut self.buffer),
        };
        match outcome.found {
            Some(id) => Highlight::new(HighlightKind::Found, format!("Found {}", value))
                .with_node(id)
                .with_path(outcome.path),
            None => Highlight::new(HighlightKind::NotFound, format!("{} not found", value))
                .with_path(outcome.path),
        }
    }

    fn delete(&mut self, value: Option<Value>, tree_type: TreeType) -> Highlight {
        let value = match self.operand(value) {
            Ok(value) => value,
            Err(rejected) => return rejected,
        };
        if self.working.is_empty() {
            return self.reject("Tree empty");
        }

        let outcome = match tree_type {
            TreeType::Bst => bst::delete(&mut self.working, &value, &mut self.buffer),
            TreeType::Binary => binary::delete(&mut self.working, &value, &mut self.buffer),
        };
        match outcome {
            DeleteOutcome::NotFound => {
                Highlight::new(HighlightKind::Error, format!("{} not found", value))
            }
            DeleteOutcome::Removed { .. } => {
                Highlight::new(HighlightKind::Done, format!("Deleted {}", value))
            }
            DeleteOutcome::Replaced { id, old, new, .. } => Highlight::new(
                HighlightKind::Done,
                format!("Deleted {}, node now holds {}", old, new),
            )
            .with_node(id),
        }
    }

    fn traverse(&mut self, order: TraversalOrder) -> Highlight {
        if self.working.is_empty() {
            return self.reject("Tree empty");
        }
        let values = traversal::traverse(&self.working, order, &mut self.buffer);
        let listed: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        Highlight::new(
            HighlightKind::Done,
            format!("{} traversal: {}", order, listed.join(", ")),
        )
    }
}
