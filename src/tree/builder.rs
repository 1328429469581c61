//! Level-order tree construction
//!
//! A build list describes a tree breadth-first: the first item is the root, and
//! each following pair of items fills the left and right slot of the next node
//! waiting in the queue. A "no node" item (`null`, or the literal string `"-1"`)
//! consumes a slot without creating a node. Items left over once no node is
//! waiting for children are dropped.
//!
//! [`LevelOrderBuilder`] consumes the list one item at a time so that callers can
//! show the tree growing. After `k` pushes its tree equals the tree built from
//! the first `k` items, and nodes placed earlier keep their ids.

use super::ids::{IdAllocator, NodeId};
use super::value::Value;
use super::{Node, Path, Side, Tree};
use std::collections::VecDeque;

/// Literal string that stands for "no node" in a build list
pub const SENTINEL: &str = "-1";

/// Where a pushed item ended up
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    /// The item became the root
    Root { id: NodeId },
    /// The item was attached under `parent`
    Child {
        id: NodeId,
        parent: NodeId,
        side: Side,
    },
    /// A "no node" item consumed a slot (`parent` is `None` for the root slot)
    Gap { parent: Option<NodeId>, side: Option<Side> },
    /// No slot was left for the item
    Dropped,
}

/// Normalize one build-list item: sentinels and blanks become `None`,
/// numeric-looking strings become numbers
pub fn normalize_item(item: Option<Value>) -> Option<Value> {
    match item {
        // Checked before coercion, which would turn "-1" into a number
        Some(Value::Text(s)) if s.trim() == SENTINEL || s.trim().is_empty() => None,
        Some(value) => Some(value.normalize()),
        None => None,
    }
}

/// Incremental breadth-first builder
#[derive(Debug, Default)]
pub struct LevelOrderBuilder {
    tree: Tree,
    queue: VecDeque<Path>,
    slot: Option<(Path, Side)>,
    started: bool,
    closed: bool,
}

impl LevelOrderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the next list item
    pub fn push(&mut self, item: Option<Value>, ids: &mut IdAllocator) -> Placement {
        if !self.started {
            self.started = true;
            return match item {
                Some(value) => {
                    let id = ids.next_id();
                    self.tree = Tree::with_root(Node::new(id, value));
                    self.queue.push_back(Path::new());
                    Placement::Root { id }
                }
                None => {
                    // A missing root leaves nothing to hang later items on
                    self.closed = true;
                    Placement::Gap {
                        parent: None,
                        side: None,
                    }
                }
            };
        }

        if self.closed {
            return Placement::Dropped;
        }

        let (parent_path, side) = match self.slot.take() {
            Some(slot) => slot,
            None => match self.queue.pop_front() {
                Some(path) => (path, Side::Left),
                None => {
                    self.closed = true;
                    return Placement::Dropped;
                }
            },
        };
        if side == Side::Left {
            self.slot = Some((parent_path.clone(), Side::Right));
        }

        let parent = match self.tree.node_at(&parent_path) {
            Some(node) => node.id,
            None => return Placement::Dropped,
        };

        let value = match item {
            Some(value) => value,
            None => {
                return Placement::Gap {
                    parent: Some(parent),
                    side: Some(side),
                }
            }
        };

        let mut child_path = parent_path;
        child_path.push(side);
        let id = ids.next_id();
        if let Some(slot) = self.tree.slot_mut(&child_path) {
            *slot = Some(Box::new(Node::new(id, value)));
        }
        self.queue.push_back(child_path);
        Placement::Child { id, parent, side }
    }

    /// Tree built from the items pushed so far
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn into_tree(self) -> Tree {
        self.tree
    }
}

/// Build a whole tree from a level-order list
pub fn build_level_order(items: &[Option<Value>], ids: &mut IdAllocator) -> Tree {
    let mut builder = LevelOrderBuilder::new();
    for item in items {
        builder.push(normalize_item(item.clone()), ids);
    }
    builder.into_tree()
}
