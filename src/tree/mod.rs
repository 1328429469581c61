//! Tree model shared by the engine, the snapshot history and the UI
//!
//! This module provides the core tree abstractions:
//! - [`value`]: Node values and the comparison rule
//! - [`ids`]: Identifier allocation
//! - [`serial`]: Flattening a tree into `nodesById` records and back
//! - [`builder`]: Level-order construction from a list with "no node" sentinels
//!
//! # Ownership
//!
//! A [`Node`] exclusively owns its children, so a [`Tree`] has no sharing and
//! no cycles. `Clone` is a deep copy that keeps every node's id, which is what
//! the engine uses to hand out independent snapshots.
//!
//! # Addressing
//!
//! Positions are addressed by a path of [`Side`]s from the root. Algorithms that
//! must rewrite a parent's child slot walk down with a path and then call
//! [`Tree::slot_mut`], instead of keeping parent back-pointers.

pub mod builder;
pub mod ids;
pub mod serial;
pub mod value;

use ids::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use value::Value;

/// Which child slot of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Path from the root to a node; empty means the root itself
pub type Path = Vec<Side>;

/// A tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub value: Value,
    #[serde(default)]
    pub left: Option<Box<Node>>,
    #[serde(default)]
    pub right: Option<Box<Node>>,
}

impl Node {
    pub fn new(id: NodeId, value: Value) -> Self {
        Node {
            id,
            value,
            left: None,
            right: None,
        }
    }

    pub fn child(&self, side: Side) -> Option<&Node> {
        match side {
            Side::Left => self.left.as_deref(),
            Side::Right => self.right.as_deref(),
        }
    }

    pub fn child_slot_mut(&mut self, side: Side) -> &mut Option<Box<Node>> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn child_count(&self) -> usize {
        self.left.is_some() as usize + self.right.is_some() as usize
    }
}

/// A binary tree; `root == None` is the empty tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tree {
    pub root: Option<Box<Node>>,
}

impl Tree {
    pub fn new() -> Self {
        Tree { root: None }
    }

    pub fn with_root(node: Node) -> Self {
        Tree {
            root: Some(Box::new(node)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    /// Count nodes
    pub fn len(&self) -> usize {
        self.breadth_first().len()
    }

    /// Get the node at a path
    pub fn node_at(&self, path: &[Side]) -> Option<&Node> {
        let mut node = self.root.as_deref()?;
        for side in path {
            node = node.child(*side)?;
        }
        Some(node)
    }

    /// Get a mutable node at a path
    pub fn node_at_mut(&mut self, path: &[Side]) -> Option<&mut Node> {
        let mut node = self.root.as_deref_mut()?;
        for side in path {
            node = node.child_slot_mut(*side).as_deref_mut()?;
        }
        Some(node)
    }

    /// Get the slot a path points into (the root slot for an empty path).
    ///
    /// Returns `None` when a node above the slot is missing.
    pub fn slot_mut(&mut self, path: &[Side]) -> Option<&mut Option<Box<Node>>> {
        match path.split_last() {
            None => Some(&mut self.root),
            Some((side, parent)) => self
                .node_at_mut(parent)
                .map(|node| node.child_slot_mut(*side)),
        }
    }

    /// Ids of every node from the root down to (and including) the node at `path`
    pub fn ids_along(&self, path: &[Side]) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(path.len() + 1);
        let mut node = match self.root.as_deref() {
            Some(root) => root,
            None => return ids,
        };
        ids.push(node.id);
        for side in path {
            match node.child(*side) {
                Some(child) => {
                    ids.push(child.id);
                    node = child;
                }
                None => break,
            }
        }
        ids
    }

    /// Every node with its path, in breadth-first left-to-right order
    pub fn breadth_first(&self) -> Vec<(Path, &Node)> {
        let mut visited = Vec::new();
        let mut queue = VecDeque::new();
        if let Some(root) = self.root.as_deref() {
            queue.push_back((Path::new(), root));
        }
        while let Some((path, node)) = queue.pop_front() {
            for side in [Side::Left, Side::Right] {
                if let Some(child) = node.child(side) {
                    let mut child_path = path.clone();
                    child_path.push(side);
                    queue.push_back((child_path, child));
                }
            }
            visited.push((path, node));
        }
        visited
    }

    /// Find a node by id
    pub fn find_by_id(&self, id: NodeId) -> Option<&Node> {
        self.breadth_first()
            .into_iter()
            .map(|(_, node)| node)
            .find(|node| node.id == id)
    }

    /// Values in in-order sequence
    pub fn inorder_values(&self) -> Vec<Value> {
        fn walk(node: Option<&Node>, out: &mut Vec<Value>) {
            if let Some(node) = node {
                walk(node.left.as_deref(), out);
                out.push(node.value.clone());
                walk(node.right.as_deref(), out);
            }
        }
        let mut out = Vec::new();
        walk(self.root(), &mut out);
        out
    }

    /// Number of levels (0 for the empty tree)
    pub fn height(&self) -> usize {
        fn depth(node: Option<&Node>) -> usize {
            match node {
                Some(node) => 1 + depth(node.left.as_deref()).max(depth(node.right.as_deref())),
                None => 0,
            }
        }
        depth(self.root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree {
        // 1(2(_, 4), 3)
        let mut root = Node::new(1, Value::from(1));
        let mut two = Node::new(2, Value::from(2));
        two.right = Some(Box::new(Node::new(4, Value::from(4))));
        root.left = Some(Box::new(two));
        root.right = Some(Box::new(Node::new(3, Value::from(3))));
        Tree::with_root(root)
    }

    #[test]
    fn test_node_at_and_ids_along() {
        let tree = sample();
        let path = [Side::Left, Side::Right];
        assert_eq!(tree.node_at(&path).map(|n| n.id), Some(4));
        assert_eq!(tree.ids_along(&path), vec![1, 2, 4]);
        assert!(tree.node_at(&[Side::Right, Side::Left]).is_none());
    }

    #[test]
    fn test_slot_mut_replaces_subtree() {
        let mut tree = sample();
        let slot = tree.slot_mut(&[Side::Left]).unwrap();
        *slot = None;
        assert_eq!(tree.len(), 2);
        assert!(tree.slot_mut(&[Side::Left, Side::Left]).is_none());
    }

    #[test]
    fn test_breadth_first_order() {
        let tree = sample();
        let ids: Vec<NodeId> = tree.breadth_first().iter().map(|(_, n)| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = sample();
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.node_at_mut(&[Side::Right]).unwrap().value = Value::from(99);
        assert_eq!(original.node_at(&[Side::Right]).unwrap().value, Value::from(3));
        assert_eq!(copy.node_at(&[Side::Right]).unwrap().id, 3);
    }

    #[test]
    fn test_inorder_and_height() {
        let tree = sample();
        let values: Vec<String> = tree.inorder_values().iter().map(|v| v.to_string()).collect();
        assert_eq!(values, vec!["2", "4", "1", "3"]);
        assert_eq!(tree.height(), 3);
        assert_eq!(Tree::new().height(), 0);
    }
}
