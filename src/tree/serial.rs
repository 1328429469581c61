//! Flat `nodesById` records for transport to a renderer
//!
//! [`flatten`] turns a tree into a map from node id to a [`FlatRecord`] holding
//! the value and the ids of both children. [`rebuild`] goes the other way,
//! breadth-first from a root id, and rejects maps that are missing a referenced
//! id or that reach the same id twice.

use super::ids::NodeId;
use super::value::Value;
use super::{Node, Path, Side, Tree};
use crate::errors::RebuildError;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One node without its subtrees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRecord {
    pub value: Value,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl FlatRecord {
    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Node id -> flat record
pub type NodesById = FxHashMap<NodeId, FlatRecord>;

/// Flatten a tree into `nodesById`
pub fn flatten(tree: &Tree) -> NodesById {
    let mut records = NodesById::default();
    for (_, node) in tree.breadth_first() {
        records.insert(
            node.id,
            FlatRecord {
                value: node.value.clone(),
                left: node.left.as_ref().map(|n| n.id),
                right: node.right.as_ref().map(|n| n.id),
            },
        );
    }
    records
}

/// Rebuild a tree from `nodesById`, starting at `root`
pub fn rebuild(root: Option<NodeId>, records: &NodesById) -> Result<Tree, RebuildError> {
    let mut tree = Tree::new();
    let root = match root {
        Some(id) => id,
        None => return Ok(tree),
    };

    let mut seen = FxHashSet::default();
    let mut queue: VecDeque<(NodeId, Path)> = VecDeque::new();
    queue.push_back((root, Path::new()));

    while let Some((id, path)) = queue.pop_front() {
        if !seen.insert(id) {
            return Err(RebuildError::RepeatedNode { id });
        }
        let record = records
            .get(&id)
            .ok_or(RebuildError::MissingNode { id })?;

        let slot = tree
            .slot_mut(&path)
            .ok_or(RebuildError::MissingNode { id })?;
        *slot = Some(Box::new(Node::new(id, record.value.clone())));

        for side in [Side::Left, Side::Right] {
            if let Some(child) = record.child(side) {
                let mut child_path = path.clone();
                child_path.push(side);
                queue.push_back((child, child_path));
            }
        }
    }

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::builder::build_level_order;
    use crate::tree::ids::IdAllocator;

    fn items(values: &[Option<i64>]) -> Vec<Option<Value>> {
        values.iter().map(|v| v.map(Value::from)).collect()
    }

    #[test]
    fn test_flatten_records_children() {
        let mut ids = IdAllocator::new();
        let tree = build_level_order(&items(&[Some(1), Some(2), Some(3), None, Some(4)]), &mut ids);
        let records = flatten(&tree);

        assert_eq!(records.len(), 4);
        let root = &records[&1];
        assert_eq!(root.value, Value::from(1));
        assert_eq!(root.left, Some(2));
        assert_eq!(root.right, Some(3));
        assert_eq!(records[&2].left, None);
        assert_eq!(records[&2].right, Some(4));
    }

    #[test]
    fn test_rebuild_round_trip() {
        let mut ids = IdAllocator::new();
        let tree = build_level_order(
            &items(&[Some(5), Some(3), Some(8), Some(1), None, Some(7), Some(9)]),
            &mut ids,
        );
        let records = flatten(&tree);
        let rebuilt = rebuild(tree.root().map(|n| n.id), &records).unwrap();
        assert_eq!(rebuilt, tree);
    }

    #[test]
    fn test_rebuild_empty() {
        let rebuilt = rebuild(None, &NodesById::default()).unwrap();
        assert!(rebuilt.is_empty());
    }

    #[test]
    fn test_rebuild_rejects_missing_and_cycles() {
        let mut records = NodesById::default();
        records.insert(
            1,
            FlatRecord {
                value: Value::from(1),
                left: Some(2),
                right: None,
            },
        );
        assert!(matches!(
            rebuild(Some(1), &records),
            Err(RebuildError::MissingNode { id: 2 })
        ));

        records.insert(
            2,
            FlatRecord {
                value: Value::from(2),
                left: Some(1),
                right: None,
            },
        );
        assert!(matches!(
            rebuild(Some(1), &records),
            Err(RebuildError::RepeatedNode { id: 1 })
        ));
    }
}
