//! Binary search tree operations
//!
//! Ordering follows [`compare_values`]: smaller values go left, larger go right,
//! and equal values are never stored twice.

use super::{DeleteOutcome, InsertOutcome, SearchOutcome};
use crate::snapshot::recorder::StepRecorder;
use crate::snapshot::{Highlight, HighlightKind};
use crate::tree::ids::IdAllocator;
use crate::tree::value::{compare_values, Value};
use crate::tree::{Node, Path, Side, Tree};
use std::cmp::Ordering;

fn side_for(ordering: Ordering) -> Side {
    if ordering == Ordering::Less {
        Side::Left
    } else {
        Side::Right
    }
}

/// Ordered insert
pub fn insert(
    tree: &mut Tree,
    value: Value,
    ids: &mut IdAllocator,
    recorder: &mut impl StepRecorder,
) -> InsertOutcome {
    let mut path = Path::new();
    let mut visited = Vec::new();
    let mut current = tree.root();

    while let Some(node) = current {
        visited.push(node.id);
        let ordering = compare_values(&value, &node.value);
        recorder.record(
            tree,
            Highlight::new(
                HighlightKind::Compare,
                format!("Compare {} with {}", value, node.value),
            )
            .with_node(node.id)
            .with_path(visited.clone()),
        );

        if ordering == Ordering::Equal {
            recorder.record(
                tree,
                Highlight::new(
                    HighlightKind::Duplicate,
                    format!("{} is already in the tree, ignored", value),
                )
                .with_node(node.id)
                .with_path(visited),
            );
            return InsertOutcome::Duplicate { id: node.id };
        }

        let side = side_for(ordering);
        path.push(side);
        current = node.child(side);
    }

    let id = ids.next_id();
    let message = format!("Inserted {}", value);
    if let Some(slot) = tree.slot_mut(&path) {
        *slot = Some(Box::new(Node::new(id, value)));
    }

    // `visited` is empty only when the tree was empty
    let parent = match visited.last() {
        Some(&parent) => parent,
        None => return InsertOutcome::Root { id },
    };
    visited.push(id);
    recorder.record(
        tree,
        Highlight::new(HighlightKind::Insert, message)
            .with_node(id)
            .with_path(visited),
    );
    InsertOutcome::Child { id, parent }
}

/// Ordered search
pub fn search(tree: &Tree, value: &Value, recorder: &mut impl StepRecorder) -> SearchOutcome {
    let mut visited = Vec::new();
    let mut current = tree.root();

    while let Some(node) = current {
        visited.push(node.id);
        let ordering = compare_values(value, &node.value);
        recorder.record(
            tree,
            Highlight::new(
                HighlightKind::Compare,
                format!("Compare {} with {}", value, node.value),
            )
            .with_node(node.id)
            .with_path(visited.clone()),
        );

        if ordering == Ordering::Equal {
            recorder.record(
                tree,
                Highlight::new(HighlightKind::Found, format!("Found {}", value))
                    .with_node(node.id)
                    .with_path(visited.clone()),
            );
            return SearchOutcome {
                found: Some(node.id),
                path: visited,
            };
        }
        current = node.child(side_for(ordering));
    }

    recorder.record(
        tree,
        Highlight::new(HighlightKind::NotFound, format!("{} not found", value))
            .with_path(visited.clone()),
    );
    SearchOutcome {
        found: None,
        path: visited,
    }
}

/// Delete by value.
///
/// A target with at most one child is spliced out. A target with two children
/// takes the value of its in-order successor, which is then spliced out of the
/// right subtree; the target keeps its id.
pub fn delete(tree: &mut Tree, value: &Value, recorder: &mut impl StepRecorder) -> DeleteOutcome {
    let mut path = Path::new();
    let mut visited = Vec::new();
    let mut current = tree.root();

    let (target, children) = loop {
        let node = match current {
            Some(node) => node,
            None => {
                recorder.record(
                    tree,
                    Highlight::new(HighlightKind::Error, format!("{} not found", value))
                        .with_path(visited),
                );
                return DeleteOutcome::NotFound;
            }
        };
        visited.push(node.id);
        let ordering = compare_values(value, &node.value);
        recorder.record(
            tree,
            Highlight::new(
                HighlightKind::Compare,
                format!("Compare {} with {}", value, node.value),
            )
            .with_node(node.id)
            .with_path(visited.clone()),
        );

        if ordering == Ordering::Equal {
            recorder.record(
                tree,
                Highlight::new(HighlightKind::Delete, format!("Deleting {}", node.value))
                    .with_node(node.id)
                    .with_path(visited.clone()),
            );
            break (node.id, node.child_count());
        }
        let side = side_for(ordering);
        path.push(side);
        current = node.child(side);
    };

    if children < 2 {
        if let Some(slot) = tree.slot_mut(&path) {
            if let Some(node) = slot.take() {
                let Node { left, right, .. } = *node;
                *slot = left.or(right);
            }
        }
        return DeleteOutcome::Removed { id: target };
    }

    // In-order successor: leftmost node of the right subtree
    let mut successor_path = path.clone();
    successor_path.push(Side::Right);
    let mut trail = visited.clone();
    while let Some(node) = tree.node_at(&successor_path) {
        trail.push(node.id);
        recorder.record(
            tree,
            Highlight::new(
                HighlightKind::Compare,
                format!("Looking for the in-order successor: {}", node.value),
            )
            .with_node(node.id)
            .with_path(trail.clone()),
        );
        if node.left.is_none() {
            break;
        }
        successor_path.push(Side::Left);
    }

    // The successor has no left child, so its right child takes its slot
    let successor = tree.slot_mut(&successor_path).and_then(|slot| {
        let node = slot.take()?;
        let Node {
            id, value, right, ..
        } = *node;
        *slot = right;
        Some((id, value))
    });
    let (donor, new) = match successor {
        Some(successor) => successor,
        None => return DeleteOutcome::Removed { id: target },
    };

    let old = match tree.node_at_mut(&path) {
        Some(node) => std::mem::replace(&mut node.value, new.clone()),
        None => value.clone(),
    };
    recorder.record(
        tree,
        Highlight::new(
            HighlightKind::Done,
            format!("Replaced {} with its in-order successor {}", old, new),
        )
        .with_node(target)
        .with_path(visited),
    );

    DeleteOutcome::Replaced {
        id: target,
        donor,
        old,
        new,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::recorder::StepBuffer;

    fn bst(values: &[i64], ids: &mut IdAllocator) -> Tree {
        let mut tree = Tree::new();
        let mut buffer = StepBuffer::new();
        for v in values {
            insert(&mut tree, Value::from(*v), ids, &mut buffer);
        }
        tree
    }

    fn inorder(tree: &Tree) -> Vec<String> {
        tree.inorder_values().iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_insert_orders_values() {
        let mut ids = IdAllocator::new();
        let tree = bst(&[50, 30, 70, 20, 40, 60, 80], &mut ids);
        assert_eq!(inorder(&tree), vec!["20", "30", "40", "50", "60", "70", "80"]);
        assert_eq!(tree.node_at(&[Side::Left, Side::Right]).unwrap().value, Value::from(40));
    }

    #[test]
    fn test_insert_into_empty_records_nothing() {
        let mut ids = IdAllocator::new();
        let mut tree = Tree::new();
        let mut buffer = StepBuffer::new();
        let outcome = insert(&mut tree, Value::from(10), &mut ids, &mut buffer);
        assert_eq!(outcome, InsertOutcome::Root { id: 1 });
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_insert_duplicate_is_ignored() {
        let mut ids = IdAllocator::new();
        let mut tree = bst(&[10, 5], &mut ids);
        let mut buffer = StepBuffer::new();
        let outcome = insert(&mut tree, Value::from(5), &mut ids, &mut buffer);

        assert_eq!(outcome, InsertOutcome::Duplicate { id: 2 });
        assert_eq!(tree.len(), 2);
        assert_eq!(
            buffer.kinds(),
            vec![
                HighlightKind::Compare,
                HighlightKind::Compare,
                HighlightKind::Duplicate
            ]
        );
    }

    #[test]
    fn test_negative_zero_is_duplicate_of_zero() {
        let mut ids = IdAllocator::new();
        let mut tree = bst(&[0], &mut ids);
        let mut buffer = StepBuffer::new();

        let outcome = insert(&mut tree, Value::Number(-0.0), &mut ids, &mut buffer);
        assert_eq!(outcome, InsertOutcome::Duplicate { id: 1 });
        let outcome = insert(&mut tree, Value::parse("-0"), &mut ids, &mut buffer);
        assert_eq!(outcome, InsertOutcome::Duplicate { id: 1 });
        assert_eq!(tree.len(), 1);

        let outcome = search(&tree, &Value::Number(-0.0), &mut StepBuffer::new());
        assert_eq!(outcome.found, Some(1));
    }

    #[test]
    fn test_search_records_path() {
        let mut ids = IdAllocator::new();
        let tree = bst(&[10, 5, 15, 7], &mut ids);
        let mut buffer = StepBuffer::new();
        let outcome = search(&tree, &Value::from(7), &mut buffer);
        assert_eq!(outcome.found, Some(4));
        assert_eq!(outcome.path, vec![1, 2, 4]);
        assert_eq!(buffer.last_kind(), Some(HighlightKind::Found));

        let mut buffer = StepBuffer::new();
        let outcome = search(&tree, &Value::from(12), &mut buffer);
        assert_eq!(outcome.found, None);
        assert_eq!(outcome.path, vec![1, 3]);
        assert_eq!(buffer.last_kind(), Some(HighlightKind::NotFound));
    }

    #[test]
    fn test_delete_leaf_and_single_child() {
        let mut ids = IdAllocator::new();
        let mut tree = bst(&[10, 5, 15, 20], &mut ids);
        let mut buffer = StepBuffer::new();

        assert_eq!(
            delete(&mut tree, &Value::from(5), &mut buffer),
            DeleteOutcome::Removed { id: 2 }
        );
        assert_eq!(
            delete(&mut tree, &Value::from(15), &mut buffer),
            DeleteOutcome::Removed { id: 3 }
        );
        assert_eq!(inorder(&tree), vec!["10", "20"]);
        assert_eq!(tree.node_at(&[Side::Right]).unwrap().id, 4);
    }

    #[test]
    fn test_delete_root_with_one_child() {
        let mut ids = IdAllocator::new();
        let mut tree = bst(&[10, 5], &mut ids);
        let mut buffer = StepBuffer::new();
        delete(&mut tree, &Value::from(10), &mut buffer);
        assert_eq!(tree.root().unwrap().id, 2);
    }

    #[test]
    fn test_delete_two_children_uses_successor() {
        let mut ids = IdAllocator::new();
        let mut tree = bst(&[50, 30, 70, 60, 80, 65], &mut ids);
        let mut buffer = StepBuffer::new();
        let outcome = delete(&mut tree, &Value::from(50), &mut buffer);

        assert_eq!(
            outcome,
            DeleteOutcome::Replaced {
                id: 1,
                donor: 4,
                old: Value::from(50),
                new: Value::from(60),
            }
        );
        assert_eq!(inorder(&tree), vec!["30", "60", "65", "70", "80"]);
        // The successor's right child moved up into its slot
        assert_eq!(tree.node_at(&[Side::Right, Side::Left]).unwrap().id, 6);
        assert_eq!(buffer.last_kind(), Some(HighlightKind::Done));
    }

    #[test]
    fn test_delete_missing() {
        let mut ids = IdAllocator::new();
        let mut tree = bst(&[10], &mut ids);
        let before = tree.clone();
        let mut buffer = StepBuffer::new();
        assert_eq!(
            delete(&mut tree, &Value::from(3), &mut buffer),
            DeleteOutcome::NotFound
        );
        assert_eq!(tree, before);
        assert_eq!(buffer.last_kind(), Some(HighlightKind::Error));
    }
}
