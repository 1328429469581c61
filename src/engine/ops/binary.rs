//! Unordered binary tree operations
//!
//! Everything here works in breadth-first order, which keeps a tree grown by
//! [`insert`] in complete shape:
//! - insert fills the first free child slot
//! - search stops at the first equal value
//! - delete overwrites the target with the deepest node (the last one in
//!   breadth-first order) and unlinks that node

use super::{DeleteOutcome, InsertOutcome, SearchOutcome};
use crate::snapshot::recorder::StepRecorder;
use crate::snapshot::{Highlight, HighlightKind};
use crate::tree::ids::IdAllocator;
use crate::tree::value::{values_equal, Value};
use crate::tree::{Node, Side, Tree};

/// Level-order insert into the first vacancy
pub fn insert(
    tree: &mut Tree,
    value: Value,
    ids: &mut IdAllocator,
    recorder: &mut impl StepRecorder,
) -> InsertOutcome {
    if tree.is_empty() {
        let id = ids.next_id();
        *tree = Tree::with_root(Node::new(id, value));
        return InsertOutcome::Root { id };
    }

    // Breadth-first order ends at a leaf, so the scan always finds a free slot
    let order = tree.breadth_first();
    let stop = order
        .iter()
        .position(|(_, node)| node.child_count() < 2)
        .unwrap_or(order.len() - 1);

    let mut visited = Vec::new();
    for (_, node) in &order[..=stop] {
        visited.push(node.id);
        recorder.record(
            tree,
            Highlight::new(
                HighlightKind::Compare,
                format!("Checking {} for a vacancy", node.value),
            )
            .with_node(node.id)
            .with_path(visited.clone()),
        );
    }

    let (parent_path, parent_node) = &order[stop];
    let side = if parent_node.left.is_none() {
        Side::Left
    } else {
        Side::Right
    };
    let mut path = parent_path.clone();
    let parent = parent_node.id;
    let parent_value = parent_node.value.clone();
    path.push(side);
    let id = ids.next_id();
    let message = format!("Inserted {} as the {} child of {}", value, side, parent_value);
    if let Some(slot) = tree.slot_mut(&path) {
        *slot = Some(Box::new(Node::new(id, value)));
    }
    visited.push(id);
    recorder.record(
        tree,
        Highlight::new(HighlightKind::Insert, message)
            .with_node(id)
            .with_path(visited),
    );
    InsertOutcome::Child { id, parent }
}

/// Breadth-first search
pub fn search(tree: &Tree, value: &Value, recorder: &mut impl StepRecorder) -> SearchOutcome {
    let mut visited = Vec::new();
    for (_, node) in tree.breadth_first() {
        visited.push(node.id);
        recorder.record(
            tree,
            Highlight::new(
                HighlightKind::Compare,
                format!("Compare {} with {}", value, node.value),
            )
            .with_node(node.id)
            .with_path(visited.clone()),
        );
        if values_equal(value, &node.value) {
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

/// Delete by value using deepest-node replacement
pub fn delete(tree: &mut Tree, value: &Value, recorder: &mut impl StepRecorder) -> DeleteOutcome {
    let order = tree.breadth_first();

    let mut visited = Vec::new();
    let mut target = None;
    for (path, node) in &order {
        visited.push(node.id);
        recorder.record(
            tree,
            Highlight::new(
                HighlightKind::Compare,
                format!("Compare {} with {}", value, node.value),
            )
            .with_node(node.id)
            .with_path(visited.clone()),
        );
        if values_equal(value, &node.value) {
            target = Some((path.clone(), node.id));
            break;
        }
    }

    let (target_path, target_id) = match target {
        Some(target) => target,
        None => {
            recorder.record(
                tree,
                Highlight::new(HighlightKind::Error, format!("{} not found", value))
                    .with_path(visited),
            );
            return DeleteOutcome::NotFound;
        }
    };
    recorder.record(
        tree,
        Highlight::new(HighlightKind::Delete, format!("Deleting {}", value))
            .with_node(target_id)
            .with_path(visited.clone()),
    );

    // Deepest node: last in breadth-first order, always a leaf
    let all_ids: Vec<_> = order.iter().map(|(_, node)| node.id).collect();
    let (deepest_path, deepest_id, deepest_value) = match order.last() {
        Some((path, node)) => (path.clone(), node.id, node.value.clone()),
        None => return DeleteOutcome::NotFound,
    };
    recorder.record(
        tree,
        Highlight::new(
            HighlightKind::Compare,
            format!("Deepest node is {}", deepest_value),
        )
        .with_node(deepest_id)
        .with_path(all_ids),
    );

    if deepest_id == target_id {
        if let Some(slot) = tree.slot_mut(&deepest_path) {
            *slot = None;
        }
        recorder.record(
            tree,
            Highlight::new(
                HighlightKind::Done,
                format!("{} was the deepest node and was removed directly", value),
            )
            .with_path(visited),
        );
        return DeleteOutcome::Removed { id: target_id };
    }

    let old = match tree.node_at_mut(&target_path) {
        Some(node) => std::mem::replace(&mut node.value, deepest_value.clone()),
        None => value.clone(),
    };
    if let Some(slot) = tree.slot_mut(&deepest_path) {
        *slot = None;
    }
    recorder.record(
        tree,
        Highlight::new(
            HighlightKind::Done,
            format!(
                "Replaced {} with deepest node value {} and removed the deepest node",
                old, deepest_value
            ),
        )
        .with_node(target_id)
        .with_path(visited),
    );

    DeleteOutcome::Replaced {
        id: target_id,
        donor: deepest_id,
        old,
        new: deepest_value,
    }
}
