//! Depth-first and breadth-first traversals

use crate::snapshot::recorder::StepRecorder;
use crate::snapshot::{Highlight, HighlightKind};
use crate::tree::value::Value;
use crate::tree::{Node, Tree};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Traversal strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalOrder {
    #[default]
    Inorder,
    Preorder,
    Postorder,
    Levelorder,
}

impl TraversalOrder {
    pub const ALL: [TraversalOrder; 4] = [
        TraversalOrder::Inorder,
        TraversalOrder::Preorder,
        TraversalOrder::Postorder,
        TraversalOrder::Levelorder,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TraversalOrder::Inorder => "inorder",
            TraversalOrder::Preorder => "preorder",
            TraversalOrder::Postorder => "postorder",
            TraversalOrder::Levelorder => "levelorder",
        }
    }
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn inorder<'a>(node: Option<&'a Node>, out: &mut Vec<&'a Node>) {
    if let Some(node) = node {
        inorder(node.left.as_deref(), out);
        out.push(node);
        inorder(node.right.as_deref(), out);
    }
}

fn preorder<'a>(node: Option<&'a Node>, out: &mut Vec<&'a Node>) {
    if let Some(node) = node {
        out.push(node);
        preorder(node.left.as_deref(), out);
        preorder(node.right.as_deref(), out);
    }
}

fn postorder<'a>(node: Option<&'a Node>, out: &mut Vec<&'a Node>) {
    if let Some(node) = node {
        postorder(node.left.as_deref(), out);
        postorder(node.right.as_deref(), out);
        out.push(node);
    }
}

/// Nodes in visiting order
pub fn visit_order(tree: &Tree, order: TraversalOrder) -> Vec<&Node> {
    let mut nodes = Vec::new();
    match order {
        TraversalOrder::Inorder => inorder(tree.root(), &mut nodes),
        TraversalOrder::Preorder => preorder(tree.root(), &mut nodes),
        TraversalOrder::Postorder => postorder(tree.root(), &mut nodes),
        TraversalOrder::Levelorder => {
            nodes = tree.breadth_first().into_iter().map(|(_, n)| n).collect();
        }
    }
    nodes
}

/// Traverse, recording one step per visited node; returns the visited values
pub fn traverse(
    tree: &Tree,
    order: TraversalOrder,
    recorder: &mut impl StepRecorder,
) -> Vec<Value> {
    let mut path = Vec::new();
    let mut values = Vec::new();
    for node in visit_order(tree, order) {
        path.push(node.id);
        values.push(node.value.clone());
        recorder.record(
            tree,
            Highlight::new(HighlightKind::Traverse, format!("Visit {}", node.value))
                .with_node(node.id)
                .with_path(path.clone()),
        );
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::recorder::StepBuffer;
    use crate::tree::builder::build_level_order;
    use crate::tree::ids::IdAllocator;

    fn sample() -> Tree {
        let items = vec![
            Some(Value::from(1)),
            Some(Value::from(2)),
            Some(Value::from(3)),
            None,
            Some(Value::from(4)),
        ];
        build_level_order(&items, &mut IdAllocator::new())
    }

    fn run(order: TraversalOrder) -> Vec<String> {
        let mut buffer = StepBuffer::new();
        traverse(&sample(), order, &mut buffer)
            .iter()
            .map(|v| v.to_string())
            .collect()
    }

    #[test]
    fn test_all_orders() {
        assert_eq!(run(TraversalOrder::Inorder), vec!["2", "4", "1", "3"]);
        assert_eq!(run(TraversalOrder::Preorder), vec!["1", "2", "4", "3"]);
        assert_eq!(run(TraversalOrder::Postorder), vec!["4", "2", "3", "1"]);
        assert_eq!(run(TraversalOrder::Levelorder), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_steps_accumulate_path() {
        let tree = sample();
        let mut buffer = StepBuffer::new();
        traverse(&tree, TraversalOrder::Preorder, &mut buffer);

        let paths: Vec<Vec<u64>> = buffer.iter().map(|s| s.highlight.path.clone()).collect();
        assert_eq!(paths, vec![vec![1], vec![1, 2], vec![1, 2, 4], vec![1, 2, 4, 3]]);
        assert!(buffer.iter().all(|s| s.highlight.kind == HighlightKind::Traverse));
    }

    #[test]
    fn test_empty_tree() {
        let mut buffer = StepBuffer::new();
        assert!(traverse(&Tree::new(), TraversalOrder::Inorder, &mut buffer).is_empty());
        assert!(buffer.is_empty());
    }
}
