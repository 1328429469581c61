// Integration tests for the tree engine

use treetrace::action::command::parse_script;
use treetrace::action::{Action, TreeType};
use treetrace::engine::ops::traversal::TraversalOrder;
use treetrace::engine::Session;
use treetrace::snapshot::{HighlightKind, Snapshot, SnapshotHistory};
use treetrace::tree::serial::rebuild;
use treetrace::tree::value::Value;
use treetrace::tree::Tree;

/// Session plus the committed tree, the way the viewer and headless mode drive it
struct Driver {
    session: Session,
    committed: Option<Tree>,
}

impl Driver {
    fn new() -> Self {
        Driver {
            session: Session::new(),
            committed: None,
        }
    }

    fn run(&mut self, action: Action) -> Vec<Snapshot> {
        let snapshots: Vec<Snapshot> = self
            .session
            .dispatch(self.committed.as_ref(), action)
            .collect();
        let last = snapshots.last().expect("every action ends with a terminal snapshot");
        self.committed = Some(last.tree.clone());
        snapshots
    }
}

fn num(n: i64) -> Option<Value> {
    Some(Value::from(n))
}

fn insert(n: i64, tree_type: TreeType) -> Action {
    Action::Insert {
        value: num(n),
        tree_type,
    }
}

fn values_of_path(snapshot: &Snapshot) -> Vec<String> {
    snapshot
        .highlight
        .path
        .iter()
        .map(|id| snapshot.nodes_by_id[id].value.to_string())
        .collect()
}

fn inorder(tree: &Tree) -> Vec<String> {
    tree.inorder_values().iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_build_then_inorder_traversal() {
    let mut driver = Driver::new();
    driver.run(Action::BuildTree {
        list: vec![num(1), num(2), num(3), None, num(4)],
    });

    let snapshots = driver.run(Action::Traverse {
        order: TraversalOrder::Inorder,
    });
    let visited: Vec<String> = snapshots
        .iter()
        .filter(|s| s.kind() == HighlightKind::Traverse)
        .map(|s| {
            let id = s.highlight.id.expect("traverse steps name their node");
            s.nodes_by_id[&id].value.to_string()
        })
        .collect();
    assert_eq!(visited, vec!["2", "4", "1", "3"]);

    let terminal = snapshots.last().unwrap();
    assert!(terminal.done);
    assert_eq!(terminal.kind(), HighlightKind::Done);
}

#[test]
fn test_bst_inserts_then_search() {
    let mut driver = Driver::new();
    for n in [10, 5, 15] {
        driver.run(insert(n, TreeType::Bst));
    }

    let tree = driver.committed.clone().unwrap();
    let root = tree.root().unwrap();
    assert_eq!(root.value, Value::from(10));
    assert_eq!(root.left.as_ref().unwrap().value, Value::from(5));
    assert_eq!(root.right.as_ref().unwrap().value, Value::from(15));

    let snapshots = driver.run(Action::Search {
        value: num(5),
        tree_type: TreeType::Bst,
    });
    let terminal = snapshots.last().unwrap();
    assert_eq!(terminal.kind(), HighlightKind::Found);
    assert!(terminal.done);
    assert_eq!(values_of_path(terminal), vec!["10", "5"]);
    // Found is never repeated as a separate step
    assert_eq!(
        snapshots
            .iter()
            .filter(|s| s.kind() == HighlightKind::Found)
            .count(),
        1
    );
}

#[test]
fn test_bst_delete_root_with_two_children() {
    let mut driver = Driver::new();
    for n in [10, 5, 15] {
        driver.run(insert(n, TreeType::Bst));
    }
    let root_id = driver.committed.as_ref().unwrap().root().unwrap().id;

    let snapshots = driver.run(Action::Delete {
        value: num(10),
        tree_type: TreeType::Bst,
    });
    let tree = &snapshots.last().unwrap().tree;
    assert_eq!(inorder(tree), vec!["5", "15"]);
    assert_eq!(tree.root().unwrap().value, Value::from(15));
    // The root keeps its identity, only its value changes
    assert_eq!(tree.root().unwrap().id, root_id);
    assert!(snapshots.iter().any(|s| s.kind() == HighlightKind::Delete));
}

#[test]
fn test_bst_with_mixed_numbers_and_text() {
    let mut driver = Driver::new();
    for item in ["10", "9", "1a"] {
        driver.run(Action::Insert {
            value: Some(Value::parse(item)),
            tree_type: TreeType::Bst,
        });
    }

    // 9 < 10 numerically, while "1a" sorts after "10" as text
    let tree = driver.committed.clone().unwrap();
    let root = tree.root().unwrap();
    assert_eq!(root.value, Value::from(10));
    assert_eq!(root.left.as_ref().unwrap().value, Value::from(9));
    assert_eq!(root.right.as_ref().unwrap().value, Value::parse("1a"));
    assert_eq!(inorder(&tree), vec!["9", "10", "1a"]);

    for item in ["10", "9", "1a"] {
        let snapshots = driver.run(Action::Search {
            value: Some(Value::parse(item)),
            tree_type: TreeType::Bst,
        });
        assert_eq!(snapshots.last().unwrap().kind(), HighlightKind::Found, "{}", item);
    }

    // A second "1a" walks the same path and is rejected
    let snapshots = driver.run(Action::Insert {
        value: Some(Value::parse("1a")),
        tree_type: TreeType::Bst,
    });
    assert_eq!(snapshots.last().unwrap().tree.len(), 3);

    let snapshots = driver.run(Action::Delete {
        value: Some(Value::parse("1a")),
        tree_type: TreeType::Bst,
    });
    assert_eq!(snapshots.last().unwrap().kind(), HighlightKind::Done);
    assert_eq!(inorder(&snapshots.last().unwrap().tree), vec!["9", "10"]);
}

#[test]
fn test_search_on_empty_tree_is_single_error() {
    let mut driver = Driver::new();
    let snapshots = driver.run(Action::Search {
        value: num(99),
        tree_type: TreeType::Bst,
    });
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].kind(), HighlightKind::Error);
    assert_eq!(snapshots[0].message.as_deref(), Some("Tree empty"));
    assert!(snapshots[0].done);
}

#[test]
fn test_previous_tree_is_never_mutated() {
    let mut driver = Driver::new();
    driver.run(Action::BuildTree {
        list: vec![num(4), num(2), num(6)],
    });
    let before = driver.committed.clone().unwrap();

    let snapshots: Vec<Snapshot> = driver
        .session
        .dispatch(
            driver.committed.as_ref(),
            Action::Delete {
                value: num(4),
                tree_type: TreeType::Binary,
            },
        )
        .collect();

    assert_eq!(driver.committed.as_ref().unwrap(), &before);
    assert_ne!(snapshots.last().unwrap().tree, before);
}

#[test]
fn test_snapshots_are_independent_copies() {
    let mut driver = Driver::new();
    driver.run(Action::BuildTree {
        list: vec![num(1), num(2), num(3)],
    });
    let snapshots = driver.run(insert(4, TreeType::Binary));

    // Earlier steps still show the tree without the new node
    let first = snapshots.first().unwrap();
    let last = snapshots.last().unwrap();
    assert_eq!(first.tree.len(), 3);
    assert_eq!(last.tree.len(), 4);
}

#[test]
fn test_binary_delete_moves_deepest_value() {
    let mut driver = Driver::new();
    driver.run(Action::BuildTree {
        list: vec![num(1), num(2), num(3), num(4), num(5)],
    });

    let snapshots = driver.run(Action::Delete {
        value: num(2),
        tree_type: TreeType::Binary,
    });
    let tree = &snapshots.last().unwrap().tree;
    assert_eq!(tree.len(), 4);

    let mut values = inorder(tree);
    values.sort();
    assert_eq!(values, vec!["1", "3", "4", "5"]);
    // 5 was the last node in breadth-first order; it now sits where 2 was
    assert_eq!(tree.root().unwrap().left.as_ref().unwrap().value, Value::from(5));
}

#[test]
fn test_delete_missing_value_is_error() {
    let mut driver = Driver::new();
    driver.run(Action::named_demo("bst").unwrap());
    let snapshots = driver.run(Action::Delete {
        value: num(99),
        tree_type: TreeType::Bst,
    });
    let terminal = snapshots.last().unwrap();
    assert_eq!(terminal.kind(), HighlightKind::Error);
    assert_eq!(terminal.tree.len(), 7);
}

#[test]
fn test_ids_are_stable_and_unique() {
    let mut driver = Driver::new();
    let built = driver.run(Action::BuildTree {
        list: vec![num(8), num(3), num(10)],
    });
    let ids_during_build: Vec<u64> = built
        .iter()
        .filter_map(|s| s.highlight.id)
        .collect();
    let final_ids: Vec<u64> = {
        let mut ids: Vec<u64> = built.last().unwrap().nodes_by_id.keys().copied().collect();
        ids.sort();
        ids
    };
    // Each build step names the node it created, and the ids survive to the end
    for id in &ids_during_build {
        assert!(final_ids.contains(id));
    }

    let inserted = driver.run(insert(1, TreeType::Bst));
    let tree = &inserted.last().unwrap().tree;
    let mut ids: Vec<u64> = inserted.last().unwrap().nodes_by_id.keys().copied().collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), tree.len());
    for id in &final_ids {
        assert!(ids.contains(id));
    }
}

#[test]
fn test_flat_records_rebuild_the_tree() {
    let mut driver = Driver::new();
    let snapshots = driver.run(Action::named_demo("sparse").unwrap());
    let terminal = snapshots.last().unwrap();

    let root = terminal.tree.root().map(|n| n.id);
    let rebuilt = rebuild(root, &terminal.nodes_by_id).unwrap();
    assert_eq!(rebuilt, terminal.tree);
}

#[test]
fn test_script_replay_into_history() {
    let script = r#"
        # a small session
        build 50 30 70
        insert 20 bst
        {"type": "search", "value": 20, "treeType": "bst"}
        traverse pre
        clear
    "#;
    let actions = parse_script(script, TreeType::Bst).unwrap();
    assert_eq!(actions.len(), 5);

    let mut session = Session::new();
    let mut history = SnapshotHistory::new(usize::MAX);
    for action in actions {
        let snapshots: Vec<Snapshot> = session.dispatch(history.committed_tree(), action).collect();
        history.push_action(snapshots).unwrap();
    }

    let terminals = history.snapshots().iter().filter(|s| s.done).count();
    assert_eq!(terminals, 5);
    assert!(history.committed_tree().unwrap().is_empty());

    // Every action range ends with its terminal
    let mut index = 0;
    while index < history.len() {
        let range = history.action_range(index);
        assert!(history.get(range.end - 1).unwrap().done);
        index = range.end;
    }
}

#[test]
fn test_snapshot_json_shape() {
    let mut driver = Driver::new();
    let snapshots = driver.run(insert(7, TreeType::Bst));
    let json = serde_json::to_value(snapshots.last().unwrap()).unwrap();

    assert_eq!(json["done"], true);
    assert_eq!(json["highlight"]["type"], "done");
    assert_eq!(json["tree"]["value"], 7.0);
    let id = json["tree"]["id"].as_u64().unwrap();
    assert_eq!(json["nodesById"][id.to_string()]["value"], 7.0);
}
