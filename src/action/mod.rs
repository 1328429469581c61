//! Action protocol
//!
//! An [`Action`] describes one logical operation on the tree. Actions arrive
//! either as JSON records (`{"type": "insert", "value": 10, "treeType": "bst"}`)
//! or as text commands parsed by [`command`]. Unknown `type` tags decode to
//! [`Action::Noop`].

pub mod command;

use crate::engine::constants::DEMOS;
use crate::engine::ops::traversal::TraversalOrder;
use crate::tree::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which algorithms insert/search/delete use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeType {
    /// Unordered, breadth-first semantics
    #[default]
    Binary,
    /// Ordered binary search tree
    Bst,
}

impl TreeType {
    pub fn name(self) -> &'static str {
        match self {
            TreeType::Binary => "binary",
            TreeType::Bst => "bst",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            TreeType::Binary => TreeType::Bst,
            TreeType::Bst => TreeType::Binary,
        }
    }
}

impl fmt::Display for TreeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One logical operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    BuildTree {
        #[serde(default)]
        list: Vec<Option<Value>>,
    },
    Insert {
        #[serde(default)]
        value: Option<Value>,
        #[serde(default, rename = "treeType")]
        tree_type: TreeType,
    },
    Search {
        #[serde(default)]
        value: Option<Value>,
        #[serde(default, rename = "treeType")]
        tree_type: TreeType,
    },
    Delete {
        #[serde(default)]
        value: Option<Value>,
        #[serde(default, rename = "treeType")]
        tree_type: TreeType,
    },
    Traverse {
        #[serde(default)]
        order: TraversalOrder,
    },
    Clear,
    LoadDemo {
        #[serde(default)]
        demo: Vec<Option<Value>>,
    },
    #[serde(other)]
    Noop,
}

impl Action {
    /// Look up a named demo layout
    pub fn named_demo(name: &str) -> Option<Action> {
        DEMOS
            .iter()
            .find(|(demo, _)| demo.eq_ignore_ascii_case(name))
            .map(|(_, items)| Action::LoadDemo {
                demo: items.iter().map(|item| item.map(Value::from)).collect(),
            })
    }

    /// Short name of the action kind
    pub fn kind(&self) -> &'static str {
        match self {
            Action::BuildTree { .. } => "buildTree",
            Action::Insert { .. } => "insert",
            Action::Search { .. } => "search",
            Action::Delete { .. } => "delete",
            Action::Traverse { .. } => "traverse",
            Action::Clear => "clear",
            Action::LoadDemo { .. } => "loadDemo",
            Action::Noop => "noop",
        }
    }
}

fn format_list(items: &[Option<Value>]) -> String {
    items
        .iter()
        .map(|item| match item {
            Some(value) => value.to_string(),
            None => "null".to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_operand(value: &Option<Value>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "<none>".to_string(),
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::BuildTree { list } => write!(f, "buildTree [{}]", format_list(list)),
            Action::LoadDemo { demo } => write!(f, "loadDemo [{}]", format_list(demo)),
            Action::Insert { value, tree_type }
            | Action::Search { value, tree_type }
            | Action::Delete { value, tree_type } => {
                write!(f, "{} {} ({})", self.kind(), format_operand(value), tree_type)
            }
            Action::Traverse { order } => write!(f, "traverse {}", order),
            Action::Clear | Action::Noop => f.write_str(self.kind()),
        }
    }
}
