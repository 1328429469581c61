//! Text commands and action scripts
//!
//! The command prompt and script files accept one action per line:
//!
//! ```text
//! build 1 2 3 null 4        # level order, null / _ / -1 = no node
//! demo bst                  # named demo, or an explicit list
//! insert 10 bst             # tree type defaults to the current setting
//! search 5
//! delete 10 bst
//! traverse inorder          # in, pre, post, level also accepted
//! clear
//! ```
//!
//! Script lines that start with `{` are decoded as JSON action records instead.

use super::{Action, TreeType};
use crate::engine::ops::traversal::TraversalOrder;
use crate::errors::{CommandError, ScriptError};
use crate::tree::value::Value;
use std::fs;
use std::path::Path;

/// Split a command line into words; commas and brackets separate like spaces
fn tokenize(line: &str) -> Vec<&str> {
    line.split(|c: char| c.is_whitespace() || matches!(c, ',' | '[' | ']'))
        .filter(|word| !word.is_empty())
        .collect()
}

fn parse_item(word: &str) -> Option<Value> {
    match word.to_ascii_lowercase().as_str() {
        "null" | "none" | "_" | "-1" => None,
        _ => Some(Value::parse(word)),
    }
}

pub fn parse_tree_type(word: &str) -> Result<TreeType, CommandError> {
    match word.to_ascii_lowercase().as_str() {
        "binary" | "bt" => Ok(TreeType::Binary),
        "bst" => Ok(TreeType::Bst),
        _ => Err(CommandError::InvalidTreeType {
            given: word.to_string(),
        }),
    }
}

fn parse_order(word: &str) -> Result<TraversalOrder, CommandError> {
    match word.to_ascii_lowercase().as_str() {
        "inorder" | "in" => Ok(TraversalOrder::Inorder),
        "preorder" | "pre" => Ok(TraversalOrder::Preorder),
        "postorder" | "post" => Ok(TraversalOrder::Postorder),
        "levelorder" | "level" | "bfs" => Ok(TraversalOrder::Levelorder),
        _ => Err(CommandError::InvalidOrder {
            given: word.to_string(),
        }),
    }
}

/// Parse `<value> [tree type]` for insert/search/delete
fn parse_operand(
    command: &'static str,
    args: &[&str],
    default_tree_type: TreeType,
) -> Result<(Option<Value>, TreeType), CommandError> {
    let value = args.first().ok_or(CommandError::MissingArgument {
        command,
        argument: "a value",
    })?;
    let tree_type = match args.get(1) {
        Some(word) => parse_tree_type(word)?,
        None => default_tree_type,
    };
    if let Some(extra) = args.get(2) {
        return Err(CommandError::UnexpectedArgument {
            command,
            given: extra.to_string(),
        });
    }
    Ok((Some(Value::parse(value)), tree_type))
}

/// Parse one text command
pub fn parse_command(line: &str, default_tree_type: TreeType) -> Result<Action, CommandError> {
    let words = tokenize(line);
    let (name, args) = match words.split_first() {
        Some((name, args)) => (name.to_ascii_lowercase(), args),
        None => return Err(CommandError::Empty),
    };

    match name.as_str() {
        "build" | "buildtree" => {
            if args.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "build",
                    argument: "a list of values",
                });
            }
            Ok(Action::BuildTree {
                list: args.iter().map(|w| parse_item(w)).collect(),
            })
        }
        "demo" | "loaddemo" => match args {
            [] => Err(CommandError::MissingArgument {
                command: "demo",
                argument: "a demo name or a list of values",
            }),
            [name] if name.chars().any(|c| c.is_ascii_alphabetic()) => Action::named_demo(name)
                .ok_or_else(|| CommandError::UnknownDemo {
                    name: name.to_string(),
                }),
            _ => Ok(Action::LoadDemo {
                demo: args.iter().map(|w| parse_item(w)).collect(),
            }),
        },
        "insert" | "add" => {
            let (value, tree_type) = parse_operand("insert", args, default_tree_type)?;
            Ok(Action::Insert { value, tree_type })
        }
        "search" | "find" => {
            let (value, tree_type) = parse_operand("search", args, default_tree_type)?;
            Ok(Action::Search { value, tree_type })
        }
        "delete" | "remove" | "del" => {
            let (value, tree_type) = parse_operand("delete", args, default_tree_type)?;
            Ok(Action::Delete { value, tree_type })
        }
        "traverse" => {
            let order = match args.first() {
                Some(word) => parse_order(word)?,
                None => TraversalOrder::default(),
            };
            Ok(Action::Traverse { order })
        }
        "clear" => Ok(Action::Clear),
        _ => Err(CommandError::UnknownCommand { name }),
    }
}

/// Parse a whole script; `#` starts a comment, blank lines are skipped
pub fn parse_script(source: &str, default_tree_type: TreeType) -> Result<Vec<Action>, ScriptError> {
    let mut actions = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line_number = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let action = if line.starts_with('{') {
            serde_json::from_str(line).map_err(|source| ScriptError::Json {
                line: line_number,
                source,
            })?
        } else {
            // Trailing comments are only stripped from text commands
            let command = line.split('#').next().unwrap_or(line);
            parse_command(command, default_tree_type).map_err(|source| ScriptError::Command {
                line: line_number,
                source,
            })?
        };
        actions.push(action);
    }
    Ok(actions)
}

/// Read and parse a script file
pub fn load_script(path: &Path, default_tree_type: TreeType) -> Result<Vec<Action>, ScriptError> {
    let source = fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&source, default_tree_type)
}
