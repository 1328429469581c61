//! Error types
//!
//! The engine itself never fails: a bad action ends in an `error` snapshot
//! rather than an `Err`. The types here cover everything around it:
//! - [`CommandError`]: a text command that could not be turned into an action
//! - [`ScriptError`]: reading or decoding an action script
//! - [`HistoryError`]: snapshot history budget and cursor movement
//! - [`RebuildError`]: a `nodesById` map that does not describe a tree

use crate::tree::ids::NodeId;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from parsing a text command
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{name}'")]
    UnknownCommand { name: String },

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("unexpected argument '{given}' for '{command}'")]
    UnexpectedArgument { command: &'static str, given: String },

    #[error("unknown tree type '{given}' (expected 'binary' or 'bst')")]
    InvalidTreeType { given: String },

    #[error("unknown traversal order '{given}' (expected in, pre, post or level)")]
    InvalidOrder { given: String },

    #[error("unknown demo '{name}'")]
    UnknownDemo { name: String },
}

/// Errors from loading an action script
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: invalid action record: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: {source}")]
    Command {
        line: usize,
        #[source]
        source: CommandError,
    },

    #[error("--demo: {0}")]
    Demo(#[source] CommandError),
}

/// Errors from the snapshot history
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("snapshot memory limit exceeded: {current} + {requested} > {limit}")]
    LimitExceeded {
        current: usize,
        requested: usize,
        limit: usize,
    },

    #[error("no snapshots available")]
    NoSnapshots,

    #[error("already at the first snapshot")]
    AtStart,

    #[error("no more snapshots available")]
    AtEnd,
}

/// Errors from rebuilding a tree out of flat records
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RebuildError {
    #[error("node {id} is referenced but has no record")]
    MissingNode { id: NodeId },

    #[error("node {id} is reachable more than once")]
    RepeatedNode { id: NodeId },
}
