//! # Introduction
//!
//! treetrace runs binary tree and binary search tree operations one step at a
//! time. Every logical action (build, insert, search, delete, traverse) yields
//! an ordered sequence of immutable snapshots, each carrying a full copy of
//! the tree, a flat `nodesById` view, and a highlight describing the step.
//! The snapshot history is then navigated forward and backward through a
//! terminal UI built with [ratatui](https://docs.rs/ratatui), or streamed as
//! JSON lines.
//!
//! ## Execution pipeline
//!
//! ```text
//! Command / JSON → Action → Session::dispatch → Steps → SnapshotHistory → TUI
//! ```
//!
//! 1. [`action`]: the action protocol and the text command parser.
//! 2. [`engine`]: the dispatcher plus BST, binary-tree and traversal algorithms.
//! 3. [`tree`]: the owned tree model, node ids, level-order building and the
//!    flat record form.
//! 4. [`snapshot`]: snapshots, the step recorder, and the replay history with
//!    a memory budget.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//! 6. [`headless`]: JSON-lines replay for scripts and pipelines.
//!
//! ## Example
//!
//! ```
//! use treetrace::action::Action;
//! use treetrace::engine::Session;
//!
//! let mut session = Session::new();
//! let demo = Action::named_demo("bst").unwrap();
//! let snapshots: Vec<_> = session.dispatch(None, demo).collect();
//! assert!(snapshots.last().unwrap().done);
//! assert_eq!(snapshots.last().unwrap().tree.len(), 7);
//! ```

pub mod action;
pub mod config;
pub mod engine;
pub mod errors;
pub mod headless;
pub mod snapshot;
pub mod tree;
pub mod ui;
