//! Tree mutation and replay engine
//!
//! This module provides the core execution logic:
//! - [`dispatcher`]: [`Session`] and the lazy [`Steps`] iterator
//! - [`ops`]: BST, binary-tree and traversal algorithms
//! - [`constants`]: demo layouts and budgeting constants
//!
//! # Execution Model
//!
//! Each action runs against a private clone of the committed tree. Algorithms
//! report every step to a [`StepRecorder`](crate::snapshot::recorder::StepRecorder),
//! which copies the working tree at that moment; the dispatcher then hands the
//! steps out one snapshot at a time and closes with exactly one terminal
//! snapshot (`done: true`).
//!
//! Invalid input never reaches an algorithm: it becomes a single terminal
//! `error` snapshot carrying the unchanged tree.

pub mod constants;
pub mod dispatcher;
pub mod ops;

pub use dispatcher::{Session, Steps};
