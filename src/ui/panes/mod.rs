//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`tree`]: Tree diagram with the highlighted node and its path
//! - [`steps`]: Step log of the action under the cursor
//! - [`nodes`]: Flat `nodesById` table of the current snapshot
//! - [`prompt`]: Command line input
//! - [`status`]: Status bar with keybindings and replay state
//!
//! Each pane module exports a primary `render_*` function and, where the
//! pane needs more than a couple of inputs, a `*RenderData` struct.

pub mod nodes;
pub mod prompt;
pub mod status;
pub mod steps;
pub mod tree;

// Re-export render functions for convenience
pub use nodes::{render_nodes_pane, NodesRenderData};
pub use prompt::render_prompt;
pub use status::{render_status_bar, StatusRenderData};
pub use steps::{render_steps_pane, StepsRenderData};
pub use tree::{layout_tree, render_tree_pane, TreeRenderData};
