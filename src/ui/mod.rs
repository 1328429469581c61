//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, command prompt
//! - **[`panes`]**: render functions for each visible pane (tree, steps, nodes,
//!   prompt, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it, feed it startup
//! actions with [`App::load`] and call [`App::run`] to start the event loop.
//!
//! [`App::load`]: app::App::load
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
