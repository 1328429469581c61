//! Command-line configuration

use crate::action::command::{load_script, parse_tree_type};
use crate::action::{Action, TreeType};
use crate::engine::constants::{DEFAULT_HISTORY_LIMIT, DEFAULT_PLAY_INTERVAL_MS};
use crate::errors::{CommandError, ScriptError};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

const MIB: usize = 1024 * 1024;

/// Step through binary tree and BST operations one snapshot at a time
#[derive(Debug, Clone, Parser)]
#[command(name = "treetrace", version, about)]
pub struct Config {
    /// Action script: one command or JSON action record per line
    pub script: Option<PathBuf>,

    /// Load a named demo (bst, complete, skewed, sparse) before the script
    #[arg(long, value_name = "NAME")]
    pub demo: Option<String>,

    /// Tree type used when a command does not name one
    #[arg(long, value_name = "TYPE", default_value = "binary", value_parser = parse_tree_type)]
    pub tree_type: TreeType,

    /// Print every snapshot as a JSON line instead of starting the viewer
    #[arg(long)]
    pub headless: bool,

    /// Delay between steps in play mode
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_PLAY_INTERVAL_MS)]
    pub play_interval_ms: u64,

    /// Snapshot history budget
    #[arg(long, value_name = "MB", default_value_t = DEFAULT_HISTORY_LIMIT / MIB)]
    pub history_limit_mb: usize,

    /// Write logs here while the viewer owns the terminal
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            script: None,
            demo: None,
            tree_type: TreeType::default(),
            headless: false,
            play_interval_ms: DEFAULT_PLAY_INTERVAL_MS,
            history_limit_mb: DEFAULT_HISTORY_LIMIT / MIB,
            log_file: None,
        }
    }
}

impl Config {
    pub fn play_interval(&self) -> Duration {
        Duration::from_millis(self.play_interval_ms)
    }

    pub fn history_limit_bytes(&self) -> usize {
        self.history_limit_mb.saturating_mul(MIB)
    }

    /// Actions to run at startup: the demo (if any), then the script
    pub fn initial_actions(&self) -> Result<Vec<Action>, ScriptError> {
        let mut actions = Vec::new();

        if let Some(name) = &self.demo {
            let demo = Action::named_demo(name).ok_or_else(|| {
                ScriptError::Demo(CommandError::UnknownDemo { name: name.clone() })
            })?;
            actions.push(demo);
        }

        if let Some(path) = &self.script {
            actions.extend(load_script(path, self.tree_type)?);
        }

        Ok(actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["treetrace"]).unwrap();
        assert_eq!(config.tree_type, TreeType::Binary);
        assert_eq!(config.play_interval(), Duration::from_millis(700));
        assert_eq!(config.history_limit_bytes(), DEFAULT_HISTORY_LIMIT);
        assert!(!config.headless);
        assert!(config.initial_actions().unwrap().is_empty());
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "treetrace",
            "--demo",
            "skewed",
            "--tree-type",
            "bst",
            "--headless",
            "--history-limit-mb",
            "1",
        ])
        .unwrap();
        assert_eq!(config.tree_type, TreeType::Bst);
        assert!(config.headless);
        assert_eq!(config.history_limit_bytes(), MIB);
        let actions = config.initial_actions().unwrap();
        assert_eq!(actions.len(), 1);
        assert!(matches!(actions[0], Action::LoadDemo { .. }));
    }

    #[test]
    fn test_rejects_bad_tree_type() {
        assert!(Config::try_parse_from(["treetrace", "--tree-type", "avl"]).is_err());
    }

    #[test]
    fn test_unknown_demo() {
        let config = Config {
            demo: Some("forest".to_string()),
            ..Config::default()
        };
        assert!(matches!(
            config.initial_actions(),
            Err(ScriptError::Demo(CommandError::UnknownDemo { .. }))
        ));
    }
}
