//! Non-interactive replay: every snapshot as one JSON line

use crate::action::Action;
use crate::engine::Session;
use crate::tree::Tree;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeadlessError {
    #[error("failed to write snapshot: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Dispatch `actions` in order and stream their snapshots to `out`.
///
/// Returns the number of snapshots written.
pub fn write_snapshots<W: Write>(
    actions: impl IntoIterator<Item = Action>,
    out: &mut W,
) -> Result<usize, HeadlessError> {
    let mut session = Session::new();
    let mut committed: Option<Tree> = None;
    let mut written = 0;

    for action in actions {
        tracing::debug!(action = %action, "replaying");
        let mut last_tree = None;
        for snapshot in session.dispatch(committed.as_ref(), action) {
            serde_json::to_writer(&mut *out, &snapshot)?;
            out.write_all(b"\n")?;
            written += 1;
            last_tree = Some(snapshot.tree);
        }
        if last_tree.is_some() {
            committed = last_tree;
        }
    }

    out.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::value::Value;

    #[test]
    fn test_one_line_per_snapshot() {
        let actions = vec![
            Action::BuildTree {
                list: vec![Some(Value::from(2)), Some(Value::from(1))],
            },
            Action::Traverse {
                order: Default::default(),
            },
        ];
        let mut out = Vec::new();
        let written = write_snapshots(actions, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), written);

        let done: Vec<bool> = lines
            .iter()
            .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap()["done"] == true)
            .collect();
        assert_eq!(done.iter().filter(|d| **d).count(), 2);
        assert_eq!(done.last(), Some(&true));
    }
}
