// Rendering tests for the TUI against ratatui's in-memory backend

use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::time::Duration;
use treetrace::action::{Action, TreeType};
use treetrace::ui::App;

fn screen(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 32)).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_empty_session_renders() {
    let mut app = App::new(usize::MAX, TreeType::Bst, Duration::from_millis(10));
    let text = screen(&mut app);
    assert!(text.contains("Tree (bst)"));
    assert!(text.contains("(empty tree)"));
    assert!(text.contains("Step 0/0"));
}

#[test]
fn test_demo_renders_tree_and_table() {
    let mut app = App::new(usize::MAX, TreeType::Bst, Duration::from_millis(10));
    app.load(vec![Action::named_demo("bst").unwrap()]).unwrap();
    app.history.jump_to_end().unwrap();

    let text = screen(&mut app);
    assert!(text.contains("7 nodes"));
    assert!(text.contains("Steps: loadDemo"));
    for value in ["20", "30", "40", "50", "60", "70", "80"] {
        assert!(text.contains(value), "missing {} in\n{}", value, text);
    }
    assert!(text.contains("#1"));
    assert!(text.contains("Loaded demo with 7 nodes"));
}
