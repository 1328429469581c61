use crate::snapshot::HighlightKind;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub warning: Color,   // Yellow
    pub accent: Color,    // Pink
    pub number: Color,
    pub string: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub path: Color, // Nodes visited on the way to the highlight
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    secondary: Color::Rgb(250, 179, 135),
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    warning: Color::Rgb(249, 226, 175),
    accent: Color::Rgb(245, 194, 231),
    number: Color::Rgb(250, 179, 135),
    string: Color::Rgb(148, 226, 213),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    path: Color::Rgb(180, 165, 120),           // Muted yellow
};

impl Theme {
    /// Color for a highlighted node or step log entry
    pub fn kind_color(&self, kind: HighlightKind) -> Color {
        match kind {
            HighlightKind::Compare | HighlightKind::Traverse => self.primary,
            HighlightKind::Insert | HighlightKind::Found => self.success,
            HighlightKind::Duplicate | HighlightKind::Skip => self.warning,
            HighlightKind::NotFound | HighlightKind::Error => self.error,
            HighlightKind::Delete => self.accent,
            HighlightKind::Done => self.comment,
        }
    }
}
