//! Screen layout.

use ratatui::layout::{Constraint, Layout, Rect};

/// Vertical layout: tab strip, scrollback pane, input line, help bar.
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect, Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .split(area);

    (chunks[0], chunks[1], chunks[2], chunks[3])
}
