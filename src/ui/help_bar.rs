//! Key-hint bar at the bottom of the screen.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub fn draw_help_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode = if app.busy() {
        Span::styled(
            " RUNNING ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )
    } else {
        Span::styled(
            " READY ",
            Style::default().fg(Color::Black).bg(Color::Green),
        )
    };

    let mut spans = vec![mode];
    if app.busy() {
        spans.extend([key(" C-c "), hint("cancel ")]);
    } else {
        spans.extend([
            key(" Enter "),
            hint("run "),
            key(" ↑/↓ "),
            hint("history "),
        ]);
    }
    spans.extend([
        key(" Tab "),
        hint("switch "),
        key(" C-t "),
        hint("new "),
        key(" C-w "),
        hint("close "),
        key(" C-v "),
        hint("paste "),
        key(" PgUp/PgDn "),
        hint("scroll "),
        key(" C-q "),
        hint("quit"),
    ]);

    let help = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    f.render_widget(help, area);
}

fn key(text: &str) -> Span<'_> {
    Span::styled(text, Style::default().fg(Color::Cyan))
}

fn hint(text: &str) -> Span<'_> {
    Span::raw(text)
}
