//! The prompt/input line below the scrollback pane.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::InputBuffer;
use crate::session::PROMPT;

pub struct InputLine<'a> {
    input: &'a InputBuffer,
    busy: bool,
}

impl<'a> InputLine<'a> {
    pub fn new(input: &'a InputBuffer, busy: bool) -> Self {
        Self { input, busy }
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let border_style = if self.busy {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Cyan)
        };

        let mut block = Block::default().borders(Borders::ALL).border_style(border_style);
        if self.busy {
            block = block.title(" running — Ctrl+C to cancel ");
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let text = Paragraph::new(Line::from(vec![
            Span::styled(PROMPT, Style::default().fg(Color::Green)),
            Span::raw(self.input.text().to_string()),
        ]));
        frame.render_widget(text, inner);

        // Visible cursor in the input line, clamped to the pane width.
        let prompt_width = PROMPT.len() as u16;
        let cursor_x = inner.x
            + (prompt_width + self.input.cursor() as u16).min(inner.width.saturating_sub(1));
        frame.set_cursor_position((cursor_x, inner.y));
    }
}
