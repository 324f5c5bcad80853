//! Session tab strip shown above the scrollback pane.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::session::Session;

pub struct SessionTabs<'a> {
    sessions: &'a [Session],
    active_id: &'a str,
}

impl<'a> SessionTabs<'a> {
    pub fn new(sessions: &'a [Session], active_id: &'a str) -> Self {
        Self {
            sessions,
            active_id,
        }
    }
}

impl Widget for SessionTabs<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans: Vec<Span> = Vec::new();
        for session in self.sessions {
            let label = format!(" {} ", session.name);
            let style = if session.id == self.active_id {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
