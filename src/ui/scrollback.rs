//! Scrollback pane: renders the active session's entries.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use crate::app::{ScrollLine, TextSelection};
use crate::session::EntryKind;
use crate::ui::ansi;

/// Widget displaying a window into one session's scrollback.
pub struct ScrollbackPane<'a> {
    lines: &'a [ScrollLine],
    session_name: &'a str,
    scroll_offset: usize,
    selection: Option<&'a TextSelection>,
    busy: bool,
}

impl<'a> ScrollbackPane<'a> {
    pub fn new(
        lines: &'a [ScrollLine],
        session_name: &'a str,
        scroll_offset: usize,
        selection: Option<&'a TextSelection>,
        busy: bool,
    ) -> Self {
        Self {
            lines,
            session_name,
            scroll_offset,
            selection,
            busy,
        }
    }
}

impl Widget for ScrollbackPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut title = format!(" {} ", self.session_name);
        if self.busy {
            title.push_str("[RUNNING] ");
        }
        if self.scroll_offset > 0 {
            title.push_str(&format!("[SCROLLED: -{}] ", self.scroll_offset));
        }

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.lines.is_empty() {
            let placeholder = "Type a command and press Enter";
            let x = inner.x + (inner.width.saturating_sub(placeholder.len() as u16)) / 2;
            let y = inner.y + inner.height / 2;
            if y < inner.y + inner.height && x < inner.x + inner.width {
                buf.set_string(x, y, placeholder, Style::default().fg(Color::DarkGray));
            }
            return;
        }

        // Window from the bottom: offset 0 shows the live tail.
        let viewport = inner.height as usize;
        let end = self.lines.len().saturating_sub(self.scroll_offset);
        let start = end.saturating_sub(viewport);

        for (row_idx, line) in self.lines[start..end].iter().enumerate() {
            let y = inner.y + row_idx as u16;
            let styled = ansi::styled_line(&line.raw, base_style(line.kind));
            buf.set_line(inner.x, y, &styled, inner.width);

            if let Some(sel) = self.selection {
                for col in 0..inner.width as usize {
                    if sel.contains(row_idx, col) {
                        if let Some(cell) = buf.cell_mut((inner.x + col as u16, y)) {
                            cell.set_style(Style::default().add_modifier(Modifier::REVERSED));
                        }
                    }
                }
            }
        }
    }
}

/// Default styling per entry kind; raw ANSI in the text layers on top.
fn base_style(kind: EntryKind) -> Style {
    match kind {
        EntryKind::Command => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        EntryKind::Output => Style::default(),
        EntryKind::Error => Style::default().fg(Color::Red),
    }
}
