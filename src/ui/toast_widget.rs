//! Bottom-right overlay rendering for toasts.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::toast::{Toast, ToastType};

pub struct ToastWidget<'a> {
    toasts: &'a [&'a Toast],
}

impl<'a> ToastWidget<'a> {
    pub fn new(toasts: &'a [&'a Toast]) -> Self {
        Self { toasts }
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        if self.toasts.is_empty() {
            return;
        }

        let toast_width = 36u16;
        let toast_height = 3u16;
        let gap = 1u16;

        for (idx, toast) in self.toasts.iter().enumerate() {
            let offset = idx as u16 * (toast_height + gap);
            let x = area.right().saturating_sub(toast_width + 2);
            let y = area.bottom().saturating_sub(toast_height + 2 + offset);
            let toast_area = Rect::new(
                x,
                y,
                toast_width.min(area.width),
                toast_height.min(area.height),
            );

            frame.render_widget(Clear, toast_area);

            let accent = accent_style(toast.toast_type);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(accent)
                .style(Style::default().bg(Color::Black));

            let text = Paragraph::new(Line::from(vec![
                Span::styled(icon(toast.toast_type), accent.add_modifier(Modifier::BOLD)),
                Span::raw(" "),
                Span::raw(toast.message.clone()),
            ]))
            .block(block)
            .alignment(Alignment::Left);

            frame.render_widget(text, toast_area);
        }
    }
}

fn icon(toast_type: ToastType) -> &'static str {
    match toast_type {
        ToastType::Info => "ℹ",
        ToastType::Success => "✓",
        ToastType::Warning => "⚠",
        ToastType::Error => "✗",
    }
}

fn accent_style(toast_type: ToastType) -> Style {
    let color = match toast_type {
        ToastType::Info => Color::Cyan,
        ToastType::Success => Color::Green,
        ToastType::Warning => Color::Yellow,
        ToastType::Error => Color::Red,
    };
    Style::default().fg(color)
}
