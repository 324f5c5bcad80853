//! ANSI styling at display time.
//!
//! Scrollback entries store raw text; this module is the only place escape
//! sequences are interpreted, and only for color/style (SGR). It is a pure
//! function from raw text to styled spans — no cursor movement, no
//! terminal emulation. Lines without an escape byte skip the parser
//! entirely.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Column cap for the styling parser. Longer lines are clipped at the
/// render width anyway.
const MAX_COLS: u16 = 1024;

/// Convert one raw line into a styled [`Line`], layering cell styles over
/// `base`.
pub fn styled_line(raw: &str, base: Style) -> Line<'static> {
    if !raw.contains('\u{1b}') {
        return Line::from(Span::styled(raw.to_string(), base));
    }

    let mut parser = vt100::Parser::new(1, MAX_COLS, 0);
    parser.process(raw.as_bytes());
    let screen = parser.screen();

    // Find the extent of written cells, then group same-styled runs into
    // spans. Cells the parser never touched (e.g. after a tab) render as
    // spaces.
    let last_col = (0..MAX_COLS)
        .rev()
        .find(|&col| screen.cell(0, col).is_some_and(|c| !c.contents().is_empty()));
    let Some(last_col) = last_col else {
        return Line::from(Span::styled(String::new(), base));
    };

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = base;
    for col in 0..=last_col {
        let (contents, style) = match screen.cell(0, col) {
            Some(cell) if !cell.contents().is_empty() => {
                (cell.contents().to_string(), cell_style(cell, base))
            }
            _ => (" ".to_string(), base),
        };
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push_str(&contents);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }

    Line::from(spans)
}

/// Strip escape sequences from one raw line, for clipboard copy.
pub fn plain_line(raw: &str) -> String {
    if !raw.contains('\u{1b}') {
        return raw.to_string();
    }
    styled_line(raw, Style::default())
        .spans
        .iter()
        .map(|span| span.content.as_ref())
        .collect()
}

/// Map a vt100 cell's color/attributes onto a ratatui style.
fn cell_style(cell: &vt100::Cell, base: Style) -> Style {
    let mut style = base;
    match cell.fgcolor() {
        vt100::Color::Default => {}
        vt100::Color::Idx(idx) => style = style.fg(Color::Indexed(idx)),
        vt100::Color::Rgb(r, g, b) => style = style.fg(Color::Rgb(r, g, b)),
    }
    match cell.bgcolor() {
        vt100::Color::Default => {}
        vt100::Color::Idx(idx) => style = style.bg(Color::Indexed(idx)),
        vt100::Color::Rgb(r, g, b) => style = style.bg(Color::Rgb(r, g, b)),
    }
    if cell.bold() {
        style = style.add_modifier(Modifier::BOLD);
    }
    if cell.italic() {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if cell.underline() {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if cell.inverse() {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}
