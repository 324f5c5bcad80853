//! Mouse event handling: wheel scrolling and click-drag selection over the
//! scrollback pane, copied to the clipboard on release.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::app::{App, ScrollbackPosition, TextSelection};

/// Map absolute screen coordinates to scrollback viewport coordinates.
/// Returns None if the position is outside the pane's inner area.
pub(crate) fn screen_to_scrollback_pos(app: &App, col: u16, row: u16) -> Option<ScrollbackPosition> {
    let inner = app.scrollback_area?;
    if col < inner.x
        || col >= inner.x + inner.width
        || row < inner.y
        || row >= inner.y + inner.height
    {
        return None;
    }
    Some(ScrollbackPosition {
        row: (row - inner.y) as usize,
        col: (col - inner.x) as usize,
    })
}

pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    const SCROLL_LINES: usize = 3;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            // Start a new selection if the click lands inside the pane.
            if let Some(pos) = screen_to_scrollback_pos(app, mouse.column, mouse.row) {
                app.text_selection = Some(TextSelection {
                    anchor: pos,
                    cursor: pos,
                });
            } else {
                app.clear_selection();
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if app.text_selection.is_some() {
                if let Some(inner) = app.scrollback_area {
                    // Clamp the drag position to the pane before mapping.
                    let clamped_col = mouse.column.max(inner.x).min(inner.x + inner.width - 1);
                    let clamped_row = mouse.row.max(inner.y).min(inner.y + inner.height - 1);
                    let new_pos = screen_to_scrollback_pos(app, clamped_col, clamped_row);

                    if let (Some(ref mut sel), Some(pos)) = (&mut app.text_selection, new_pos) {
                        sel.cursor = pos;
                    }
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            // On release: if there's a real selection, copy it and clear.
            if let Some(ref sel) = app.text_selection {
                if !sel.is_empty() {
                    app.copy_selection_to_clipboard();
                }
            }
            app.clear_selection();
        }
        MouseEventKind::ScrollUp => {
            app.scroll_up(SCROLL_LINES);
        }
        MouseEventKind::ScrollDown => {
            app.scroll_down(SCROLL_LINES);
        }
        _ => {}
    }
}
