//! Keyboard event handling.
//!
//! One flat dispatch: the input line always has focus, so every key either
//! edits the pending input, drives history recall, or operates on the
//! session collection.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('q') if ctrl => app.should_quit = true,
        // Cancel the running command, or drop the pending input when idle.
        KeyCode::Char('c') if ctrl => app.interrupt(),
        KeyCode::Char('t') if ctrl => app.create_session(),
        KeyCode::Char('w') if ctrl => app.close_active_session(),
        KeyCode::Char('v') if ctrl => app.paste_from_clipboard(),
        KeyCode::Char('u') if ctrl => app.kill_line(),

        KeyCode::Tab => app.next_session(),
        KeyCode::BackTab => app.prev_session(),

        KeyCode::Enter => app.submit(),
        KeyCode::Up => app.history_prev(),
        KeyCode::Down => app.history_next(),

        KeyCode::Left => app.input.move_left(),
        KeyCode::Right => app.input.move_right(),
        KeyCode::Home => app.input.move_home(),
        KeyCode::End => app.input.move_end(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete_forward(),

        KeyCode::PageUp => app.scroll_up(10),
        KeyCode::PageDown => app.scroll_down(10),
        KeyCode::Esc => app.clear_selection(),

        KeyCode::Char(c) if !ctrl => app.input_char(c),
        _ => {}
    }
}
