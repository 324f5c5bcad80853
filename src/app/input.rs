//! Input line editing, history recall wiring, and clipboard methods on
//! App.

use super::{App, TextSelection};

/// Single-line input buffer with a char-indexed cursor.
///
/// Owns only the pending text; history recall and submission live on
/// `App`.
#[derive(Debug, Default)]
pub struct InputBuffer {
    text: String,
    /// Cursor position in chars (not bytes).
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Replace the buffer contents, cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.chars().count();
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.text.insert(idx, c);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        let idx = self.byte_index(self.cursor);
        self.text.insert_str(idx, s);
        self.cursor += s.chars().count();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let idx = self.byte_index(self.cursor - 1);
        self.text.remove(idx);
        self.cursor -= 1;
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.text.chars().count() {
            return;
        }
        let idx = self.byte_index(self.cursor);
        self.text.remove(idx);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(idx, _)| idx)
    }
}

impl App {
    /// Type one character at the cursor. Editing ends any active history
    /// recall without discarding what is in the buffer.
    pub fn input_char(&mut self, c: char) {
        self.input.insert_char(c);
        self.history.reset_cursor();
    }

    pub fn backspace(&mut self) {
        self.input.backspace();
        self.history.reset_cursor();
    }

    pub fn delete_forward(&mut self) {
        self.input.delete();
        self.history.reset_cursor();
    }

    /// Ctrl+U: drop the whole pending line.
    pub fn kill_line(&mut self) {
        self.input.clear();
        self.history.reset_cursor();
    }

    /// Up arrow: recall the next-older command into the input line.
    pub fn history_prev(&mut self) {
        if let Some(cmd) = self.history.previous().map(str::to_string) {
            self.input.set_text(cmd);
        }
    }

    /// Down arrow: step back toward the newest command; stepping past it
    /// leaves an empty line. Inert unless a recall is active.
    pub fn history_next(&mut self) {
        if !self.history.is_recalling() {
            return;
        }
        match self.history.next().map(str::to_string) {
            Some(cmd) => self.input.set_text(cmd),
            None => self.input.clear(),
        }
    }

    /// Paste clipboard text into the input line at the cursor. Newlines
    /// collapse to spaces; clipboard failures are logged and toasted,
    /// never fatal.
    pub fn paste_from_clipboard(&mut self) {
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
            Ok(text) => {
                let text = text.trim_end_matches(['\r', '\n']).replace(['\r', '\n'], " ");
                if !text.is_empty() {
                    self.input.insert_str(&text);
                    self.history.reset_cursor();
                }
            }
            Err(e) => {
                tracing::warn!("clipboard paste failed: {}", e);
                self.toast_warning("Clipboard unavailable");
            }
        }
    }

    /// Copy the current scrollback selection to the system clipboard.
    pub fn copy_selection_to_clipboard(&mut self) {
        let Some(sel) = self.text_selection.clone() else {
            return;
        };
        if sel.is_empty() {
            return;
        }
        let text = self.selected_text(&sel);
        if text.is_empty() {
            return;
        }

        if let Ok(mut clipboard) = arboard::Clipboard::new() {
            if clipboard.set_text(&text).is_ok() {
                let lines = text.lines().count();
                self.toast_success(format!("Copied selection ({} lines)", lines));
            } else {
                self.toast_error("Failed to copy selection");
            }
        } else {
            tracing::warn!("clipboard unavailable for copy");
            self.toast_error("Clipboard unavailable");
        }
    }

    /// Extract the selected text from the visible scrollback, escapes
    /// stripped.
    fn selected_text(&self, sel: &TextSelection) -> String {
        let Some(area) = self.scrollback_area else {
            return String::new();
        };
        let viewport_rows = area.height as usize;
        let (start, end) = sel.ordered();

        let mut lines: Vec<String> = Vec::new();
        for row in start.row..=end.row {
            let Some(line) = self.visible_plain_line(row, viewport_rows) else {
                continue;
            };
            let chars: Vec<char> = line.chars().collect();
            let from = if row == start.row {
                start.col.min(chars.len())
            } else {
                0
            };
            let to = if row == end.row {
                (end.col + 1).min(chars.len())
            } else {
                chars.len()
            };
            lines.push(chars[from..to.max(from)].iter().collect());
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::app_at;

    #[test]
    fn insert_and_backspace_track_the_cursor() {
        let mut input = InputBuffer::new();
        input.insert_char('h');
        input.insert_char('i');
        assert_eq!(input.text(), "hi");
        assert_eq!(input.cursor(), 2);

        input.backspace();
        assert_eq!(input.text(), "h");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn editing_in_the_middle_of_the_line() {
        let mut input = InputBuffer::new();
        input.set_text("hello");
        input.move_home();
        input.move_right();
        input.insert_char('x');
        assert_eq!(input.text(), "hxello");

        input.delete();
        assert_eq!(input.text(), "hxllo");
    }

    #[test]
    fn cursor_handles_multibyte_characters() {
        let mut input = InputBuffer::new();
        input.set_text("héllo");
        assert_eq!(input.cursor(), 5);
        input.move_home();
        input.move_right();
        input.move_right();
        input.insert_char('é');
        assert_eq!(input.text(), "hééllo");
    }

    #[test]
    fn insert_str_at_cursor() {
        let mut input = InputBuffer::new();
        input.set_text("git ");
        input.insert_str("status");
        assert_eq!(input.text(), "git status");
        assert_eq!(input.cursor(), 10);
    }

    #[test]
    fn move_right_clamps_at_end() {
        let mut input = InputBuffer::new();
        input.set_text("ab");
        input.move_right();
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn recall_fills_the_input_line() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path());
        app.history.push("echo one");
        app.history.push("echo two");

        app.history_prev();
        assert_eq!(app.input.text(), "echo two");
        app.history_prev();
        assert_eq!(app.input.text(), "echo one");
    }

    #[test]
    fn typing_during_recall_resets_cursor_but_keeps_text() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path());
        app.history.push("echo one");

        app.history_prev();
        app.input_char('!');

        assert_eq!(app.input.text(), "echo one!");
        assert!(!app.history.is_recalling());
        // Next Up starts from the most recent entry again.
        app.history_prev();
        assert_eq!(app.input.text(), "echo one");
    }

    #[test]
    fn stepping_past_the_newest_entry_leaves_an_empty_line() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path());
        app.history.push("echo one");

        app.history_prev();
        app.history_next();

        assert!(app.input.text().is_empty());
        assert!(!app.history.is_recalling());
    }

    #[test]
    fn down_without_active_recall_keeps_typed_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_at(dir.path());
        app.history.push("echo one");
        app.input.set_text("draft");

        app.history_next();

        assert_eq!(app.input.text(), "draft");
    }
}
