// Text-field editing for the code editor and the URL field.
// - Cursor positions are char indices into the field's text.
// - Every edit builds the new text and dispatches it as a view event.
// - The code editor is multi-line; the URL field never holds a newline.
use crate::{model::Focus, state::ViewEvent};

use super::App;

impl App {
    pub fn insert_char(&mut self, ch: char) {
        let mut buffer = [0; 4];
        self.insert_text(ch.encode_utf8(&mut buffer));
    }

    pub fn insert_newline(&mut self) {
        if self.focus == Focus::CodeInput {
            self.insert_text("\n");
        }
    }

    /// Inserts at the cursor of the focused field. Pasted line endings are
    /// normalized; the URL field drops them entirely.
    pub fn insert_text(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        match self.focus {
            Focus::CodeInput => {
                let (code, cursor) =
                    insert_at(self.view.code_input(), self.code_cursor, &normalized);
                self.code_cursor = cursor;
                self.dispatch(ViewEvent::SetCodeInput(code));
            }
            Focus::GithubUrl => {
                let single_line = normalized.replace('\n', "");
                let (url, cursor) = insert_at(self.view.github_url(), self.url_cursor, &single_line);
                self.url_cursor = cursor;
                self.dispatch(ViewEvent::SetGithubUrl(url));
            }
            Focus::DropZone | Focus::Activity => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            Focus::CodeInput => {
                if let Some((code, cursor)) = remove_before(self.view.code_input(), self.code_cursor) {
                    self.code_cursor = cursor;
                    self.dispatch(ViewEvent::SetCodeInput(code));
                }
            }
            Focus::GithubUrl => {
                if let Some((url, cursor)) = remove_before(self.view.github_url(), self.url_cursor) {
                    self.url_cursor = cursor;
                    self.dispatch(ViewEvent::SetGithubUrl(url));
                }
            }
            Focus::DropZone | Focus::Activity => {}
        }
    }

    pub fn delete_forward(&mut self) {
        match self.focus {
            Focus::CodeInput => {
                if let Some(code) = remove_at(self.view.code_input(), self.code_cursor) {
                    self.dispatch(ViewEvent::SetCodeInput(code));
                }
            }
            Focus::GithubUrl => {
                if let Some(url) = remove_at(self.view.github_url(), self.url_cursor) {
                    self.dispatch(ViewEvent::SetGithubUrl(url));
                }
            }
            Focus::DropZone | Focus::Activity => {}
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(cursor) = self.focused_cursor_mut() {
            *cursor = cursor.saturating_sub(1);
        }
    }

    pub fn move_cursor_right(&mut self) {
        let max = self.focused_text().map(|text| text.chars().count());
        if let (Some(max), Some(cursor)) = (max, self.focused_cursor_mut()) {
            *cursor = (*cursor + 1).min(max);
        }
    }

    pub fn move_cursor_up(&mut self) {
        if self.focus != Focus::CodeInput {
            return;
        }
        let (line, column) = line_and_column(self.view.code_input(), self.code_cursor);
        if line > 0 {
            self.code_cursor = cursor_at(self.view.code_input(), line - 1, column);
        }
    }

    pub fn move_cursor_down(&mut self) {
        if self.focus != Focus::CodeInput {
            return;
        }
        let (line, column) = line_and_column(self.view.code_input(), self.code_cursor);
        if line + 1 < self.view.line_count() {
            self.code_cursor = cursor_at(self.view.code_input(), line + 1, column);
        }
    }

    pub fn move_cursor_home(&mut self) {
        match self.focus {
            Focus::CodeInput => {
                let (line, _) = line_and_column(self.view.code_input(), self.code_cursor);
                self.code_cursor = cursor_at(self.view.code_input(), line, 0);
            }
            Focus::GithubUrl => self.url_cursor = 0,
            Focus::DropZone | Focus::Activity => {}
        }
    }

    pub fn move_cursor_end(&mut self) {
        match self.focus {
            Focus::CodeInput => {
                let (line, _) = line_and_column(self.view.code_input(), self.code_cursor);
                self.code_cursor = cursor_at(self.view.code_input(), line, usize::MAX);
            }
            Focus::GithubUrl => self.url_cursor = self.view.github_url().chars().count(),
            Focus::DropZone | Focus::Activity => {}
        }
    }

    fn focused_text(&self) -> Option<&str> {
        match self.focus {
            Focus::CodeInput => Some(self.view.code_input()),
            Focus::GithubUrl => Some(self.view.github_url()),
            Focus::DropZone | Focus::Activity => None,
        }
    }

    fn focused_cursor_mut(&mut self) -> Option<&mut usize> {
        match self.focus {
            Focus::CodeInput => Some(&mut self.code_cursor),
            Focus::GithubUrl => Some(&mut self.url_cursor),
            Focus::DropZone | Focus::Activity => None,
        }
    }
}

fn insert_at(text: &str, cursor: usize, inserted: &str) -> (String, usize) {
    let mut updated = text.to_string();
    updated.insert_str(byte_index_for_char(text, cursor), inserted);
    (updated, cursor + inserted.chars().count())
}

fn remove_before(text: &str, cursor: usize) -> Option<(String, usize)> {
    if cursor == 0 {
        return None;
    }
    let cursor = cursor.min(text.chars().count());
    let start = byte_index_for_char(text, cursor - 1);
    let end = byte_index_for_char(text, cursor);
    let mut updated = text.to_string();
    updated.replace_range(start..end, "");
    Some((updated, cursor - 1))
}

fn remove_at(text: &str, cursor: usize) -> Option<String> {
    if cursor >= text.chars().count() {
        return None;
    }
    let start = byte_index_for_char(text, cursor);
    let end = byte_index_for_char(text, cursor + 1);
    let mut updated = text.to_string();
    updated.replace_range(start..end, "");
    Some(updated)
}

/// Zero-based line and column of a char cursor.
pub(crate) fn line_and_column(text: &str, cursor: usize) -> (usize, usize) {
    let mut line = 0;
    let mut column = 0;
    for ch in text.chars().take(cursor) {
        if ch == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }
    }
    (line, column)
}

/// Char cursor for a line and column, clamping the column to the line end.
fn cursor_at(text: &str, line: usize, column: usize) -> usize {
    let mut cursor = 0;
    for (index, segment) in text.split('\n').enumerate() {
        let length = segment.chars().count();
        if index == line {
            return cursor + column.min(length);
        }
        cursor += length + 1;
    }
    text.chars().count()
}

pub(crate) fn byte_index_for_char(input: &str, char_index: usize) -> usize {
    if char_index == 0 {
        return 0;
    }

    input
        .char_indices()
        .nth(char_index)
        .map(|(index, _)| index)
        .unwrap_or(input.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_remove_respect_multibyte_chars() {
        let (text, cursor) = insert_at("hé!", 2, "llo");
        assert_eq!((text.as_str(), cursor), ("héllo!", 5));
        assert_eq!(remove_before("héllo", 2), Some(("hllo".to_string(), 1)));
        assert_eq!(remove_at("héllo", 1), Some("hllo".to_string()));
        assert_eq!(remove_before("abc", 0), None);
        assert_eq!(remove_at("abc", 3), None);
    }

    #[test]
    fn line_and_column_track_newlines() {
        let text = "ab\ncde\n\nf";
        assert_eq!(line_and_column(text, 0), (0, 0));
        assert_eq!(line_and_column(text, 2), (0, 2));
        assert_eq!(line_and_column(text, 3), (1, 0));
        assert_eq!(line_and_column(text, 7), (2, 0));
        assert_eq!(line_and_column(text, 9), (3, 1));
    }

    #[test]
    fn cursor_at_clamps_column_to_line_length() {
        let text = "abcd\nx\nlonger";
        assert_eq!(cursor_at(text, 1, 3), 6);
        assert_eq!(cursor_at(text, 2, 2), 9);
        assert_eq!(cursor_at(text, 0, usize::MAX), 4);
        assert_eq!(cursor_at(text, 9, 0), text.chars().count());
    }
}
