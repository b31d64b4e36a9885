//! Multi-line text editor for message bodies
//!
//! Used by the SMS content and mail body fields. The cursor is a byte offset
//! that is always kept on a UTF-8 boundary.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextEditor {
    content: String,
    /// Byte offset into `content`
    cursor: usize,
}

impl TextEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(content: impl Into<String>) -> Self {
        let content = content.into();
        let cursor = content.len();
        Self { content, cursor }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.insert(cursor, c);
        self.cursor = cursor + c.len_utf8();
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Insert pasted text. Curly quotes from rich-text sources become plain
    /// quotes and CRLF line endings become LF.
    pub fn insert_str(&mut self, s: &str) {
        let normalized = s
            .replace("\r\n", "\n")
            .replace('\r', "\n")
            .replace(['\u{201C}', '\u{201D}'], "\"")
            .replace(['\u{2018}', '\u{2019}'], "'");

        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.insert_str(cursor, &normalized);
        self.cursor = cursor + normalized.len();
    }

    pub fn delete_char_before_cursor(&mut self) -> bool {
        let Some((idx, _)) = self.content[..self.cursor].char_indices().next_back() else {
            return false;
        };
        self.content.remove(idx);
        self.cursor = idx;
        true
    }

    pub fn delete_char_after_cursor(&mut self) -> bool {
        if self.cursor >= self.content.len() {
            return false;
        }
        self.content.remove(self.cursor);
        true
    }

    pub fn move_cursor_left(&mut self) -> bool {
        match self.content[..self.cursor].char_indices().next_back() {
            Some((idx, _)) => {
                self.cursor = idx;
                true
            }
            None => false,
        }
    }

    pub fn move_cursor_right(&mut self) -> bool {
        match self.content[self.cursor..].chars().next() {
            Some(c) => {
                self.cursor += c.len_utf8();
                true
            }
            None => false,
        }
    }

    /// Start of the current line
    pub fn move_cursor_home(&mut self) {
        self.cursor = self.line_start(self.cursor);
    }

    /// End of the current line
    pub fn move_cursor_end(&mut self) {
        self.cursor = self.content[self.cursor..]
            .find('\n')
            .map(|i| self.cursor + i)
            .unwrap_or(self.content.len());
    }

    pub fn move_cursor_up(&mut self) -> bool {
        let (line, col) = self.cursor_line_col();
        if line == 0 {
            return false;
        }
        self.cursor = self.offset_for(line - 1, col);
        true
    }

    pub fn move_cursor_down(&mut self) -> bool {
        let (line, col) = self.cursor_line_col();
        if line + 1 >= self.line_count() {
            return false;
        }
        self.cursor = self.offset_for(line + 1, col);
        true
    }

    pub fn lines(&self) -> Vec<&str> {
        self.content.split('\n').collect()
    }

    pub fn line_count(&self) -> usize {
        self.content.matches('\n').count() + 1
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// (line, column) of the cursor, column counted in chars
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.content[..self.cursor];
        let line = before.matches('\n').count();
        let col = before[self.line_start(self.cursor)..].chars().count();
        (line, col)
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter => {
                self.insert_newline();
                true
            }
            KeyCode::Backspace => self.delete_char_before_cursor(),
            KeyCode::Delete => self.delete_char_after_cursor(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Up => self.move_cursor_up(),
            KeyCode::Down => self.move_cursor_down(),
            KeyCode::Home => {
                self.move_cursor_home();
                true
            }
            KeyCode::End => {
                self.move_cursor_end();
                true
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_cursor_home();
                true
            }
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_cursor_end();
                true
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
                true
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
                true
            }
            _ => false,
        }
    }

    /// Drain key events that are already queued and insert them in one go.
    /// Terminals without bracketed paste deliver a paste as a burst of keys.
    pub fn handle_paste_batch(&mut self, initial_char: char) -> usize {
        let mut batch = String::from(initial_char);

        while let Ok(true) = crossterm::event::poll(std::time::Duration::from_millis(0)) {
            match crossterm::event::read() {
                Ok(Event::Key(next)) => match next.code {
                    KeyCode::Char(c) if !next.modifiers.contains(KeyModifiers::CONTROL) => {
                        batch.push(c)
                    }
                    KeyCode::Enter => batch.push('\n'),
                    _ => break,
                },
                _ => break,
            }
        }

        let count = batch.chars().count();
        self.insert_str(&batch);
        count
    }

    fn line_start(&self, offset: usize) -> usize {
        self.content[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    /// Byte offset of `col` chars into `line`, clamped to the line length
    fn offset_for(&self, line: usize, col: usize) -> usize {
        let start: usize = self
            .content
            .split('\n')
            .take(line)
            .map(|l| l.len() + 1)
            .sum();
        let text = self.content[start..].split('\n').next().unwrap_or("");
        let within = text
            .char_indices()
            .nth(col)
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        start + within
    }

    fn clamp_cursor_to_boundary(&self, cursor: usize) -> usize {
        let mut pos = cursor.min(self.content.len());
        while pos > 0 && !self.content.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_with_content_puts_cursor_at_end() {
        let editor = TextEditor::with_content("hello");
        assert_eq!(editor.content(), "hello");
        assert_eq!(editor.cursor_line_col(), (0, 5));
    }

    #[test]
    fn test_insert_and_backspace() {
        let mut editor = TextEditor::new();
        editor.insert_char('h');
        editor.insert_char('i');
        assert_eq!(editor.content(), "hi");
        assert!(editor.delete_char_before_cursor());
        assert_eq!(editor.content(), "h");
        editor.move_cursor_left();
        assert!(!editor.delete_char_before_cursor());
    }

    #[test]
    fn test_newline_and_line_navigation() {
        let mut editor = TextEditor::with_content("Dear customer,");
        editor.handle_key_event(key(KeyCode::Enter));
        editor.insert_str("OTP");
        assert_eq!(editor.lines(), vec!["Dear customer,", "OTP"]);
        assert_eq!(editor.cursor_line_col(), (1, 3));

        assert!(editor.move_cursor_up());
        assert_eq!(editor.cursor_line_col(), (0, 3));
        editor.move_cursor_end();
        assert_eq!(editor.cursor_line_col(), (0, 14));

        // Column clamps to the shorter line
        assert!(editor.move_cursor_down());
        assert_eq!(editor.cursor_line_col(), (1, 3));
        assert!(!editor.move_cursor_down());

        editor.move_cursor_home();
        assert_eq!(editor.cursor_line_col(), (1, 0));
    }

    #[test]
    fn test_utf8_cursor_moves() {
        let mut editor = TextEditor::new();
        editor.insert_str("né😀");
        assert_eq!(editor.char_count(), 3);
        assert!(editor.move_cursor_left());
        assert_eq!(editor.cursor_line_col(), (0, 2));
        assert!(editor.move_cursor_right());
        assert!(editor.delete_char_before_cursor());
        assert_eq!(editor.content(), "né");
    }

    #[test]
    fn test_paste_normalization() {
        let mut editor = TextEditor::new();
        editor.insert_str("\u{201C}hi\u{201D}\r\nit\u{2019}s");
        assert_eq!(editor.content(), "\"hi\"\nit's");
    }

    #[test]
    fn test_delete_after_cursor() {
        let mut editor = TextEditor::with_content("ab");
        assert!(!editor.delete_char_after_cursor());
        editor.move_cursor_left();
        assert!(editor.delete_char_after_cursor());
        assert_eq!(editor.content(), "a");
    }

    #[test]
    fn test_ctrl_l_clears() {
        let mut editor = TextEditor::with_content("text");
        editor.handle_key_event(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
        assert_eq!(editor.content(), "");
        assert!(editor.is_empty());
    }
}
