use unicode_width::UnicodeWidthStr;

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// A one-line text buffer with a cursor.
///
/// The cursor is a byte offset that always sits on a char boundary.
/// Newlines are never inserted: form fields are single-line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineEditor {
    text: String,
    cursor: usize,
    dirty: bool,
}

impl LineEditor {
    /// Create an editor holding `text` with the cursor at the end.
    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.len(),
            dirty: false,
        }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the editor and return its text.
    pub fn into_text(self) -> String {
        self.text
    }

    /// Cursor position as a byte offset.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the text changed since the editor was opened.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Terminal column of the cursor, accounting for wide characters.
    pub fn display_col(&self) -> usize {
        self.text[..self.cursor].width()
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' || ch == '\r' {
            return;
        }
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
        self.dirty = true;
    }

    /// Insert a string at the cursor position, flattening line breaks to spaces.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let flat: String = s
            .chars()
            .filter(|c| *c != '\r')
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        self.text.insert_str(self.cursor, &flat);
        self.cursor += flat.len();
        self.dirty = true;
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_back(&mut self) -> bool {
        let Some(prev) = self.text[..self.cursor].chars().next_back() else {
            return false;
        };
        self.cursor -= prev.len_utf8();
        self.text.remove(self.cursor);
        self.dirty = true;
        true
    }

    /// Delete the character at the cursor (Delete key).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        self.text.remove(self.cursor);
        self.dirty = true;
        true
    }

    /// Delete everything before the cursor (Ctrl+U).
    pub fn clear_to_start(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.text.drain(..self.cursor);
        self.cursor = 0;
        self.dirty = true;
    }

    /// Move the cursor one character.
    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                if let Some(prev) = self.text[..self.cursor].chars().next_back() {
                    self.cursor -= prev.len_utf8();
                }
            }
            Direction::Right => {
                if let Some(next) = self.text[self.cursor..].chars().next() {
                    self.cursor += next.len_utf8();
                }
            }
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub const fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Move cursor one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self) {
        let trimmed = self.text[..self.cursor].trim_end();
        self.cursor = trimmed
            .rfind(|c: char| !c.is_alphanumeric() && c != '_')
            .map_or(0, |i| i + trimmed[i..].chars().next().map_or(1, char::len_utf8));
    }

    /// Move cursor one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self) {
        let after = &self.text[self.cursor..];
        let word_end = after
            .find(|c: char| !c.is_alphanumeric() && c != '_')
            .unwrap_or(after.len());
        let rest = &after[word_end..];
        let space_end = rest
            .find(|c: char| c.is_alphanumeric() || c == '_')
            .unwrap_or(rest.len());
        self.cursor += word_end + space_end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_places_cursor_at_end() {
        let ed = LineEditor::from_text("hello");
        assert_eq!(ed.cursor(), 5);
        assert!(!ed.is_dirty());
    }

    #[test]
    fn test_insert_char_at_cursor() {
        let mut ed = LineEditor::from_text("helo");
        ed.move_cursor(Direction::Left);
        ed.insert_char('l');
        assert_eq!(ed.text(), "hello");
        assert_eq!(ed.cursor(), 4);
        assert!(ed.is_dirty());
    }

    #[test]
    fn test_newlines_are_not_inserted() {
        let mut ed = LineEditor::from_text("a");
        ed.insert_char('\n');
        assert_eq!(ed.text(), "a");
        ed.insert_str("b\r\nc");
        assert_eq!(ed.text(), "ab c");
    }

    #[test]
    fn test_delete_back_multibyte() {
        let mut ed = LineEditor::from_text("café");
        assert!(ed.delete_back());
        assert_eq!(ed.text(), "caf");
        assert_eq!(ed.cursor(), 3);
    }

    #[test]
    fn test_delete_back_at_start_does_nothing() {
        let mut ed = LineEditor::from_text("x");
        ed.move_home();
        assert!(!ed.delete_back());
        assert!(!ed.is_dirty());
    }

    #[test]
    fn test_delete_forward() {
        let mut ed = LineEditor::from_text("abc");
        ed.move_home();
        assert!(ed.delete_forward());
        assert_eq!(ed.text(), "bc");
        ed.move_end();
        assert!(!ed.delete_forward());
    }

    #[test]
    fn test_move_right_stops_at_end() {
        let mut ed = LineEditor::from_text("ab");
        ed.move_cursor(Direction::Right);
        assert_eq!(ed.cursor(), 2);
    }

    #[test]
    fn test_clear_to_start() {
        let mut ed = LineEditor::from_text("Sign Up now");
        ed.move_word_left();
        ed.clear_to_start();
        assert_eq!(ed.text(), "now");
        assert_eq!(ed.cursor(), 0);
    }

    #[test]
    fn test_word_movement() {
        let mut ed = LineEditor::from_text("Join the program");
        ed.move_word_left();
        assert_eq!(ed.cursor(), 9);
        ed.move_word_left();
        assert_eq!(ed.cursor(), 5);
        ed.move_word_right();
        assert_eq!(ed.cursor(), 9);
    }

    #[test]
    fn test_display_col_counts_wide_chars() {
        let ed = LineEditor::from_text("日本");
        assert_eq!(ed.cursor(), 6);
        assert_eq!(ed.display_col(), 4);
    }
}
