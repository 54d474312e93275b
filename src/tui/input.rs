// ── Single-line text input with cursor ──────────────────────────────────────

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize, // byte position
}

impl TextInput {
    pub fn new() -> Self { Self::default() }

    /// Replaces the content and parks the cursor at the end.
    pub fn set(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.len();
    }

    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Inserts pasted text; line breaks are dropped since every field is one line.
    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars().filter(|c| *c != '\n' && *c != '\r') {
            self.insert_char(c);
        }
    }

    pub fn delete_char_before(&mut self) {
        if self.cursor == 0 { return; }
        let prev = self.value[..self.cursor]
            .char_indices().next_back().map(|(i, _)| i).unwrap_or(0);
        self.value.remove(prev);
        self.cursor = prev;
    }

    pub fn delete_char_after(&mut self) {
        if self.cursor >= self.value.len() { return; }
        self.value.remove(self.cursor);
    }

    pub fn move_left(&mut self) {
        if self.cursor == 0 { return; }
        self.cursor = self.value[..self.cursor]
            .char_indices().next_back().map(|(i, _)| i).unwrap_or(0);
    }

    pub fn move_right(&mut self) {
        if let Some(ch) = self.value[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    pub fn move_home(&mut self) { self.cursor = 0; }
    pub fn move_end(&mut self) { self.cursor = self.value.len(); }

    pub fn clear(&mut self) { self.value.clear(); self.cursor = 0; }

    /// Returns (text_before_cursor, cursor_char_or_space, text_after_cursor)
    pub fn split_at_cursor(&self) -> (&str, &str, &str) {
        let before = &self.value[..self.cursor];
        if self.cursor >= self.value.len() {
            (before, " ", "")
        } else {
            let ch_end = self.cursor + self.value[self.cursor..].chars().next().map(|c| c.len_utf8()).unwrap_or(1);
            (before, &self.value[self.cursor..ch_end], &self.value[ch_end..])
        }
    }
}

/// Applies an editing key. Returns true when the value changed.
pub fn handle_text_input_key(input: &mut TextInput, key: KeyEvent) -> bool {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER) {
        return false;
    }
    let before = input.value.len();
    match key.code {
        KeyCode::Char(c) => { input.insert_char(c); return true; }
        KeyCode::Backspace => input.delete_char_before(),
        KeyCode::Delete => input.delete_char_after(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => {}
    }
    input.value.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backspace_removes_multibyte_char() {
        let mut input = TextInput::new();
        input.set("ké");
        input.delete_char_before();
        assert_eq!(input.value, "k");
        assert_eq!(input.cursor, 1);
    }

    #[test]
    fn paste_drops_line_breaks() {
        let mut input = TextInput::new();
        input.insert_str("sk-1\r\n23");
        assert_eq!(input.value, "sk-123");
    }
}
