/// Search input state for the TUI
pub struct SearchState {
    pub query: String,
    /// Byte offset into `query`, always on a char boundary
    pub cursor_pos: usize,
    pub focused: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            cursor_pos: 0,
            focused: true,
        }
    }
}

impl SearchState {
    pub fn with_query(query: impl Into<String>) -> Self {
        let query = query.into();
        let cursor_pos = query.len();
        Self {
            query,
            cursor_pos,
            focused: true,
        }
    }

    pub fn insert(&mut self, c: char) {
        self.query.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor_pos > 0 {
            let prev = self.prev_boundary();
            self.query.remove(prev);
            self.cursor_pos = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor_pos < self.query.len() {
            self.query.remove(self.cursor_pos);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos = self.prev_boundary();
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor_pos < self.query.len() {
            self.cursor_pos = self.query[self.cursor_pos..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_pos + i)
                .unwrap_or(self.query.len());
        }
    }

    pub fn home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn end(&mut self) {
        self.cursor_pos = self.query.len();
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor_pos = 0;
    }

    /// Display columns between the start of the input and the cursor
    pub fn cursor_column(&self) -> usize {
        unicode_width::UnicodeWidthStr::width(&self.query[..self.cursor_pos])
    }

    fn prev_boundary(&self) -> usize {
        self.query[..self.cursor_pos]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_multibyte() {
        let mut search = SearchState::default();
        for c in "saúde".chars() {
            search.insert(c);
        }
        assert_eq!(search.query, "saúde");
        assert_eq!(search.cursor_pos, "saúde".len());

        search.move_left();
        search.move_left();
        search.move_left();
        search.backspace();
        assert_eq!(search.query, "súde");

        search.delete();
        assert_eq!(search.query, "sde");

        search.end();
        search.insert('!');
        assert_eq!(search.query, "sde!");
        assert_eq!(search.cursor_column(), 4);
    }

    #[test]
    fn test_with_query_puts_cursor_at_end() {
        let mut search = SearchState::with_query("amil");
        assert_eq!(search.cursor_pos, 4);
        search.home();
        search.move_right();
        assert_eq!(search.cursor_pos, 1);
        search.clear();
        assert_eq!(search.cursor_pos, 0);
        assert!(search.query.is_empty());
    }
}
