use ropey::Rope;

/// Note text addressed by character index.
///
/// Every offset the engine hands around (caret, token ranges, trigger
/// anchors) is a char index into this buffer, never a byte index.
#[derive(Debug, Clone)]
pub struct Buffer {
    text: Rope,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Buffer {}

impl Buffer {
    pub fn new() -> Self {
        Self { text: Rope::new() }
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            text: Rope::from_str(s),
        }
    }

    /// Insert text at character index
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        let idx = char_idx.min(self.text.len_chars());
        self.text.insert(idx, text);
    }

    /// Delete characters in range [start, end)
    pub fn delete(&mut self, start: usize, end: usize) {
        let start = start.min(self.text.len_chars());
        let end = end.min(self.text.len_chars());
        if start < end {
            self.text.remove(start..end);
        }
    }

    /// Get total line count
    pub fn line_count(&self) -> usize {
        self.text.len_lines()
    }

    /// Get line as String (without trailing newline)
    pub fn line_str(&self, line_idx: usize) -> Option<String> {
        if line_idx < self.text.len_lines() {
            let s: String = self.text.line(line_idx).chars().collect();
            Some(s.trim_end_matches('\n').to_string())
        } else {
            None
        }
    }

    /// Get character count for a line (excluding newline)
    pub fn line_len(&self, line_idx: usize) -> usize {
        if line_idx >= self.text.len_lines() {
            return 0;
        }
        let len = self.text.line(line_idx).len_chars();
        // Subtract 1 for newline if not last line
        if line_idx + 1 < self.text.len_lines() && len > 0 {
            len - 1
        } else {
            len
        }
    }

    /// Convert (line, col) to absolute char index
    pub fn line_col_to_char(&self, line: usize, col: usize) -> usize {
        if line >= self.text.len_lines() {
            return self.text.len_chars();
        }
        let line_start = self.text.line_to_char(line);
        line_start + col.min(self.line_len(line))
    }

    /// Convert absolute char index to (line, col)
    pub fn char_to_line_col(&self, char_idx: usize) -> (usize, usize) {
        let idx = char_idx.min(self.text.len_chars());
        let line = self.text.char_to_line(idx);
        let line_start = self.text.line_to_char(line);
        (line, idx - line_start)
    }

    /// Get character at position
    pub fn char_at(&self, char_idx: usize) -> Option<char> {
        if char_idx < self.text.len_chars() {
            Some(self.text.char(char_idx))
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.len_chars() == 0
    }

    /// Get total character count
    pub fn len_chars(&self) -> usize {
        self.text.len_chars()
    }

    /// Text in [start, end), clamped to the buffer
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.text.len_chars());
        let start = start.min(end);
        self.text.slice(start..end).to_string()
    }

    /// Convert a byte offset in `to_string()` output to a char index
    pub fn byte_to_char(&self, byte_idx: usize) -> usize {
        self.text.byte_to_char(byte_idx.min(self.text.len_bytes()))
    }

    /// Char indices of every non-overlapping occurrence of `needle`, left to right
    pub fn find_all(&self, needle: &str) -> Vec<usize> {
        if needle.is_empty() {
            return Vec::new();
        }
        self.text
            .to_string()
            .match_indices(needle)
            .map(|(byte_idx, _)| self.byte_to_char(byte_idx))
            .collect()
    }
}

impl std::fmt::Display for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for chunk in self.text.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}
