use crate::mention::Candidate;

/// Autocomplete popup state: the filtered list and its highlighted row
#[derive(Debug, Clone, Default)]
pub struct Dropdown {
    visible: bool,
    items: Vec<Candidate>,
    highlight: usize,
}

impl Dropdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `items`, highlighting the first row
    pub fn open(&mut self, items: Vec<Candidate>) {
        self.visible = true;
        self.items = items;
        self.highlight = 0;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.items.clear();
        self.highlight = 0;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn items(&self) -> &[Candidate] {
        &self.items
    }

    pub fn highlight_index(&self) -> usize {
        self.highlight
    }

    pub fn highlighted(&self) -> Option<&Candidate> {
        self.item(self.highlight)
    }

    pub fn item(&self, index: usize) -> Option<&Candidate> {
        if self.visible {
            self.items.get(index)
        } else {
            None
        }
    }

    /// Move the highlight by `delta` rows, wrapping at both ends
    pub fn move_highlight(&mut self, delta: isize) {
        let n = self.items.len();
        if !self.visible || n == 0 {
            return;
        }
        self.highlight = (self.highlight as isize + delta).rem_euclid(n as isize) as usize;
    }

    /// Highlight a specific row (pointer hover). Out-of-range rows are ignored.
    pub fn set_highlight(&mut self, index: usize) -> bool {
        if self.visible && index < self.items.len() {
            self.highlight = index;
            true
        } else {
            false
        }
    }
}
