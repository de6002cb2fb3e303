use crate::modules::navigation::{NAVIGATION, SUBMENUS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTarget {
    Nav(&'static str),
    SubmenuItem {
        submenu: &'static str,
        item: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub target: SearchTarget,
    pub label: String,
    score: i32,
}

/// Search overlay state. The query survives closing and reopening.
#[derive(Debug, Clone, Default)]
pub struct Search {
    open: bool,
    query: String,
    /// Cursor position in chars.
    cursor: usize,
    results: Vec<SearchResult>,
    selected: usize,
}

impl Search {
    pub fn new() -> Self {
        let mut search = Self::default();
        search.rebuild();
        search
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
        self.cursor = self.query.chars().count();
        self.rebuild();
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_result(&self) -> Option<&SearchResult> {
        self.results.get(self.selected)
    }

    pub fn input_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.query.insert(at, c);
        self.cursor += 1;
        self.rebuild();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_offset(self.cursor - 1);
            self.query.remove(at);
            self.cursor -= 1;
            self.rebuild();
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.query.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn next(&mut self) {
        if !self.results.is_empty() {
            self.selected = (self.selected + 1) % self.results.len();
        }
    }

    pub fn previous(&mut self) {
        if !self.results.is_empty() {
            if self.selected == 0 {
                self.selected = self.results.len() - 1;
            } else {
                self.selected -= 1;
            }
        }
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.query
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    fn rebuild(&mut self) {
        let mut results = Vec::new();
        for item in NAVIGATION {
            if let Some(score) = score_match(item.label, &self.query) {
                results.push(SearchResult {
                    target: SearchTarget::Nav(item.id),
                    label: format!("{} {}", item.icon, item.label),
                    score,
                });
            }
        }
        for menu in SUBMENUS {
            for item in menu.items {
                if let Some(score) = score_match(item.label, &self.query) {
                    results.push(SearchResult {
                        target: SearchTarget::SubmenuItem {
                            submenu: menu.id,
                            item: item.id,
                        },
                        label: format!("{} {} · {}", item.icon, item.label, menu.title),
                        score,
                    });
                }
            }
        }
        results.sort_by_key(|r| r.score);
        self.results = results;
        self.selected = 0;
    }
}

/// Lower is better. Substring hits rank by position, then subsequences by spread.
fn score_match(candidate: &str, query: &str) -> Option<i32> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Some(0);
    }
    let c = candidate.to_lowercase();
    if let Some(idx) = c.find(&q) {
        return Some(idx as i32);
    }

    let mut wanted = q.chars().peekable();
    let mut sum_pos = 0i32;
    for (i, ch) in c.chars().enumerate() {
        if wanted.peek() == Some(&ch) {
            sum_pos += i as i32;
            wanted.next();
        }
    }
    // Subsequence matches always rank behind substring matches.
    if wanted.peek().is_none() {
        Some(1000 + sum_pos)
    } else {
        None
    }
}
