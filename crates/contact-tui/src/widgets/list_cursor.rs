//! Selection + scroll window over a list of `len` rows.
//!
//! The cursor never owns the rows; callers re-sync it with `set_len`
//! whenever the backing sequence is replaced, and all indices it hands out
//! are `< len`.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCursor {
    len: usize,
    pub selected: usize,
    pub scroll_offset: usize,
}

impl ListCursor {
    #[cfg(test)]
    pub fn new(len: usize) -> Self {
        let mut cursor = Self::default();
        cursor.set_len(len);
        cursor
    }

    /// Re-sync with a new row count, clamping selection and scroll.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        if self.scroll_offset > self.selected {
            self.scroll_offset = self.selected;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn selected(&self) -> Option<usize> {
        (self.selected < self.len).then_some(self.selected)
    }

    pub fn select_up(&mut self, n: usize) {
        if self.is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn select_down(&mut self, n: usize) {
        if self.is_empty() {
            return;
        }
        self.selected = (self.selected + n).min(self.len.saturating_sub(1));
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.len.saturating_sub(1);
    }

    /// Select an absolute row index. No-op if out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.len {
            self.selected = index;
            return true;
        }
        false
    }

    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected.saturating_sub(height - 1);
        }
    }

    /// Row indices visible in a window of `height` rows.
    /// Call ensure_visible first to update scroll_offset.
    pub fn visible_range(&self, height: usize) -> std::ops::Range<usize> {
        if height == 0 || self.is_empty() {
            return 0..0;
        }
        let start = self.scroll_offset.min(self.len);
        let end = (start + height).min(self.len);
        start..end
    }
}
