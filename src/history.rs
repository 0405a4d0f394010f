use std::collections::VecDeque;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

pub struct InputHistory {
    entries: VecDeque<String>,
    capacity: usize,
    cursor: Option<usize>,
}

impl Default for InputHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl InputHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
            cursor: None,
        }
    }

    pub fn submit(&mut self, line: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line.into());
        self.cursor = None;
    }

    /// Steps toward older entries. Stops at the oldest one instead of wrapping.
    pub fn recall_previous(&mut self) -> Option<&str> {
        let last = self.entries.len().checked_sub(1)?;
        let idx = match self.cursor {
            None => last,
            Some(idx) => idx.saturating_sub(1),
        };
        self.cursor = Some(idx);
        self.entries.get(idx).map(String::as_str)
    }

    /// Steps toward newer entries. `None` means the cursor moved past the newest entry and
    /// the input field should be emptied.
    pub fn recall_next(&mut self) -> Option<&str> {
        let idx = self.cursor? + 1;
        if idx < self.entries.len() {
            self.cursor = Some(idx);
            self.entries.get(idx).map(String::as_str)
        } else {
            self.cursor = None;
            None
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
impl InputHistory {
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(lines: &[&str]) -> InputHistory {
        let mut history = InputHistory::default();
        for line in lines {
            history.submit(*line);
        }
        history
    }

    #[test]
    fn recall_on_empty_history() {
        let mut history = InputHistory::default();
        assert_eq!(history.recall_previous(), None);
        assert_eq!(history.recall_next(), None);
        assert_eq!(history.cursor(), None);
    }

    #[test]
    fn previous_walks_newest_to_oldest_then_sticks() {
        let mut history = history_of(&["one", "two", "three"]);

        assert_eq!(history.recall_previous(), Some("three"));
        assert_eq!(history.recall_previous(), Some("two"));
        assert_eq!(history.recall_previous(), Some("one"));
        assert_eq!(history.recall_previous(), Some("one"));
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn next_walks_forward_then_clears() {
        let mut history = history_of(&["one", "two"]);
        history.recall_previous();
        history.recall_previous();

        assert_eq!(history.recall_next(), Some("two"));
        assert_eq!(history.recall_next(), None);
        assert_eq!(history.cursor(), None);
        assert_eq!(history.recall_next(), None);
    }

    #[test]
    fn submit_resets_cursor_and_keeps_duplicates() {
        let mut history = history_of(&["same"]);
        history.recall_previous();
        history.submit("same");

        assert_eq!(history.cursor(), None);
        assert_eq!(history.len(), 2);
        assert_eq!(history.recall_previous(), Some("same"));
    }

    #[test]
    fn oldest_evicted_past_capacity() {
        let mut history = InputHistory::default();
        for i in 0..=DEFAULT_HISTORY_CAPACITY {
            history.submit(format!("cmd {i}"));
        }

        assert_eq!(history.len(), DEFAULT_HISTORY_CAPACITY);
        assert!(history.entries().all(|line| line != "cmd 0"));

        let mut oldest = None;
        for _ in 0..=DEFAULT_HISTORY_CAPACITY {
            oldest = history.recall_previous().map(str::to_owned);
        }
        assert_eq!(oldest.as_deref(), Some("cmd 1"));
    }
}
