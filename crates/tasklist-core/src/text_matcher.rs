use crate::Task;

/// Case-insensitive substring matcher over a task's title and notes.
#[derive(Debug, Clone)]
pub struct TextMatcher {
    needle: String,
}

impl TextMatcher {
    /// Lowercase a query string into a matcher. Returns `None` for empty input.
    ///
    /// Whitespace is part of the needle.
    #[must_use]
    pub fn new(query: &str) -> Option<Self> {
        if query.is_empty() {
            return None;
        }
        Some(Self {
            needle: query.to_lowercase(),
        })
    }

    /// Determine whether the title or the notes contain the query.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_field(&task.title) || self.matches_field(&task.notes)
    }

    fn matches_field(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.needle)
    }
}
