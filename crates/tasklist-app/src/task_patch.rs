use tasklist_core::date::{format_clock_time, format_deadline, parse_clock_time, parse_deadline, whole_minutes};
use tasklist_core::{Category, Task};
use time::{Date, Time};

use crate::task_store::TaskWriteError;

/// Editable task fields shared by creation and edit-save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFields {
    /// Task title; trimmed and required to be non-empty.
    pub title: String,
    /// Optional deadline date.
    pub deadline: Option<Date>,
    /// Optional clock time.
    pub time: Option<Time>,
    /// Badge category.
    pub category: Category,
    /// Free-form notes; trimmed.
    pub notes: String,
}

impl TaskFields {
    /// Fields with only a title set.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the deadline date.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Date) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the clock time.
    #[must_use]
    pub const fn with_time(mut self, time: Time) -> Self {
        self.time = Some(time);
        self
    }

    /// Set the category.
    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Set the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Build fields from raw form values (`YYYY-MM-DD`, `HH:MM`, category token).
    ///
    /// # Errors
    /// Returns [`TaskWriteError`] when a date, time or category cannot be parsed.
    pub fn from_form(
        title: &str,
        deadline: &str,
        time: &str,
        category: &str,
        notes: &str,
    ) -> Result<Self, TaskWriteError> {
        let category = if category.trim().is_empty() {
            Category::default()
        } else {
            category.parse()?
        };
        Ok(Self {
            title: title.to_owned(),
            deadline: parse_deadline(deadline)?,
            time: parse_clock_time(time)?,
            category,
            notes: notes.to_owned(),
        })
    }

    /// Current values of an existing task.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            deadline: task.deadline,
            time: task.time,
            category: task.category,
            notes: task.notes.clone(),
        }
    }

    /// Trim text fields, drop seconds from the time and reject an empty title.
    ///
    /// # Errors
    /// Returns [`TaskWriteError::EmptyTitle`] when the trimmed title is empty.
    pub fn normalized(self) -> Result<Self, TaskWriteError> {
        let title = self.title.trim().to_owned();
        if title.is_empty() {
            return Err(TaskWriteError::EmptyTitle);
        }
        Ok(Self {
            title,
            notes: self.notes.trim().to_owned(),
            time: self.time.map(whole_minutes),
            ..self
        })
    }

    /// Overwrite the editable fields of `task`.
    pub(crate) fn apply_to(self, task: &mut Task) {
        task.title = self.title;
        task.deadline = self.deadline;
        task.time = self.time;
        task.category = self.category;
        task.notes = self.notes;
    }

    /// Deadline as shown in a date input (empty when unset).
    #[must_use]
    pub fn deadline_input(&self) -> String {
        self.deadline.map(format_deadline).unwrap_or_default()
    }

    /// Time as shown in a time input (empty when unset).
    #[must_use]
    pub fn time_input(&self) -> String {
        self.time.map(format_clock_time).unwrap_or_default()
    }
}
