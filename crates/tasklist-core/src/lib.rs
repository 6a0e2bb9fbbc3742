//! Domain types, deadline logic and list queries for tasklist.

/// Deadline arithmetic and relative labels.
pub mod date;
/// Identifier types.
pub mod id;
/// Filtering and ordering of task lists.
pub mod query;
/// Status and category enums.
pub mod status;
/// Free-text search over tasks.
pub mod text_matcher;
mod wire;

pub use crate::date::{RelativeDate, is_overdue, relative_label};
pub use crate::id::TaskId;
pub use crate::query::{StatusFilter, TaskQuery};
pub use crate::status::{Category, Status};

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, Time};

/// A single to-do item as persisted in the task snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier assigned at creation.
    pub id: TaskId,
    /// Human-readable title, never empty.
    pub title: String,
    /// Optional calendar deadline.
    #[serde(default, with = "wire::optional_date")]
    pub deadline: Option<Date>,
    /// Optional clock time; only shown together with a deadline.
    #[serde(default, with = "wire::optional_time")]
    pub time: Option<Time>,
    /// Badge category.
    #[serde(default, deserialize_with = "wire::null_as_default::deserialize")]
    pub category: Category,
    /// Free-form notes (empty when absent).
    #[serde(default, deserialize_with = "wire::null_as_default::deserialize")]
    pub notes: String,
    /// Completion status.
    #[serde(default)]
    pub status: Status,
    /// Creation timestamp.
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Task {
    /// Create a pending task without schedule or notes.
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>, created_at: OffsetDateTime) -> Self {
        Self {
            id,
            title: title.into(),
            deadline: None,
            time: None,
            category: Category::default(),
            notes: String::new(),
            status: Status::Pending,
            created_at,
        }
    }

    /// Whether the task is overdue relative to `today`.
    #[must_use]
    pub fn is_overdue(&self, today: Date) -> bool {
        is_overdue(self, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use time::macros::{date, datetime, time};

    fn ok<T, E: std::fmt::Display>(result: Result<T, E>, context: &str) -> T {
        result.unwrap_or_else(|err| panic!("{context}: {err}"))
    }

    #[test]
    fn serializes_with_original_field_names() {
        let id: TaskId = ok("abc123".parse(), "parse id");
        let mut task = Task::new(id, "Dentist", datetime!(2024-04-02 10:15:00 UTC));
        task.deadline = Some(date!(2024 - 04 - 20));
        task.time = Some(time!(08:30));
        task.category = Category::Health;
        task.status = Status::NotDone;

        let value = ok(serde_json::to_value(&task), "serialize");
        assert_eq!(
            value,
            json!({
                "id": "abc123",
                "title": "Dentist",
                "deadline": "2024-04-20",
                "time": "08:30",
                "category": "health",
                "notes": "",
                "status": "notdone",
                "createdAt": "2024-04-02T10:15:00Z",
            })
        );
    }

    #[test]
    fn deserializes_sparse_browser_records() {
        let raw = json!({
            "id": "lq2x9k0abc",
            "title": "Buy milk",
            "deadline": "",
            "time": "",
            "notes": null,
            "status": "pending",
            "createdAt": "2024-04-02T10:15:00.123Z",
        });
        let task: Task = ok(serde_json::from_value(raw), "deserialize");
        assert_eq!(task.deadline, None);
        assert_eq!(task.time, None);
        assert_eq!(task.category, Category::Other);
        assert_eq!(task.notes, "");
        assert_eq!(task.created_at.millisecond(), 123);
    }

    #[test]
    fn null_category_reads_as_other() {
        let raw = json!({
            "id": "legacy",
            "title": "Old record",
            "category": null,
            "createdAt": "2024-04-02T10:15:00Z",
        });
        let task: Task = ok(serde_json::from_value(raw), "deserialize");
        assert_eq!(task.category, Category::Other);
    }

    #[test]
    fn stored_seconds_survive_reload() {
        let mut task = Task::new(TaskId::new(), "Gym", datetime!(2024-06-01 06:00 UTC));
        task.deadline = Some(date!(2024 - 06 - 20));
        task.time = Some(time!(07:05:30));

        let value = ok(serde_json::to_value(&task), "serialize");
        assert_eq!(value["time"], "07:05:30");
        let reloaded: Task = ok(serde_json::from_value(value), "deserialize");
        assert_eq!(reloaded, task);
    }

    #[test]
    fn rejects_unknown_status() {
        let raw: Value = json!({
            "id": "x",
            "title": "t",
            "status": "archived",
            "createdAt": "2024-04-02T10:15:00Z",
        });
        assert!(serde_json::from_value::<Task>(raw).is_err());
    }
}
