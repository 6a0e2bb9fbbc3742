//! Status/search filtering and deadline ordering of task lists.

use std::borrow::Borrow;
use std::cmp::Reverse;
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::date::is_overdue;
use crate::status::UnknownTokenError;
use crate::text_matcher::TextMatcher;
use crate::{Status, Task};

/// Status predicate selected by the filter buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Pass every task.
    #[default]
    All,
    /// Only pending tasks.
    Pending,
    /// Only completed tasks.
    Done,
    /// Only tasks marked as not done.
    NotDone,
    /// Only overdue tasks, whatever their stored status.
    Overdue,
}

impl StatusFilter {
    /// Token used by hosts for filter buttons.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Done => "done",
            Self::NotDone => "notdone",
            Self::Overdue => "overdue",
        }
    }

    /// Whether the task passes this status predicate.
    #[must_use]
    pub fn matches(self, task: &Task, today: Date) -> bool {
        match self {
            Self::All => true,
            Self::Overdue => is_overdue(task, today),
            Self::Pending => task.status == Status::Pending,
            Self::Done => task.status == Status::Done,
            Self::NotDone => task.status == Status::NotDone,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "overdue" => Ok(Self::Overdue),
            other => other
                .parse::<Status>()
                .map(Self::from)
                .map_err(|_| UnknownTokenError::new("status filter", s)),
        }
    }
}

impl From<Status> for StatusFilter {
    fn from(status: Status) -> Self {
        match status {
            Status::Pending => Self::Pending,
            Status::Done => Self::Done,
            Status::NotDone => Self::NotDone,
        }
    }
}

/// Combination of a status filter and a search text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Selected status predicate.
    pub status: StatusFilter,
    /// Raw search text as typed by the user.
    pub search: String,
}

impl TaskQuery {
    /// Create a query from its parts.
    #[must_use]
    pub fn new(status: StatusFilter, search: impl Into<String>) -> Self {
        Self {
            status,
            search: search.into(),
        }
    }

    /// Returns true when the search text would narrow the result.
    #[must_use]
    pub fn has_search(&self) -> bool {
        !self.search.is_empty()
    }

    /// Filter then sort the tasks, keeping store order for ties.
    #[must_use]
    pub fn apply<'a>(&self, tasks: &'a [Task], today: Date) -> Vec<&'a Task> {
        let mut visible = filter(tasks, self.status, &self.search, today);
        sort(&mut visible, today);
        visible
    }
}

/// Keep tasks passing both the status predicate and the search text.
#[must_use]
pub fn filter<'a>(tasks: &'a [Task], status: StatusFilter, search: &str, today: Date) -> Vec<&'a Task> {
    let matcher = TextMatcher::new(search);
    tasks
        .iter()
        .filter(|task| status.matches(task, today))
        .filter(|task| matcher.as_ref().is_none_or(|m| m.matches(task)))
        .collect()
}

/// Stable sort: overdue first, then dated before undated, then by deadline.
pub fn sort<T: Borrow<Task>>(tasks: &mut [T], today: Date) {
    tasks.sort_by_key(|task| sort_key(<T as Borrow<Task>>::borrow(task), today));
}

fn sort_key(task: &Task, today: Date) -> (Reverse<bool>, bool, Option<Date>) {
    (
        Reverse(is_overdue(task, today)),
        task.deadline.is_none(),
        task.deadline,
    )
}
