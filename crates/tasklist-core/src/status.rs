use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Completion status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Task has not been resolved yet.
    #[default]
    Pending,
    /// Task is completed.
    Done,
    /// Task was explicitly marked as not done.
    NotDone,
}

impl Status {
    /// String representation used in persisted snapshots.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Done => "done",
            Self::NotDone => "notdone",
        }
    }
}

/// Grouping of a task shown as a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Work related.
    Work,
    /// Personal errands.
    Personal,
    /// Shopping list entries.
    Shopping,
    /// Health and fitness.
    Health,
    /// Anything else.
    #[default]
    Other,
}

impl Category {
    /// Every category in the order offered by edit forms.
    pub const ALL: [Self; 5] = [
        Self::Other,
        Self::Work,
        Self::Personal,
        Self::Shopping,
        Self::Health,
    ];

    /// String representation used in persisted snapshots.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Personal => "personal",
            Self::Shopping => "shopping",
            Self::Health => "health",
            Self::Other => "other",
        }
    }
}

/// Error returned when a status or category token is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {token}")]
pub struct UnknownTokenError {
    kind: &'static str,
    token: String,
}

impl UnknownTokenError {
    pub(crate) fn new(kind: &'static str, token: &str) -> Self {
        Self {
            kind,
            token: token.to_owned(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = UnknownTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "done" => Ok(Self::Done),
            "notdone" | "not_done" | "not-done" => Ok(Self::NotDone),
            _ => Err(UnknownTokenError::new("status", s)),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| UnknownTokenError::new("category", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tokens_roundtrip() {
        for status in [Status::Pending, Status::Done, Status::NotDone] {
            assert_eq!(status.as_str().parse::<Status>(), Ok(status));
        }
        assert_eq!(" Not-Done ".parse::<Status>(), Ok(Status::NotDone));
        assert!("finished".parse::<Status>().is_err());
    }

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!("WORK".parse::<Category>(), Ok(Category::Work));
        assert_eq!("health".parse::<Category>(), Ok(Category::Health));
        let Err(err) = "errands".parse::<Category>() else {
            panic!("unknown category should error");
        };
        assert_eq!(err.to_string(), "unknown category: errands");
    }

    #[test]
    fn defaults_match_new_task_values() {
        assert_eq!(Status::default(), Status::Pending);
        assert_eq!(Category::default(), Category::Other);
    }
}
