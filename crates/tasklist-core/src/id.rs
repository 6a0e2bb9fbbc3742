use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;
use uuid::Uuid;

/// Identifier of a task.
///
/// Freshly generated ids are UUID v7 strings, but any non-empty string is
/// accepted when parsing so that previously persisted ids keep loading.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct TaskId(String);

impl TaskId {
    #[must_use]
    /// Generate a fresh task identifier.
    pub fn new() -> Self {
        // Version 7 keeps ids roughly ordered by creation time.
        Self(Uuid::now_v7().to_string())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

/// Error returned when a task id cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("task id must not be empty")]
pub struct ParseTaskIdError;

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TaskId {
    type Err = ParseTaskIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseTaskIdError);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl Serialize for TaskId {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
