//! Serialized form of the task collection.
//!
//! The snapshot is a JSON array of task records in store order. Nothing
//! besides the tasks themselves is persisted.

use std::collections::HashSet;

use tasklist_core::Task;
use tracing::{debug, warn};

use crate::{KeyValueStore, StoreResult};

/// Serialize tasks into the persisted JSON form.
///
/// # Errors
/// Returns an error if a task cannot be serialized.
pub fn encode_tasks(tasks: &[Task]) -> StoreResult<String> {
    Ok(serde_json::to_string(tasks)?)
}

/// Parse the persisted JSON form. Records repeating an earlier id are dropped.
///
/// # Errors
/// Returns an error if the text is not a valid task array.
pub fn decode_tasks(raw: &str) -> Result<Vec<Task>, serde_json::Error> {
    let tasks: Vec<Task> = serde_json::from_str(raw)?;
    let mut seen = HashSet::with_capacity(tasks.len());
    let before = tasks.len();
    let unique: Vec<Task> = tasks
        .into_iter()
        .filter(|task| seen.insert(task.id.clone()))
        .collect();
    if unique.len() != before {
        warn!(dropped = before - unique.len(), "Dropped tasks with duplicate ids");
    }
    Ok(unique)
}

/// Persist the full collection under `key`.
///
/// # Errors
/// Returns an error if serialization or the backend write fails.
pub fn save_tasks<S>(store: &S, key: &str, tasks: &[Task]) -> StoreResult<()>
where
    S: KeyValueStore + ?Sized,
{
    let encoded = encode_tasks(tasks)?;
    store.set(key, &encoded)?;
    debug!(key, count = tasks.len(), "Saved task snapshot");
    Ok(())
}

/// Load the collection stored under `key`.
///
/// Absent, unreadable and corrupt snapshots all yield an empty collection.
pub fn load_tasks<S>(store: &S, key: &str) -> Vec<Task>
where
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No task snapshot stored");
            return Vec::new();
        }
        Err(err) => {
            warn!(key, error = %err, "Failed to read task snapshot");
            return Vec::new();
        }
    };

    match decode_tasks(&raw) {
        Ok(tasks) => {
            debug!(key, count = tasks.len(), "Loaded task snapshot");
            tasks
        }
        Err(err) => {
            warn!(key, error = %err, "Ignoring corrupt task snapshot");
            Vec::new()
        }
    }
}
