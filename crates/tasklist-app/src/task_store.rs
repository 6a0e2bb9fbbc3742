//! Ordered task collection with write-through persistence.

use tasklist_core::date::ParseFieldError;
use tasklist_core::status::UnknownTokenError;
use tasklist_core::{Status, Task, TaskId};
use tasklist_store::{KeyValueStore, StoreError, load_tasks, save_tasks};
use time::Date;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock, normalize_timestamp};
use crate::task_patch::TaskFields;

/// Errors that reject a mutation before anything changes.
#[derive(thiserror::Error, Debug)]
pub enum TaskWriteError {
    /// Title was empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,
    /// A date or time field could not be parsed.
    #[error(transparent)]
    InvalidField(#[from] ParseFieldError),
    /// The category token is unknown.
    #[error(transparent)]
    InvalidCategory(#[from] UnknownTokenError),
}

/// Result returned by every accepted mutation.
#[derive(Debug, Default)]
#[must_use]
pub struct TaskWriteResult {
    /// Task affected by the mutation, `None` when nothing changed.
    pub task: Option<TaskId>,
    /// Backend failure raised while persisting; the in-memory change is kept.
    pub persist_warning: Option<StoreError>,
}

impl TaskWriteResult {
    const fn unchanged() -> Self {
        Self {
            task: None,
            persist_warning: None,
        }
    }

    /// Whether the collection was modified.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.task.is_some()
    }
}

/// Sole owner of the ordered task sequence.
///
/// Every mutator persists the whole collection as its last step.
pub struct TaskStore<S> {
    backend: S,
    key: String,
    tasks: Vec<Task>,
    clock: Box<dyn Clock>,
}

impl<S> TaskStore<S>
where
    S: KeyValueStore,
{
    /// Load the collection persisted under `key` using the system clock.
    pub fn load(backend: S, key: impl Into<String>) -> Self {
        Self::load_with_clock(backend, key, Box::new(SystemClock))
    }

    /// Load the collection persisted under `key` with an explicit clock.
    pub fn load_with_clock(backend: S, key: impl Into<String>, clock: Box<dyn Clock>) -> Self {
        let key = key.into();
        let tasks = load_tasks(&backend, &key);
        info!(key = %key, count = tasks.len(), "Loaded tasks");
        Self {
            backend,
            key,
            tasks,
            clock,
        }
    }

    /// Tasks in store order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by id.
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Whether a task with `id` exists.
    pub fn contains(&self, id: &TaskId) -> bool {
        self.position(id).is_some()
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true when the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Today's date according to the store clock.
    pub fn today(&self) -> Date {
        self.clock.today()
    }

    /// Borrow the storage backend.
    pub const fn backend(&self) -> &S {
        &self.backend
    }

    /// Append a new pending task.
    ///
    /// # Errors
    /// Returns [`TaskWriteError::EmptyTitle`] without mutating when the title is blank.
    pub fn add(&mut self, fields: TaskFields) -> Result<TaskWriteResult, TaskWriteError> {
        let fields = fields.normalized()?;
        let id = self.fresh_id();
        let mut task = Task::new(id.clone(), String::new(), normalize_timestamp(self.clock.now()));
        fields.apply_to(&mut task);
        info!(task = %id, title = %task.title, "Added task");
        self.tasks.push(task);
        Ok(self.persist(id))
    }

    /// Change the status of a task. Unknown ids are ignored.
    pub fn set_status(&mut self, id: &TaskId, status: Status) -> TaskWriteResult {
        let Some(task) = self.tasks.iter_mut().find(|task| &task.id == id) else {
            debug!(task = %id, "Ignoring status change for unknown task");
            return TaskWriteResult::unchanged();
        };
        task.status = status;
        info!(task = %id, %status, "Changed task status");
        self.persist(id.clone())
    }

    /// Overwrite the editable fields of a task. Unknown ids are ignored.
    ///
    /// # Errors
    /// Returns [`TaskWriteError::EmptyTitle`] and keeps the previous values when the title is blank.
    pub fn update(&mut self, id: &TaskId, fields: TaskFields) -> Result<TaskWriteResult, TaskWriteError> {
        let Some(index) = self.position(id) else {
            debug!(task = %id, "Ignoring update for unknown task");
            return Ok(TaskWriteResult::unchanged());
        };
        let fields = fields.normalized()?;
        fields.apply_to(&mut self.tasks[index]);
        info!(task = %id, "Updated task");
        Ok(self.persist(id.clone()))
    }

    /// Delete a task. Unknown ids are ignored.
    pub fn remove(&mut self, id: &TaskId) -> TaskWriteResult {
        let Some(index) = self.position(id) else {
            debug!(task = %id, "Ignoring removal of unknown task");
            return TaskWriteResult::unchanged();
        };
        self.tasks.remove(index);
        info!(task = %id, "Removed task");
        self.persist(id.clone())
    }

    /// Move `moved` to the index `target` occupied before the move.
    ///
    /// Moving down therefore lands after the target and moving up lands before it.
    /// Missing ids and `moved == target` are ignored.
    pub fn reorder(&mut self, moved: &TaskId, target: &TaskId) -> TaskWriteResult {
        if moved == target {
            return TaskWriteResult::unchanged();
        }
        let (Some(from), Some(to)) = (self.position(moved), self.position(target)) else {
            debug!(%moved, %target, "Ignoring reorder with unknown task");
            return TaskWriteResult::unchanged();
        };
        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        info!(%moved, from, to, "Reordered task");
        self.persist(moved.clone())
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| &task.id == id)
    }

    fn fresh_id(&self) -> TaskId {
        loop {
            let id = TaskId::new();
            if !self.contains(&id) {
                return id;
            }
        }
    }

    fn persist(&self, task: TaskId) -> TaskWriteResult {
        let persist_warning = save_tasks(&self.backend, &self.key, &self.tasks)
            .inspect_err(|err| warn!(key = %self.key, error = %err, "Failed to persist tasks"))
            .err();
        TaskWriteResult {
            task: Some(task),
            persist_warning,
        }
    }
}
