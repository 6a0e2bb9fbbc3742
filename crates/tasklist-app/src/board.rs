//! Command dispatcher tying the task store to the transient list UI state.

use tasklist_core::{Status, StatusFilter, TaskId, TaskQuery};
use tasklist_store::{KeyValueStore, StoreError};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::config::{AppConfig, ViewConfig};
use crate::export::{ExportDocument, export_tasks};
use crate::stats::TaskStats;
use crate::task_patch::TaskFields;
use crate::task_store::{TaskStore, TaskWriteError, TaskWriteResult};
use crate::view::{DragState, EditState, ListView, RenderContext, render_list};

/// A discrete user intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Submit the creation form.
    Add(TaskFields),
    /// Mark a task with a new status.
    SetStatus {
        /// Target task.
        id: TaskId,
        /// New status.
        status: Status,
    },
    /// Open or close the inline editor of a task.
    ToggleEdit(TaskId),
    /// Save the inline editor of a task.
    SaveEdit {
        /// Edited task.
        id: TaskId,
        /// Draft values.
        fields: TaskFields,
    },
    /// Close the inline editor without saving.
    CancelEdit,
    /// Stage a task for deletion.
    RequestDelete(TaskId),
    /// Delete the staged task.
    ConfirmDelete,
    /// Clear the staged deletion.
    CancelDelete,
    /// Close the editor and dismiss the delete confirmation.
    Escape,
    /// Begin dragging a task.
    DragStart(TaskId),
    /// Abandon the current drag.
    DragEnd,
    /// Drop the dragged task onto another one.
    Drop {
        /// Task under the pointer.
        target: TaskId,
    },
    /// Move a task directly, without drag state.
    Reorder {
        /// Task to move.
        moved: TaskId,
        /// Task whose slot it takes.
        target: TaskId,
    },
    /// Select a status filter.
    SetFilter(StatusFilter),
    /// Change the search text.
    SetSearch(String),
}

/// Effect of an accepted intent.
#[derive(Debug, Default)]
pub struct DispatchOutcome {
    /// Task the store mutated, `None` when the collection did not change.
    pub task: Option<TaskId>,
    /// Non-fatal persistence failure raised by the mutation.
    pub persist_warning: Option<StoreError>,
}

impl DispatchOutcome {
    /// Whether the task collection changed.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.task.is_some()
    }
}

impl From<TaskWriteResult> for DispatchOutcome {
    fn from(result: TaskWriteResult) -> Self {
        Self {
            task: result.task,
            persist_warning: result.persist_warning,
        }
    }
}

/// Everything a host needs to paint one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    /// Filtered and sorted list.
    pub list: ListView,
    /// Counts over the whole collection.
    pub stats: TaskStats,
    /// Task awaiting delete confirmation.
    pub pending_delete: Option<TaskId>,
    /// Active status filter.
    pub filter: StatusFilter,
    /// Active search text.
    pub search: String,
}

/// Task store plus transient UI state, driven through [`TaskBoard::dispatch`].
pub struct TaskBoard<S> {
    store: TaskStore<S>,
    query: TaskQuery,
    edit: EditState,
    drag: DragState,
    pending_delete: Option<TaskId>,
    view_text: ViewConfig,
    export_prefix: String,
}

impl<S> TaskBoard<S>
where
    S: KeyValueStore,
{
    /// Load the board from `backend` as configured, using the system clock.
    pub fn open(backend: S, config: &AppConfig) -> Self {
        Self::open_with_clock(backend, config, Box::new(SystemClock))
    }

    /// Load the board from `backend` with an explicit clock.
    pub fn open_with_clock(backend: S, config: &AppConfig, clock: Box<dyn Clock>) -> Self {
        let store = TaskStore::load_with_clock(backend, config.storage.key(), clock);
        Self {
            store,
            query: TaskQuery::default(),
            edit: EditState::default(),
            drag: DragState::default(),
            pending_delete: None,
            view_text: config.view.clone(),
            export_prefix: config.export.file_prefix().to_owned(),
        }
    }

    /// Borrow the task store.
    pub const fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    /// Active query.
    pub const fn query(&self) -> &TaskQuery {
        &self.query
    }

    /// Task in edit mode.
    pub const fn editing(&self) -> Option<&TaskId> {
        self.edit.editing()
    }

    /// Task awaiting delete confirmation.
    pub const fn pending_delete(&self) -> Option<&TaskId> {
        self.pending_delete.as_ref()
    }

    /// Task being dragged.
    pub const fn drag_source(&self) -> Option<&TaskId> {
        self.drag.source()
    }

    /// Apply one intent.
    ///
    /// # Errors
    /// Returns [`TaskWriteError`] when an add or edit is rejected; nothing changes in that case.
    pub fn dispatch(&mut self, intent: Intent) -> Result<DispatchOutcome, TaskWriteError> {
        debug!(?intent, "Dispatching intent");
        let outcome = match intent {
            Intent::Add(fields) => self.store.add(fields)?.into(),
            Intent::SetStatus { id, status } => self.store.set_status(&id, status).into(),
            Intent::ToggleEdit(id) => {
                if self.store.contains(&id) {
                    self.edit.toggle(&id);
                }
                DispatchOutcome::default()
            }
            Intent::SaveEdit { id, fields } => self.edit.save(&mut self.store, &id, fields)?.into(),
            Intent::CancelEdit => {
                self.edit.cancel();
                DispatchOutcome::default()
            }
            Intent::RequestDelete(id) => {
                self.request_delete(id);
                DispatchOutcome::default()
            }
            Intent::ConfirmDelete => self.confirm_delete(),
            Intent::CancelDelete => {
                self.cancel_delete();
                DispatchOutcome::default()
            }
            Intent::Escape => {
                self.edit.cancel();
                self.cancel_delete();
                DispatchOutcome::default()
            }
            Intent::DragStart(id) => {
                if self.store.contains(&id) {
                    self.drag.start(&id);
                }
                DispatchOutcome::default()
            }
            Intent::DragEnd => {
                self.drag.end();
                DispatchOutcome::default()
            }
            Intent::Drop { target } => match self.drag.drop_on(&target) {
                Some((moved, target)) => self.store.reorder(&moved, &target).into(),
                None => DispatchOutcome::default(),
            },
            Intent::Reorder { moved, target } => self.store.reorder(&moved, &target).into(),
            Intent::SetFilter(filter) => {
                self.query.status = filter;
                DispatchOutcome::default()
            }
            Intent::SetSearch(search) => {
                self.query.search = search;
                DispatchOutcome::default()
            }
        };
        Ok(outcome)
    }

    /// Stage `id` for deletion. Unknown ids are ignored.
    pub fn request_delete(&mut self, id: TaskId) {
        if self.store.contains(&id) {
            self.pending_delete = Some(id);
        } else {
            debug!(task = %id, "Ignoring delete request for unknown task");
        }
    }

    /// Delete the staged task, if any, and clear the stage.
    pub fn confirm_delete(&mut self) -> DispatchOutcome {
        let Some(id) = self.pending_delete.take() else {
            return DispatchOutcome::default();
        };
        self.edit.forget(&id);
        if self.drag.source() == Some(&id) {
            self.drag.end();
        }
        info!(task = %id, "Confirmed delete");
        self.store.remove(&id).into()
    }

    /// Clear the staged deletion without mutating.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Build the list and stats for the current state.
    pub fn render(&self) -> BoardView {
        let today = self.store.today();
        let ctx = RenderContext {
            today,
            editing: self.edit.editing(),
            dragging: self.drag.source(),
            text: &self.view_text,
        };
        BoardView {
            list: render_list(self.store.tasks(), &self.query, &ctx),
            stats: TaskStats::collect(self.store.tasks(), today),
            pending_delete: self.pending_delete.clone(),
            filter: self.query.status,
            search: self.query.search.clone(),
        }
    }

    /// Serialize the unfiltered collection as a download.
    ///
    /// # Errors
    /// Returns [`StoreError`] if serialization fails.
    pub fn export(&self) -> Result<ExportDocument, StoreError> {
        export_tasks(self.store.tasks(), self.store.today(), &self.export_prefix)
    }
}
