//! Projection of queried tasks into list rows, plus edit-mode and drag state.

use tasklist_core::date::{format_clock_time, format_deadline};
use tasklist_core::{Category, RelativeDate, Status, Task, TaskId, TaskQuery};
use tasklist_store::KeyValueStore;
use time::Date;
use tracing::debug;

use crate::config::ViewConfig;
use crate::task_patch::TaskFields;
use crate::task_store::{TaskStore, TaskWriteError, TaskWriteResult};

/// Interaction offered on a row outside edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    /// Set status to done.
    MarkDone,
    /// Set status to not done.
    MarkNotDone,
    /// Open or close the inline editor.
    ToggleEdit,
    /// Stage the task for deletion.
    RequestDelete,
}

impl RowAction {
    /// Every row action in display order.
    pub const ALL: [Self; 4] = [
        Self::MarkDone,
        Self::MarkNotDone,
        Self::ToggleEdit,
        Self::RequestDelete,
    ];

    /// Button caption.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MarkDone => "Mark Done",
            Self::MarkNotDone => "Mark Not Done",
            Self::ToggleEdit => "Edit",
            Self::RequestDelete => "Remove",
        }
    }
}

/// Interaction offered by the inline editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    /// Validate and write the draft back.
    Save,
    /// Discard the draft.
    Cancel,
}

impl EditAction {
    /// Every editor action in display order.
    pub const ALL: [Self; 2] = [Self::Save, Self::Cancel];

    /// Button caption.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Save => "Save Changes",
            Self::Cancel => "Cancel",
        }
    }
}

/// Prefilled inline editor for the task in edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    /// Title input value.
    pub title: String,
    /// Date input value (`YYYY-MM-DD` or empty).
    pub deadline: String,
    /// Time input value (`HH:MM` or empty).
    pub time: String,
    /// Selected category.
    pub category: Category,
    /// Category choices.
    pub category_options: [Category; 5],
    /// Notes textarea value.
    pub notes: String,
    /// Editor actions.
    pub actions: [EditAction; 2],
}

impl EditForm {
    fn for_task(task: &Task) -> Self {
        let fields = TaskFields::from_task(task);
        Self {
            deadline: fields.deadline_input(),
            time: fields.time_input(),
            title: fields.title,
            category: fields.category,
            category_options: Category::ALL,
            notes: fields.notes,
            actions: EditAction::ALL,
        }
    }
}

/// One rendered task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    /// Task identifier used when dispatching row actions.
    pub id: TaskId,
    /// Title text.
    pub title: String,
    /// Category badge.
    pub category: Category,
    /// Stored status.
    pub status: Status,
    /// Whether the row is highlighted as overdue.
    pub overdue: bool,
    /// `YYYY-MM-DD` or `YYYY-MM-DD at HH:MM`; `None` without deadline.
    pub deadline_text: Option<String>,
    /// Relative deadline label; `None` without deadline.
    pub relative_label: Option<String>,
    /// Notes, or the placeholder when there are none.
    pub notes_text: String,
    /// Whether `notes_text` is the placeholder.
    pub notes_placeholder: bool,
    /// Row actions.
    pub actions: [RowAction; 4],
    /// Inline editor when this row is in edit mode.
    pub edit_form: Option<EditForm>,
    /// Whether this row is the current drag source.
    pub dragging: bool,
}

/// Why the list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The query has no search text: nothing to show yet.
    NoTasks,
    /// The search text hides every task.
    NoMatches,
}

/// Rendered list: either rows or a single placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// Placeholder shown instead of rows.
    Empty {
        /// Which placeholder applies.
        state: EmptyState,
        /// Placeholder text.
        message: String,
    },
    /// Rows in display order.
    Rows(Vec<TaskRow>),
}

impl ListView {
    /// Rendered rows (empty for a placeholder).
    #[must_use]
    pub fn rows(&self) -> &[TaskRow] {
        match self {
            Self::Empty { .. } => &[],
            Self::Rows(rows) => rows,
        }
    }
}

/// Transient state consulted while rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Current local date.
    pub today: Date,
    /// Task in edit mode.
    pub editing: Option<&'a TaskId>,
    /// Task being dragged.
    pub dragging: Option<&'a TaskId>,
    /// Placeholder texts.
    pub text: &'a ViewConfig,
}

/// Render the tasks selected by `query` from the full collection.
#[must_use]
pub fn render_list(tasks: &[Task], query: &TaskQuery, ctx: &RenderContext<'_>) -> ListView {
    let visible = query.apply(tasks, ctx.today);
    if visible.is_empty() {
        let (state, message) = if query.has_search() {
            (EmptyState::NoMatches, &ctx.text.no_match_message)
        } else {
            (EmptyState::NoTasks, &ctx.text.empty_message)
        };
        return ListView::Empty {
            state,
            message: message.clone(),
        };
    }
    ListView::Rows(visible.into_iter().map(|task| render_row(task, ctx)).collect())
}

/// Build the row for a single task.
#[must_use]
pub fn render_row(task: &Task, ctx: &RenderContext<'_>) -> TaskRow {
    let notes_placeholder = task.notes.is_empty();
    TaskRow {
        id: task.id.clone(),
        title: task.title.clone(),
        category: task.category,
        status: task.status,
        overdue: task.is_overdue(ctx.today),
        deadline_text: deadline_text(task),
        relative_label: task
            .deadline
            .map(|deadline| RelativeDate::between(deadline, ctx.today).to_string()),
        notes_text: if notes_placeholder {
            ctx.text.notes_placeholder.clone()
        } else {
            task.notes.clone()
        },
        notes_placeholder,
        actions: RowAction::ALL,
        edit_form: (ctx.editing == Some(&task.id)).then(|| EditForm::for_task(task)),
        dragging: ctx.dragging == Some(&task.id),
    }
}

fn deadline_text(task: &Task) -> Option<String> {
    let deadline = format_deadline(task.deadline?);
    Some(match task.time {
        Some(time) => format!("{deadline} at {}", format_clock_time(time)),
        None => deadline,
    })
}

/// Which task, if any, is in edit mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditState {
    editing: Option<TaskId>,
}

impl EditState {
    /// Task currently in edit mode.
    #[must_use]
    pub const fn editing(&self) -> Option<&TaskId> {
        self.editing.as_ref()
    }

    /// Open edit mode for `id`, or close it when `id` is already being edited.
    pub fn toggle(&mut self, id: &TaskId) {
        if self.editing.as_ref() == Some(id) {
            self.editing = None;
        } else {
            self.editing = Some(id.clone());
        }
    }

    /// Close edit mode, discarding any draft.
    pub fn cancel(&mut self) {
        self.editing = None;
    }

    /// Forget `id` if it was being edited (after deletion).
    pub fn forget(&mut self, id: &TaskId) {
        if self.editing.as_ref() == Some(id) {
            self.editing = None;
        }
    }

    /// Write the draft through the store and leave edit mode on success.
    ///
    /// # Errors
    /// Returns [`TaskWriteError`] and stays in edit mode when validation fails.
    pub fn save<S>(
        &mut self,
        store: &mut TaskStore<S>,
        id: &TaskId,
        fields: TaskFields,
    ) -> Result<TaskWriteResult, TaskWriteError>
    where
        S: KeyValueStore,
    {
        let result = store.update(id, fields)?;
        self.forget(id);
        Ok(result)
    }
}

/// Source of an in-progress drag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    source: Option<TaskId>,
}

impl DragState {
    /// Task being dragged.
    #[must_use]
    pub const fn source(&self) -> Option<&TaskId> {
        self.source.as_ref()
    }

    /// Tag `id` as the drag source.
    pub fn start(&mut self, id: &TaskId) {
        self.source = Some(id.clone());
    }

    /// Abandon the drag.
    pub fn end(&mut self) {
        self.source = None;
    }

    /// Finish the drag over `target`, returning the `(moved, target)` pair to reorder.
    ///
    /// Dropping without a source or onto the source itself yields `None`.
    pub fn drop_on(&mut self, target: &TaskId) -> Option<(TaskId, TaskId)> {
        let source = self.source.take()?;
        if &source == target {
            debug!(task = %source, "Dropped task onto itself");
            return None;
        }
        Some((source, target.clone()))
    }
}
