//! Application layer for the task list.
//!
//! This crate wires the query and date logic from `tasklist-core` to a
//! persistent [`TaskStore`], projects the result into render-ready rows, and
//! exposes a [`TaskBoard`] that applies user intents one at a time.

pub mod board;
pub mod clock;
pub mod config;
pub mod export;
pub mod stats;
pub mod task_patch;
pub mod task_store;
pub mod telemetry;
pub mod view;

pub use board::{BoardView, DispatchOutcome, Intent, TaskBoard};
pub use clock::{Clock, FixedClock, SystemClock, normalize_timestamp};
pub use config::{AppConfig, ExportConfig, StorageConfig, ViewConfig};
pub use export::{EXPORT_MEDIA_TYPE, ExportDocument, export_tasks};
pub use stats::TaskStats;
pub use task_patch::TaskFields;
pub use task_store::{TaskStore, TaskWriteError, TaskWriteResult};
pub use telemetry::install_tracing;
pub use view::{
    DragState, EditAction, EditForm, EditState, EmptyState, ListView, RenderContext, RowAction,
    TaskRow, render_list, render_row,
};
