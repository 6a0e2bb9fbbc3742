//! Download document holding the full, unfiltered collection.

use tasklist_core::Task;
use tasklist_core::date::format_deadline;
use tasklist_store::StoreError;
use time::Date;

/// Media type of exported documents.
pub const EXPORT_MEDIA_TYPE: &str = "application/json";

/// Serialized backup ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    /// Suggested file name, e.g. `tasks_backup_2024-05-01.json`.
    pub file_name: String,
    /// Media type of `contents`.
    pub media_type: &'static str,
    /// Pretty-printed JSON array of task records.
    pub contents: String,
}

/// Serialize every task in store order.
///
/// # Errors
/// Returns [`StoreError::Serialize`] if a task cannot be serialized.
pub fn export_tasks(tasks: &[Task], today: Date, file_prefix: &str) -> Result<ExportDocument, StoreError> {
    let contents = serde_json::to_string_pretty(tasks)?;
    Ok(ExportDocument {
        file_name: format!("{file_prefix}{}.json", format_deadline(today)),
        media_type: EXPORT_MEDIA_TYPE,
        contents,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklist_core::TaskId;
    use tasklist_store::decode_tasks;
    use time::macros::{date, datetime};

    #[test]
    fn export_names_file_by_date_and_keeps_records() {
        let tasks = vec![
            Task::new(TaskId::new(), "First", datetime!(2024-02-01 08:00 UTC)),
            Task::new(TaskId::new(), "Second", datetime!(2024-02-02 08:00 UTC)),
        ];
        let doc = export_tasks(&tasks, date!(2024 - 02 - 03), "tasks_backup_")
            .unwrap_or_else(|err| panic!("export: {err}"));

        assert_eq!(doc.file_name, "tasks_backup_2024-02-03.json");
        assert_eq!(doc.media_type, "application/json");
        assert!(doc.contents.contains("\n  {"), "pretty printed");
        let decoded = decode_tasks(&doc.contents).unwrap_or_else(|err| panic!("decode: {err}"));
        assert_eq!(decoded, tasks);
    }
}
