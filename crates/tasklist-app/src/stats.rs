use tasklist_core::{Status, Task};
use time::Date;

/// Aggregate counts over the unfiltered collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    /// Number of tasks.
    pub total: usize,
    /// Tasks with status done.
    pub completed: usize,
    /// Tasks that are overdue today.
    pub overdue: usize,
}

impl TaskStats {
    /// Count tasks by completion and overdue-ness.
    #[must_use]
    pub fn collect(tasks: &[Task], today: Date) -> Self {
        tasks.iter().fold(
            Self {
                total: tasks.len(),
                ..Self::default()
            },
            |mut stats, task| {
                if task.status == Status::Done {
                    stats.completed += 1;
                }
                if task.is_overdue(today) {
                    stats.overdue += 1;
                }
                stats
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklist_core::TaskId;
    use time::macros::{date, datetime};

    #[test]
    fn counts_done_and_overdue_separately() {
        let today = date!(2024 - 01 - 10);
        let make = |deadline: Option<Date>, status: Status| {
            let mut task = Task::new(TaskId::new(), "t", datetime!(2024-01-01 00:00 UTC));
            task.deadline = deadline;
            task.status = status;
            task
        };
        let tasks = vec![
            make(Some(date!(2024 - 01 - 09)), Status::Pending),
            make(Some(date!(2024 - 01 - 02)), Status::Done),
            make(Some(date!(2024 - 01 - 08)), Status::NotDone),
            make(None, Status::Done),
            make(Some(date!(2024 - 01 - 10)), Status::Pending),
        ];

        assert_eq!(
            TaskStats::collect(&tasks, today),
            TaskStats {
                total: 5,
                completed: 2,
                overdue: 2,
            }
        );
        assert_eq!(TaskStats::collect(&[], today), TaskStats::default());
    }
}
