#![allow(missing_docs)]

use proptest::prelude::*;
use time::macros::{date, datetime};
use time::{Date, Duration};

use tasklist_core::query::{filter, sort};
use tasklist_core::{Status, StatusFilter, Task, TaskId, TaskQuery, is_overdue};

const TODAY: Date = date!(2024 - 09 - 01);

fn status_strategy() -> impl Strategy<Value = Status> {
    prop_oneof![Just(Status::Pending), Just(Status::Done), Just(Status::NotDone)]
}

fn task_strategy() -> impl Strategy<Value = (Option<i64>, Status)> {
    (prop::option::of(-10i64..10), status_strategy())
}

fn make_tasks(seeds: &[(Option<i64>, Status)]) -> Vec<Task> {
    seeds
        .iter()
        .enumerate()
        .map(|(idx, (offset, status))| {
            let mut task = Task::new(TaskId::new(), format!("Task {idx}"), datetime!(2024-08-01 12:00 UTC));
            task.deadline = offset.map(|days| TODAY + Duration::days(days));
            task.status = *status;
            task
        })
        .collect()
}

proptest! {
    #[test]
    fn sort_is_idempotent(seeds in prop::collection::vec(task_strategy(), 0..40)) {
        let tasks = make_tasks(&seeds);
        let mut once: Vec<&Task> = tasks.iter().collect();
        sort(&mut once, TODAY);
        let mut twice = once.clone();
        sort(&mut twice, TODAY);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn sort_puts_overdue_first(seeds in prop::collection::vec(task_strategy(), 0..40)) {
        let tasks = make_tasks(&seeds);
        let mut sorted: Vec<&Task> = tasks.iter().collect();
        sort(&mut sorted, TODAY);
        let flags: Vec<bool> = sorted.iter().map(|task| is_overdue(task, TODAY)).collect();
        let first_non_overdue = flags.iter().position(|flag| !flag).unwrap_or(flags.len());
        prop_assert!(flags[first_non_overdue..].iter().all(|flag| !flag));
    }

    #[test]
    fn overdue_filter_matches_manual(seeds in prop::collection::vec(task_strategy(), 0..40)) {
        let tasks = make_tasks(&seeds);
        let expected: Vec<&Task> = tasks.iter().filter(|task| is_overdue(task, TODAY)).collect();
        let actual = filter(&tasks, StatusFilter::Overdue, "", TODAY);
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn done_tasks_never_overdue(offset in -1000i64..1000) {
        let mut task = Task::new(TaskId::new(), "t", datetime!(2024-08-01 12:00 UTC));
        task.deadline = Some(TODAY + Duration::days(offset));
        task.status = Status::Done;
        prop_assert!(!is_overdue(&task, TODAY));
    }

    #[test]
    fn query_result_is_subset_in_sorted_order(
        seeds in prop::collection::vec(task_strategy(), 0..40),
        status in prop_oneof![
            Just(StatusFilter::All),
            Just(StatusFilter::Pending),
            Just(StatusFilter::Done),
            Just(StatusFilter::NotDone),
            Just(StatusFilter::Overdue),
        ],
    ) {
        let tasks = make_tasks(&seeds);
        let query = TaskQuery::new(status, "");
        let result = query.apply(&tasks, TODAY);
        prop_assert!(result.iter().all(|task| status.matches(task, TODAY)));
        let mut resorted = result.clone();
        sort(&mut resorted, TODAY);
        prop_assert_eq!(resorted, result);
    }
}
