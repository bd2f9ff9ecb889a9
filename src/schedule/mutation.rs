// src/schedule/mutation.rs

use chrono::{NaiveDate, TimeDelta};
use tracing::trace;

use crate::errors::{DuegraphError, Result};
use crate::model::Task;

/// Move both dates of `task` by `delta_days` (negative moves earlier).
pub fn shift(task: &Task, delta_days: i64) -> Result<Task> {
    let delta = TimeDelta::try_days(delta_days).ok_or_else(|| {
        DuegraphError::validation(format!("cannot shift task by {delta_days} days"))
    })?;
    let out_of_range =
        || DuegraphError::validation(format!("shifting task '{}' leaves the supported date range", task.id()));

    let start = task.start_date().checked_add_signed(delta).ok_or_else(out_of_range)?;
    let due = task.due_date().checked_add_signed(delta).ok_or_else(out_of_range)?;

    trace!(task = %task.id(), delta_days, "shifting task");
    task.with_dates(start, due)
}

/// Move the start date, never past the current due date.
pub fn resize_start(task: &Task, new_start: NaiveDate) -> Result<Task> {
    let start = new_start.min(task.due_date());
    task.with_dates(start, task.due_date())
}

/// Move the due date, never before the current start date.
pub fn resize_due(task: &Task, new_due: NaiveDate) -> Result<Task> {
    let due = new_due.max(task.start_date());
    task.with_dates(task.start_date(), due)
}

/// Re-check a task that may have been built outside the constructors
/// (e.g. deserialized from a store).
pub fn validate(task: &Task) -> Result<()> {
    if task.due_date() < task.start_date() {
        return Err(DuegraphError::validation(
            "Due date cannot be before start date",
        ));
    }
    task.check()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProjectId;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
    }

    fn task(start: u32, due: u32) -> Task {
        Task::new("t", ProjectId::new(1).unwrap(), "T", day(start), day(due), "TODO").unwrap()
    }

    #[test]
    fn shift_moves_both_dates() {
        let shifted = shift(&task(10, 12), 3).unwrap();
        assert_eq!((shifted.start_date(), shifted.due_date()), (day(13), day(15)));

        let back = shift(&shifted, -5).unwrap();
        assert_eq!((back.start_date(), back.due_date()), (day(8), day(10)));
        assert_eq!(back.duration_days(), 3);
    }

    #[test]
    fn shift_out_of_range_is_a_validation_error() {
        let err = shift(&task(10, 12), i64::MAX).unwrap_err();
        assert!(matches!(err, DuegraphError::Validation(_)));
    }

    #[test]
    fn resize_start_is_clamped_to_due() {
        let resized = resize_start(&task(10, 12), day(20)).unwrap();
        assert_eq!((resized.start_date(), resized.due_date()), (day(12), day(12)));

        let earlier = resize_start(&task(10, 12), day(5)).unwrap();
        assert_eq!(earlier.start_date(), day(5));
    }

    #[test]
    fn resize_due_is_clamped_to_start() {
        let resized = resize_due(&task(10, 12), day(1)).unwrap();
        assert_eq!((resized.start_date(), resized.due_date()), (day(10), day(10)));

        let later = resize_due(&task(10, 12), day(25)).unwrap();
        assert_eq!(later.due_date(), day(25));
    }

    #[test]
    fn validate_catches_inverted_dates_from_deserialization() {
        let raw = r#"
id = "t"
project_id = 1
title = "T"
start_date = "2026-04-12"
due_date = "2026-04-10"
status = "TODO"
"#;
        let task: Task = toml::from_str(raw).unwrap();
        let err = validate(&task).unwrap_err();
        assert!(err.to_string().contains("Due date cannot be before start date"));
    }

    #[test]
    fn validate_accepts_constructed_task() {
        assert!(validate(&task(1, 1)).is_ok());
    }
}
