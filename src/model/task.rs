// src/model/task.rs

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{DuegraphError, Result};
use crate::model::TaskId;

/// Identifier of the project owning a task. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(u64);

impl ProjectId {
    pub fn new(id: u64) -> Result<Self> {
        if id == 0 {
            return Err(DuegraphError::validation("Task projectId must be positive"));
        }
        Ok(Self(id))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A date-bounded work item.
///
/// `Task` is an immutable value: every `with_*` method returns a new,
/// re-validated task with the same id. Values can also arrive through serde
/// from an external store, which bypasses the constructor; such values are
/// re-checked with [`crate::schedule::validate`] before the engine accepts
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: String,
    #[serde(default)]
    description: String,
    start_date: NaiveDate,
    due_date: NaiveDate,
    #[serde(default)]
    progress: u8,
    status: String,
}

impl Task {
    pub const DEFAULT_STATUS: &'static str = "TODO";
    pub const MAX_PROGRESS: u8 = 100;

    /// Create a task with an empty description and zero progress.
    pub fn new(
        id: impl Into<TaskId>,
        project_id: ProjectId,
        title: impl Into<String>,
        start_date: NaiveDate,
        due_date: NaiveDate,
        status: impl Into<String>,
    ) -> Result<Self> {
        Self {
            id: id.into(),
            project_id,
            title: title.into(),
            description: String::new(),
            start_date,
            due_date,
            progress: 0,
            status: status.into(),
        }
        .normalized()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Inclusive duration in days: a task starting and ending on the same day
    /// lasts one day.
    pub fn duration_days(&self) -> i64 {
        (self.due_date - self.start_date).num_days() + 1
    }

    pub fn with_title(&self, title: impl Into<String>) -> Result<Self> {
        Self {
            title: title.into(),
            ..self.clone()
        }
        .normalized()
    }

    pub fn with_description(&self, description: impl Into<String>) -> Result<Self> {
        Self {
            description: description.into(),
            ..self.clone()
        }
        .normalized()
    }

    pub fn with_dates(&self, start_date: NaiveDate, due_date: NaiveDate) -> Result<Self> {
        Self {
            start_date,
            due_date,
            ..self.clone()
        }
        .normalized()
    }

    pub fn with_progress(&self, progress: u8) -> Result<Self> {
        Self {
            progress,
            ..self.clone()
        }
        .normalized()
    }

    pub fn with_status(&self, status: impl Into<String>) -> Result<Self> {
        Self {
            status: status.into(),
            ..self.clone()
        }
        .normalized()
    }

    /// Check every task invariant without modifying the value.
    pub fn check(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(DuegraphError::validation("Task id is required"));
        }
        if self.project_id.get() == 0 {
            return Err(DuegraphError::validation("Task projectId must be positive"));
        }
        if self.title.trim().is_empty() {
            return Err(DuegraphError::validation("Task title is required"));
        }
        if self.due_date < self.start_date {
            return Err(DuegraphError::validation(
                "Task dueDate cannot be before startDate",
            ));
        }
        if self.progress > Self::MAX_PROGRESS {
            return Err(DuegraphError::validation(
                "Task progress must be between 0 and 100",
            ));
        }
        if self.status.trim().is_empty() {
            return Err(DuegraphError::validation("Task status is required"));
        }
        Ok(())
    }

    fn normalized(mut self) -> Result<Self> {
        self.check()?;
        self.title = self.title.trim().to_string();
        self.status = self.status.trim().to_string();
        Ok(self)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn project() -> ProjectId {
        ProjectId::new(1).unwrap()
    }

    #[test]
    fn duration_is_inclusive() {
        let task = Task::new("a", project(), "A", date(2026, 1, 1), date(2026, 1, 3), "TODO").unwrap();
        assert_eq!(task.duration_days(), 3);

        let single = task.with_dates(date(2026, 1, 5), date(2026, 1, 5)).unwrap();
        assert_eq!(single.duration_days(), 1);
        assert_eq!(single.id(), "a");
    }

    #[test]
    fn trims_title_and_status() {
        let task = Task::new("a", project(), "  Write docs ", date(2026, 1, 1), date(2026, 1, 1), " DONE ").unwrap();
        assert_eq!(task.title(), "Write docs");
        assert_eq!(task.status(), "DONE");
    }

    #[test]
    fn rejects_invalid_values() {
        let start = date(2026, 1, 2);
        assert!(Task::new(" ", project(), "A", start, start, "TODO").is_err());
        assert!(Task::new("a", project(), "", start, start, "TODO").is_err());
        assert!(Task::new("a", project(), "A", start, start, "  ").is_err());
        assert!(Task::new("a", project(), "A", start, date(2026, 1, 1), "TODO").is_err());
        assert!(ProjectId::new(0).is_err());

        let task = Task::new("a", project(), "A", start, start, "TODO").unwrap();
        assert!(task.with_progress(101).is_err());
        assert_eq!(task.with_progress(100).unwrap().progress(), 100);
    }

    #[test]
    fn with_methods_leave_original_untouched() {
        let task = Task::new("a", project(), "A", date(2026, 1, 1), date(2026, 1, 2), "TODO").unwrap();
        let renamed = task.with_title("B").unwrap();
        assert_eq!(task.title(), "A");
        assert_eq!(renamed.title(), "B");
        assert_eq!(renamed.with_description("notes").unwrap().description(), "notes");
    }
}
