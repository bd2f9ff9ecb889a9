#![allow(dead_code)]

use chrono::NaiveDate;
use duegraph::model::{Dependency, ProjectId, Task};

/// Shorthand for a calendar date; panics on invalid input.
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Finish-to-start dependency `from -> to` with id `from->to`.
pub fn dep(from: &str, to: &str) -> Dependency {
    Dependency::new(format!("{from}->{to}"), from, to).expect("valid test dependency")
}

/// Builder for `Task` to simplify test setup.
///
/// Defaults: project 1, title equal to the id, a one-day task on
/// 2026-01-01, status `TODO`.
pub struct TaskBuilder {
    id: String,
    project: u64,
    title: Option<String>,
    start: NaiveDate,
    due: NaiveDate,
    status: String,
    progress: u8,
}

impl TaskBuilder {
    pub fn new(id: &str) -> Self {
        let day = date(2026, 1, 1);
        Self {
            id: id.to_string(),
            project: 1,
            title: None,
            start: day,
            due: day,
            status: "TODO".to_string(),
            progress: 0,
        }
    }

    pub fn project(mut self, project: u64) -> Self {
        self.project = project;
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn start(mut self, start: NaiveDate) -> Self {
        self.start = start;
        self
    }

    pub fn due(mut self, due: NaiveDate) -> Self {
        self.due = due;
        self
    }

    /// Set both dates so the task spans `days` inclusive days from `start`.
    pub fn span(mut self, start: NaiveDate, days: i64) -> Self {
        self.start = start;
        self.due = start + chrono::TimeDelta::days(days - 1);
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    pub fn progress(mut self, progress: u8) -> Self {
        self.progress = progress;
        self
    }

    pub fn build(self) -> Task {
        let title = self.title.unwrap_or_else(|| self.id.clone());
        let project = ProjectId::new(self.project).expect("positive project id");
        Task::new(self.id, project, title, self.start, self.due, self.status)
            .and_then(|task| task.with_progress(self.progress))
            .expect("Failed to build valid task from builder")
    }
}
