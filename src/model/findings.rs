// src/model/findings.rs

//! Value types produced by the analysis passes.

use std::fmt;

use serde::Serialize;

use crate::model::TaskId;

/// A dependency whose successor starts before the finish-to-start lag allows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub dependency_id: String,
    pub from_task_id: TaskId,
    pub to_task_id: TaskId,
    pub message: String,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Due-date risk of a single task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    #[default]
    None,
    DueSoon,
    Overdue,
}
