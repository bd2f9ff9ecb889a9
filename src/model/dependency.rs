// src/model/dependency.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{DuegraphError, Result};
use crate::model::TaskId;

/// Minimum number of days between a predecessor's due date and its
/// successor's start date.
pub const FINISH_START_LAG_DAYS: i64 = 1;

/// Kind of scheduling link between two tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// The successor may start only after the predecessor is due, plus
    /// [`FINISH_START_LAG_DAYS`].
    #[default]
    FinishToStart,
}

impl DependencyKind {
    pub const fn lag_days(self) -> i64 {
        match self {
            DependencyKind::FinishToStart => FINISH_START_LAG_DAYS,
        }
    }
}

/// Directed link `from -> to`: `to` depends on `from`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    id: String,
    from_task_id: TaskId,
    to_task_id: TaskId,
    #[serde(default)]
    kind: DependencyKind,
}

impl Dependency {
    /// Create a finish-to-start dependency.
    pub fn new(
        id: impl Into<String>,
        from_task_id: impl Into<TaskId>,
        to_task_id: impl Into<TaskId>,
    ) -> Result<Self> {
        let dependency = Self {
            id: id.into(),
            from_task_id: from_task_id.into(),
            to_task_id: to_task_id.into(),
            kind: DependencyKind::FinishToStart,
        };
        dependency.check()?;
        Ok(dependency)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn from_task_id(&self) -> &str {
        &self.from_task_id
    }

    pub fn to_task_id(&self) -> &str {
        &self.to_task_id
    }

    pub fn kind(&self) -> DependencyKind {
        self.kind
    }

    /// Whether both links point at the same ordered pair of tasks.
    pub fn same_link(&self, other: &Dependency) -> bool {
        self.from_task_id == other.from_task_id && self.to_task_id == other.to_task_id
    }

    pub fn check(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(DuegraphError::validation("Dependency id is required"));
        }
        if self.from_task_id.trim().is_empty() {
            return Err(DuegraphError::validation("Dependency fromTaskId is required"));
        }
        if self.to_task_id.trim().is_empty() {
            return Err(DuegraphError::validation("Dependency toTaskId is required"));
        }
        if self.from_task_id == self.to_task_id {
            return Err(DuegraphError::validation(
                "Dependency cannot target the same task",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from_task_id, self.to_task_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_self_loop_and_blank_ids() {
        assert!(Dependency::new("d1", "a", "a").is_err());
        assert!(Dependency::new("", "a", "b").is_err());
        assert!(Dependency::new("d1", " ", "b").is_err());
        assert!(Dependency::new("d1", "a", "").is_err());
    }

    #[test]
    fn finish_to_start_has_one_day_lag() {
        let dep = Dependency::new("d1", "a", "b").unwrap();
        assert_eq!(dep.kind(), DependencyKind::FinishToStart);
        assert_eq!(dep.kind().lag_days(), 1);
        assert_eq!(dep.to_string(), "a -> b");
    }

    #[test]
    fn same_link_ignores_id() {
        let a = Dependency::new("d1", "a", "b").unwrap();
        let b = Dependency::new("d2", "a", "b").unwrap();
        let reversed = Dependency::new("d3", "b", "a").unwrap();
        assert!(a.same_link(&b));
        assert!(!a.same_link(&reversed));
    }
}
