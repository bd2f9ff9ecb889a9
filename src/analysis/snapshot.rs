// src/analysis/snapshot.rs

use crate::model::{Dependency, Task};

/// Immutable copy of the active task/dependency set.
///
/// Taken by the engine before a computation is handed to the worker, so the
/// worker never observes later mutations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    pub dependencies: Vec<Dependency>,
}

impl Snapshot {
    pub fn new(tasks: Vec<Task>, dependencies: Vec<Dependency>) -> Self {
        Self { tasks, dependencies }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }
}
