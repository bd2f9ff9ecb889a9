// src/engine/workspace.rs

//! The runtime's own copy of every input the host has handed in.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::analysis::Snapshot;
use crate::errors::{DuegraphError, Result};
use crate::graph::creates_cycle;
use crate::model::{Dependency, ProjectId, StatusVocabulary, Task, TaskId};

/// All tasks and dependencies, the status vocabulary and the selected
/// project.
///
/// Only the runtime loop mutates a workspace; computations only ever see the
/// [`Snapshot`] copied out of it.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    tasks: BTreeMap<TaskId, Task>,
    dependencies: BTreeMap<String, Dependency>,
    statuses: StatusVocabulary,
    selected_project: Option<ProjectId>,
}

impl Workspace {
    pub fn new(statuses: StatusVocabulary) -> Self {
        Self {
            statuses,
            ..Self::default()
        }
    }

    pub fn statuses(&self) -> &StatusVocabulary {
        &self.statuses
    }

    pub fn selected_project(&self) -> Option<ProjectId> {
        self.selected_project
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn dependency_count(&self) -> usize {
        self.dependencies.len()
    }

    /// Insert or replace a task by id.
    ///
    /// A status outside the vocabulary is replaced by the vocabulary's
    /// default status.
    pub fn upsert_task(&mut self, task: Task) -> Result<()> {
        task.check()?;
        let task = self.with_known_status(task)?;
        debug!(task = %task.id(), project = %task.project_id(), "task stored");
        self.tasks.insert(task.id().to_string(), task);
        Ok(())
    }

    /// Remove a task. Dependencies that mention it stay stored and are simply
    /// left out of snapshots. Returns whether anything was removed.
    pub fn remove_task(&mut self, task_id: &str) -> bool {
        self.tasks.remove(task_id).is_some()
    }

    /// Store `dependency` after checking it against the active set.
    ///
    /// Rejected with a validation error when the id is taken or the same
    /// ordered pair is already linked, and with
    /// [`DuegraphError::DependencyCycle`] when it would close a cycle.
    pub fn add_dependency(&mut self, dependency: Dependency) -> Result<()> {
        dependency.check()?;

        if self.dependencies.contains_key(dependency.id()) {
            warn!(dependency = %dependency, id = %dependency.id(), "rejected reused dependency id");
            return Err(DuegraphError::validation("Dependency id already exists"));
        }

        if self
            .dependencies
            .values()
            .any(|existing| existing.same_link(&dependency))
        {
            warn!(dependency = %dependency, "rejected duplicate dependency");
            return Err(DuegraphError::validation("Dependency already exists"));
        }

        let active = self.snapshot();
        if creates_cycle(&active.tasks, &active.dependencies, &dependency) {
            warn!(dependency = %dependency, "rejected dependency that closes a cycle");
            return Err(DuegraphError::DependencyCycle(format!(
                "Cannot add dependency because it introduces a cycle: {dependency}"
            )));
        }

        debug!(dependency = %dependency, "dependency stored");
        self.dependencies
            .insert(dependency.id().to_string(), dependency);
        Ok(())
    }

    pub fn remove_dependency(&mut self, dependency_id: &str) -> bool {
        self.dependencies.remove(dependency_id).is_some()
    }

    /// Replace the status vocabulary. Tasks whose status is no longer known
    /// fall back to the new default status.
    pub fn set_statuses(&mut self, statuses: StatusVocabulary) -> Result<()> {
        self.statuses = statuses;
        let tasks = std::mem::take(&mut self.tasks);
        for (id, task) in tasks {
            let task = self.with_known_status(task)?;
            self.tasks.insert(id, task);
        }
        Ok(())
    }

    /// Select the project whose tasks form the active set. Returns whether
    /// the selection changed.
    pub fn select_project(&mut self, project: Option<ProjectId>) -> bool {
        let changed = self.selected_project != project;
        self.selected_project = project;
        changed
    }

    /// Copy of the active set: tasks of the selected project (none when no
    /// project is selected) and the dependencies whose endpoints are both
    /// active.
    pub fn snapshot(&self) -> Snapshot {
        let Some(project) = self.selected_project else {
            return Snapshot::default();
        };

        let tasks: Vec<Task> = self
            .tasks
            .values()
            .filter(|task| task.project_id() == project)
            .cloned()
            .collect();
        let dependencies = self
            .dependencies
            .values()
            .filter(|dependency| {
                self.is_active(dependency.from_task_id(), project)
                    && self.is_active(dependency.to_task_id(), project)
            })
            .cloned()
            .collect();

        Snapshot::new(tasks, dependencies)
    }

    fn is_active(&self, task_id: &str, project: ProjectId) -> bool {
        self.tasks
            .get(task_id)
            .is_some_and(|task| task.project_id() == project)
    }

    fn with_known_status(&self, task: Task) -> Result<Task> {
        if self.statuses.contains(task.status()) {
            return Ok(task);
        }
        let fallback = self.statuses.default_status();
        warn!(
            task = %task.id(),
            status = %task.status(),
            fallback = %fallback,
            "unknown task status; using the default status"
        );
        task.with_status(fallback)
    }
}
