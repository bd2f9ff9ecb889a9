// src/engine/handle.rs

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::errors::{DuegraphError, Result};
use crate::model::{Dependency, ProjectId, StatusVocabulary, Task};
use crate::schedule;

use super::EngineEvent;

/// Cloneable caller-side API of a running engine.
///
/// Every method only enqueues an event for the runtime loop; computation
/// happens later on the worker. Once the loop has stopped, every call fails
/// with [`DuegraphError::EngineClosed`].
#[derive(Debug, Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<EngineEvent>,
}

impl EngineHandle {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }

    /// Raw sender into the runtime loop.
    pub fn sender(&self) -> mpsc::Sender<EngineEvent> {
        self.tx.clone()
    }

    /// Add or replace a task. Invalid tasks are rejected here, before
    /// anything reaches the engine.
    pub async fn upsert_task(&self, task: Task) -> Result<()> {
        schedule::validate(&task)?;
        self.send(EngineEvent::UpsertTask { task }).await
    }

    pub async fn remove_task(&self, task_id: impl Into<String>) -> Result<()> {
        self.send(EngineEvent::RemoveTask {
            task_id: task_id.into(),
        })
        .await
    }

    /// Add a dependency, waiting for the engine to admit or reject it.
    pub async fn add_dependency(&self, dependency: Dependency) -> Result<()> {
        dependency.check()?;
        let (reply, response) = oneshot::channel();
        self.send(EngineEvent::AddDependency { dependency, reply })
            .await?;
        response.await.map_err(|_| DuegraphError::EngineClosed)?
    }

    pub async fn remove_dependency(&self, dependency_id: impl Into<String>) -> Result<()> {
        self.send(EngineEvent::RemoveDependency {
            dependency_id: dependency_id.into(),
        })
        .await
    }

    pub async fn set_statuses(&self, vocabulary: StatusVocabulary) -> Result<()> {
        self.send(EngineEvent::SetStatuses { vocabulary }).await
    }

    /// Choose the project whose tasks are analysed; `None` clears the
    /// selection and the derived state becomes empty.
    pub async fn select_project(&self, project: Option<ProjectId>) -> Result<()> {
        self.send(EngineEvent::SelectProject { project }).await
    }

    /// Recompute with unchanged inputs, picking up a new reference date.
    pub async fn refresh(&self) -> Result<()> {
        self.send(EngineEvent::Refresh).await
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.send(EngineEvent::Shutdown).await
    }

    async fn send(&self, event: EngineEvent) -> Result<()> {
        debug!(event = event.kind(), "sending engine event");
        self.tx
            .send(event)
            .await
            .map_err(|_| DuegraphError::EngineClosed)
    }
}
