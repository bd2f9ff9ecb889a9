// src/engine/runtime.rs

use std::fmt;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::config::ConfigFile;
use crate::errors::Result;
use crate::worker::{ComputeBackend, ComputeJob};

use super::clock::Clock;
use super::core::{CoreEvent, RecomputeCore};
use super::workspace::Workspace;
use super::{
    CoreCommand, EngineEvent, Generation, MutationTrigger, PublishedState, SharedState,
};

/// What the loop does after an event was applied to the workspace.
enum Next {
    /// Feed this event into the core.
    Core(CoreEvent),
    /// Nothing changed.
    Idle,
    Stop,
}

/// Reacts to `EngineEvent`s: applies mutations to the workspace, drives the
/// recompute core and publishes results.
///
/// This is a pure IO shell around `RecomputeCore`, which contains all the
/// scheduling semantics. This struct handles async IO: reading events from
/// the channel, handing jobs to the compute backend and publishing through a
/// `watch` channel.
pub struct Runtime<B: ComputeBackend> {
    core: RecomputeCore,
    workspace: Workspace,
    event_rx: mpsc::Receiver<EngineEvent>,
    backend: B,
    clock: Arc<dyn Clock>,
    config: ConfigFile,
    publisher: watch::Sender<SharedState>,
}

impl<B: ComputeBackend> fmt::Debug for Runtime<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("workspace", &self.workspace)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl<B: ComputeBackend> Runtime<B> {
    /// Build a runtime with an empty workspace using the configured status
    /// vocabulary. Generation 0 (the empty state) is visible to subscribers
    /// right away.
    pub fn new(
        config: ConfigFile,
        event_rx: mpsc::Receiver<EngineEvent>,
        backend: B,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (publisher, _) = watch::channel(Arc::new(PublishedState::default()));
        Self {
            core: RecomputeCore::new(),
            workspace: Workspace::new(config.statuses.clone()),
            event_rx,
            backend,
            clock,
            config,
            publisher,
        }
    }

    /// Subscribe to published states.
    pub fn subscribe(&self) -> watch::Receiver<SharedState> {
        self.publisher.subscribe()
    }

    /// Main event loop.
    ///
    /// - Consumes `EngineEvent`s from `event_rx`.
    /// - Applies mutations to the workspace and feeds the core.
    /// - Executes commands returned by the core (start, publish, discard).
    ///
    /// Only `Shutdown` stops the loop in production: the compute worker keeps
    /// a sender alive for as long as the backend exists, so the channel does
    /// not close on its own. A computation still in flight when the loop
    /// stops is abandoned.
    pub async fn run(mut self) -> Result<()> {
        info!("duegraph runtime started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("runtime event channel closed; exiting");
                    break;
                }
            };

            debug!(event = event.kind(), "runtime received event");

            let core_event = match self.apply(event) {
                Next::Core(core_event) => core_event,
                Next::Idle => continue,
                Next::Stop => {
                    info!("shutdown requested, stopping runtime");
                    break;
                }
            };

            let step = self.core.step(core_event);
            for command in step.commands {
                self.execute_command(command).await?;
            }
        }

        info!(
            last_applied = self.core.last_applied(),
            "runtime exiting"
        );
        Ok(())
    }

    /// Apply one event to the workspace and decide what the core should see.
    fn apply(&mut self, event: EngineEvent) -> Next {
        match event {
            EngineEvent::UpsertTask { task } => match self.workspace.upsert_task(task) {
                Ok(()) => recompute(MutationTrigger::TaskUpserted),
                Err(err) => {
                    warn!(error = %err, "rejected task");
                    Next::Idle
                }
            },
            EngineEvent::RemoveTask { task_id } => {
                if self.workspace.remove_task(&task_id) {
                    recompute(MutationTrigger::TaskRemoved)
                } else {
                    debug!(task = %task_id, "remove for unknown task; nothing to do");
                    Next::Idle
                }
            }
            EngineEvent::AddDependency { dependency, reply } => {
                let outcome = self.workspace.add_dependency(dependency);
                let stored = outcome.is_ok();
                if reply.send(outcome).is_err() {
                    debug!("caller stopped waiting for dependency admission");
                }
                if stored {
                    recompute(MutationTrigger::DependencyAdded)
                } else {
                    Next::Idle
                }
            }
            EngineEvent::RemoveDependency { dependency_id } => {
                if self.workspace.remove_dependency(&dependency_id) {
                    recompute(MutationTrigger::DependencyRemoved)
                } else {
                    debug!(dependency = %dependency_id, "remove for unknown dependency; nothing to do");
                    Next::Idle
                }
            }
            EngineEvent::SetStatuses { vocabulary } => {
                match self.workspace.set_statuses(vocabulary) {
                    Ok(()) => recompute(MutationTrigger::StatusesChanged),
                    Err(err) => {
                        warn!(error = %err, "rejected status vocabulary");
                        Next::Idle
                    }
                }
            }
            EngineEvent::SelectProject { project } => {
                if self.workspace.select_project(project) {
                    info!(project = ?project.map(|p| p.get()), "project selected");
                    recompute(MutationTrigger::ProjectSelected)
                } else {
                    Next::Idle
                }
            }
            EngineEvent::Refresh => recompute(MutationTrigger::Refresh),
            EngineEvent::ComputationFinished {
                generation,
                outcome,
            } => Next::Core(CoreEvent::ComputationFinished {
                generation,
                outcome,
            }),
            EngineEvent::Shutdown => Next::Stop,
        }
    }

    /// Execute a single command from the core.
    async fn execute_command(&mut self, command: CoreCommand) -> Result<()> {
        match command {
            CoreCommand::StartComputation { generation } => {
                self.start_computation(generation).await?;
            }
            CoreCommand::Publish { generation, state } => {
                info!(
                    gen = generation,
                    conflicts = state.conflicts.len(),
                    cycle = state.has_cycle(),
                    "publishing derived state"
                );
                self.publisher
                    .send_replace(Arc::new(PublishedState { generation, state }));
            }
            CoreCommand::Discard { generation, latest } => {
                warn!(gen = generation, latest, "discarding stale derived state");
            }
        }
        Ok(())
    }

    async fn start_computation(&mut self, generation: Generation) -> Result<()> {
        let snapshot = self.workspace.snapshot();
        let job = ComputeJob {
            generation,
            today: self.clock.today(),
            settings: self.config.analysis_settings(self.workspace.statuses()),
            snapshot,
        };
        debug!(
            gen = generation,
            today = %job.today,
            tasks = job.snapshot.tasks.len(),
            "handing snapshot to compute backend"
        );

        self.backend.submit(job).await?;

        // Starting never produces further commands.
        self.core.computation_started(generation);
        Ok(())
    }
}

fn recompute(trigger: MutationTrigger) -> Next {
    Next::Core(CoreEvent::RecomputeRequested { trigger })
}
