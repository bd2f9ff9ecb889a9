// src/engine/mod.rs

//! Derived-state orchestration.
//!
//! This module ties together:
//! - the [`workspace`] holding every task, dependency and status the host
//!   has handed in, and the currently selected project
//! - the generation bookkeeping in [`generation`]
//! - the pure recompute state machine in [`core`], which decides when to
//!   start a computation and whether a finished one may be published
//! - the async event loop in [`runtime`] that reacts to:
//!   - task / dependency / status / project mutations
//!   - finished computations from the worker
//!   - shutdown requests
//! - the caller-facing [`handle`]
//!
//! Every computation runs on the worker (see [`crate::worker`]); the runtime
//! only snapshots, schedules and publishes.

use std::sync::Arc;

use tokio::sync::oneshot;

use crate::analysis::DerivedState;
use crate::errors::Result;
use crate::model::{Dependency, ProjectId, StatusVocabulary, Task, TaskId};

pub mod clock;
pub mod core;
pub mod event_handlers;
pub mod generation;
pub mod handle;
pub mod runtime;
pub mod workspace;

pub use clock::{Clock, FixedClock, SystemClock};
pub use self::core::{CoreEvent, RecomputeCore, RecomputePhase};
pub use event_handlers::{CoreCommand, CoreStep};
pub use generation::GenerationTracker;
pub use handle::EngineHandle;
pub use runtime::Runtime;
pub use workspace::Workspace;
pub use crate::types::MutationTrigger;

/// Monotonically increasing identifier of an input snapshot.
pub type Generation = u64;

/// What the worker reports for one generation. A failure carries a
/// human-readable reason.
pub type ComputeOutcome = std::result::Result<DerivedState, String>;

/// A derived state together with the generation it was computed from.
///
/// Generation 0 is the empty state published before any computation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PublishedState {
    pub generation: Generation,
    pub state: DerivedState,
}

/// Shared, atomically replaced view of the latest published state.
pub type SharedState = Arc<PublishedState>;

/// Events flowing into the runtime from handles and the worker.
#[derive(Debug)]
pub enum EngineEvent {
    /// Add or replace a task (matched by id).
    UpsertTask { task: Task },
    RemoveTask { task_id: TaskId },
    /// Store a dependency if it is not a duplicate and closes no cycle in the
    /// active set. The outcome is sent back on `reply`.
    AddDependency {
        dependency: Dependency,
        reply: oneshot::Sender<Result<()>>,
    },
    RemoveDependency { dependency_id: String },
    SetStatuses { vocabulary: StatusVocabulary },
    SelectProject { project: Option<ProjectId> },
    /// Recompute with unchanged inputs.
    Refresh,
    /// The worker finished the computation for `generation`.
    ComputationFinished {
        generation: Generation,
        outcome: ComputeOutcome,
    },
    /// Graceful shutdown requested.
    Shutdown,
}

impl EngineEvent {
    /// Short name for logs; the payloads can be large.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineEvent::UpsertTask { .. } => "upsert-task",
            EngineEvent::RemoveTask { .. } => "remove-task",
            EngineEvent::AddDependency { .. } => "add-dependency",
            EngineEvent::RemoveDependency { .. } => "remove-dependency",
            EngineEvent::SetStatuses { .. } => "set-statuses",
            EngineEvent::SelectProject { .. } => "select-project",
            EngineEvent::Refresh => "refresh",
            EngineEvent::ComputationFinished { .. } => "computation-finished",
            EngineEvent::Shutdown => "shutdown",
        }
    }
}
