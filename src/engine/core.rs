// src/engine/core.rs

//! Pure recompute state machine.
//!
//! This module contains a synchronous, deterministic core that consumes
//! [`CoreEvent`]s and produces:
//! - an updated core state
//! - a list of commands describing what the IO shell should do next
//!
//! Per computation the core moves through
//! `Idle -> Scheduled -> Computing -> Applying -> Idle`
//! (or straight back to `Scheduled` when newer input arrived meanwhile).
//!
//! The async shell (`engine::runtime::Runtime`) is responsible for:
//! - reading events from channels and applying mutations to the workspace
//! - snapshotting and handing jobs to the compute backend
//! - publishing results
//!
//! The core has no channels, no Tokio types, and performs no IO, so it can be
//! unit tested exhaustively.

use crate::engine::event_handlers::{
    CoreStep, handle_computation_finished, handle_computation_started,
    handle_recompute_request,
};
use crate::engine::generation::GenerationTracker;
use crate::engine::{ComputeOutcome, Generation, MutationTrigger};

/// Where the current computation cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecomputePhase {
    /// Nothing in flight.
    #[default]
    Idle,
    /// A computation was requested but not yet handed to the worker.
    Scheduled,
    /// The worker owns the computation.
    Computing,
    /// A result arrived and is being published or discarded.
    Applying,
}

/// The single computation that may be in flight at a time.
#[derive(Debug, Default)]
pub struct InFlight {
    pub(crate) generation: Option<Generation>,
    pub(crate) phase: RecomputePhase,
}

/// Inputs of the core.
#[derive(Debug)]
pub enum CoreEvent {
    RecomputeRequested { trigger: MutationTrigger },
    ComputationStarted { generation: Generation },
    ComputationFinished {
        generation: Generation,
        outcome: ComputeOutcome,
    },
}

/// Pure core state: generation bookkeeping plus the in-flight marker.
///
/// Both are only ever touched from the runtime loop, so no lock is needed.
#[derive(Debug, Default)]
pub struct RecomputeCore {
    tracker: GenerationTracker,
    flight: InFlight,
}

impl RecomputeCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RecomputePhase {
        self.flight.phase
    }

    pub fn is_idle(&self) -> bool {
        self.flight.phase == RecomputePhase::Idle
    }

    /// Generation currently being computed, if any.
    pub fn in_flight(&self) -> Option<Generation> {
        self.flight.generation
    }

    pub fn latest_requested(&self) -> Generation {
        self.tracker.latest_requested()
    }

    pub fn last_applied(&self) -> Generation {
        self.tracker.last_applied()
    }

    pub fn request(&mut self, trigger: MutationTrigger) -> CoreStep {
        self.step(CoreEvent::RecomputeRequested { trigger })
    }

    pub fn computation_started(&mut self, generation: Generation) -> CoreStep {
        self.step(CoreEvent::ComputationStarted { generation })
    }

    pub fn computation_finished(&mut self, generation: Generation, outcome: ComputeOutcome) -> CoreStep {
        self.step(CoreEvent::ComputationFinished { generation, outcome })
    }

    /// Handle a single event, updating core state and returning the resulting
    /// commands for the IO shell.
    pub fn step(&mut self, event: CoreEvent) -> CoreStep {
        match event {
            CoreEvent::RecomputeRequested { trigger } => {
                handle_recompute_request(&mut self.tracker, &mut self.flight, trigger)
            }
            CoreEvent::ComputationStarted { generation } => {
                handle_computation_started(&mut self.flight, generation)
            }
            CoreEvent::ComputationFinished {
                generation,
                outcome,
            } => handle_computation_finished(
                &mut self.tracker,
                &mut self.flight,
                generation,
                outcome,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::DerivedState;
    use crate::engine::CoreCommand;

    fn request(core: &mut RecomputeCore) -> CoreStep {
        core.request(MutationTrigger::TaskUpserted)
    }

    fn finish(core: &mut RecomputeCore, generation: Generation, outcome: ComputeOutcome) -> CoreStep {
        core.computation_finished(generation, outcome)
    }

    fn state_with_banner(banner: &str) -> DerivedState {
        DerivedState {
            critical_path_banner: banner.to_string(),
            ..DerivedState::default()
        }
    }

    #[test]
    fn first_request_schedules_a_computation() {
        let mut core = RecomputeCore::new();
        assert!(core.is_idle());

        let step = request(&mut core);

        assert_eq!(step.commands, vec![CoreCommand::StartComputation { generation: 1 }]);
        assert_eq!(core.phase(), RecomputePhase::Scheduled);

        core.computation_started(1);
        assert_eq!(core.phase(), RecomputePhase::Computing);
        assert_eq!(core.in_flight(), Some(1));
    }

    #[test]
    fn requests_while_in_flight_only_record_latest() {
        let mut core = RecomputeCore::new();
        request(&mut core);
        core.computation_started(1);

        assert!(request(&mut core).commands.is_empty());
        assert!(request(&mut core).commands.is_empty());
        assert_eq!(core.latest_requested(), 3);
        assert_eq!(core.in_flight(), Some(1));
    }

    #[test]
    fn current_result_is_published_and_core_goes_idle() {
        let mut core = RecomputeCore::new();
        request(&mut core);
        core.computation_started(1);

        let step = finish(&mut core, 1, Ok(DerivedState::default()));

        assert_eq!(
            step.commands,
            vec![CoreCommand::Publish {
                generation: 1,
                state: DerivedState::default()
            }]
        );
        assert!(core.is_idle());
        assert_eq!(core.last_applied(), 1);
    }

    #[test]
    fn stale_result_is_discarded_and_latest_restarted() {
        let mut core = RecomputeCore::new();
        request(&mut core);
        core.computation_started(1);
        request(&mut core);
        request(&mut core);

        let step = finish(&mut core, 1, Ok(state_with_banner("stale")));

        assert_eq!(
            step.commands,
            vec![
                CoreCommand::Discard { generation: 1, latest: 3 },
                CoreCommand::StartComputation { generation: 3 },
            ]
        );
        assert_eq!(core.phase(), RecomputePhase::Scheduled);
        assert_eq!(core.last_applied(), 0);

        core.computation_started(3);
        let step = finish(&mut core, 3, Ok(state_with_banner("fresh")));
        assert_eq!(
            step.commands,
            vec![CoreCommand::Publish {
                generation: 3,
                state: state_with_banner("fresh")
            }]
        );
        assert!(core.is_idle());
    }

    #[test]
    fn failure_clears_in_flight_without_publishing() {
        let mut core = RecomputeCore::new();
        request(&mut core);
        core.computation_started(1);

        let step = finish(&mut core, 1, Err("boom".to_string()));

        assert!(step.commands.is_empty());
        assert!(core.is_idle());
        assert_eq!(core.in_flight(), None);

        // A later mutation retries.
        let step = request(&mut core);
        assert_eq!(step.commands, vec![CoreCommand::StartComputation { generation: 2 }]);
    }

    #[test]
    fn failure_with_newer_request_restarts_for_latest() {
        let mut core = RecomputeCore::new();
        request(&mut core);
        core.computation_started(1);
        request(&mut core);

        let step = finish(&mut core, 1, Err("boom".to_string()));

        assert_eq!(step.commands, vec![CoreCommand::StartComputation { generation: 2 }]);
    }

    #[test]
    fn unknown_completion_is_ignored() {
        let mut core = RecomputeCore::new();
        request(&mut core);

        let step = finish(&mut core, 7, Ok(DerivedState::default()));

        assert!(step.commands.is_empty());
        assert_eq!(core.in_flight(), Some(1));
    }
}
