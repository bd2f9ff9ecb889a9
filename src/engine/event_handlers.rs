// src/engine/event_handlers.rs

//! Event handling logic for the recompute core.

use tracing::{debug, error, warn};

use crate::analysis::DerivedState;
use crate::engine::core::{InFlight, RecomputePhase};
use crate::engine::generation::GenerationTracker;
use crate::engine::{ComputeOutcome, Generation, MutationTrigger};

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    /// Snapshot the active set and hand it to the worker as `generation`.
    StartComputation { generation: Generation },
    /// Replace the published state with `state`.
    Publish {
        generation: Generation,
        state: DerivedState,
    },
    /// The result for `generation` was computed from outdated input and is
    /// dropped.
    Discard {
        generation: Generation,
        latest: Generation,
    },
}

/// Decision returned by the core after handling a single event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreStep {
    /// Commands the IO shell should execute, in order.
    pub commands: Vec<CoreCommand>,
}

impl CoreStep {
    pub fn none() -> Self {
        Self::default()
    }

    fn with(commands: Vec<CoreCommand>) -> Self {
        Self { commands }
    }
}

/// Handle a mutation: take the next generation and start a computation
/// unless one is already in flight. An in-flight computation picks the new
/// generation up when it completes.
pub fn handle_recompute_request(
    tracker: &mut GenerationTracker,
    flight: &mut InFlight,
    trigger: MutationTrigger,
) -> CoreStep {
    let generation = tracker.next();
    debug!(?trigger, gen = generation, "derived-state recompute requested");

    if let Some(running) = flight.generation {
        debug!(
            gen = generation,
            in_flight = running,
            "computation already in flight; recorded as latest requested"
        );
        return CoreStep::none();
    }

    CoreStep::with(vec![schedule(flight, generation)])
}

/// Handle the shell reporting that `generation` was handed to the worker.
pub fn handle_computation_started(flight: &mut InFlight, generation: Generation) -> CoreStep {
    if flight.generation == Some(generation) && flight.phase == RecomputePhase::Scheduled {
        flight.phase = RecomputePhase::Computing;
    } else {
        warn!(
            gen = generation,
            in_flight = ?flight.generation,
            phase = ?flight.phase,
            "start reported for a generation that is not scheduled; ignoring"
        );
    }
    CoreStep::none()
}

/// Handle a finished computation.
///
/// - The result is published only if `generation` is still the latest
///   requested one; otherwise it is discarded.
/// - A failure keeps the previously published state.
/// - If newer input arrived meanwhile, a computation for the latest
///   generation is started right away; otherwise the core goes idle.
pub fn handle_computation_finished(
    tracker: &mut GenerationTracker,
    flight: &mut InFlight,
    generation: Generation,
    outcome: ComputeOutcome,
) -> CoreStep {
    if flight.generation != Some(generation) {
        warn!(
            gen = generation,
            in_flight = ?flight.generation,
            "completion for a generation that is not in flight; ignoring"
        );
        return CoreStep::none();
    }

    flight.phase = RecomputePhase::Applying;
    let mut commands = Vec::new();

    match outcome {
        Ok(state) if tracker.is_latest(generation) => {
            if tracker.mark_applied(generation) {
                debug!(gen = generation, "applying derived state");
                commands.push(CoreCommand::Publish { generation, state });
            }
        }
        Ok(_) => {
            let latest = tracker.latest_requested();
            debug!(gen = generation, latest, "skipping stale derived state");
            commands.push(CoreCommand::Discard { generation, latest });
        }
        Err(reason) => {
            error!(
                gen = generation,
                error = %reason,
                "derived-state computation failed; keeping previously published state"
            );
        }
    }

    flight.generation = None;
    if tracker.superseded(generation) {
        commands.push(schedule(flight, tracker.latest_requested()));
    } else {
        flight.phase = RecomputePhase::Idle;
    }

    CoreStep::with(commands)
}

fn schedule(flight: &mut InFlight, generation: Generation) -> CoreCommand {
    flight.generation = Some(generation);
    flight.phase = RecomputePhase::Scheduled;
    CoreCommand::StartComputation { generation }
}
