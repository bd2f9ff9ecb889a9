// src/worker/worker_loop.rs

//! The single worker that performs every derived-state computation.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::analysis::DerivedState;
use crate::engine::{ComputeOutcome, EngineEvent};

use super::job::ComputeJob;

/// Spawn the background worker loop.
///
/// Jobs are taken one at a time and each runs start to finish on the
/// blocking pool, so at most one computation is in progress. The outcome is
/// sent back to the runtime as [`EngineEvent::ComputationFinished`]; a
/// panicking computation is reported as a failed outcome.
pub fn spawn_worker(runtime_tx: mpsc::Sender<EngineEvent>) -> mpsc::Sender<ComputeJob> {
    let (tx, mut rx) = mpsc::channel::<ComputeJob>(8);

    tokio::spawn(async move {
        info!("compute worker started");

        while let Some(job) = rx.recv().await {
            let generation = job.generation;
            debug!(
                gen = generation,
                tasks = job.snapshot.tasks.len(),
                dependencies = job.snapshot.dependencies.len(),
                "computing derived state"
            );

            let outcome = run_isolated(move || job.run()).await;

            let event = EngineEvent::ComputationFinished {
                generation,
                outcome,
            };
            if runtime_tx.send(event).await.is_err() {
                warn!(gen = generation, "runtime is gone; dropping computation result");
                break;
            }
        }

        info!("compute worker finished (channel closed)");
    });

    tx
}

/// Run `compute` on the blocking pool. A panic becomes `Err` carrying the
/// panic message.
async fn run_isolated<F>(compute: F) -> ComputeOutcome
where
    F: FnOnce() -> DerivedState + Send + 'static,
{
    tokio::task::spawn_blocking(compute)
        .await
        .map_err(|err| {
            warn!(error = %err, "derived-state computation panicked");
            err.to_string()
        })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::analysis::{AnalysisSettings, Snapshot};
    use crate::model::{ProjectId, Task};

    #[tokio::test]
    async fn reports_each_job_back_to_the_runtime() {
        let (runtime_tx, mut runtime_rx) = mpsc::channel(4);
        let worker = spawn_worker(runtime_tx);
        let day = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let task = Task::new("t", ProjectId::new(1).unwrap(), "T", day, day, "TODO").unwrap();

        worker
            .send(ComputeJob {
                generation: 4,
                snapshot: Snapshot::new(vec![task], Vec::new()),
                today: day,
                settings: AnalysisSettings::default(),
            })
            .await
            .unwrap();

        match runtime_rx.recv().await.unwrap() {
            EngineEvent::ComputationFinished {
                generation,
                outcome,
            } => {
                assert_eq!(generation, 4);
                assert_eq!(outcome.unwrap().due_today.len(), 1);
            }
            other => panic!("unexpected event {}", other.kind()),
        }
    }

    #[tokio::test]
    async fn panicking_computation_becomes_failed_outcome() {
        let outcome = run_isolated(|| panic!("cpm blew up")).await;

        let reason = outcome.unwrap_err();
        assert!(reason.contains("panicked"), "unexpected reason: {reason}");
    }
}
