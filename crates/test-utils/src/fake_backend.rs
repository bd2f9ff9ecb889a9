use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::mpsc;
use duegraph::engine::{ComputeOutcome, EngineEvent, Generation};
use duegraph::errors::Result;
use duegraph::worker::{ComputeBackend, ComputeJob};

/// A fake backend that:
/// - counts how many jobs were submitted
/// - computes each job inline and reports `ComputationFinished` right away.
///
/// The report is sent from a spawned task so a full event channel cannot
/// stall the runtime loop that called `submit`.
pub struct InstantBackend {
    runtime_tx: mpsc::Sender<EngineEvent>,
    submitted: Arc<AtomicUsize>,
}

impl InstantBackend {
    pub fn new(runtime_tx: mpsc::Sender<EngineEvent>, submitted: Arc<AtomicUsize>) -> Self {
        Self {
            runtime_tx,
            submitted,
        }
    }
}

impl ComputeBackend for InstantBackend {
    fn submit(&mut self, job: ComputeJob) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let tx = self.runtime_tx.clone();
        let submitted = Arc::clone(&self.submitted);

        Box::pin(async move {
            submitted.fetch_add(1, Ordering::SeqCst);
            let event = EngineEvent::ComputationFinished {
                generation: job.generation,
                outcome: Ok(job.run()),
            };
            tokio::spawn(async move {
                let _ = tx.send(event).await;
            });
            Ok(())
        })
    }
}

/// A fake backend that hands every job to the test, which decides when (and
/// with what outcome) it finishes via [`finish`].
pub struct ManualBackend {
    jobs: mpsc::UnboundedSender<ComputeJob>,
}

impl ManualBackend {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ComputeJob>) {
        let (jobs, rx) = mpsc::unbounded_channel();
        (Self { jobs }, rx)
    }
}

impl ComputeBackend for ManualBackend {
    fn submit(&mut self, job: ComputeJob) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let jobs = self.jobs.clone();
        Box::pin(async move {
            jobs.send(job)
                .map_err(|_| anyhow::anyhow!("test dropped the job receiver"))?;
            Ok(())
        })
    }
}

/// Report `outcome` for `generation` to the runtime.
pub async fn finish(
    runtime_tx: &mpsc::Sender<EngineEvent>,
    generation: Generation,
    outcome: ComputeOutcome,
) {
    runtime_tx
        .send(EngineEvent::ComputationFinished {
            generation,
            outcome,
        })
        .await
        .expect("runtime should still be running");
}
