// src/worker/backend.rs

//! Pluggable compute backend abstraction.
//!
//! The runtime hands jobs to a `ComputeBackend` instead of a raw mpsc sender.
//! This makes it easy to swap in a fake backend in tests while keeping the
//! production worker in [`super::worker_loop`].
//!
//! - `WorkerBackend` is the default implementation. It wraps the
//!   `spawn_worker` loop and forwards jobs over an mpsc channel.
//! - Tests can provide their own `ComputeBackend` that, for example, holds
//!   jobs back and completes them in any order.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;

use crate::engine::EngineEvent;
use crate::errors::{DuegraphError, Result};

use super::job::ComputeJob;
use super::worker_loop::spawn_worker;

/// Trait abstracting where computations run.
///
/// Implementations must eventually report every submitted job back to the
/// runtime as an [`EngineEvent::ComputationFinished`].
pub trait ComputeBackend: Send {
    fn submit(&mut self, job: ComputeJob) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Backend used in production: a single dedicated worker loop.
pub struct WorkerBackend {
    tx: mpsc::Sender<ComputeJob>,
}

impl WorkerBackend {
    /// Spawn the worker loop, reporting results on `runtime_tx`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(runtime_tx: mpsc::Sender<EngineEvent>) -> Self {
        let tx = spawn_worker(runtime_tx);
        Self { tx }
    }
}

impl ComputeBackend for WorkerBackend {
    fn submit(&mut self, job: ComputeJob) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        // Clone the sender so the future doesn't borrow `self` across `await`.
        let tx = self.tx.clone();

        Box::pin(async move {
            tx.send(job)
                .await
                .map_err(|_| DuegraphError::Other(anyhow::anyhow!("compute worker has stopped")))
        })
    }
}
