// src/lib.rs

pub mod analysis;
pub mod config;
pub mod engine;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod model;
pub mod schedule;
pub mod types;
pub mod worker;

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::ConfigFile;
use crate::engine::{Clock, EngineEvent, EngineHandle, Runtime, SharedState, SystemClock};
use crate::errors::{DuegraphError, Result};
use crate::worker::WorkerBackend;

/// A running engine: the caller handle, a subscription to published states
/// and the runtime task.
///
/// Dropping an `Engine` does not stop the runtime; call [`Engine::shutdown`].
#[derive(Debug)]
pub struct Engine {
    handle: EngineHandle,
    state: watch::Receiver<SharedState>,
    task: JoinHandle<Result<()>>,
}

impl Engine {
    pub fn handle(&self) -> EngineHandle {
        self.handle.clone()
    }

    /// A fresh subscription to published states.
    pub fn subscribe(&self) -> watch::Receiver<SharedState> {
        self.state.clone()
    }

    /// The most recently published state.
    pub fn current(&self) -> SharedState {
        Arc::clone(&*self.state.borrow())
    }

    /// Ask the runtime to stop and wait for it.
    pub async fn shutdown(self) -> Result<()> {
        // The loop may already be gone; joining still reports how it ended.
        if self.handle.shutdown().await.is_err() {
            debug!("runtime already stopped before shutdown");
        }
        self.task
            .await
            .map_err(|err| DuegraphError::Other(anyhow::Error::from(err)))?
    }
}

/// Start an engine reading the reference date from the system clock.
///
/// This wires together:
/// - the runtime event channel
/// - the compute worker
/// - the runtime loop, spawned onto the current Tokio runtime
pub fn spawn_engine(config: ConfigFile) -> Engine {
    spawn_engine_with_clock(config, Arc::new(SystemClock))
}

/// Like [`spawn_engine`], with an explicit clock.
pub fn spawn_engine_with_clock(config: ConfigFile, clock: Arc<dyn Clock>) -> Engine {
    let (tx, rx) = mpsc::channel::<EngineEvent>(config.engine.event_channel_capacity);

    let backend = WorkerBackend::new(tx.clone());
    let runtime = Runtime::new(config, rx, backend, clock);
    let state = runtime.subscribe();

    info!("spawning duegraph engine");
    let task = tokio::spawn(runtime.run());

    Engine {
        handle: EngineHandle::new(tx),
        state,
        task,
    }
}
