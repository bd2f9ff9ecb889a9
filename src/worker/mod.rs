// src/worker/mod.rs

//! Off-loop execution of derived-state computations.
//!
//! - [`job`] describes one computation: a generation plus its snapshot.
//! - [`worker_loop`] runs jobs one at a time on the blocking pool.
//! - [`backend`] is the seam the runtime talks to, so tests can swap in a
//!   fake.

pub mod backend;
pub mod job;
pub mod worker_loop;

pub use backend::{ComputeBackend, WorkerBackend};
pub use job::ComputeJob;
pub use worker_loop::spawn_worker;
