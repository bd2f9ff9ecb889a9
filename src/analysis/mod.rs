// src/analysis/mod.rs

//! Read-only analysis passes over an immutable [`Snapshot`].
//!
//! - [`conflicts`] flags finish-to-start lag violations.
//! - [`risk`] classifies a single task's due-date risk.
//! - [`derived`] composes every pass (including the critical path) into one
//!   [`DerivedState`] bundle, which is what the engine publishes.

pub mod conflicts;
pub mod derived;
pub mod risk;
pub mod snapshot;

pub use conflicts::detect_conflicts;
pub use derived::{AnalysisSettings, CYCLE_BANNER, DerivedState};
pub use risk::evaluate;
pub use snapshot::Snapshot;
