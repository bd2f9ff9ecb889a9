// src/model/mod.rs

//! Entity model: the immutable values every other module reads.
//!
//! - [`task`] holds [`Task`] and [`ProjectId`].
//! - [`dependency`] holds [`Dependency`] and its (single) [`DependencyKind`].
//! - [`findings`] holds the derived value types [`Conflict`] and [`RiskLevel`].
//! - [`status`] holds the caller-managed [`StatusVocabulary`].

pub mod dependency;
pub mod findings;
pub mod status;
pub mod task;

pub use dependency::{Dependency, DependencyKind, FINISH_START_LAG_DAYS};
pub use findings::{Conflict, RiskLevel};
pub use status::StatusVocabulary;
pub use task::{ProjectId, Task};

/// Canonical task identifier type used throughout the crate.
pub type TaskId = String;
