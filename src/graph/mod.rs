// src/graph/mod.rs

//! Task graph algorithms.
//!
//! - [`dependency_graph`] builds the directed task graph from a snapshot,
//!   dropping dangling edges and unifying duplicates, and runs Kahn's sort.
//! - [`topology`] exposes the topological order and cycle checks.
//! - [`critical_path`] runs the forward/backward critical path passes over
//!   the same Kahn order, reusing the built graph for predecessor and
//!   successor lookups instead of going through [`topological_sort`].

pub mod critical_path;
pub mod dependency_graph;
pub mod topology;

pub use critical_path::{CriticalPathResult, TaskTiming};
pub use dependency_graph::DependencyGraph;
pub use topology::{TopologyResult, creates_cycle, topological_sort};
