// src/graph/topology.rs

//! Topological order and cycle detection over a task snapshot.

use std::collections::BTreeSet;
use std::iter;

use tracing::debug;

use crate::graph::dependency_graph::DependencyGraph;
use crate::model::{Dependency, Task, TaskId};

/// Outcome of [`topological_sort`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopologyResult {
    /// Task ids, every predecessor before its successors. Ordering among
    /// tasks that become ready at the same time is unspecified.
    pub order: Vec<TaskId>,
    pub has_cycle: bool,
    /// Tasks still waiting on a predecessor when the sort stalled. This is an
    /// over-approximation of the cycle: tasks downstream of a cycle are
    /// included too. Empty when `has_cycle` is false.
    pub blocked: BTreeSet<TaskId>,
}

impl TopologyResult {
    /// Position of `task` in the order, if it was emitted.
    pub fn position(&self, task: &str) -> Option<usize> {
        self.order.iter().position(|id| id == task)
    }
}

/// Sort `tasks` so that every dependency's `from` precedes its `to`.
///
/// Dependencies that reference tasks outside `tasks` are ignored.
pub fn topological_sort(tasks: &[Task], dependencies: &[Dependency]) -> TopologyResult {
    let graph = DependencyGraph::build(tasks, dependencies);
    let sorted = graph.kahn();

    if sorted.has_cycle() {
        debug!(
            tasks = graph.task_count(),
            emitted = sorted.order.len(),
            blocked = sorted.blocked.len(),
            "dependency cycle detected"
        );
    }

    TopologyResult {
        has_cycle: sorted.has_cycle(),
        order: sorted.order.into_iter().map(str::to_string).collect(),
        blocked: sorted.blocked.into_iter().map(str::to_string).collect(),
    }
}

/// Whether adding `candidate` to `dependencies` would close a cycle.
///
/// Re-runs the whole sort, so each check is O(V + E).
pub fn creates_cycle(tasks: &[Task], dependencies: &[Dependency], candidate: &Dependency) -> bool {
    DependencyGraph::build(tasks, dependencies.iter().chain(iter::once(candidate)))
        .kahn()
        .has_cycle()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::model::ProjectId;

    fn task(id: &str) -> Task {
        Task::new(
            id,
            ProjectId::new(1).unwrap(),
            id.to_uppercase(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            "TODO",
        )
        .unwrap()
    }

    fn dep(id: &str, from: &str, to: &str) -> Dependency {
        Dependency::new(id, from, to).unwrap()
    }

    #[test]
    fn orders_predecessors_before_successors() {
        let tasks = vec![task("c"), task("b"), task("a")];
        let deps = vec![dep("d1", "a", "b"), dep("d2", "b", "c")];

        let result = topological_sort(&tasks, &deps);

        assert!(!result.has_cycle);
        assert!(result.blocked.is_empty());
        assert_eq!(result.order, vec!["a", "b", "c"]);
    }

    #[test]
    fn detects_two_node_cycle() {
        let tasks = vec![task("a"), task("b")];
        let deps = vec![dep("d1", "a", "b"), dep("d2", "b", "a")];

        let result = topological_sort(&tasks, &deps);

        assert!(result.has_cycle);
        assert!(result.blocked.contains("a"));
        assert!(result.blocked.contains("b"));
        assert!(result.order.is_empty());
    }

    #[test]
    fn dangling_dependencies_do_not_affect_order() {
        let tasks = vec![task("a"), task("b")];
        let deps = vec![dep("d1", "a", "removed"), dep("d2", "removed", "a")];

        let result = topological_sort(&tasks, &deps);

        assert!(!result.has_cycle);
        assert_eq!(result.order.len(), 2);
    }

    #[test]
    fn creates_cycle_checks_candidate_against_existing_edges() {
        let tasks = vec![task("a"), task("b"), task("c")];
        let deps = vec![dep("d1", "a", "b"), dep("d2", "b", "c")];

        assert!(creates_cycle(&tasks, &deps, &dep("d3", "c", "a")));
        assert!(!creates_cycle(&tasks, &deps, &dep("d3", "a", "c")));
        // Candidate touching an unknown task is dropped like any dangling edge.
        assert!(!creates_cycle(&tasks, &deps, &dep("d3", "c", "ghost")));
    }

    #[test]
    fn empty_input_is_acyclic() {
        let result = topological_sort(&[], &[]);
        assert!(!result.has_cycle);
        assert!(result.order.is_empty());
    }
}
