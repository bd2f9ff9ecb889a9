// src/graph/dependency_graph.rs

use std::collections::{HashMap, VecDeque};

use petgraph::Direction::{Incoming, Outgoing};
use petgraph::graphmap::DiGraphMap;
use tracing::trace;

use crate::model::{Dependency, Task};

/// Directed task graph borrowed from a snapshot.
///
/// Edge direction follows the dependency: for `from -> to` (`to` depends on
/// `from`) we add edge `from -> to`. Nodes are kept in task input order, so
/// every traversal over the same snapshot is deterministic.
#[derive(Debug, Clone)]
pub struct DependencyGraph<'a> {
    graph: DiGraphMap<&'a str, ()>,
}

/// Result of running Kahn's algorithm over a [`DependencyGraph`].
#[derive(Debug, Clone)]
pub(crate) struct KahnOrder<'a> {
    /// Nodes in emission order.
    pub order: Vec<&'a str>,
    /// Nodes whose in-degree never reached zero. Non-empty iff the graph has
    /// a cycle; includes nodes merely downstream of a cycle.
    pub blocked: Vec<&'a str>,
}

impl KahnOrder<'_> {
    pub fn has_cycle(&self) -> bool {
        !self.blocked.is_empty()
    }
}

impl<'a> DependencyGraph<'a> {
    /// Build a graph with one node per task and one edge per dependency
    /// whose endpoints are both present.
    ///
    /// Dependencies pointing at unknown tasks are skipped; repeated ordered
    /// pairs collapse into a single edge.
    pub fn build<I>(tasks: &'a [Task], dependencies: I) -> Self
    where
        I: IntoIterator<Item = &'a Dependency>,
    {
        let mut graph: DiGraphMap<&'a str, ()> = DiGraphMap::new();

        for task in tasks {
            graph.add_node(task.id());
        }

        for dependency in dependencies {
            let from = dependency.from_task_id();
            let to = dependency.to_task_id();
            if !graph.contains_node(from) || !graph.contains_node(to) {
                trace!(dependency = %dependency.id(), %from, %to, "skipping dangling dependency");
                continue;
            }
            graph.add_edge(from, to, ());
        }

        Self { graph }
    }

    /// Number of distinct task ids.
    pub fn task_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct valid edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Task ids in input order.
    pub fn tasks(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.graph.nodes()
    }

    /// Tasks that must finish before `task` may start.
    pub fn predecessors(&self, task: &'a str) -> impl Iterator<Item = &'a str> + '_ {
        self.graph.neighbors_directed(task, Incoming)
    }

    /// Tasks waiting on `task`.
    pub fn successors(&self, task: &'a str) -> impl Iterator<Item = &'a str> + '_ {
        self.graph.neighbors_directed(task, Outgoing)
    }

    /// Kahn's algorithm: seed a FIFO with every zero in-degree node, emit and
    /// decrement successors until the queue drains.
    pub(crate) fn kahn(&self) -> KahnOrder<'a> {
        let mut in_degree: HashMap<&'a str, usize> = self
            .graph
            .nodes()
            .map(|node| (node, self.graph.neighbors_directed(node, Incoming).count()))
            .collect();

        let mut queue: VecDeque<&'a str> = self
            .graph
            .nodes()
            .filter(|node| in_degree.get(node).copied() == Some(0))
            .collect();

        let mut order = Vec::with_capacity(self.graph.node_count());
        while let Some(current) = queue.pop_front() {
            order.push(current);

            for next in self.graph.neighbors_directed(current, Outgoing) {
                if let Some(degree) = in_degree.get_mut(next) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(next);
                    }
                }
            }
        }

        let blocked = self
            .graph
            .nodes()
            .filter(|node| in_degree.get(node).copied().unwrap_or(0) > 0)
            .collect();

        KahnOrder { order, blocked }
    }
}
