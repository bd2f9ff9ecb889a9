// src/graph/critical_path.rs

//! Critical path method (CPM) over a task snapshot.
//!
//! All timing is expressed as integer day offsets from the earliest start
//! date in the snapshot (day 0). A task occupying days `es..=ef` lasts
//! `ef - es + 1` days, and a finish-to-start successor may start on `ef + 1`
//! at the earliest.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{NaiveDate, TimeDelta};
use serde::Serialize;
use tracing::debug;

use crate::graph::dependency_graph::DependencyGraph;
use crate::model::{Dependency, Task, TaskId};

/// Earliest/latest window of a single task, in day offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskTiming {
    pub earliest_start: i64,
    pub earliest_finish: i64,
    pub latest_start: i64,
    pub latest_finish: i64,
}

impl TaskTiming {
    /// Days the task may slip without moving the project finish.
    pub fn slack(&self) -> i64 {
        self.latest_start - self.earliest_start
    }

    pub fn is_critical(&self) -> bool {
        self.slack() == 0
    }
}

/// Outcome of [`CriticalPathResult::compute`].
///
/// A cyclic snapshot carries no timing at all: no finish date, no timings,
/// no critical tasks. Only the diagnostic blocked set is filled in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CriticalPathResult {
    has_cycle: bool,
    cycle_task_ids: BTreeSet<TaskId>,
    project_start: Option<NaiveDate>,
    project_finish: Option<NaiveDate>,
    timings: BTreeMap<TaskId, TaskTiming>,
    critical: BTreeSet<TaskId>,
}

impl CriticalPathResult {
    /// Result for an empty snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Result for a cyclic snapshot.
    pub fn cycle(cycle_task_ids: BTreeSet<TaskId>) -> Self {
        Self {
            has_cycle: true,
            cycle_task_ids,
            ..Self::default()
        }
    }

    /// Run the forward and backward passes.
    pub fn compute(tasks: &[Task], dependencies: &[Dependency]) -> Self {
        let Some(project_start) = tasks.iter().map(Task::start_date).min() else {
            return Self::empty();
        };

        let graph = DependencyGraph::build(tasks, dependencies);
        let sorted = graph.kahn();
        if sorted.has_cycle() {
            debug!(blocked = sorted.blocked.len(), "critical path disabled by cycle");
            return Self::cycle(sorted.blocked.into_iter().map(str::to_string).collect());
        }

        let by_id: HashMap<&str, &Task> = tasks.iter().map(|t| (t.id(), t)).collect();

        // Forward pass: (earliest_start, earliest_finish).
        let mut earliest: HashMap<&str, (i64, i64)> = HashMap::with_capacity(by_id.len());
        for &id in &sorted.order {
            // Every node comes from `tasks`.
            let task = by_id[id];
            let own_offset = (task.start_date() - project_start).num_days();

            let es = graph
                .predecessors(id)
                .filter_map(|pred| earliest.get(pred).map(|&(_, ef)| ef + 1))
                .fold(own_offset, i64::max);
            let ef = es + task.duration_days() - 1;
            earliest.insert(id, (es, ef));
        }

        let finish_offset = earliest.values().map(|&(_, ef)| ef).max().unwrap_or(0);

        // Backward pass: (latest_start, latest_finish).
        let mut latest: HashMap<&str, (i64, i64)> = HashMap::with_capacity(by_id.len());
        for &id in sorted.order.iter().rev() {
            let task = by_id[id];

            let lf = graph
                .successors(id)
                .filter_map(|succ| latest.get(succ).map(|&(ls, _)| ls - 1))
                .min()
                .unwrap_or(finish_offset);
            let ls = lf - task.duration_days() + 1;
            latest.insert(id, (ls, lf));
        }

        let mut timings = BTreeMap::new();
        let mut critical = BTreeSet::new();
        for &id in &sorted.order {
            let (earliest_start, earliest_finish) = earliest[id];
            let (latest_start, latest_finish) = latest[id];
            let timing = TaskTiming {
                earliest_start,
                earliest_finish,
                latest_start,
                latest_finish,
            };
            if timing.is_critical() {
                critical.insert(id.to_string());
            }
            timings.insert(id.to_string(), timing);
        }

        let project_finish = project_start.checked_add_signed(TimeDelta::days(finish_offset));

        debug!(
            tasks = timings.len(),
            critical = critical.len(),
            finish_offset,
            "critical path computed"
        );

        Self {
            has_cycle: false,
            cycle_task_ids: BTreeSet::new(),
            project_start: Some(project_start),
            project_finish,
            timings,
            critical,
        }
    }

    pub fn has_cycle(&self) -> bool {
        self.has_cycle
    }

    /// Over-approximate set of tasks stuck behind a cycle.
    pub fn cycle_task_ids(&self) -> &BTreeSet<TaskId> {
        &self.cycle_task_ids
    }

    /// Day 0 of every offset in this result.
    pub fn project_start_date(&self) -> Option<NaiveDate> {
        self.project_start
    }

    pub fn project_finish_date(&self) -> Option<NaiveDate> {
        self.project_finish
    }

    pub fn timing(&self, task: &str) -> Option<&TaskTiming> {
        self.timings.get(task)
    }

    pub fn timings(&self) -> &BTreeMap<TaskId, TaskTiming> {
        &self.timings
    }

    pub fn earliest_start_days(&self) -> BTreeMap<TaskId, i64> {
        self.per_task(|t| t.earliest_start)
    }

    pub fn earliest_finish_days(&self) -> BTreeMap<TaskId, i64> {
        self.per_task(|t| t.earliest_finish)
    }

    pub fn latest_start_days(&self) -> BTreeMap<TaskId, i64> {
        self.per_task(|t| t.latest_start)
    }

    pub fn latest_finish_days(&self) -> BTreeMap<TaskId, i64> {
        self.per_task(|t| t.latest_finish)
    }

    pub fn slack_days(&self) -> BTreeMap<TaskId, i64> {
        self.per_task(TaskTiming::slack)
    }

    pub fn critical_task_ids(&self) -> &BTreeSet<TaskId> {
        &self.critical
    }

    pub fn is_critical(&self, task: &str) -> bool {
        self.critical.contains(task)
    }

    fn per_task(&self, field: impl Fn(&TaskTiming) -> i64) -> BTreeMap<TaskId, i64> {
        self.timings
            .iter()
            .map(|(id, timing)| (id.clone(), field(timing)))
            .collect()
    }
}
