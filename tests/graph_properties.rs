// tests/graph_properties.rs

use std::collections::BTreeSet;

use proptest::prelude::*;

use duegraph::graph::{CriticalPathResult, topological_sort};
use duegraph::model::{Dependency, Task};
use duegraph_test_utils::{TaskBuilder, date};

/// Tasks `t0..tn` with random start offsets and durations.
fn tasks_strategy(max_tasks: usize) -> impl Strategy<Value = Vec<Task>> {
    proptest::collection::vec((0i64..20, 1i64..6), 1..=max_tasks).prop_map(|shapes| {
        shapes
            .into_iter()
            .enumerate()
            .map(|(i, (offset, days))| {
                let start = date(2026, 1, 1) + chrono::TimeDelta::days(offset);
                TaskBuilder::new(&format!("t{i}")).span(start, days).build()
            })
            .collect()
    })
}

/// An acyclic snapshot: task `i` may only depend on tasks `0..i`.
fn dag_strategy(max_tasks: usize) -> impl Strategy<Value = (Vec<Task>, Vec<Dependency>)> {
    tasks_strategy(max_tasks).prop_flat_map(|tasks| {
        let n = tasks.len();
        let edges = proptest::collection::vec((any::<usize>(), any::<usize>()), 0..n * 2);
        (Just(tasks), edges).prop_map(move |(tasks, raw)| {
            let mut seen = BTreeSet::new();
            let dependencies = raw
                .into_iter()
                .filter_map(|(a, b)| {
                    let to = b % n;
                    if to == 0 {
                        return None;
                    }
                    let from = a % to;
                    seen.insert((from, to)).then(|| {
                        Dependency::new(format!("d{from}-{to}"), format!("t{from}"), format!("t{to}"))
                            .expect("distinct endpoints")
                    })
                })
                .collect();
            (tasks, dependencies)
        })
    })
}

/// A DAG plus one back edge from the last task to the first, closing a cycle.
fn cyclic_strategy(max_tasks: usize) -> impl Strategy<Value = (Vec<Task>, Vec<Dependency>, usize)> {
    (dag_strategy(max_tasks), 2usize..=max_tasks.max(2)).prop_map(|((tasks, mut deps), len)| {
        let mut tasks = tasks;
        while tasks.len() < len {
            let i = tasks.len();
            tasks.push(TaskBuilder::new(&format!("t{i}")).build());
        }
        // Chain t0 -> t1 -> ... -> t(len-1) -> t0.
        for i in 0..len {
            let (from, to) = (i, (i + 1) % len);
            deps.push(
                Dependency::new(format!("ring{i}"), format!("t{from}"), format!("t{to}"))
                    .expect("distinct endpoints"),
            );
        }
        (tasks, deps, len)
    })
}

proptest! {
    #[test]
    fn acyclic_order_respects_every_edge((tasks, deps) in dag_strategy(12)) {
        let result = topological_sort(&tasks, &deps);

        prop_assert!(!result.has_cycle);
        prop_assert!(result.blocked.is_empty());
        prop_assert_eq!(result.order.len(), tasks.len());
        for dep in &deps {
            let from = result.position(dep.from_task_id()).unwrap();
            let to = result.position(dep.to_task_id()).unwrap();
            prop_assert!(from < to, "{} must precede {}", dep.from_task_id(), dep.to_task_id());
        }
    }

    #[test]
    fn cycle_members_are_always_blocked((tasks, deps, len) in cyclic_strategy(10)) {
        let result = topological_sort(&tasks, &deps);

        prop_assert!(result.has_cycle);
        for i in 0..len {
            let id = format!("t{i}");
            prop_assert!(result.blocked.contains(&id), "{} should be blocked", id);
        }
    }

    #[test]
    fn critical_path_offsets_are_consistent((tasks, deps) in dag_strategy(12)) {
        let cpm = CriticalPathResult::compute(&tasks, &deps);
        prop_assert!(!cpm.has_cycle());

        let project_start = tasks.iter().map(Task::start_date).min().unwrap();
        let finish_offset = (cpm.project_finish_date().unwrap() - project_start).num_days();

        for task in &tasks {
            let timing = cpm.timing(task.id()).unwrap();
            prop_assert!(timing.slack() >= 0);

            let has_pred = deps.iter().any(|d| d.to_task_id() == task.id());
            let has_succ = deps.iter().any(|d| d.from_task_id() == task.id());
            if !has_pred {
                prop_assert_eq!(timing.earliest_start, (task.start_date() - project_start).num_days());
            }
            if !has_succ {
                prop_assert_eq!(timing.latest_finish, finish_offset);
            }
        }
        prop_assert!(!cpm.critical_task_ids().is_empty());
    }
}
