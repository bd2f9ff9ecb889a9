// src/analysis/conflicts.rs

use std::collections::HashMap;

use chrono::{NaiveDate, TimeDelta};

use crate::model::{Conflict, Dependency, Task};

/// Report every dependency whose successor starts before
/// `predecessor.due_date + lag`.
///
/// One [`Conflict`] per violated dependency, in dependency order.
/// Dependencies with a missing endpoint are skipped.
pub fn detect_conflicts(tasks: &[Task], dependencies: &[Dependency]) -> Vec<Conflict> {
    let by_id: HashMap<&str, &Task> = tasks.iter().map(|t| (t.id(), t)).collect();

    dependencies
        .iter()
        .filter_map(|dependency| {
            let from = by_id.get(dependency.from_task_id())?;
            let to = by_id.get(dependency.to_task_id())?;

            let earliest_start = from
                .due_date()
                .checked_add_signed(TimeDelta::days(dependency.kind().lag_days()))
                .unwrap_or(NaiveDate::MAX);

            if to.start_date() >= earliest_start {
                return None;
            }

            Some(Conflict {
                dependency_id: dependency.id().to_string(),
                from_task_id: from.id().to_string(),
                to_task_id: to.id().to_string(),
                message: format!(
                    "Dependency violation: '{}' starts {}, must start on or after {} because it depends on '{}'.",
                    to.title(),
                    to.start_date().format("%Y-%m-%d"),
                    earliest_start.format("%Y-%m-%d"),
                    from.title(),
                ),
            })
        })
        .collect()
}
