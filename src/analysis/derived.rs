// src/analysis/derived.rs

//! The bundle of derived facts published for one snapshot.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{NaiveDate, TimeDelta};

use crate::analysis::conflicts::detect_conflicts;
use crate::analysis::risk::evaluate;
use crate::analysis::snapshot::Snapshot;
use crate::graph::CriticalPathResult;
use crate::model::{Conflict, RiskLevel, StatusVocabulary, Task, TaskId};

/// Banner shown instead of critical-path output when the snapshot is cyclic.
pub const CYCLE_BANNER: &str = "Critical path disabled: dependency cycle detected";

/// Knobs for [`DerivedState::compute`] that are not part of the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSettings {
    /// Status token marking a task as finished.
    pub done_status: String,
    /// Upper bound (inclusive, in days after today) of the "due soon" list.
    pub attention_window_days: i64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            done_status: StatusVocabulary::DEFAULT_DONE.to_string(),
            attention_window_days: 7,
        }
    }
}

/// Everything the engine publishes for one generation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DerivedState {
    pub conflicts: Vec<Conflict>,
    /// Conflict messages per dependent task, newline-separated.
    pub conflict_messages: BTreeMap<TaskId, String>,
    pub risk: BTreeMap<TaskId, RiskLevel>,
    /// [`CYCLE_BANNER`] when the snapshot is cyclic, empty otherwise.
    pub critical_path_banner: String,
    pub project_finish_date: Option<NaiveDate>,
    pub critical_task_ids: BTreeSet<TaskId>,
    pub slack_days: BTreeMap<TaskId, i64>,
    pub due_today: Vec<Task>,
    /// Due after today but within the attention window.
    pub due_within_window: Vec<Task>,
    pub overdue: Vec<Task>,
    /// Tasks waiting on a dependency where neither side is done.
    pub blocked_by_dependencies: Vec<Task>,
}

impl DerivedState {
    /// Run every analysis pass over `snapshot`.
    ///
    /// Pure: the same snapshot, date and settings always produce an equal
    /// value.
    pub fn compute(snapshot: &Snapshot, today: NaiveDate, settings: &AnalysisSettings) -> Self {
        let tasks = &snapshot.tasks;
        let dependencies = &snapshot.dependencies;
        let is_done = |task: &Task| task.status() == settings.done_status;

        let conflicts = detect_conflicts(tasks, dependencies);
        let mut conflict_messages: BTreeMap<TaskId, String> = BTreeMap::new();
        for conflict in &conflicts {
            conflict_messages
                .entry(conflict.to_task_id.clone())
                .and_modify(|existing| {
                    existing.push('\n');
                    existing.push_str(&conflict.message);
                })
                .or_insert_with(|| conflict.message.clone());
        }

        let cpm = CriticalPathResult::compute(tasks, dependencies);
        let (critical_path_banner, project_finish_date, critical_task_ids, slack_days) =
            if cpm.has_cycle() {
                (CYCLE_BANNER.to_string(), None, BTreeSet::new(), BTreeMap::new())
            } else {
                (
                    String::new(),
                    cpm.project_finish_date(),
                    cpm.critical_task_ids().clone(),
                    cpm.slack_days(),
                )
            };

        let window_end = TimeDelta::try_days(settings.attention_window_days)
            .and_then(|window| today.checked_add_signed(window))
            .unwrap_or(NaiveDate::MAX);

        let mut risk = BTreeMap::new();
        let mut due_today = Vec::new();
        let mut due_within_window = Vec::new();
        let mut overdue = Vec::new();
        for task in tasks {
            risk.insert(task.id().to_string(), evaluate(task, today, &settings.done_status));
            if is_done(task) {
                continue;
            }
            let due = task.due_date();
            if due == today {
                due_today.push(task.clone());
            } else if due < today {
                overdue.push(task.clone());
            } else if due <= window_end {
                due_within_window.push(task.clone());
            }
        }

        let by_id: HashMap<&str, &Task> = tasks.iter().map(|t| (t.id(), t)).collect();
        let blocked_ids: BTreeSet<&str> = dependencies
            .iter()
            .filter_map(|dependency| {
                let from = *by_id.get(dependency.from_task_id())?;
                let to = *by_id.get(dependency.to_task_id())?;
                (!is_done(from) && !is_done(to)).then_some(to.id())
            })
            .collect();
        let blocked_by_dependencies = blocked_ids
            .into_iter()
            .filter_map(|id| by_id.get(id).map(|&t| t.clone()))
            .collect();

        Self {
            conflicts,
            conflict_messages,
            risk,
            critical_path_banner,
            project_finish_date,
            critical_task_ids,
            slack_days,
            due_today: sorted(due_today),
            due_within_window: sorted(due_within_window),
            overdue: sorted(overdue),
            blocked_by_dependencies: sorted(blocked_by_dependencies),
        }
    }

    pub fn has_cycle(&self) -> bool {
        !self.critical_path_banner.is_empty()
    }

    pub fn risk_of(&self, task: &str) -> RiskLevel {
        self.risk.get(task).copied().unwrap_or_default()
    }

    pub fn slack_of(&self, task: &str) -> Option<i64> {
        self.slack_days.get(task).copied()
    }
}

/// Attention lists are ordered by due date, then start date, then title.
fn sorted(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by(|a, b| {
        a.due_date()
            .cmp(&b.due_date())
            .then_with(|| a.start_date().cmp(&b.start_date()))
            .then_with(|| a.title().cmp(b.title()))
            .then_with(|| a.id().cmp(b.id()))
    });
    tasks
}
