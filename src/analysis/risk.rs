// src/analysis/risk.rs

use chrono::{NaiveDate, TimeDelta};

use crate::model::{RiskLevel, Task};

/// A task due no later than `today + DUE_SOON_HORIZON_DAYS` is due soon.
pub const DUE_SOON_HORIZON_DAYS: i64 = 1;

/// Classify `task` relative to `today`. Done tasks carry no risk.
pub fn evaluate(task: &Task, today: NaiveDate, done_status: &str) -> RiskLevel {
    if task.status() == done_status {
        return RiskLevel::None;
    }
    if task.due_date() < today {
        return RiskLevel::Overdue;
    }

    let horizon = today
        .checked_add_signed(TimeDelta::days(DUE_SOON_HORIZON_DAYS))
        .unwrap_or(NaiveDate::MAX);
    if task.due_date() <= horizon {
        return RiskLevel::DueSoon;
    }
    RiskLevel::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProjectId;

    fn task_due(due: NaiveDate, status: &str) -> Task {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        Task::new("t", ProjectId::new(1).unwrap(), "T", start, due, status).unwrap()
    }

    #[test]
    fn classifies_by_due_date() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let day = |d| NaiveDate::from_ymd_opt(2026, 3, d).unwrap();

        assert_eq!(evaluate(&task_due(day(10), "TODO"), today, "DONE"), RiskLevel::DueSoon);
        assert_eq!(evaluate(&task_due(day(11), "TODO"), today, "DONE"), RiskLevel::DueSoon);
        assert_eq!(evaluate(&task_due(day(12), "TODO"), today, "DONE"), RiskLevel::None);
        assert_eq!(evaluate(&task_due(day(9), "TODO"), today, "DONE"), RiskLevel::Overdue);
    }

    #[test]
    fn done_task_has_no_risk() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let overdue = task_due(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(), "DONE");
        assert_eq!(evaluate(&overdue, today, "DONE"), RiskLevel::None);
    }
}
