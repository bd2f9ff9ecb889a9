// src/worker/job.rs

use chrono::NaiveDate;

use crate::analysis::{AnalysisSettings, DerivedState, Snapshot};
use crate::engine::Generation;

/// Everything a computation needs, copied out of the workspace when the job
/// was scheduled.
#[derive(Debug, Clone)]
pub struct ComputeJob {
    pub generation: Generation,
    pub snapshot: Snapshot,
    /// Reference date for risk and attention lists.
    pub today: NaiveDate,
    pub settings: AnalysisSettings,
}

impl ComputeJob {
    pub fn run(&self) -> DerivedState {
        DerivedState::compute(&self.snapshot, self.today, &self.settings)
    }
}
