use std::str::FromStr;
use serde::Deserialize;

/// Verbosity accepted by [`crate::logging::init_logging`] and the
/// `[logging]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!(
                "invalid log level: {other} (expected error, warn, info, debug or trace)"
            )),
        }
    }
}

/// What caused a derived-state recompute to be requested.
///
/// Only used for diagnostics; every trigger is handled the same way by the
/// recompute core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationTrigger {
    TaskUpserted,
    TaskRemoved,
    DependencyAdded,
    DependencyRemoved,
    StatusesChanged,
    ProjectSelected,
    /// Explicit recompute with unchanged inputs (e.g. the date rolled over).
    Refresh,
}
