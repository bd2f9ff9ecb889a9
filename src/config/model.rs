// src/config/model.rs

use serde::Deserialize;

use crate::analysis::AnalysisSettings;
use crate::model::StatusVocabulary;
use crate::types::LogLevel;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [engine]
/// attention_window_days = 7
/// event_channel_capacity = 64
///
/// [statuses]
/// names = ["TODO", "IN_PROGRESS", "DONE"]
/// done = "DONE"
///
/// [logging]
/// level = "debug"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub engine: EngineSection,

    #[serde(default)]
    pub statuses: StatusSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

/// `[engine]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineSection {
    /// How many days after today the "due soon" attention list reaches.
    #[serde(default = "default_attention_window_days")]
    pub attention_window_days: i64,

    /// Capacity of the engine's inbound event channel.
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

fn default_attention_window_days() -> i64 {
    7
}

fn default_event_channel_capacity() -> usize {
    64
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            attention_window_days: default_attention_window_days(),
            event_channel_capacity: default_event_channel_capacity(),
        }
    }
}

/// `[statuses]` section: the initial status vocabulary.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusSection {
    #[serde(default = "default_status_names")]
    pub names: Vec<String>,

    #[serde(default = "default_done_status")]
    pub done: String,
}

fn default_status_names() -> Vec<String> {
    StatusVocabulary::default().names().to_vec()
}

fn default_done_status() -> String {
    StatusVocabulary::DEFAULT_DONE.to_string()
}

impl Default for StatusSection {
    fn default() -> Self {
        Self {
            names: default_status_names(),
            done: default_done_status(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSection {
    /// If unset, `DUEGRAPH_LOG` (then `info`) is used.
    #[serde(default)]
    pub level: Option<LogLevel>,
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub engine: EngineSection,
    pub statuses: StatusVocabulary,
    pub logging: LoggingSection,
}

impl ConfigFile {
    /// Assemble an already-validated configuration.
    pub(crate) fn new_unchecked(
        engine: EngineSection,
        statuses: StatusVocabulary,
        logging: LoggingSection,
    ) -> Self {
        Self {
            engine,
            statuses,
            logging,
        }
    }

    /// Settings for derived-state computation under `vocabulary`.
    pub fn analysis_settings(&self, vocabulary: &StatusVocabulary) -> AnalysisSettings {
        AnalysisSettings {
            done_status: vocabulary.done().to_string(),
            attention_window_days: self.engine.attention_window_days,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(
            EngineSection::default(),
            StatusVocabulary::default(),
            LoggingSection::default(),
        )
    }
}
