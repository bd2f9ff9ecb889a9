// src/config/validate.rs

use crate::config::model::{ConfigFile, EngineSection, RawConfigFile};
use crate::errors::{DuegraphError, Result};
use crate::model::StatusVocabulary;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = DuegraphError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_engine_section(&raw.engine)?;
        let statuses = StatusVocabulary::new(raw.statuses.names, raw.statuses.done)
            .map_err(|e| DuegraphError::ConfigError(format!("[statuses]: {e}")))?;
        Ok(ConfigFile::new_unchecked(raw.engine, statuses, raw.logging))
    }
}

/// Roughly a century; anything longer is not an attention window.
pub const MAX_ATTENTION_WINDOW_DAYS: i64 = 36_500;

fn validate_engine_section(engine: &EngineSection) -> Result<()> {
    if engine.event_channel_capacity == 0 {
        return Err(DuegraphError::ConfigError(
            "[engine].event_channel_capacity must be >= 1 (got 0)".to_string(),
        ));
    }

    if !(0..=MAX_ATTENTION_WINDOW_DAYS).contains(&engine.attention_window_days) {
        return Err(DuegraphError::ConfigError(format!(
            "[engine].attention_window_days must be between 0 and {MAX_ATTENTION_WINDOW_DAYS} (got {})",
            engine.attention_window_days
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::StatusSection;

    #[test]
    fn defaults_are_valid() {
        let cfg = ConfigFile::try_from(RawConfigFile::default()).unwrap();
        assert_eq!(cfg.engine.attention_window_days, 7);
        assert_eq!(cfg.statuses.done(), "DONE");
    }

    #[test]
    fn zero_channel_capacity_is_rejected() {
        let raw = RawConfigFile {
            engine: EngineSection {
                event_channel_capacity: 0,
                ..EngineSection::default()
            },
            ..RawConfigFile::default()
        };
        assert!(matches!(ConfigFile::try_from(raw), Err(DuegraphError::ConfigError(_))));
    }

    #[test]
    fn done_status_outside_vocabulary_is_rejected() {
        let raw = RawConfigFile {
            statuses: StatusSection {
                names: vec!["OPEN".to_string()],
                done: "CLOSED".to_string(),
            },
            ..RawConfigFile::default()
        };
        match ConfigFile::try_from(raw) {
            Err(DuegraphError::ConfigError(msg)) => assert!(msg.contains("CLOSED")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn attention_window_is_bounded() {
        let window = |days: i64| RawConfigFile {
            engine: EngineSection {
                attention_window_days: days,
                ..EngineSection::default()
            },
            ..RawConfigFile::default()
        };

        assert!(ConfigFile::try_from(window(MAX_ATTENTION_WINDOW_DAYS)).is_ok());
        assert!(matches!(
            ConfigFile::try_from(window(MAX_ATTENTION_WINDOW_DAYS + 1)),
            Err(DuegraphError::ConfigError(_))
        ));
        assert!(matches!(
            ConfigFile::try_from(window(i64::MAX)),
            Err(DuegraphError::ConfigError(_))
        ));
        assert!(matches!(
            ConfigFile::try_from(window(-1)),
            Err(DuegraphError::ConfigError(_))
        ));
    }
}
