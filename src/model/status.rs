// src/model/status.rs

use serde::{Deserialize, Serialize};

use crate::errors::{DuegraphError, Result};

/// Ordered status names managed by the caller, plus the terminal "done" token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusVocabulary {
    names: Vec<String>,
    done: String,
}

impl StatusVocabulary {
    pub const DEFAULT_DONE: &'static str = "DONE";

    pub fn new(names: Vec<String>, done: impl Into<String>) -> Result<Self> {
        let vocabulary = Self {
            names: names.into_iter().map(|n| n.trim().to_string()).collect(),
            done: done.into().trim().to_string(),
        };
        vocabulary.check()?;
        Ok(vocabulary)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn done(&self) -> &str {
        &self.done
    }

    pub fn is_done(&self, status: &str) -> bool {
        status == self.done
    }

    pub fn contains(&self, status: &str) -> bool {
        self.names.iter().any(|n| n == status)
    }

    /// Status given to new tasks: the first name in the vocabulary.
    pub fn default_status(&self) -> &str {
        self.names
            .first()
            .map(String::as_str)
            .unwrap_or(crate::model::Task::DEFAULT_STATUS)
    }

    fn check(&self) -> Result<()> {
        if self.names.is_empty() {
            return Err(DuegraphError::validation(
                "status vocabulary must contain at least one status",
            ));
        }
        if self.names.iter().any(|n| n.is_empty()) {
            return Err(DuegraphError::validation("Status name is required"));
        }
        if self.done.is_empty() {
            return Err(DuegraphError::validation("done status is required"));
        }
        if !self.contains(&self.done) {
            return Err(DuegraphError::validation(format!(
                "done status '{}' is not part of the status vocabulary",
                self.done
            )));
        }
        Ok(())
    }
}

impl Default for StatusVocabulary {
    fn default() -> Self {
        Self {
            names: vec![
                "TODO".to_string(),
                "IN_PROGRESS".to_string(),
                Self::DEFAULT_DONE.to_string(),
            ],
            done: Self::DEFAULT_DONE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn done_must_be_in_vocabulary() {
        let names = vec!["TODO".to_string(), "SHIPPED".to_string()];
        assert!(StatusVocabulary::new(names.clone(), "DONE").is_err());

        let vocab = StatusVocabulary::new(names, " SHIPPED ").unwrap();
        assert!(vocab.is_done("SHIPPED"));
        assert_eq!(vocab.default_status(), "TODO");
    }

    #[test]
    fn rejects_empty_or_blank_names() {
        assert!(StatusVocabulary::new(Vec::new(), "DONE").is_err());
        assert!(StatusVocabulary::new(vec!["DONE".into(), " ".into()], "DONE").is_err());
    }
}
