// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DuegraphError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Dependency cycle: {0}")]
    DependencyCycle(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Engine is not running")]
    EngineClosed,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DuegraphError {
    /// Shorthand for building a [`DuegraphError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        DuegraphError::Validation(msg.into())
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, DuegraphError>;
