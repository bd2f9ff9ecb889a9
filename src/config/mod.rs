// src/config/mod.rs

//! Engine configuration, read from TOML.
//!
//! - [`model`] holds the raw and validated configuration types.
//! - [`loader`] reads TOML from disk or a string.
//! - [`validate`] turns a [`RawConfigFile`] into a [`ConfigFile`].

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{from_toml_str, load_and_validate, load_from_path};
pub use model::{ConfigFile, EngineSection, LoggingSection, RawConfigFile, StatusSection};
