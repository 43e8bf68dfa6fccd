//! Shared configuration loader for docfmt.
//!
//! `defaults/docfmt.default.toml` is embedded into the binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`DocfmtConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/docfmt.default.toml");

/// File name picked up from the working directory when no explicit file is given.
pub const PROJECT_CONFIG_FILE: &str = "docfmt.toml";

/// Top-level configuration consumed by docfmt.
#[derive(Debug, Clone, Deserialize)]
pub struct DocfmtConfig {
    pub formatting: FormattingConfig,
    pub output: OutputConfig,
}

/// Knobs of the docstring rewrite itself.
#[derive(Debug, Clone, Deserialize)]
pub struct FormattingConfig {
    /// Summary wrap width; 0 disables wrapping.
    pub wrap_summaries: usize,
}

/// Where formatted text goes.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub in_place: bool,
    pub backup: bool,
    pub backup_suffix: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for command-line flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<DocfmtConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<DocfmtConfig, ConfigError> {
    Loader::new().build()
}
