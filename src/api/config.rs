use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generator::BuildOptions;

pub const DEFAULT_MAX_SQL_LENGTH: usize = 100_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

/// Settings shared by every `build` and `parse` call of a [`Translator`](crate::api::Translator).
///
/// - `build` is used when a build request carries no options of its own.
/// - `max_sql_length` bounds the SQL text accepted by `parse`, in bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TranslatorConfig {
    pub build: BuildOptions,
    pub max_sql_length: usize,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self { build: BuildOptions::default(), max_sql_length: DEFAULT_MAX_SQL_LENGTH }
    }
}

impl TranslatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(build: BuildOptions, max_sql_length: usize) -> Self {
        Self { build, max_sql_length }
    }

    pub fn compact() -> Self {
        Self { build: BuildOptions::compact(), ..Self::default() }
    }

    pub fn with_build(mut self, build: BuildOptions) -> Self {
        self.build = build;
        self
    }

    pub fn with_max_sql_length(mut self, max_sql_length: usize) -> Self {
        self.max_sql_length = max_sql_length;
        self
    }

    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_sql_length == 0 {
            return Err(ConfigError::InvalidValue {
                field: "maxSqlLength",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
