//! Layered application configuration.
//!
//! Defaults are overridden by optional config files and then by
//! `SOCIAL_METRICS_*` environment variables. The model credential is part of
//! this configuration and is passed explicitly into the AI clients; there is
//! no process-wide session state.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TabulationError};

/// Application configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Record store settings
    pub database: DatabaseConfig,
    /// Logging settings
    pub logging: LoggingConfig,
    /// External model settings
    pub ai: AiConfig,
    /// Export settings
    pub export: ExportConfig,
}

/// Record store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database file path
    pub path: String,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn or error
    pub level: String,
    /// Log format: "text" or "json"
    pub format: String,
    /// Optional log file; console-only when absent
    #[serde(default)]
    pub file_path: Option<String>,
}

/// External model settings for the classifier and report generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Gemini API key; when absent the AI features are unavailable
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// API base URL
    pub base_url: String,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory reports and record exports are written to
    pub output_directory: String,
    /// Default record export format: "csv" or "json"
    pub default_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: "data/social_metrics.db".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
                file_path: None,
            },
            ai: AiConfig::default(),
            export: ExportConfig {
                output_directory: "./output".to_string(),
                default_format: "csv".to_string(),
            },
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, optional files and environment
    /// variables, in increasing precedence
    pub fn load() -> Result<Self> {
        let defaults = AppConfig::default();

        let config = Config::builder()
            .set_default("database.path", defaults.database.path)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?
            .set_default("ai.model", defaults.ai.model)?
            .set_default("ai.base_url", defaults.ai.base_url)?
            .set_default("ai.timeout_secs", defaults.ai.timeout_secs)?
            .set_default("export.output_directory", defaults.export.output_directory)?
            .set_default("export.default_format", defaults.export.default_format)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("SOCIAL_METRICS").separator("__"))
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(TabulationError::InvalidConfig(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                self.logging.level
            )));
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(TabulationError::InvalidConfig(format!(
                "Invalid log format: {}. Must be one of: {valid_formats:?}",
                self.logging.format
            )));
        }

        if self.database.path.trim().is_empty() {
            return Err(TabulationError::InvalidConfig(
                "database.path cannot be empty".to_string(),
            ));
        }

        if self.ai.model.trim().is_empty() {
            return Err(TabulationError::InvalidConfig(
                "ai.model cannot be empty".to_string(),
            ));
        }

        if !self.ai.base_url.starts_with("http://") && !self.ai.base_url.starts_with("https://") {
            return Err(TabulationError::InvalidConfig(format!(
                "ai.base_url must be an http(s) URL: {}",
                self.ai.base_url
            )));
        }

        if self.ai.timeout_secs == 0 {
            return Err(TabulationError::InvalidConfig(
                "ai.timeout_secs must be greater than 0".to_string(),
            ));
        }

        let valid_exports = ["csv", "json"];
        if !valid_exports.contains(&self.export.default_format.as_str()) {
            return Err(TabulationError::InvalidConfig(format!(
                "Invalid export format: {}. Must be one of: {valid_exports:?}",
                self.export.default_format
            )));
        }

        Ok(())
    }

    /// Get the database path from the environment or config
    #[must_use]
    pub fn get_database_path(&self) -> String {
        std::env::var("DATABASE_URL").unwrap_or_else(|_| self.database.path.clone())
    }

    /// Get the log level from the environment or config
    #[must_use]
    pub fn get_log_level(&self) -> String {
        std::env::var("RUST_LOG").unwrap_or_else(|_| self.logging.level.clone())
    }

    /// Resolve the model credential.
    ///
    /// `GEMINI_API_KEY` wins over the configured value. `None` means the
    /// classifier and report generator are unavailable this session — that is
    /// a feature gate, not an error.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                self.ai
                    .api_key
                    .clone()
                    .filter(|key| !key.trim().is_empty())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.database.path, "data/social_metrics.db");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.ai.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_config_validation() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let mut config = AppConfig::default();
        config.ai.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_configured_key_is_unavailable() {
        let mut config = AppConfig::default();
        config.ai.api_key = Some("   ".to_string());
        if std::env::var("GEMINI_API_KEY").is_err() {
            assert_eq!(config.api_key(), None);
        }
    }
}
