//! Configuration loading utilities

use crate::Config;
use chrono_tz::Tz;
use learnboard_common::Result as LearnboardResult;
use learnboard_i18n::Locale;
use std::env;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

/// Configuration file searched for in the working directory, in order
const DEFAULT_CONFIG_FILES: [&str; 3] = ["learnboard.yaml", "learnboard.yml", "learnboard.toml"];

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_VAR: &str = "LEARNBOARD_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// File extension that is neither YAML nor TOML
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for learnboard_common::LearnboardError {
    fn from(err: ConfigError) -> Self {
        learnboard_common::LearnboardError::config_with_source(err.to_string(), err)
    }
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        Self::load_config_with_env(path, |var| env::var(var).ok())
    }

    /// Load configuration from a file, taking overrides from `lookup`
    pub fn load_config_with_env<P, F>(path: P, lookup: F) -> Result<Config, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let mut config = Self::parse_str(&content, format)?;
        Self::apply_env_overrides(&mut config, lookup)?;
        config.validate_all()?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration text without applying overrides or validation
    pub fn parse_str(content: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
        Ok(match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        })
    }

    /// Load configuration from environment variables and files
    pub fn load() -> LearnboardResult<Config> {
        if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            return Ok(Self::load_config(&config_path)?);
        }

        if let Some(path) = DEFAULT_CONFIG_FILES
            .iter()
            .find(|candidate| Path::new(candidate).exists())
        {
            return Ok(Self::load_config(path)?);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config, |var| env::var(var).ok())?;
        config.validate_all().map_err(ConfigError::ValidationError)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LearnboardResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply `LEARNBOARD_*` overrides to configuration
    pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(locale) = parse_var::<Locale, _>(&lookup, "LEARNBOARD_LOCALE")? {
            config.locale = locale;
        }
        if let Some(timezone) = parse_var::<Tz, _>(&lookup, "LEARNBOARD_TIMEZONE")? {
            config.timezone = timezone;
        }

        if let Some(window) = parse_var(&lookup, "LEARNBOARD_SMOOTHING_WINDOW_SECONDS")? {
            config.analytics.smoothing_window_seconds = window;
        }
        if let Some(weight) = parse_var(&lookup, "LEARNBOARD_NEXT_HOUR_WEIGHT")? {
            config.analytics.next_hour_weight = weight;
        }
        if let Some(days) = parse_var(&lookup, "LEARNBOARD_INVITATION_VALIDITY_DAYS")? {
            config.analytics.invitation_validity_days = days;
        }
        if let Some(chars) = parse_var(&lookup, "LEARNBOARD_MAX_TITLE_CHARS")? {
            config.analytics.max_title_chars = chars;
        }

        if let Some(dir) = lookup("LEARNBOARD_OUTPUT_DIR") {
            config.export.output_dir = dir;
        }

        if let Some(level) = lookup("LEARNBOARD_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(json) = parse_var(&lookup, "LEARNBOARD_LOG_JSON")? {
            config.logging.json = json;
        }
        if let Some(file) = lookup("LEARNBOARD_LOG_FILE") {
            config.logging.file = Some(file);
        }

        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, var: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError::EnvParseError {
                var: var.to_string(),
                source: e.to_string().into(),
            })
        })
        .transpose()
}
