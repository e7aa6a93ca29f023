use crate::error::{QuietError, Result};
use crate::history::ErrorDisplay;
use config::{Config, Environment, File, FileFormat};
use log::Level;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_FILE_NAME: &str = "config.toml";
const ENV_PREFIX: &str = "QUIETRETRY";
pub const HOME_ENV_VAR: &str = "QUIETRETRY_HOME";

const DEFAULT_MAX_ATTEMPTS: u32 = 4;
const DEFAULT_BACKOFF_UNIT_MS: u64 = 1_000;
const DEFAULT_FAILURE_LEVEL: &str = "warn";
const DEFAULT_WAIT_ATTEMPTS: usize = 10;
const DEFAULT_WAIT_INTERVAL_MS: u64 = 500;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QuietConfig {
    #[serde(default)]
    pub retry: RetrySettings,

    #[serde(default)]
    pub wait: WaitSettings,

    #[serde(default)]
    pub display: ErrorDisplay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_backoff_unit_ms")]
    pub backoff_unit_ms: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_delay_ms: Option<u64>,

    /// Log level used for failed attempts: error, warn, info, debug or trace.
    #[serde(default = "default_failure_level")]
    pub failure_level: String,
}

impl RetrySettings {
    pub fn failure_level(&self) -> Result<Level> {
        Level::from_str(&self.failure_level).map_err(|_| {
            QuietError::InvalidConfig(format!(
                "failure_level '{}' is not one of error, warn, info, debug, trace",
                self.failure_level
            ))
        })
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_unit_ms: DEFAULT_BACKOFF_UNIT_MS,
            max_delay_ms: None,
            failure_level: DEFAULT_FAILURE_LEVEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitSettings {
    #[serde(default = "default_wait_attempts")]
    pub attempts: usize,

    #[serde(default = "default_wait_interval_ms")]
    pub interval_ms: u64,
}

impl Default for WaitSettings {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_WAIT_ATTEMPTS,
            interval_ms: DEFAULT_WAIT_INTERVAL_MS,
        }
    }
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_backoff_unit_ms() -> u64 {
    DEFAULT_BACKOFF_UNIT_MS
}

fn default_failure_level() -> String {
    DEFAULT_FAILURE_LEVEL.to_string()
}

fn default_wait_attempts() -> usize {
    DEFAULT_WAIT_ATTEMPTS
}

fn default_wait_interval_ms() -> u64 {
    DEFAULT_WAIT_INTERVAL_MS
}

impl QuietConfig {
    /// Loads defaults, then `<home>/config.toml`, then `QUIETRETRY_*` variables.
    pub fn load(home: &Path) -> Result<Self> {
        let config_path = home.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            log::debug!("Loading config from {config_path:?}");
        } else {
            log::debug!("Config file not found at {config_path:?}, using defaults");
        }

        let settings = Config::builder()
            .add_source(
                File::from(config_path.as_path())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: QuietConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, home: &Path) -> Result<()> {
        let config_path = home.join(CONFIG_FILE_NAME);

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = self.to_toml()?;
        fs::write(&config_path, contents)?;
        log::debug!("Saved config to {config_path:?}");
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| QuietError::ConfigError(format!("Failed to serialize config: {e}")))
    }

    pub fn validate(&self) -> Result<()> {
        if self.retry.max_attempts == 0 {
            return Err(QuietError::InvalidConfig(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.wait.attempts == 0 {
            return Err(QuietError::InvalidConfig(
                "wait.attempts must be at least 1".to_string(),
            ));
        }
        self.retry.failure_level()?;
        Ok(())
    }
}

/// Resolves the directory holding `config.toml`.
pub fn quietretry_home() -> Result<PathBuf> {
    if let Ok(home) = std::env::var(HOME_ENV_VAR)
        && !home.trim().is_empty()
    {
        return Ok(PathBuf::from(home));
    }

    dirs::config_dir()
        .map(|dir| dir.join("quietretry"))
        .ok_or_else(|| {
            QuietError::ConfigError(format!(
                "Unable to determine a configuration directory; set {HOME_ENV_VAR}"
            ))
        })
}

pub fn new_quietretry_config() -> Result<QuietConfig> {
    QuietConfig::load(&quietretry_home()?)
}
