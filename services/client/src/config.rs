//! services/client/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::path::PathBuf;
use tracing::Level;
use url::Url;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: Url,
    pub identity_base_url: Url,
    pub identity_api_key: Option<String>,
    pub theme_path: PathBuf,
    pub prefers_dark: bool,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Remote Services ---
        let api_base_url = parse_url(
            "CINESPHERE_API_URL",
            lookup("CINESPHERE_API_URL")
                .unwrap_or_else(|| "https://cinesphere-himadree.vercel.app".to_string()),
        )?;
        let identity_base_url = parse_url(
            "IDENTITY_API_URL",
            lookup("IDENTITY_API_URL")
                .unwrap_or_else(|| "https://identitytoolkit.googleapis.com".to_string()),
        )?;
        let identity_api_key = lookup("IDENTITY_API_KEY").filter(|key| !key.trim().is_empty());

        // --- Local Settings ---
        let theme_path = lookup("THEME_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./.cinesphere/theme.json"));

        let prefers_dark = match lookup("PREFERS_DARK") {
            None => false,
            Some(raw) => raw.trim().parse::<bool>().map_err(|_| {
                ConfigError::InvalidValue(
                    "PREFERS_DARK".to_string(),
                    format!("'{}' is not true or false", raw),
                )
            })?,
        };

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            api_base_url,
            identity_base_url,
            identity_api_key,
            theme_path,
            prefers_dark,
            log_level,
        })
    }
}

fn parse_url(var: &str, raw: String) -> Result<Url, ConfigError> {
    Url::parse(&raw).map_err(|e| ConfigError::InvalidValue(var.to_string(), e.to_string()))
}
