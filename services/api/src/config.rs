//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Credentials and addressing for the outbound email provider. Loaded only
/// when every required mail variable is present; otherwise email stays
/// disabled and the server starts anyway.
#[derive(Clone, Debug)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from_name: String,
    pub from_address: String,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// Directory holding the per-page config files and the two flat
    /// databases (students.json, users.json).
    pub data_dir: PathBuf,
    pub log_level: Level,
    /// Base URL of the public site, used to build verification links.
    pub app_url: String,
    pub mail: Option<MailConfig>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server and Storage Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let data_dir = std::env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let app_url = std::env::var("APP_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", bind_address.port()));

        // --- Load Mail Provider Settings (all-or-nothing) ---
        let mail = match (
            std::env::var("MAIL_API_URL").ok(),
            std::env::var("MAIL_API_KEY").ok(),
            std::env::var("MAIL_FROM_ADDRESS").ok(),
        ) {
            (Some(api_url), Some(api_key), Some(from_address)) => Some(MailConfig {
                api_url,
                api_key,
                from_name: std::env::var("MAIL_FROM_NAME")
                    .unwrap_or_else(|_| "Tech-Pro AI".to_string()),
                from_address,
            }),
            _ => None,
        };

        Ok(Self {
            bind_address,
            data_dir,
            log_level,
            app_url,
            mail,
        })
    }
}
