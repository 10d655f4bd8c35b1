//! Configuration module for invoicing-service.

use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct InvoicingConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

// The URL carries credentials.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Send the session cookie only over HTTPS.
    pub secure_cookie: bool,
    /// Inactivity window after which a session expires.
    pub expiry_hours: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secure_cookie: true,
            expiry_hours: 24,
        }
    }
}

impl InvoicingConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(common: core_config::Config, var: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SessionConfig::default();

        Ok(Self {
            common,
            service_name: var("SERVICE_NAME").unwrap_or_else(|| "invoicing-service".to_string()),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            otlp_endpoint: var("OTLP_ENDPOINT").filter(|s| !s.is_empty()),
            database: DatabaseConfig {
                url: var("DATABASE_URL").ok_or_else(|| {
                    AppError::ConfigError(anyhow::anyhow!("DATABASE_URL is required"))
                })?,
                max_connections: var("DATABASE_MAX_CONNECTIONS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
                min_connections: var("DATABASE_MIN_CONNECTIONS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(2),
            },
            session: SessionConfig {
                secure_cookie: var("SESSION_SECURE_COOKIE")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.secure_cookie),
                expiry_hours: var("SESSION_EXPIRY_HOURS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.expiry_hours),
            },
        })
    }
}
