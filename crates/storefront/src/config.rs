//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `TELAR_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `TELAR_SESSION_SECRET` - Session cookie signing key material (min 64 bytes)
//!
//! ## Optional
//! - `TELAR_HOST` - Bind address (default: 127.0.0.1)
//! - `TELAR_PORT` - Listen port (default: 3000)
//! - `TELAR_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `TELAR_API_BASE_URL` - Base URL the catalog client fetches from (default: base URL)
//! - `TELAR_STORAGE_DIR` - Directory for the file-backed client store (default: .telar)
//! - `TELAR_FETCH_TIMEOUT_SECS` - Catalog client request timeout (default: 10)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

// cookie::Key needs 512 bits of signing key material.
const MIN_SESSION_SECRET_LENGTH: usize = 64;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Base URL the catalog client issues API requests against
    pub api_base_url: String,
    /// Session signing secret
    pub session_secret: SecretString,
    /// Directory holding the file-backed client store
    pub storage_dir: PathBuf,
    /// Catalog client request timeout
    pub fetch_timeout: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the session secret is too short.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("TELAR_DATABASE_URL")?;
        let host = get_env_or_default("TELAR_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("TELAR_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("TELAR_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("TELAR_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("TELAR_BASE_URL", "http://localhost:3000");
        let api_base_url = get_env_or_default("TELAR_API_BASE_URL", &base_url);
        let session_secret = get_required_secret("TELAR_SESSION_SECRET")?;
        validate_session_secret(&session_secret, "TELAR_SESSION_SECRET")?;
        let storage_dir = PathBuf::from(get_env_or_default("TELAR_STORAGE_DIR", ".telar"));
        let fetch_timeout_secs = get_env_or_default("TELAR_FETCH_TIMEOUT_SECS", "10")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("TELAR_FETCH_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            api_base_url,
            session_secret,
            storage_dir,
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a session secret meets minimum length requirements.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_session_secret_rejected() {
        let secret = SecretString::from("too-short");
        let result = validate_session_secret(&secret, "TELAR_SESSION_SECRET");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_long_session_secret_accepted() {
        let secret = SecretString::from("0123456789abcdef".repeat(4));
        assert!(validate_session_secret(&secret, "TELAR_SESSION_SECRET").is_ok());
    }
}
