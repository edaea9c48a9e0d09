//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string (includes the database
//!   name); the process refuses to start without it
//! - `JWT_SECRET` - Bearer token signing secret; a placeholder or
//!   low-entropy value logs a loud warning but does not abort
//!
//! ## Optional
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 8000)
//! - `OPENROUTER_API_KEY` - OpenRouter API key; chat degrades gracefully
//!   when absent
//! - `OPENROUTER_MODEL` - Model ID (default: meta-llama/llama-3.2-3b-instruct:free)
//! - `CORS_ORIGINS` - Comma-separated allowed origins (default: `*`)
//! - `UPLOADS_DIR` - Directory for uploaded images (default: uploads)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const DEFAULT_AI_MODEL: &str = "meta-llama/llama-3.2-3b-instruct:free";
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Bearer token signing secret
    pub jwt_secret: SecretString,
    /// OpenRouter configuration (optional - chat degrades if absent)
    pub ai: Option<AiConfig>,
    /// Allowed CORS origins; `["*"]` means permissive
    pub cors_origins: Vec<String>,
    /// Directory where uploaded images are stored
    pub uploads_dir: PathBuf,
}

/// OpenRouter API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct AiConfig {
    /// OpenRouter API key
    pub api_key: SecretString,
    /// Model ID (e.g., meta-llama/llama-3.2-3b-instruct:free)
    pub model: String,
}

impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = SecretString::from(get_required_env("DATABASE_URL")?);
        let host = get_env_or_default("HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PORT", "8000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;

        let jwt_secret = get_required_env("JWT_SECRET")?;
        if let Err(reason) = validate_secret_strength(&jwt_secret, "JWT_SECRET") {
            tracing::warn!("JWT_SECRET looks insecure: {reason}. Set a strong secret in production!");
        }
        let jwt_secret = SecretString::from(jwt_secret);

        let ai = AiConfig::from_env();
        if ai.is_none() {
            tracing::warn!("No OPENROUTER_API_KEY set; the chat endpoint will answer in degraded mode");
        }

        let cors_origins = get_env_or_default("CORS_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let uploads_dir = PathBuf::from(get_env_or_default("UPLOADS_DIR", "uploads"));

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            ai,
            cors_origins,
            uploads_dir,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the CORS origin list means "allow any origin".
    #[must_use]
    pub fn cors_permissive(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

impl AiConfig {
    /// Load OpenRouter configuration from environment.
    ///
    /// Returns `None` if `OPENROUTER_API_KEY` is not set (chat degraded).
    fn from_env() -> Option<Self> {
        get_optional_env("OPENROUTER_API_KEY").map(|key| Self {
            api_key: SecretString::from(key),
            model: get_env_or_default("OPENROUTER_MODEL", DEFAULT_AI_MODEL),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Check that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), String> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(format!(
                "{var_name} appears to be a placeholder (contains '{pattern}')"
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(format!(
            "{var_name} entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_single_char() {
        // All same character = 0 entropy
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_high() {
        let entropy = shannon_entropy("aB3$xY9!mK2@nL5#");
        assert!(entropy > 3.3);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        // The original deployment shipped with this default
        assert!(validate_secret_strength("your-secret-key-change-in-production", "JWT_SECRET").is_err());
        assert!(validate_secret_strength("changeme123", "JWT_SECRET").is_err());
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        assert!(validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "JWT_SECRET").is_err());
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        assert!(validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "JWT_SECRET").is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let config = Config {
            database_url: SecretString::from("postgres://localhost/kuber"),
            host: "127.0.0.1".parse().unwrap(),
            port: 8000,
            jwt_secret: SecretString::from("x".repeat(32)),
            ai: None,
            cors_origins: vec!["*".to_string()],
            uploads_dir: PathBuf::from("uploads"),
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8000);
        assert!(config.cors_permissive());
    }

    #[test]
    fn test_cors_not_permissive_with_explicit_origins() {
        let config = Config {
            database_url: SecretString::from("postgres://localhost/kuber"),
            host: "127.0.0.1".parse().unwrap(),
            port: 8000,
            jwt_secret: SecretString::from("x".repeat(32)),
            ai: None,
            cors_origins: vec!["https://inventory.kuber.example".to_string()],
            uploads_dir: PathBuf::from("uploads"),
        };
        assert!(!config.cors_permissive());
    }

    #[test]
    fn test_ai_config_debug_redacts_key() {
        let config = AiConfig {
            api_key: SecretString::from("sk-or-super-secret-key"),
            model: DEFAULT_AI_MODEL.to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(debug_output.contains(DEFAULT_AI_MODEL));
        assert!(!debug_output.contains("sk-or-super-secret-key"));
    }
}
