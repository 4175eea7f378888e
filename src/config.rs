//! Configuration module for fsbrowse.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::{FsBrowseError, Result};

/// Environment variable that overrides `server.root_dir`.
pub const ROOT_DIR_ENV: &str = "FSBROWSE_ROOT_DIR";

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory whose tree is exposed to clients.
    #[serde(default = "default_root_dir")]
    pub root_dir: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8081
}

fn default_root_dir() -> String {
    "./files/".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            root_dir: default_root_dir(),
        }
    }
}

/// TLS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TlsConfig {
    /// Serve HTTPS instead of plain HTTP.
    #[serde(default = "default_tls_enabled")]
    pub enabled: bool,
    /// PEM certificate chain.
    #[serde(default = "default_cert_file")]
    pub cert_file: String,
    /// PEM private key.
    #[serde(default = "default_key_file")]
    pub key_file: String,
}

fn default_tls_enabled() -> bool {
    true
}

fn default_cert_file() -> String {
    "certs/localhost.pem".to_string()
}

fn default_key_file() -> String {
    "certs/localhost-key.pem".to_string()
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            enabled: default_tls_enabled(),
            cert_file: default_cert_file(),
            key_file: default_key_file(),
        }
    }
}

/// Web front-end configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// CORS allowed origins.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
    /// Whether to serve the bundled single-page app.
    #[serde(default)]
    pub serve_static: bool,
    /// Path to the built web assets (must contain `index.html`).
    #[serde(default = "default_static_path")]
    pub static_path: String,
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

fn default_static_path() -> String {
    "web/build".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            cors_origins: default_cors_origins(),
            serve_static: false,
            static_path: default_static_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/fsbrowse.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// A user account seeded into the session store at startup.
///
/// Exactly one of `password` or `password_hash` must be set.
#[derive(Debug, Clone, Deserialize)]
pub struct UserConfig {
    /// Login name.
    pub username: String,
    /// Plaintext password, hashed at startup.
    #[serde(default)]
    pub password: Option<String>,
    /// Pre-computed Argon2 PHC string.
    #[serde(default)]
    pub password_hash: Option<String>,
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// TLS configuration.
    #[serde(default)]
    pub tls: TlsConfig,
    /// Web front-end configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Accounts allowed to log in.
    #[serde(default)]
    pub users: Vec<UserConfig>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(FsBrowseError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| FsBrowseError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `FSBROWSE_ROOT_DIR`: Override the served root directory
    pub fn apply_env_overrides(&mut self) {
        if let Ok(root_dir) = std::env::var(ROOT_DIR_ENV) {
            if !root_dir.is_empty() {
                self.server.root_dir = root_dir;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - `server.root_dir` is empty
    /// - TLS is enabled but a certificate or key path is empty
    /// - a user entry has an empty name, is duplicated, or does not carry
    ///   exactly one of `password` / `password_hash`
    pub fn validate(&self) -> Result<()> {
        if self.server.root_dir.is_empty() {
            return Err(FsBrowseError::Validation(
                "server.root_dir must not be empty".to_string(),
            ));
        }

        if self.tls.enabled && (self.tls.cert_file.is_empty() || self.tls.key_file.is_empty()) {
            return Err(FsBrowseError::Validation(
                "TLS is enabled but cert_file or key_file is not set".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for user in &self.users {
            if user.username.is_empty() {
                return Err(FsBrowseError::Validation(
                    "user entry with empty username".to_string(),
                ));
            }
            if !seen.insert(user.username.as_str()) {
                return Err(FsBrowseError::Validation(format!(
                    "duplicate user: {}",
                    user.username
                )));
            }
            match (&user.password, &user.password_hash) {
                (Some(_), None) | (None, Some(_)) => {}
                _ => {
                    return Err(FsBrowseError::Validation(format!(
                        "user {} must set exactly one of password or password_hash",
                        user.username
                    )));
                }
            }
        }

        Ok(())
    }
}
