//! Server configuration from environment variables.
//!
//! | Variable            | Default   |
//! |---------------------|-----------|
//! | `HOST`              | `0.0.0.0` |
//! | `PORT`              | `8080`    |
//! | `DATA_DIR`          | `data`    |
//! | `SESSION_SECRET`    | random    |
//! | `IDLE_TIMEOUT_SECS` | `43200`   |
//! | `END_MATCH_POLICY`  | `keep`    |

use crate::models::EndMatchPolicy;
use std::path::PathBuf;
use std::time::Duration;

/// Minimum length of `SESSION_SECRET` in bytes.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    InvalidPort(String),
    InvalidTimeout(String),
    InvalidPolicy(String),
    SecretTooShort { len: usize },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPort(v) => write!(f, "PORT is not a valid port: {:?}", v),
            ConfigError::InvalidTimeout(v) => {
                write!(f, "IDLE_TIMEOUT_SECS is not a number of seconds: {:?}", v)
            }
            ConfigError::InvalidPolicy(v) => {
                write!(f, "END_MATCH_POLICY must be \"keep\" or \"clear\", got {:?}", v)
            }
            ConfigError::SecretTooShort { len } => write!(
                f,
                "SESSION_SECRET must be at least {} bytes (got {})",
                MIN_SECRET_LEN, len
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// Key material for the client-id cookie. None: generate one per process.
    pub session_secret: Option<String>,
    /// Scoreboards not touched for this long are dropped from memory.
    pub idle_timeout: Duration,
    pub end_match_policy: EndMatchPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: PathBuf::from("data"),
            session_secret: None,
            idle_timeout: Duration::from_secs(12 * 3600),
            end_match_policy: EndMatchPolicy::KeepScores,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unset variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidPort(port))?;
        }
        if let Some(dir) = lookup("DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(secret) = lookup("SESSION_SECRET") {
            if secret.len() < MIN_SECRET_LEN {
                return Err(ConfigError::SecretTooShort { len: secret.len() });
            }
            config.session_secret = Some(secret);
        }
        if let Some(secs) = lookup("IDLE_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(secs))?;
            config.idle_timeout = Duration::from_secs(secs);
        }
        if let Some(policy) = lookup("END_MATCH_POLICY") {
            config.end_match_policy = parse_policy(&policy)?;
        }
        Ok(config)
    }
}

fn parse_policy(value: &str) -> Result<EndMatchPolicy, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "keep" => Ok(EndMatchPolicy::KeepScores),
        "clear" => Ok(EndMatchPolicy::ClearScores),
        _ => Err(ConfigError::InvalidPolicy(value.to_string())),
    }
}
