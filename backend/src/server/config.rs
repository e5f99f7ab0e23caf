//! Environment-driven application configuration.
//!
//! All deployment knobs arrive as environment variables and are read once
//! at startup; nothing else in the crate touches the environment.
//!
//! | Variable | Meaning | Default |
//! | --- | --- | --- |
//! | `BIND_ADDR` | socket address to listen on | `0.0.0.0:8080` |
//! | `DATABASE_URL` | PostgreSQL connection string | required |
//! | `REDIS_URL` | Redis connection string | required |
//! | `REPOSITORY_STRATEGY` | `cache`, `persistent`, or `chained` | `chained` |
//! | `SESSION_KEY_FILE` | path to the session signing key | `/var/run/secrets/session_key` |
//! | `SESSION_COOKIE_SECURE` | `0` disables the `Secure` cookie flag | enabled |
//! | `SESSION_ALLOW_EPHEMERAL` | `1` permits a generated key outside debug builds | disabled |

use std::collections::HashMap;
use std::net::SocketAddr;

use actix_web::cookie::Key;
use tracing::warn;

use crate::outbound::RepositoryChoice;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Errors raised while assembling the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is absent.
    #[error("missing required environment variable: {name}")]
    Missing {
        /// Name of the absent variable.
        name: String,
    },
    /// A variable is present but unparseable.
    #[error("invalid value for {name}: {message}")]
    Invalid {
        /// Name of the offending variable.
        name: String,
        /// Why the value was rejected.
        message: String,
    },
}

impl ConfigError {
    fn missing(name: &str) -> Self {
        Self::Missing {
            name: name.to_owned(),
        }
    }

    fn invalid(name: &str, message: impl Into<String>) -> Self {
        Self::Invalid {
            name: name.to_owned(),
            message: message.into(),
        }
    }
}

/// Application configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address the server binds to.
    pub bind_addr: SocketAddr,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Redis connection string.
    pub redis_url: String,
    /// Which repository strategy the factory should build.
    pub repository_choice: RepositoryChoice,
    /// Path the session signing key is read from.
    pub session_key_file: String,
    /// Whether session cookies carry the `Secure` flag.
    pub cookie_secure: bool,
    /// Whether a generated session key is acceptable outside debug builds.
    pub allow_ephemeral_key: bool,
}

impl AppConfig {
    /// Resolve the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Resolve the configuration from an explicit variable map.
    ///
    /// Split out from [`AppConfig::from_env`] so tests can exercise parsing
    /// without mutating the process environment.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_addr = vars
            .get("BIND_ADDR")
            .map_or(DEFAULT_BIND_ADDR, String::as_str)
            .parse()
            .map_err(|err| ConfigError::invalid("BIND_ADDR", format!("{err}")))?;

        let database_url = vars
            .get("DATABASE_URL")
            .cloned()
            .ok_or_else(|| ConfigError::missing("DATABASE_URL"))?;
        let redis_url = vars
            .get("REDIS_URL")
            .cloned()
            .ok_or_else(|| ConfigError::missing("REDIS_URL"))?;

        // Absent means the chained default; an unknown value is a mistake
        // and must not silently fall back.
        let repository_choice = match vars.get("REPOSITORY_STRATEGY") {
            Some(raw) => raw
                .parse()
                .map_err(|err| ConfigError::invalid("REPOSITORY_STRATEGY", format!("{err}")))?,
            None => RepositoryChoice::default(),
        };

        let session_key_file = vars
            .get("SESSION_KEY_FILE")
            .map_or(DEFAULT_SESSION_KEY_FILE, String::as_str)
            .to_owned();
        let cookie_secure = vars.get("SESSION_COOKIE_SECURE").map(String::as_str) != Some("0");
        let allow_ephemeral_key =
            vars.get("SESSION_ALLOW_EPHEMERAL").map(String::as_str) == Some("1");

        Ok(Self {
            bind_addr,
            database_url,
            redis_url,
            repository_choice,
            session_key_file,
            cookie_secure,
            allow_ephemeral_key,
        })
    }

    /// Load the session signing key from [`AppConfig::session_key_file`].
    ///
    /// Debug builds (and deployments that opt in via
    /// `SESSION_ALLOW_EPHEMERAL=1`) fall back to a generated key when the
    /// file is unreadable; release builds refuse to start.
    pub fn load_session_key(&self) -> std::io::Result<Key> {
        match std::fs::read(&self.session_key_file) {
            Ok(bytes) => Ok(Key::derive_from(&bytes)),
            Err(err) => {
                if cfg!(debug_assertions) || self.allow_ephemeral_key {
                    warn!(
                        path = %self.session_key_file,
                        error = %err,
                        "using temporary session key (dev only)"
                    );
                    Ok(Key::generate())
                } else {
                    Err(std::io::Error::other(format!(
                        "failed to read session key at {}: {err}",
                        self.session_key_file
                    )))
                }
            }
        }
    }
}
