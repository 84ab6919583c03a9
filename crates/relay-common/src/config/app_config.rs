//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub mediator: ServerConfig,
    pub room: RoomConfig,
    pub relay: RelaySettings,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Listening address of the mediator
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Room service settings
#[derive(Debug, Clone, Deserialize)]
pub struct RoomConfig {
    /// Room identity; when set, frames addressed to another room are rejected
    #[serde(default)]
    pub id: Option<String>,
    /// Base URL of the room service
    #[serde(default = "default_room_service_url")]
    pub service_url: String,
    /// Timeout for a single room service call
    #[serde(default = "default_room_timeout_ms")]
    pub timeout_ms: u64,
}

impl RoomConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            id: None,
            service_url: default_room_service_url(),
            timeout_ms: default_room_timeout_ms(),
        }
    }
}

/// Per-connection relay settings
#[derive(Debug, Clone, Deserialize)]
pub struct RelaySettings {
    /// Frames queued per session before the session counts as unresponsive
    #[serde(default = "default_outbound_buffer")]
    pub outbound_buffer: usize,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            outbound_buffer: default_outbound_buffer(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "room-mediator".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_room_service_url() -> String {
    "http://localhost:6379/room".to_string()
}

fn default_room_timeout_ms() -> u64 {
    5000
}

fn default_outbound_buffer() -> usize {
    64
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: default_env(),
            },
            mediator: ServerConfig {
                host: default_host(),
                port: default_port(),
            },
            room: RoomConfig::default(),
            relay: RelaySettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is set to a value that cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match lookup("APP_ENV") {
            Some(value) => Environment::parse(&value)
                .ok_or(ConfigError::InvalidValue("APP_ENV", value))?,
            None => default_env(),
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            mediator: ServerConfig {
                host: lookup("MEDIATOR_HOST").unwrap_or_else(default_host),
                port: parse_or(&lookup, "MEDIATOR_PORT", default_port)?,
            },
            room: RoomConfig {
                id: lookup("ROOM_ID").filter(|id| !id.is_empty()),
                service_url: lookup("ROOM_SERVICE_URL")
                    .filter(|url| !url.is_empty())
                    .unwrap_or_else(default_room_service_url),
                timeout_ms: parse_or(&lookup, "ROOM_SERVICE_TIMEOUT_MS", default_room_timeout_ms)?,
            },
            relay: RelaySettings {
                outbound_buffer: parse_or(&lookup, "OUTBOUND_BUFFER", default_outbound_buffer)?,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: fn() -> T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, value)),
        None => Ok(default()),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
