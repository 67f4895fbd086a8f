use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{defaults, envconfig::EnvConfig, validate};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
    pub spotify: Option<SpotifyConfig>,
    pub room: RoomConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        <Self as EnvConfig>::from_env()
    }
}

impl EnvConfig for AppConfig {
    fn validate(&self) -> Result<()> {
        validate::validate(self)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    pub host: String,
    pub port: u16,
    /// External base URL: used for the OAuth redirect URI, join links and
    /// the QR code content. Must match what is registered with Spotify.
    pub public_url: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            host: defaults::DEFAULT_HOST.to_string(),
            port: defaults::DEFAULT_PORT,
            public_url: defaults::DEFAULT_PUBLIC_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub rust_log: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            rust_log: defaults::DEFAULT_RUST_LOG.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_idle: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: defaults::DEFAULT_DB_URL.to_string(),
            max_connections: defaults::DEFAULT_DB_MAX_CONNECTIONS,
            min_idle: defaults::DEFAULT_DB_MIN_IDLE,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_scope")]
    pub scope: String,
    #[serde(default = "default_show_dialog")]
    pub show_dialog: bool,
    /// Override points for tests; production uses the Spotify defaults.
    #[serde(default = "default_accounts_url")]
    pub accounts_url: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoomConfig {
    pub lifespan_hours: i64,
    pub id_digits: u32,
    pub qr_dir: String,
    pub cleanup_interval_secs: u64,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            lifespan_hours: defaults::DEFAULT_ROOM_LIFESPAN_HOURS,
            id_digits: defaults::DEFAULT_ROOM_ID_DIGITS,
            qr_dir: defaults::DEFAULT_QR_DIR.to_string(),
            cleanup_interval_secs: defaults::DEFAULT_CLEANUP_INTERVAL_SECS,
        }
    }
}

fn default_auth_scope() -> String {
    defaults::DEFAULT_AUTH_SCOPE.to_string()
}

fn default_show_dialog() -> bool {
    true
}

fn default_accounts_url() -> String {
    defaults::DEFAULT_ACCOUNTS_URL.to_string()
}

fn default_api_url() -> String {
    defaults::DEFAULT_API_URL.to_string()
}
