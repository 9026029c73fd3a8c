use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// How views are serialized for the client.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewFormat {
    /// Server-rendered HTML pages.
    #[default]
    Html,
    /// `{"view": ..., "data": ...}` documents, for scripted clients and tests.
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub view_format: ViewFormat,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub sqlx_logging: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// `EnvFilter` directives; `RUST_LOG` takes precedence.
    pub filter: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub log: LogConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.view_format", "html")?
            .set_default("database.url", "sqlite://catalog.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout_secs", 8)?
            .set_default("database.sqlx_logging", false)?
            .set_default("log.filter", "catalog=info,tower_http=info")?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., CATALOG__DATABASE__URL)
            .add_source(Environment::with_prefix("CATALOG").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
