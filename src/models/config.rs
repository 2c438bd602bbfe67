use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Settings of the catalog HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// SQLite database file, created on first start.
    pub database_url: String,
    /// Interface the HTTP server binds to.
    pub address: String,
    pub port: u16,
}

impl ServerConfig {
    /// Loads settings from `config/default.yaml`, then `config/{APP_ENV}.yaml`
    /// when present, then `APP_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());

        Config::builder()
            .set_default("database_url", "app.db")?
            .set_default("address", "127.0.0.1")?
            .set_default("port", 8080)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }

    /// `address:port` pair accepted by `HttpServer::bind`.
    pub fn bind_address(&self) -> (String, u16) {
        (self.address.clone(), self.port)
    }
}
