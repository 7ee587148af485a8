//! Configuration model loaded from external sources.

use std::env;

use config::{Config, ConfigError};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    /// Origin of the backend REST API.
    pub api_base_url: String,
    pub templates_dir: String,
    pub secret: String,
}

impl ServerConfig {
    /// Layers `config/default.yaml`, the `APP_ENV` profile (defaults to
    /// `local`) and `APP_*` variables. `API_BASE_URL` wins over all of them.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .set_override_option("api_base_url", env::var("API_BASE_URL").ok())?
            .build()?
            .try_deserialize()
    }
}
