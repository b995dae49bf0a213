mod api_client;
mod backend;

pub use api_client::ApiClientSettings;
pub use backend::BackendSettings;

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub backend: BackendSettings,
    pub api_client: ApiClientSettings,
}

impl Config {
    /// Loads the built-in defaults, then `config/base.yaml` if present, then
    /// `CHECK_API__*` environment variables.
    pub fn init() -> Result<Self, config::ConfigError> {
        let base_path = std::env::current_dir().map_err(|e| config::ConfigError::Foreign(e.into()))?;
        let config_directory = base_path.join("config");
        Self::builder()?
            .add_source(config::File::from(config_directory.join("base.yaml")).required(false))
            .add_source(
                config::Environment::with_prefix("CHECK_API")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize::<Self>()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        config::Config::builder()
            .set_default("backend.name", "Laravel")?
            .set_default("backend.program", "php")?
            .set_default(
                "backend.args",
                vec!["artisan", "serve", "--host={host}", "--port={port}"],
            )?
            .set_default("backend.working_dir", "../gaza-support-backend")?
            .set_default("backend.host", "127.0.0.1")?
            .set_default("backend.port", 8000)?
            .set_default("backend.startup_delay_milliseconds", 3000)?
            .set_default("backend.shutdown_grace_period_milliseconds", 5000)?
            .set_default("api_client.timeout_milliseconds", 10000)
    }
}
