use std::{path::PathBuf, time::Duration};

use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Clone, Debug, Deserialize)]
pub struct BackendSettings {
    /// Shown in the start and stop banners.
    pub name: String,
    pub program: String,
    /// `{host}` and `{port}` are substituted before launch.
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub startup_delay_milliseconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub shutdown_grace_period_milliseconds: u64,
}

impl BackendSettings {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn command_args(&self) -> Vec<String> {
        let port = self.port.to_string();
        self.args
            .iter()
            .map(|arg| arg.replace("{host}", &self.host).replace("{port}", &port))
            .collect()
    }

    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_milliseconds)
    }

    pub fn shutdown_grace_period(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_period_milliseconds)
    }
}
