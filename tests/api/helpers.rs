use std::net::{SocketAddr, TcpListener};

use check_api::{
    configuration::{ApiClientSettings, BackendSettings},
    telemetry, Config, StopOutcome,
};
use once_cell::sync::Lazy;

static TELEMETRY: Lazy<Result<(), String>> = Lazy::new(|| {
    let (name, filter) = ("test", "debug");
    let result = if std::env::var("TEST_LOG")
        .unwrap_or_default()
        .parse::<bool>()
        .unwrap_or_default()
    {
        telemetry::init(name, filter, std::io::stdout)
    } else {
        telemetry::init(name, filter, std::io::sink)
    };
    result.map_err(|e| e.to_string())
});

/// A backend that never listens on anything: `sh -c <script>`.
pub fn config(script: &str, addr: SocketAddr, grace_period_milliseconds: u64) -> Config {
    Lazy::force(&TELEMETRY)
        .as_ref()
        .expect("Failed to initialize telemetry");
    Config {
        backend: BackendSettings {
            name: "Laravel".into(),
            program: "sh".into(),
            args: vec!["-c".into(), script.into()],
            working_dir: std::env::temp_dir(),
            host: addr.ip().to_string(),
            port: addr.port(),
            startup_delay_milliseconds: 100,
            shutdown_grace_period_milliseconds: grace_period_milliseconds,
        },
        api_client: ApiClientSettings {
            timeout_milliseconds: 1_000,
        },
    }
}

/// An address nothing is listening on.
pub fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind a random port");
    listener.local_addr().expect("Failed to read the local address")
}

pub async fn run(config: Config) -> (anyhow::Result<StopOutcome>, String) {
    let mut out = Vec::new();
    let result = check_api::run(config, &mut out).await;
    (result, String::from_utf8(out).expect("Output is not UTF-8"))
}
