pub mod api_client;
pub mod backend;
pub mod checks;
pub mod configuration;
pub mod telemetry;

use std::io::Write;

pub use api_client::{ApiClient, Body, Outcome};
pub use backend::{Backend, BackendError, StopOutcome};
pub use checks::{run_checks, ENDPOINTS};
pub use configuration::Config;

/// Starts the backend, walks [`ENDPOINTS`], then stops the backend and
/// returns how it went down.
///
/// Launch and stop failures end the run. If anything between them fails, the
/// backend is killed when its handle is dropped.
pub async fn run<W: Write>(config: Config, out: &mut W) -> anyhow::Result<StopOutcome> {
    let client = ApiClient::new(&config.api_client, config.backend.base_url())?;
    let name = &config.backend.name;

    let backend = Backend::start(&config.backend)?;
    writeln!(out, "Starting {} server...", name)?;
    if let Some(pid) = backend.id() {
        writeln!(out, "Server process started (PID {})", pid)?;
    }
    out.flush()?;
    backend.settle().await;

    run_checks(&client, ENDPOINTS, out).await?;

    writeln!(out, "Stopping {} server...", name)?;
    out.flush()?;
    let outcome = backend.stop().await?;
    tracing::info!(?outcome, "Backend stopped");
    writeln!(out, "Server stopped.")?;
    Ok(outcome)
}
