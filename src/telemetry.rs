use tracing::{
    dispatcher::SetGlobalDefaultError, subscriber::set_global_default, Subscriber,
};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::{log::SetLoggerError, LogTracer};
use tracing_subscriber::{
    fmt::MakeWriter, prelude::__tracing_subscriber_SubscriberExt, EnvFilter,
    Registry,
};

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("failed to redirect `log` records into tracing")]
    LogTracer(#[from] SetLoggerError),
    #[error("a global subscriber is already installed")]
    Subscriber(#[from] SetGlobalDefaultError),
}

/// Installs a bunyan subscriber writing to `sink`. `RUST_LOG` overrides
/// `default_filter`.
///
/// The report itself goes to stdout, so the binary hands this stderr.
pub fn init<Sink>(
    name: &str,
    default_filter: &str,
    sink: Sink,
) -> Result<(), TelemetryError>
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    LogTracer::init()?;
    set_global_default(subscriber(name, default_filter, sink))?;
    Ok(())
}

fn subscriber<Sink>(
    name: &str,
    default_filter: &str,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    Registry::default()
        .with(filter)
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(name.into(), sink))
}
