use dotenvy::dotenv;
use check_api::{telemetry, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    telemetry::init("check-api", "warn", std::io::stderr)?;
    let config = Config::init()?;
    check_api::run(config, &mut std::io::stdout().lock()).await?;
    Ok(())
}
