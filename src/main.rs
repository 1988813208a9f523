use anyhow::Result;
use tracing_subscriber::EnvFilter;

use climacast::{ClimacastConfig, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ClimacastConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    tracing::info!(version = climacast::VERSION, "starting climacast");
    web::run(&config).await
}
