use anyhow::Result;
use inventory_api::config::AppConfig;
use inventory_api::server::ServerBuilder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("inventory_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::load()?;

    ServerBuilder::new().with_config(config).serve().await
}
