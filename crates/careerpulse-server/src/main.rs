//! CareerPulse Server binary

use careerpulse_core::{ConfigError, GatewayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = match GatewayConfig::load() {
        Ok(config) => config,
        Err(ConfigError::Missing(vars)) => {
            for var in &vars {
                tracing::error!("{} is not set. Set it in .env or the environment.", var);
            }
            std::process::exit(1);
        }
        Err(err) => {
            tracing::error!("Invalid configuration: {}", err);
            std::process::exit(1);
        }
    };

    careerpulse_server::start_server(config).await
}
