use anyhow::{Context, Result};
use tokio::net::TcpListener;

use market_ribbon::api::{self, AppState};
use market_ribbon::config::{Config, LoggingConfig};
use market_ribbon::generator::MarketSeriesGenerator;

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        return;
    }
    tracing::info!("Ctrl+C received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging);

    let generator = MarketSeriesGenerator::new(config.market.generator_config()?)?;
    tracing::info!(
        steps = config.market.steps,
        start_price = config.market.start_price,
        fast_period = config.market.fast_period,
        slow_period = config.market.slow_period,
        "Market generator ready"
    );

    let app = api::router(AppState::new(generator, config.market.steps));

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(addr = %addr, version = env!("CARGO_PKG_VERSION"), "Starting market-ribbon");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated with error")?;

    tracing::info!("Shutdown complete");
    Ok(())
}
