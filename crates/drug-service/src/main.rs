//! Drug lookup HTTP server binary.

use drug_service::{AppState, Config, LoadStatus};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!("Data directory: {}", config.data_dir.display());
    tracing::info!("Public directory: {}", config.public_dir.display());

    let state = AppState::new(config);

    // Warm up in the background so /health can report progress
    let warmup = state.clone();
    tokio::spawn(async move {
        match warmup.load().await {
            Ok(LoadStatus::Loaded(stats)) => tracing::info!(
                "Loaded {} interactions, {} drug details, {} contraindications in {} ms",
                stats.interactions,
                stats.drug_details,
                stats.contraindications,
                stats.load_time_ms
            ),
            Ok(status) => tracing::info!("Warm-up skipped: {:?}", status),
            Err(e) => tracing::error!("Data unavailable, serving health only: {}", e),
        }
    });

    drug_service::serve(state).await?;

    Ok(())
}
