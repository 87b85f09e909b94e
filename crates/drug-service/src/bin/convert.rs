//! Converts the source CSV datasets into the JSON files the server loads.

use drug_loader::{convert_datasets, ConvertOutcome};
use drug_service::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        "Converting CSV files from {} into {}",
        config.csv_dir.display(),
        config.data_dir.display()
    );

    let report = convert_datasets(
        &config.csv_dir,
        &config.data_dir,
        &config.datasets,
        config.force_convert,
    )?;

    for (kind, path, outcome) in &report.datasets {
        match outcome {
            ConvertOutcome::Converted(rows) => {
                tracing::info!("{}: wrote {} rows to {}", kind, rows, path.display())
            }
            ConvertOutcome::Skipped => tracing::info!(
                "{}: {} exists, set DRUG_CONVERT_FORCE=1 to rebuild",
                kind,
                path.display()
            ),
        }
    }
    tracing::info!(
        "Conversion finished: {} rows in {} ms",
        report.rows_written(),
        report.convert_time_ms
    );

    Ok(())
}
