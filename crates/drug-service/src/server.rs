//! Router assembly and the serve loop.

use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::{info, warn};

use crate::routes::{
    check_interactions_handler, contraindication_suggestions_handler, drug_filters_handler,
    drug_suggestions_by_contra_handler, drugs_by_type_handler, health_handler,
    search_contraindications_handler, search_drug_handler,
};
use crate::state::AppState;

/// Builds the application router.
///
/// Paths not matched by an API route are served from the configured public
/// directory.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let pages = ServeDir::new(&state.config().public_dir);

    Router::new()
        .route("/health", get(health_handler))
        .route("/search-drug", get(search_drug_handler))
        .route("/check-interactions", get(check_interactions_handler))
        .route("/api/drug-filters", get(drug_filters_handler))
        .route("/api/drugs-by-type", get(drugs_by_type_handler))
        .route(
            "/api/search-contraindications",
            get(search_contraindications_handler),
        )
        .route(
            "/api/contraindication-suggestions",
            get(contraindication_suggestions_handler),
        )
        .route(
            "/api/drug-suggestions-by-contra",
            get(drug_suggestions_by_contra_handler),
        )
        .fallback_service(pages)
        .layer(cors)
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl+C or SIGTERM.
pub async fn serve(state: AppState) -> std::io::Result<()> {
    let address = state.config().address();
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
