//! # drug-service
//!
//! HTTP service for drug interaction, drug detail and contraindication
//! lookups.
//!
//! This crate serves the datasets loaded by the drug-loader crate over a
//! small JSON API, plus the static pages found in the public directory.
//! The server starts answering immediately; data routes report
//! `503 Service Unavailable` until the warm-up load has finished, and
//! `/health` shows its progress.

#![warn(missing_docs)]

#[allow(missing_docs)]
pub mod api;
pub mod config;
pub mod error;
#[allow(missing_docs)]
pub mod routes;
mod server;
pub mod state;

pub use config::{Config, ConfigError};
pub use error::AppError;
pub use server::{router, serve};
pub use state::{AppState, LoadError, LoadStatus};

// Re-export loader types for convenience
pub use drug_loader::{DrugStore, LoadStats};
