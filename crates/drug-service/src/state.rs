//! Application context shared by every request handler.
//!
//! The store is published through a [`OnceLock`] only after every dataset
//! and index has been built, so handlers either see a complete store or
//! none at all. An atomic flag keeps concurrent callers from starting a
//! second load, and a failed load is recorded permanently.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use drug_loader::{discover_dataset_files, DrugStore, LoadStats};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppError;

/// Failure to bring the datasets into memory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Reading or indexing the datasets failed.
    #[error("Failed to load datasets: {0}")]
    Failed(String),
}

/// Result of a call to [`AppState::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// This call loaded the datasets.
    Loaded(LoadStats),
    /// The datasets were already loaded; nothing was done.
    AlreadyLoaded,
    /// Another call is loading the datasets right now.
    InProgress,
}

struct Inner {
    config: Config,
    store: OnceLock<Arc<DrugStore>>,
    loading: AtomicBool,
    failure: OnceLock<LoadError>,
}

/// Cheaply cloneable handle to the application context.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

impl AppState {
    /// Creates a state with no data loaded.
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                store: OnceLock::new(),
                loading: AtomicBool::new(false),
                failure: OnceLock::new(),
            }),
        }
    }

    /// Creates a state around an already built store.
    pub fn with_store(config: Config, store: DrugStore) -> Self {
        let state = Self::new(config);
        // Freshly created, so the cell is empty
        let _ = state.inner.store.set(Arc::new(store));
        state
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Returns true once the datasets and indexes are fully built.
    pub fn is_ready(&self) -> bool {
        self.inner.store.get().is_some()
    }

    /// Returns true while a load is running.
    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::Acquire)
    }

    /// Returns the recorded load failure, if any.
    pub fn load_error(&self) -> Option<&LoadError> {
        self.inner.failure.get()
    }

    /// Returns the store if loaded.
    pub fn store(&self) -> Option<Arc<DrugStore>> {
        self.inner.store.get().cloned()
    }

    /// Returns the store, or the not-ready error handlers send to clients.
    pub fn ready_store(&self) -> Result<Arc<DrugStore>, AppError> {
        self.store().ok_or_else(|| AppError::NotReady {
            is_loading: self.is_loading(),
        })
    }

    /// Loads the datasets from the configured data directory.
    ///
    /// Idempotent: returns [`LoadStatus::AlreadyLoaded`] once data is in
    /// memory and [`LoadStatus::InProgress`] while another call is loading.
    /// A failure is permanent for this state; later calls return it again
    /// without touching the disk.
    pub async fn load(&self) -> Result<LoadStatus, LoadError> {
        if let Some(status) = self.settled()? {
            return Ok(status);
        }
        let Some(_guard) = LoadingGuard::acquire(&self.inner.loading) else {
            return Ok(LoadStatus::InProgress);
        };

        // Another caller may have finished between the checks and the swap
        if let Some(status) = self.settled()? {
            return Ok(status);
        }

        let data_dir = self.inner.config.data_dir.clone();
        let datasets = self.inner.config.datasets.clone();
        info!("Loading datasets from {}", data_dir.display());

        let result = tokio::task::spawn_blocking(move || {
            let files = discover_dataset_files(&data_dir, &datasets)?;
            DrugStore::load(&files)
        })
        .await;

        match result {
            Ok(Ok(store)) => {
                let stats = store.stats().clone();
                let _ = self.inner.store.set(Arc::new(store));
                Ok(LoadStatus::Loaded(stats))
            }
            Ok(Err(e)) => Err(self.record_failure(LoadError::Failed(e.to_string()))),
            Err(e) => Err(self.record_failure(LoadError::Failed(e.to_string()))),
        }
    }

    /// Outcome of an earlier load, if there is one.
    fn settled(&self) -> Result<Option<LoadStatus>, LoadError> {
        if self.is_ready() {
            return Ok(Some(LoadStatus::AlreadyLoaded));
        }
        match self.load_error() {
            Some(err) => Err(err.clone()),
            None => Ok(None),
        }
    }

    fn record_failure(&self, err: LoadError) -> LoadError {
        warn!("{err}");
        let _ = self.inner.failure.set(err.clone());
        err
    }
}

/// Holds the loading flag; clears it on drop, including when the `load`
/// future is cancelled mid-flight.
struct LoadingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
