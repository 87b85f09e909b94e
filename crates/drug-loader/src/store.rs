//! In-memory drug data store.
//!
//! Holds the three raw datasets and the indexes derived from them. A store
//! is only ever handed out fully built: [`DrugStore::load`] reads every
//! dataset and builds every index before returning, and nothing mutates the
//! store afterwards.
//!
//! ```ignore
//! let files = discover_dataset_files("data", &DatasetConfig::default())?;
//! let store = DrugStore::load(&files)?;
//!
//! let names = store.search_drug_names("asp");
//! ```

use std::collections::HashMap;
use std::time::Instant;

use drug_types::{ContraindicationRecord, DrugDetailRecord, InteractionRecord};

use crate::index::{self, TypeFilters};
use crate::loader::format_bytes;
use crate::parser::{read_json_array, DatasetRecord, ParsedDataset};
use crate::types::{DataError, DataResult, DatasetFiles, LoadStats};

/// In-memory store for the drug datasets.
///
/// # Example
///
/// ```
/// use drug_loader::DrugStore;
/// use drug_types::InteractionRecord;
///
/// let store = DrugStore::from_records(
///     vec![InteractionRecord {
///         drug_a: "Warfarin".to_string(),
///         drug_b: "Aspirin".to_string(),
///         description: "Increased bleeding risk".to_string(),
///     }],
///     vec![],
///     vec![],
/// );
///
/// assert_eq!(store.search_drug_names("war"), vec!["warfarin"]);
/// ```
#[derive(Clone, Default)]
pub struct DrugStore {
    /// Raw interaction records.
    pub(crate) interactions: Vec<InteractionRecord>,
    /// Raw drug detail records.
    pub(crate) drug_details: Vec<DrugDetailRecord>,
    /// Raw contraindication records.
    pub(crate) contraindications: Vec<ContraindicationRecord>,
    /// Sorted folded drug names from the interaction dataset.
    pub(crate) drug_names: Vec<String>,
    /// Filter values indexed by folded drug type.
    pub(crate) filters: HashMap<String, TypeFilters>,
    /// Sorted folded contraindication terms.
    pub(crate) contraindication_terms: Vec<String>,
    stats: LoadStats,
}

impl std::fmt::Debug for DrugStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrugStore")
            .field("interactions", &self.interactions.len())
            .field("drug_details", &self.drug_details.len())
            .field("contraindications", &self.contraindications.len())
            .field("drug_names", &self.drug_names.len())
            .field("filters", &self.filters.len())
            .field("contraindication_terms", &self.contraindication_terms.len())
            .finish()
    }
}

impl DrugStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store and all of its indexes from raw records.
    pub fn from_records(
        interactions: Vec<InteractionRecord>,
        drug_details: Vec<DrugDetailRecord>,
        contraindications: Vec<ContraindicationRecord>,
    ) -> Self {
        let drug_names = index::unique_drug_names(&interactions);
        let filters = index::filter_index(&drug_details);
        let contraindication_terms = index::contraindication_terms(&contraindications);

        let stats = LoadStats {
            interactions: interactions.len(),
            drug_details: drug_details.len(),
            contraindications: contraindications.len(),
            unique_drug_names: drug_names.len(),
            drug_types: filters.len(),
            contraindication_terms: contraindication_terms.len(),
            ..Default::default()
        };

        Self {
            interactions,
            drug_details,
            contraindications,
            drug_names,
            filters,
            contraindication_terms,
            stats,
        }
    }

    /// Loads all three datasets and builds the indexes.
    ///
    /// With the `parallel` feature the three files are read concurrently.
    ///
    /// # Errors
    /// Returns an error if any dataset is missing or malformed. No partial
    /// store is returned.
    pub fn load(files: &DatasetFiles) -> DataResult<Self> {
        let start = Instant::now();

        let (interactions, drug_details, contraindications) = read_all(files)?;
        let bytes_read = interactions.bytes + drug_details.bytes + contraindications.bytes;
        let skipped = interactions.skipped + drug_details.skipped + contraindications.skipped;

        let mut store = Self::from_records(
            interactions.records,
            drug_details.records,
            contraindications.records,
        );
        store.stats.bytes_read = bytes_read;
        store.stats.load_time_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            interactions = store.stats.interactions,
            drug_details = store.stats.drug_details,
            contraindications = store.stats.contraindications,
            skipped,
            size = %format_bytes(bytes_read),
            elapsed_ms = store.stats.load_time_ms,
            "datasets loaded and indexed"
        );

        Ok(store)
    }

    /// Returns statistics recorded when the store was built.
    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }

    // Statistics

    /// Returns the number of interaction records.
    pub fn interaction_count(&self) -> usize {
        self.interactions.len()
    }

    /// Returns the number of drug detail records.
    pub fn drug_detail_count(&self) -> usize {
        self.drug_details.len()
    }

    /// Returns the number of contraindication records.
    pub fn contraindication_count(&self) -> usize {
        self.contraindications.len()
    }

    /// Returns the unique drug name index.
    pub fn drug_names(&self) -> &[String] {
        &self.drug_names
    }

    /// Returns the known drug types, sorted.
    pub fn drug_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.filters.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Returns the contraindication term index.
    pub fn contraindication_terms(&self) -> &[String] {
        &self.contraindication_terms
    }

    /// Returns an iterator over all interaction records.
    pub fn interactions(&self) -> impl Iterator<Item = &InteractionRecord> {
        self.interactions.iter()
    }

    /// Returns an iterator over all drug detail records.
    pub fn drug_details(&self) -> impl Iterator<Item = &DrugDetailRecord> {
        self.drug_details.iter()
    }

    /// Returns an iterator over all contraindication records.
    pub fn contraindications(&self) -> impl Iterator<Item = &ContraindicationRecord> {
        self.contraindications.iter()
    }
}

type ParsedAll = (
    ParsedDataset<InteractionRecord>,
    ParsedDataset<DrugDetailRecord>,
    ParsedDataset<ContraindicationRecord>,
);

fn read_one<T: DatasetRecord>(files: &DatasetFiles) -> DataResult<ParsedDataset<T>> {
    let path = files
        .get(T::KIND)
        .ok_or_else(|| DataError::RequiredFileMissing {
            datasets: T::KIND.label().to_string(),
            directory: "<unresolved>".to_string(),
        })?;
    read_json_array(path)
}

#[cfg(feature = "parallel")]
fn read_all(files: &DatasetFiles) -> DataResult<ParsedAll> {
    let ((interactions, drug_details), contraindications) = rayon::join(
        || {
            rayon::join(
                || read_one::<InteractionRecord>(files),
                || read_one::<DrugDetailRecord>(files),
            )
        },
        || read_one::<ContraindicationRecord>(files),
    );
    Ok((interactions?, drug_details?, contraindications?))
}

#[cfg(not(feature = "parallel"))]
fn read_all(files: &DatasetFiles) -> DataResult<ParsedAll> {
    Ok((
        read_one::<InteractionRecord>(files)?,
        read_one::<DrugDetailRecord>(files)?,
        read_one::<ContraindicationRecord>(files)?,
    ))
}
