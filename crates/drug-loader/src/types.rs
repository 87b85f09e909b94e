//! Loader-specific types: errors, dataset configuration and statistics.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading, converting or loading datasets.
#[derive(Error, Debug)]
pub enum DataError {
    /// I/O error reading or writing a dataset file.
    #[error("IO error on dataset file: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Dataset file is not a valid JSON array of records.
    #[error("Malformed JSON in {path}: {source}")]
    Json {
        /// The file being read.
        path: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Directory not found.
    #[error("Directory not found: {path}")]
    DirectoryNotFound {
        /// The path that was not found.
        path: String,
    },

    /// One or more datasets are missing from the data directory.
    #[error("Required dataset not found: {datasets} in {directory}")]
    RequiredFileMissing {
        /// Comma separated dataset labels.
        datasets: String,
        /// The directory that was searched.
        directory: String,
    },

    /// CSV file has no header row.
    #[error("Missing header row in {path}")]
    MissingHeader {
        /// The file being converted.
        path: String,
    },
}

/// Result type for dataset operations.
pub type DataResult<T> = Result<T, DataError>;

/// The three datasets served by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    /// Pairwise drug interactions.
    Interactions,
    /// Drug details grouped by drug type.
    DrugDetails,
    /// Per-drug contraindications.
    Contraindications,
}

impl DatasetKind {
    /// All datasets, in load order.
    pub const ALL: [DatasetKind; 3] = [
        DatasetKind::Interactions,
        DatasetKind::DrugDetails,
        DatasetKind::Contraindications,
    ];

    /// Human-readable label used in logs and errors.
    pub fn label(self) -> &'static str {
        match self {
            DatasetKind::Interactions => "Interactions",
            DatasetKind::DrugDetails => "DrugDetails",
            DatasetKind::Contraindications => "Contraindications",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// File names of the three datasets, without extension.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    /// Base name of the interaction dataset.
    pub interactions: String,
    /// Base name of the drug detail dataset.
    pub drug_details: String,
    /// Base name of the contraindication dataset.
    pub contraindications: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            interactions: "drug_interactions".to_string(),
            drug_details: "drug_details".to_string(),
            contraindications: "drug_contraindications".to_string(),
        }
    }
}

impl DatasetConfig {
    /// Returns the base name configured for a dataset.
    pub fn base_name(&self, kind: DatasetKind) -> &str {
        match kind {
            DatasetKind::Interactions => &self.interactions,
            DatasetKind::DrugDetails => &self.drug_details,
            DatasetKind::Contraindications => &self.contraindications,
        }
    }

    /// JSON file name for a dataset.
    pub fn json_file_name(&self, kind: DatasetKind) -> String {
        format!("{}.json", self.base_name(kind))
    }

    /// CSV file name for a dataset.
    pub fn csv_file_name(&self, kind: DatasetKind) -> String {
        format!("{}.csv", self.base_name(kind))
    }
}

/// Resolved dataset paths in a data directory.
#[derive(Debug, Clone, Default)]
pub struct DatasetFiles {
    /// Path to the interaction dataset.
    pub interactions: Option<PathBuf>,
    /// Path to the drug detail dataset.
    pub drug_details: Option<PathBuf>,
    /// Path to the contraindication dataset.
    pub contraindications: Option<PathBuf>,
}

impl DatasetFiles {
    /// Creates a new empty DatasetFiles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the path recorded for a dataset.
    pub fn get(&self, kind: DatasetKind) -> Option<&PathBuf> {
        match kind {
            DatasetKind::Interactions => self.interactions.as_ref(),
            DatasetKind::DrugDetails => self.drug_details.as_ref(),
            DatasetKind::Contraindications => self.contraindications.as_ref(),
        }
    }

    /// Records the path for a dataset.
    pub fn set(&mut self, kind: DatasetKind, path: PathBuf) {
        let slot = match kind {
            DatasetKind::Interactions => &mut self.interactions,
            DatasetKind::DrugDetails => &mut self.drug_details,
            DatasetKind::Contraindications => &mut self.contraindications,
        };
        *slot = Some(path);
    }

    /// Returns true if all three datasets are present.
    pub fn has_required_files(&self) -> bool {
        self.missing_files().is_empty()
    }

    /// Returns the labels of missing datasets.
    pub fn missing_files(&self) -> Vec<&'static str> {
        DatasetKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind).is_none())
            .map(DatasetKind::label)
            .collect()
    }
}

/// Statistics from loading the datasets and building the indexes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Interaction records loaded.
    pub interactions: usize,
    /// Drug detail records loaded.
    pub drug_details: usize,
    /// Contraindication records loaded.
    pub contraindications: usize,
    /// Entries in the unique drug name index.
    pub unique_drug_names: usize,
    /// Distinct drug types in the filter index.
    pub drug_types: usize,
    /// Entries in the contraindication term index.
    pub contraindication_terms: usize,
    /// Total bytes read from disk.
    pub bytes_read: u64,
    /// Time taken to load and index in milliseconds.
    pub load_time_ms: u64,
}

impl LoadStats {
    /// Total records across the three datasets.
    pub fn total_records(&self) -> usize {
        self.interactions + self.drug_details + self.contraindications
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_config_default() {
        let config = DatasetConfig::default();
        assert_eq!(
            config.json_file_name(DatasetKind::Interactions),
            "drug_interactions.json"
        );
        assert_eq!(
            config.csv_file_name(DatasetKind::Contraindications),
            "drug_contraindications.csv"
        );
    }

    #[test]
    fn test_dataset_files_missing() {
        let files = DatasetFiles {
            interactions: Some(PathBuf::from("drug_interactions.json")),
            ..Default::default()
        };

        assert!(!files.has_required_files());
        let missing = files.missing_files();
        assert_eq!(missing, vec!["DrugDetails", "Contraindications"]);
    }

    #[test]
    fn test_dataset_files_set_get() {
        let mut files = DatasetFiles::new();
        for kind in DatasetKind::ALL {
            files.set(kind, PathBuf::from(kind.label()));
        }
        assert!(files.has_required_files());
        assert_eq!(
            files.get(DatasetKind::DrugDetails),
            Some(&PathBuf::from("DrugDetails"))
        );
    }

    #[test]
    fn test_load_stats_total() {
        let stats = LoadStats {
            interactions: 3,
            drug_details: 2,
            contraindications: 1,
            ..Default::default()
        };
        assert_eq!(stats.total_records(), 6);
    }
}
