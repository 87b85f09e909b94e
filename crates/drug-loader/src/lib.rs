//! # drug-loader
//!
//! Loads the drug lookup datasets into memory and answers queries over them.
//!
//! ## Pipeline
//!
//! 1. [`convert_datasets`] turns the source CSV files into JSON arrays, once.
//! 2. [`discover_dataset_files`] resolves the JSON files in a data directory.
//! 3. [`DrugStore::load`] reads them and builds the derived indexes.
//! 4. Query methods on [`DrugStore`] answer lookups without mutating it.
//!
//! ```ignore
//! use drug_loader::{discover_dataset_files, DatasetConfig, DrugStore};
//!
//! let files = discover_dataset_files("data", &DatasetConfig::default())?;
//! let store = DrugStore::load(&files)?;
//! let matches = store.check_interactions(&["warfarin", "aspirin"])?;
//! ```

#![warn(missing_docs)]

pub mod convert;
pub mod index;
pub mod loader;
pub mod parser;
pub mod query;
pub mod store;
pub mod types;

pub use convert::{convert_csv_to_json, convert_datasets, ConvertOutcome, ConvertReport};
pub use index::TypeFilters;
pub use loader::{discover_csv_files, discover_dataset_files, format_bytes};
pub use parser::{read_json_array, DatasetRecord, ParsedDataset};
pub use query::{
    DrugPage, DrugQuery, InteractionMatch, QueryError, PAGE_SIZE, SUGGESTION_LIMIT,
};
pub use store::DrugStore;
pub use types::{DataError, DataResult, DatasetConfig, DatasetFiles, DatasetKind, LoadStats};

// Re-export drug-types for convenience
pub use drug_types;
