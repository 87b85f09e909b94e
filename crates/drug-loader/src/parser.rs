//! JSON dataset parser.
//!
//! Each dataset file is a JSON array of objects produced by the CSV
//! converter. Records with nothing to index or match (for example an
//! interaction row with both drugs blank) are dropped here and counted.
//! Records with some blank fields are kept; the index builders skip the
//! blank values individually.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use drug_types::{ContraindicationRecord, DrugDetailRecord, InteractionRecord};
use serde::de::DeserializeOwned;

use crate::types::{DataError, DataResult, DatasetKind};

/// Trait for record types stored in a JSON dataset.
pub trait DatasetRecord: DeserializeOwned {
    /// The dataset this record type belongs to.
    const KIND: DatasetKind;

    /// Returns true if this record carries any value a lookup can use.
    fn is_usable(&self) -> bool;
}

impl DatasetRecord for InteractionRecord {
    const KIND: DatasetKind = DatasetKind::Interactions;

    fn is_usable(&self) -> bool {
        !self.drug_a.is_empty() || !self.drug_b.is_empty()
    }
}

impl DatasetRecord for DrugDetailRecord {
    const KIND: DatasetKind = DatasetKind::DrugDetails;

    fn is_usable(&self) -> bool {
        !self.drug_type.is_empty()
    }
}

impl DatasetRecord for ContraindicationRecord {
    const KIND: DatasetKind = DatasetKind::Contraindications;

    fn is_usable(&self) -> bool {
        !self.drug_name.is_empty() || self.contraindications.is_some()
    }
}

/// Records parsed from one dataset file.
#[derive(Debug, Clone)]
pub struct ParsedDataset<T> {
    /// Records kept after filtering.
    pub records: Vec<T>,
    /// Records dropped as unusable.
    pub skipped: usize,
    /// Size of the source file in bytes.
    pub bytes: u64,
}

impl<T: DatasetRecord> ParsedDataset<T> {
    /// Parses a dataset from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        let raw: Vec<T> = serde_json::from_reader(reader)?;
        let total = raw.len();
        let records: Vec<T> = raw.into_iter().filter(T::is_usable).collect();

        Ok(Self {
            skipped: total - records.len(),
            records,
            bytes: 0,
        })
    }
}

/// Reads a JSON array dataset from disk.
///
/// # Errors
/// Returns [`DataError::FileNotFound`] if the path does not exist and
/// [`DataError::Json`] if the file is not an array of the expected records.
pub fn read_json_array<T: DatasetRecord, P: AsRef<Path>>(path: P) -> DataResult<ParsedDataset<T>> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(DataError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let file = File::open(path)?;
    let bytes = file.metadata()?.len();

    let mut parsed =
        ParsedDataset::<T>::from_reader(BufReader::new(file)).map_err(|source| DataError::Json {
            path: path.display().to_string(),
            source,
        })?;
    parsed.bytes = bytes;

    tracing::debug!(
        dataset = %T::KIND,
        records = parsed.records.len(),
        skipped = parsed.skipped,
        "parsed dataset file"
    );

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reader_skips_unusable() {
        let json = r#"[
            {"Drug 1":"Warfarin","Drug 2":"Aspirin","Interaction Description":"Bleeding"},
            {"Drug 1":"","Drug 2":"Aspirin","Interaction Description":"One-sided"},
            {"Drug 1":" ","Drug 2":null,"Interaction Description":"Empty"}
        ]"#;

        let parsed = ParsedDataset::<InteractionRecord>::from_reader(json.as_bytes()).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.skipped, 1);
        assert_eq!(parsed.records[0].drug_a, "Warfarin");
        assert_eq!(parsed.records[1].drug_b, "Aspirin");
    }

    #[test]
    fn test_from_reader_keeps_unnamed_contraindication() {
        let json = r#"[
            {"drug_name":"","contraindications":"pregnancy, renal failure"},
            {"drug_name":"","contraindications":"false"}
        ]"#;

        let parsed =
            ParsedDataset::<ContraindicationRecord>::from_reader(json.as_bytes()).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn test_from_reader_rejects_non_array() {
        let json = r#"{"Drug 1":"Warfarin"}"#;
        assert!(ParsedDataset::<InteractionRecord>::from_reader(json.as_bytes()).is_err());
    }

    #[test]
    fn test_read_json_array_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_json_array::<DrugDetailRecord, _>(dir.path().join("missing.json"))
            .unwrap_err();
        assert!(matches!(err, DataError::FileNotFound { .. }));
    }

    #[test]
    fn test_read_json_array_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drug_details.json");
        std::fs::write(&path, "[{\"Type\": \"analgesic\"").unwrap();

        let err = read_json_array::<DrugDetailRecord, _>(&path).unwrap_err();
        assert!(matches!(err, DataError::Json { .. }));
        assert!(err.to_string().contains("drug_details.json"));
    }

    #[test]
    fn test_read_json_array_records_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drug_contraindications.json");
        let body = r#"[{"drug_name":"Ibuprofen","contraindications":"pregnancy"}]"#;
        std::fs::write(&path, body).unwrap();

        let parsed = read_json_array::<ContraindicationRecord, _>(&path).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.bytes, body.len() as u64);
    }
}
