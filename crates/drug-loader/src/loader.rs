//! Dataset file discovery utilities.

use std::path::Path;

use crate::types::{DataError, DataResult, DatasetConfig, DatasetFiles, DatasetKind};

/// Discovers the three JSON datasets in a data directory.
///
/// Every missing dataset is reported in a single
/// [`DataError::RequiredFileMissing`] so an operator sees the full list.
pub fn discover_dataset_files<P: AsRef<Path>>(
    path: P,
    config: &DatasetConfig,
) -> DataResult<DatasetFiles> {
    discover(path.as_ref(), |kind| config.json_file_name(kind))
}

/// Discovers the three source CSV files in a directory.
pub fn discover_csv_files<P: AsRef<Path>>(
    path: P,
    config: &DatasetConfig,
) -> DataResult<DatasetFiles> {
    discover(path.as_ref(), |kind| config.csv_file_name(kind))
}

fn discover(dir: &Path, file_name: impl Fn(DatasetKind) -> String) -> DataResult<DatasetFiles> {
    discover_kinds(dir, &DatasetKind::ALL, file_name)
}

/// Resolves only the listed datasets in `dir`, reporting every missing one.
pub(crate) fn discover_kinds(
    dir: &Path,
    kinds: &[DatasetKind],
    file_name: impl Fn(DatasetKind) -> String,
) -> DataResult<DatasetFiles> {
    if !dir.is_dir() {
        return Err(DataError::DirectoryNotFound {
            path: dir.display().to_string(),
        });
    }

    let mut files = DatasetFiles::new();
    let mut missing = Vec::new();
    for &kind in kinds {
        let candidate = dir.join(file_name(kind));
        if candidate.is_file() {
            files.set(kind, candidate);
        } else {
            missing.push(kind.label());
        }
    }

    if !missing.is_empty() {
        return Err(DataError::RequiredFileMissing {
            datasets: missing.join(", "),
            directory: dir.display().to_string(),
        });
    }

    Ok(files)
}

/// Formats a byte count as a human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_discover_all_present() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatasetConfig::default();
        for kind in DatasetKind::ALL {
            fs::write(dir.path().join(config.json_file_name(kind)), "[]").unwrap();
        }

        let files = discover_dataset_files(dir.path(), &config).unwrap();
        assert!(files.has_required_files());
        assert_eq!(
            files.get(DatasetKind::DrugDetails).unwrap(),
            &dir.path().join("drug_details.json")
        );
    }

    #[test]
    fn test_discover_reports_every_missing_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatasetConfig::default();
        fs::write(dir.path().join("drug_interactions.json"), "[]").unwrap();

        let err = discover_dataset_files(dir.path(), &config).unwrap_err();
        match err {
            DataError::RequiredFileMissing { datasets, .. } => {
                assert_eq!(datasets, "DrugDetails, Contraindications");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_discover_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_dataset_files(dir.path().join("nope"), &DatasetConfig::default())
            .unwrap_err();
        assert!(matches!(err, DataError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_discover_csv_uses_csv_names() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatasetConfig::default();
        for kind in DatasetKind::ALL {
            fs::write(dir.path().join(config.csv_file_name(kind)), "a\n").unwrap();
        }
        assert!(discover_csv_files(dir.path(), &config).is_ok());
        assert!(discover_dataset_files(dir.path(), &config).is_err());
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500), "500 bytes");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1024 * 1024), "1.00 MB");
        assert_eq!(format_bytes(1024 * 1024 * 1024), "1.00 GB");
    }
}
