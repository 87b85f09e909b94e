//! One-shot CSV to JSON conversion of the source datasets.
//!
//! The header row becomes the object keys verbatim (so `"Drug 1"` and
//! `"Brand-Name"` survive unchanged) and every cell is written as a string.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use csv::{ReaderBuilder, StringRecord};
use serde_json::{Map, Value};

use crate::loader::discover_kinds;
use crate::types::{DataError, DataResult, DatasetConfig, DatasetKind};

/// Outcome of converting one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutcome {
    /// The JSON file was written with this many rows.
    Converted(usize),
    /// The JSON file already existed and was left alone.
    Skipped,
}

/// Summary of a [`convert_datasets`] run.
#[derive(Debug, Clone, Default)]
pub struct ConvertReport {
    /// Per-dataset outcome with the JSON path it refers to.
    pub datasets: Vec<(DatasetKind, PathBuf, ConvertOutcome)>,
    /// Time taken in milliseconds.
    pub convert_time_ms: u64,
}

impl ConvertReport {
    /// Total rows written across all converted datasets.
    pub fn rows_written(&self) -> usize {
        self.datasets
            .iter()
            .map(|(_, _, outcome)| match outcome {
                ConvertOutcome::Converted(rows) => *rows,
                ConvertOutcome::Skipped => 0,
            })
            .sum()
    }
}

/// Converts CSV rows from `reader` into a JSON array written to `writer`.
///
/// Returns the number of rows written. Short rows are padded with empty
/// strings; extra cells beyond the header are dropped.
pub fn convert_reader<R: Read, W: Write>(reader: R, writer: W) -> DataResult<usize> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            // UTF-8 BOM only ever appears on the first header
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DataError::MissingHeader {
            path: "<reader>".to_string(),
        });
    }

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while csv_reader.read_record(&mut record)? {
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        rows.push(Value::Object(row_object(&headers, &record)));
    }

    let mut writer = BufWriter::new(writer);
    serde_json::to_writer(&mut writer, &rows).map_err(|source| DataError::Json {
        path: "<writer>".to_string(),
        source,
    })?;
    writer.flush()?;

    Ok(rows.len())
}

fn row_object(headers: &[String], record: &StringRecord) -> Map<String, Value> {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let cell = record.get(i).unwrap_or("");
            (header.clone(), Value::String(cell.to_string()))
        })
        .collect()
}

/// Converts one CSV file into a JSON array file.
///
/// Output goes to a `.tmp` sibling that is renamed over `json` only once the
/// whole file has been written, so a failed run never leaves a partial
/// target behind.
pub fn convert_csv_to_json<P: AsRef<Path>, Q: AsRef<Path>>(csv: P, json: Q) -> DataResult<usize> {
    let csv = csv.as_ref();
    let json = json.as_ref();

    if !csv.is_file() {
        return Err(DataError::FileNotFound {
            path: csv.display().to_string(),
        });
    }

    let staging = staging_path(json);
    let result = File::open(csv)
        .map_err(DataError::from)
        .and_then(|input| {
            let output = File::create(&staging)?;
            convert_reader(BufReader::new(input), output)
        })
        .and_then(|rows| {
            fs::rename(&staging, json)?;
            Ok(rows)
        });

    if result.is_err() && staging.exists() {
        if let Err(e) = fs::remove_file(&staging) {
            tracing::warn!(path = %staging.display(), "failed to remove staging file: {e}");
        }
    }

    result.map_err(|e| match e {
        DataError::MissingHeader { .. } => DataError::MissingHeader {
            path: csv.display().to_string(),
        },
        DataError::Json { source, .. } => DataError::Json {
            path: json.display().to_string(),
            source,
        },
        other => other,
    })
}

fn staging_path(json: &Path) -> PathBuf {
    let mut name = OsString::from(json.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Converts all three datasets from `csv_dir` into `json_dir`.
///
/// A dataset whose JSON file already exists is skipped unless `force` is set,
/// so conversion happens once per data directory. Source CSV files are only
/// required for the datasets that still need converting.
pub fn convert_datasets<P: AsRef<Path>, Q: AsRef<Path>>(
    csv_dir: P,
    json_dir: Q,
    config: &DatasetConfig,
    force: bool,
) -> DataResult<ConvertReport> {
    let start = Instant::now();
    let json_dir = json_dir.as_ref();

    let mut report = ConvertReport::default();
    let mut pending = Vec::new();
    for kind in DatasetKind::ALL {
        let target = json_dir.join(config.json_file_name(kind));
        if target.exists() && !force {
            tracing::info!(dataset = %kind, path = %target.display(), "JSON already present, skipping");
            report.datasets.push((kind, target, ConvertOutcome::Skipped));
        } else {
            pending.push(kind);
        }
    }

    if !pending.is_empty() {
        let sources = discover_kinds(csv_dir.as_ref(), &pending, |kind| {
            config.csv_file_name(kind)
        })?;

        if !json_dir.is_dir() {
            fs::create_dir_all(json_dir)?;
        }

        for kind in pending {
            let Some(source) = sources.get(kind) else {
                continue;
            };
            let target = json_dir.join(config.json_file_name(kind));

            let rows = convert_csv_to_json(source, &target)?;
            tracing::info!(dataset = %kind, rows, path = %target.display(), "converted CSV to JSON");
            report
                .datasets
                .push((kind, target, ConvertOutcome::Converted(rows)));
        }
    }

    report.convert_time_ms = start.elapsed().as_millis() as u64;
    Ok(report)
}
