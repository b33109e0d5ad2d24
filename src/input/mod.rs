use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::model::record::Record;

pub mod reader;
pub mod rows;

use reader::open_maybe_gz;
use rows::parse_records;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("duplicate record id '{id}' on line {line}")]
    DuplicateId { id: String, line: u64 },
    #[error("invalid band config: {0}")]
    BandConfig(#[from] serde_json::Error),
}

/// Counters reported after reading a record file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped_rows: usize,
}

pub trait RecordSource {
    /// Human-readable origin of the records, shown in reports.
    fn describe(&self) -> String;

    /// All records plus the counters gathered while reading them.
    fn load(&self) -> Result<(Vec<Record>, ImportReport), InputError>;

    fn fetch_all(&self) -> Result<Vec<Record>, InputError> {
        self.load().map(|(records, _)| records)
    }
}

/// Three-column `id,name,score` CSV file with a header row; `.gz` is decompressed.
#[derive(Debug, Clone)]
pub struct CsvRecordSource {
    path: PathBuf,
}

impl CsvRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for CsvRecordSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<(Vec<Record>, ImportReport), InputError> {
        tracing::info!("opening record file: {}", self.path.display());
        let reader = open_maybe_gz(&self.path)?;
        let (records, report) = parse_records(reader)?;
        tracing::info!(
            "imported {} records from {}",
            report.imported,
            self.path.display()
        );
        if report.skipped_rows > 0 {
            tracing::warn!("skipped {} invalid rows", report.skipped_rows);
        }
        Ok((records, report))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
