//! Append-only CSV sink for scraped records

use super::records::ChargerListing;
use serde::Serialize;
use std::fs::OpenOptions;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default output file for scraped listings
pub const DEFAULT_LISTINGS_FILE: &str = "chargers_data.csv";

/// Errors raised while appending records
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write record to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Appends serializable records to a CSV file. The header row is written only
/// when the file is new or empty, so repeated runs extend a single table.
#[derive(Debug, Clone)]
pub struct CsvSink<T> {
    path: PathBuf,
    _record: PhantomData<fn(T)>,
}

impl<T: Serialize> CsvSink<T> {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append records, returning how many were written
    pub fn append(&self, records: &[T]) -> Result<usize, SinkError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.open_error(source))?;

        let is_empty = file
            .metadata()
            .map_err(|source| self.open_error(source))?
            .len()
            == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_empty)
            .from_writer(file);

        for record in records {
            writer.serialize(record).map_err(|source| self.write_error(source))?;
        }
        writer
            .flush()
            .map_err(|source| self.write_error(csv::Error::from(source)))?;

        log::debug!("Appended {} records to {}", records.len(), self.path.display());
        Ok(records.len())
    }

    fn open_error(&self, source: std::io::Error) -> SinkError {
        SinkError::Open {
            path: self.path.clone(),
            source,
        }
    }

    fn write_error(&self, source: csv::Error) -> SinkError {
        SinkError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl CsvSink<ChargerListing> {
    /// Sink for scraped listings at [`DEFAULT_LISTINGS_FILE`]
    pub fn listings() -> Self {
        Self::new(DEFAULT_LISTINGS_FILE)
    }
}
