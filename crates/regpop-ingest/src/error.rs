//! Error types for registry ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading the registry file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    #[error("registry file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Encoding Errors ===
    /// The file starts with a byte-order mark we do not decode.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// The bytes are not valid in the selected encoding.
    #[error("{path} is not valid {encoding} text")]
    Decode {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// The header row has a blank column label.
    #[error("header row in {path} has an empty column name")]
    EmptyColumnName { path: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::Decode {
            path: PathBuf::from("/data/population.csv"),
            encoding: "EUC-KR",
        };
        assert_eq!(
            err.to_string(),
            "/data/population.csv is not valid EUC-KR text"
        );
    }
}
