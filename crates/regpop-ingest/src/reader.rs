//! Registry CSV loading.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info};

use regpop_model::RawRegistry;

use crate::encoding::{IngestOptions, decode_registry_bytes};
use crate::error::{IngestError, Result};

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Reads and decodes a registry file into a raw grid.
pub fn read_registry(path: &Path, options: &IngestOptions) -> Result<RawRegistry> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    debug!(
        path = %path.display(),
        bytes = bytes.len(),
        encoding = ?options.encoding,
        "decoding registry"
    );
    let text = decode_registry_bytes(&bytes, options.encoding, path)?;
    parse_registry(&text, path)
}

/// Parses decoded registry text.
///
/// The first non-blank row is the header. Data rows are fitted to the header
/// width and blank cells become missing values. `path` is only used in
/// error messages.
pub fn parse_registry(text: &str, path: &Path) -> Result<RawRegistry> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut raw: Option<RawRegistry> = None;
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let row: Vec<Option<String>> = record.iter().map(normalize_cell).collect();
        if row.iter().all(Option::is_none) {
            continue;
        }
        match raw.as_mut() {
            Some(registry) => registry.push_row(row),
            None => {
                let headers: Vec<String> = record.iter().map(normalize_header).collect();
                raw = Some(RawRegistry::new(headers));
            }
        }
    }

    let Some(raw) = raw else {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    };
    if raw.headers().iter().any(String::is_empty) {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
        });
    }
    info!(
        path = %path.display(),
        rows = raw.row_count(),
        columns = raw.headers().len(),
        missing = raw.missing_cells(),
        "read registry"
    );
    Ok(raw)
}
