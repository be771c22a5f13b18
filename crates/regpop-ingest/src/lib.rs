//! Registry ingestion utilities.
//!
//! Reads a wide-form population registry export into a [`RawRegistry`] grid.
//! The exports are usually CP949/EUC-KR encoded, so decoding is part of the
//! load rather than left to the caller.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use regpop_ingest::{IngestOptions, read_registry};
//!
//! let raw = read_registry(Path::new("data/population.csv"), &IngestOptions::default())?;
//! println!("{} rows x {} columns", raw.row_count(), raw.headers().len());
//! ```
//!
//! [`RawRegistry`]: regpop_model::RawRegistry

mod encoding;
mod error;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Decoding ===
pub use encoding::{IngestOptions, SourceEncoding, decode_registry_bytes};

// === CSV Reading ===
pub use reader::{parse_registry, read_registry};
