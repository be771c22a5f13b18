//! Error kinds for registry loading and analysis.

use thiserror::Error;

/// Malformed input found while turning the raw registry into records.
///
/// Every parse error is fatal to the load; no partial table is exposed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The region label carries no parenthesized code suffix.
    #[error("region label '{label}' has no parenthesized code")]
    MissingCode { label: String },

    #[error("region label '{label}' has an empty name")]
    EmptyRegionName { label: String },

    /// The code inside the parentheses is not a numeric administrative code.
    #[error("region label '{label}' has a non-numeric code '{code}'")]
    InvalidRegionCode { label: String, code: String },

    /// A data column label does not split into `<year>년_<category>`.
    #[error("column label '{column}' is not of the form <year>년_<category>")]
    InvalidColumnLabel { column: String },

    #[error("column label '{column}' has a non-numeric year '{token}'")]
    InvalidYear { column: String, token: String },

    #[error("population '{value}' for region '{region}' in column '{column}' is not a number")]
    InvalidPopulation {
        region: String,
        column: String,
        value: String,
    },

    #[error("identity column '{column}' not found in registry header")]
    MissingIdentityColumn { column: String },

    /// A missing cell had no later value in its column to fill it from.
    #[error("cell in row {row}, column '{column}' is empty and has no value to fill from")]
    UnfilledCell { row: usize, column: String },

    #[error("duplicate record for region '{region}', year {year}, category '{category}'")]
    DuplicateRecord {
        region: String,
        year: i32,
        category: String,
    },

    #[error("region '{region}' has conflicting codes '{first}' and '{second}'")]
    ConflictingRegionCode {
        region: String,
        first: String,
        second: String,
    },
}

/// A caller asked for something the table or engine cannot answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    /// Aggregate statistics over a selection with no regions.
    #[error("selection contains no regions")]
    EmptySelection,

    #[error("year {year} is not present in the registry")]
    UnknownYear { year: i32 },

    #[error("category '{category}' is not present in the registry")]
    UnknownCategory { category: String },

    /// An excluded row position does not exist in the raw registry.
    #[error("excluded row {row} is out of range (registry has {rows} data rows)")]
    ExcludedRowOutOfRange { row: usize, rows: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
