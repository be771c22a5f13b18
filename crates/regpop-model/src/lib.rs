//! Data model for the regional population registry.
//!
//! The canonical entity is [`RegionRecord`], one row per
//! `(region, year, category)`. [`RegistryTable`] owns the full long-form set
//! once normalization has finished; everything downstream borrows it.

pub mod error;
pub mod options;
pub mod record;
pub mod registry;
pub mod table;

pub use error::{ParseError, PreconditionError, RegistryError, Result};
pub use options::{
    AnalyticsOptions, DEFAULT_CODE_PADDING, DEFAULT_COLUMN_SEPARATOR, DEFAULT_EXCLUDED_ROWS,
    DEFAULT_IDENTITY_COLUMN, DEFAULT_THRESHOLD, NormalizeOptions, RatioRounding,
};
pub use record::{AggregateMigrationStat, MigrationDelta, RegionRecord};
pub use registry::RegistryTable;
pub use table::{RawRegistry, RawRegistryRow};
