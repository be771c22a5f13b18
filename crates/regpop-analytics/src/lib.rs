//! Queries and migration analytics over a [`RegistryTable`].
//!
//! Both layers borrow the table and allocate fresh results per call; nothing
//! here caches or mutates state, so calls can be repeated or run side by side.
//!
//! [`RegistryTable`]: regpop_model::RegistryTable

pub mod engine;
pub mod query;

pub use engine::{MigrationEngine, MigrationOverview, aggregate_stats};
pub use query::{Query, distinct_regions};
