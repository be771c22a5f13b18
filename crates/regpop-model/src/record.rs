//! Long-form records and the entities derived from them.

use serde::{Deserialize, Serialize};

/// One population figure for a region, year and category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionRecord {
    pub region_name: String,
    /// Administrative code, join-compatible with the boundary dataset key.
    pub region_code: String,
    pub year: i32,
    pub category: String,
    pub population: u64,
}

/// Year-over-year change for one region in a `(year, category)` slice.
///
/// A region without a prior-year figure is compared against zero. Differences
/// outside the `i64` range saturate; normalized tables never produce them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationDelta {
    pub region_name: String,
    pub region_code: String,
    pub population: u64,
    pub population_difference: i64,
    pub population_difference_abs: u64,
}

impl MigrationDelta {
    pub fn new(record: &RegionRecord, previous: Option<u64>) -> Self {
        let wide = i128::from(record.population) - i128::from(previous.unwrap_or(0));
        let difference = wide.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64;
        Self {
            region_name: record.region_name.clone(),
            region_code: record.region_code.clone(),
            population: record.population,
            population_difference: difference,
            population_difference_abs: difference.unsigned_abs(),
        }
    }

    pub fn is_gain_beyond(&self, threshold: i64) -> bool {
        self.population_difference > threshold
    }

    pub fn is_loss_beyond(&self, threshold: i64) -> bool {
        self.population_difference < -threshold
    }
}

/// Share of regions gaining or losing more than a threshold, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateMigrationStat {
    pub gainers_ratio: u32,
    pub losers_ratio: u32,
}
