//! Year-over-year migration deltas and threshold statistics.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, info_span};

use regpop_model::{
    AggregateMigrationStat, AnalyticsOptions, MigrationDelta, PreconditionError, RegistryTable,
};

use crate::query::Query;

/// Everything a migration panel shows for one selection.
///
/// For the first year in the table there is no prior year to compare with:
/// `baseline` is set, the head/tail are `None` and both ratios are zero. The
/// deltas are still listed and equal each region's population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationOverview {
    pub year: i32,
    pub category: String,
    pub baseline: bool,
    pub deltas: Vec<MigrationDelta>,
    pub top_gainer: Option<MigrationDelta>,
    pub top_loser: Option<MigrationDelta>,
    pub stats: AggregateMigrationStat,
}

/// Computes migration deltas against a borrowed table.
#[derive(Debug, Clone, Copy)]
pub struct MigrationEngine<'a> {
    query: Query<'a>,
    options: AnalyticsOptions,
}

impl<'a> MigrationEngine<'a> {
    pub fn new(table: &'a RegistryTable, options: AnalyticsOptions) -> Self {
        Self {
            query: Query::new(table),
            options,
        }
    }

    pub fn query(&self) -> Query<'a> {
        self.query
    }

    pub fn options(&self) -> AnalyticsOptions {
        self.options
    }

    /// One delta per region reporting in `year`, largest gain first.
    ///
    /// Regions without a `year - 1` figure are compared against zero; regions
    /// that stopped reporting in `year` are not listed. Ties are ordered by
    /// region name.
    pub fn compute_deltas(
        &self,
        year: i32,
        category: &str,
    ) -> Result<Vec<MigrationDelta>, PreconditionError> {
        let current = self.query.select(year, category)?;
        let previous: BTreeMap<&str, u64> = match year.checked_sub(1) {
            Some(prior) => self
                .query
                .filter(prior, category)
                .into_iter()
                .map(|record| (record.region_name.as_str(), record.population))
                .collect(),
            None => BTreeMap::new(),
        };

        let mut deltas: Vec<MigrationDelta> = current
            .into_iter()
            .map(|record| {
                let prior = previous.get(record.region_name.as_str()).copied();
                MigrationDelta::new(record, prior)
            })
            .collect();
        deltas.sort_by(|a, b| {
            b.population_difference
                .cmp(&a.population_difference)
                .then_with(|| a.region_name.cmp(&b.region_name))
        });
        debug!(
            year,
            category,
            regions = deltas.len(),
            prior_regions = previous.len(),
            "computed migration deltas"
        );
        Ok(deltas)
    }

    pub fn aggregate_stats(
        &self,
        deltas: &[MigrationDelta],
    ) -> Result<AggregateMigrationStat, PreconditionError> {
        aggregate_stats(deltas, &self.options)
    }

    pub fn overview(
        &self,
        year: i32,
        category: &str,
    ) -> Result<MigrationOverview, PreconditionError> {
        let span = info_span!("overview", year, category);
        let _guard = span.enter();

        let deltas = self.compute_deltas(year, category)?;
        let baseline = self.query.min_year() == Some(year);
        let (top_gainer, top_loser, stats) = if baseline {
            debug!("baseline year, suppressing gainers and losers");
            (None, None, AggregateMigrationStat::default())
        } else {
            (
                deltas.first().cloned(),
                deltas.last().cloned(),
                self.aggregate_stats(&deltas)?,
            )
        };
        Ok(MigrationOverview {
            year,
            category: category.to_string(),
            baseline,
            deltas,
            top_gainer,
            top_loser,
            stats,
        })
    }
}

/// Percentage of regions gaining and losing more than the threshold.
///
/// Both ratios are taken over the number of distinct regions in `deltas`,
/// which must not be zero.
pub fn aggregate_stats(
    deltas: &[MigrationDelta],
    options: &AnalyticsOptions,
) -> Result<AggregateMigrationStat, PreconditionError> {
    let regions = deltas
        .iter()
        .map(|delta| delta.region_name.as_str())
        .collect::<BTreeSet<_>>()
        .len();
    if regions == 0 {
        return Err(PreconditionError::EmptySelection);
    }
    let gainers = deltas
        .iter()
        .filter(|delta| delta.is_gain_beyond(options.threshold))
        .count();
    let losers = deltas
        .iter()
        .filter(|delta| delta.is_loss_beyond(options.threshold))
        .count();
    let ratio = |count: usize| {
        let percent = 100.0 * count as f64 / regions as f64;
        options.rounding.apply(percent) as u32
    };
    Ok(AggregateMigrationStat {
        gainers_ratio: ratio(gainers),
        losers_ratio: ratio(losers),
    })
}
