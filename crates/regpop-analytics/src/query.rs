//! Point queries over the long-form table.

use std::collections::BTreeSet;

use regpop_model::{PreconditionError, RegionRecord, RegistryTable};

/// Read-only view answering `(year, category)` selections.
#[derive(Debug, Clone, Copy)]
pub struct Query<'a> {
    table: &'a RegistryTable,
}

impl<'a> Query<'a> {
    pub fn new(table: &'a RegistryTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a RegistryTable {
        self.table
    }

    /// Records matching both filters, in table order.
    ///
    /// Fails when the year or the category does not occur anywhere in the
    /// table. A known year and category with no records in common yields an
    /// empty selection.
    pub fn select(
        &self,
        year: i32,
        category: &str,
    ) -> Result<Vec<&'a RegionRecord>, PreconditionError> {
        self.ensure_known(year, category)?;
        Ok(self.filter(year, category))
    }

    /// Same records as [`Query::select`], by population descending. Ties keep
    /// table order.
    pub fn select_sorted(
        &self,
        year: i32,
        category: &str,
    ) -> Result<Vec<&'a RegionRecord>, PreconditionError> {
        let mut records = self.select(year, category)?;
        records.sort_by(|a, b| b.population.cmp(&a.population));
        Ok(records)
    }

    /// All records of one category, by year ascending, then table order.
    pub fn select_category(
        &self,
        category: &str,
    ) -> Result<Vec<&'a RegionRecord>, PreconditionError> {
        if !self.has_category(category) {
            return Err(PreconditionError::UnknownCategory {
                category: category.to_string(),
            });
        }
        let mut records: Vec<&RegionRecord> = self
            .table
            .iter()
            .filter(|record| record.category == category)
            .collect();
        records.sort_by_key(|record| record.year);
        Ok(records)
    }

    /// Distinct years, newest first.
    pub fn years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.table.iter().map(|record| record.year).collect();
        years.into_iter().rev().collect()
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&'a str> {
        let mut seen = BTreeSet::new();
        self.table
            .iter()
            .map(|record| record.category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }

    /// The first year in the table; deltas for it have no prior year.
    pub fn min_year(&self) -> Option<i32> {
        self.table.iter().map(|record| record.year).min()
    }

    pub fn has_year(&self, year: i32) -> bool {
        self.table.iter().any(|record| record.year == year)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.table.iter().any(|record| record.category == category)
    }

    /// Unchecked selection; an unknown year or category gives no records.
    pub(crate) fn filter(&self, year: i32, category: &str) -> Vec<&'a RegionRecord> {
        self.table
            .iter()
            .filter(|record| record.year == year && record.category == category)
            .collect()
    }

    fn ensure_known(&self, year: i32, category: &str) -> Result<(), PreconditionError> {
        if !self.has_year(year) {
            return Err(PreconditionError::UnknownYear { year });
        }
        if !self.has_category(category) {
            return Err(PreconditionError::UnknownCategory {
                category: category.to_string(),
            });
        }
        Ok(())
    }
}

/// Number of unique region names in a record set.
pub fn distinct_regions(records: &[&RegionRecord]) -> usize {
    records
        .iter()
        .map(|record| record.region_name.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}
