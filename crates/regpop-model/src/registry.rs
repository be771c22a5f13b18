//! The owned, immutable long-form table.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::ParseError;
use crate::record::RegionRecord;

/// The canonical long-form dataset.
///
/// Built once, then only ever borrowed. `(region_name, year, category)` is
/// unique and each region name maps to a single region code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryTable {
    records: Vec<RegionRecord>,
}

impl RegistryTable {
    /// Validates the table invariants and takes ownership of the records.
    pub fn from_records(records: Vec<RegionRecord>) -> Result<Self, ParseError> {
        let mut seen: BTreeSet<(&str, i32, &str)> = BTreeSet::new();
        let mut codes: BTreeMap<&str, &str> = BTreeMap::new();
        for record in &records {
            let key = (
                record.region_name.as_str(),
                record.year,
                record.category.as_str(),
            );
            if !seen.insert(key) {
                return Err(ParseError::DuplicateRecord {
                    region: record.region_name.clone(),
                    year: record.year,
                    category: record.category.clone(),
                });
            }
            let code = codes
                .entry(record.region_name.as_str())
                .or_insert(record.region_code.as_str());
            if *code != record.region_code {
                return Err(ParseError::ConflictingRegionCode {
                    region: record.region_name.clone(),
                    first: (*code).to_string(),
                    second: record.region_code.clone(),
                });
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[RegionRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RegionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn region_count(&self) -> usize {
        self.records
            .iter()
            .map(|record| record.region_name.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

impl<'a> IntoIterator for &'a RegistryTable {
    type Item = &'a RegionRecord;
    type IntoIter = std::slice::Iter<'a, RegionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
