//! Polars frames of the long-form table and delta tables.
//!
//! Rendering collaborators (choropleth, heatmap) consume these frames, or the
//! CSV files written from them, keyed by `region_code` and
//! `(year, region_name)`.

use std::fs::File;
use std::path::Path;

use polars::prelude::{
    Column, CsvWriter, DataFrame, IntoColumn, NamedFrom, PolarsResult, SerWriter, Series,
};

use regpop_model::{MigrationDelta, RegionRecord};

fn text_column<T, F>(name: &str, items: &[T], value: F) -> Column
where
    F: Fn(&T) -> &str,
{
    let values: Vec<&str> = items.iter().map(value).collect();
    Series::new(name.into(), values).into_column()
}

/// Columns: `region_name, region_code, year, category, population`.
pub fn records_to_frame(records: &[RegionRecord]) -> PolarsResult<DataFrame> {
    let years: Vec<i32> = records.iter().map(|r| r.year).collect();
    let populations: Vec<u64> = records.iter().map(|r| r.population).collect();
    DataFrame::new(vec![
        text_column("region_name", records, |r| r.region_name.as_str()),
        text_column("region_code", records, |r| r.region_code.as_str()),
        Series::new("year".into(), years).into_column(),
        text_column("category", records, |r| r.category.as_str()),
        Series::new("population".into(), populations).into_column(),
    ])
}

/// Columns: `region_name, region_code, population, population_difference,
/// population_difference_abs`, in the order given.
pub fn deltas_to_frame(deltas: &[MigrationDelta]) -> PolarsResult<DataFrame> {
    let populations: Vec<u64> = deltas.iter().map(|d| d.population).collect();
    let differences: Vec<i64> = deltas.iter().map(|d| d.population_difference).collect();
    let magnitudes: Vec<u64> = deltas.iter().map(|d| d.population_difference_abs).collect();
    DataFrame::new(vec![
        text_column("region_name", deltas, |d| d.region_name.as_str()),
        text_column("region_code", deltas, |d| d.region_code.as_str()),
        Series::new("population".into(), populations).into_column(),
        Series::new("population_difference".into(), differences).into_column(),
        Series::new("population_difference_abs".into(), magnitudes).into_column(),
    ])
}

/// Writes a frame as CSV with a header row, replacing any existing file.
pub fn write_frame_csv(df: &mut DataFrame, path: &Path) -> PolarsResult<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)
}
