//! Registry normalization: clean the raw grid and melt it into long records.
//!
//! The stages run in a fixed order:
//! 1. backward-fill every missing cell from the next non-missing cell below it
//! 2. drop the configured aggregate/merged rows
//! 3. split each data column label into `(year, category)`
//! 4. melt into one [`RegionRecord`] per (region, data column)
//!
//! Filling happens before exclusion, so a value copied into a gap may come
//! from a row that is dropped afterwards.

use std::collections::BTreeSet;

use tracing::{debug, info, info_span};

use regpop_model::{
    NormalizeOptions, ParseError, PreconditionError, RawRegistry, RawRegistryRow, RegionRecord,
    RegistryError, RegistryTable,
};

use crate::label::parse_region_label_with_padding;

/// Year and category decoded from a wide column label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLabel {
    pub year: i32,
    pub category: String,
}

/// Fills each missing cell with the next non-missing value in its column.
///
/// Cells with no later value stay missing. Returns the number of cells filled.
pub fn backward_fill(raw: &mut RawRegistry) -> usize {
    let mut filled = 0usize;
    for col_idx in 0..raw.headers().len() {
        let mut next: Option<String> = None;
        for row in raw.rows_mut().rev() {
            if row[col_idx].is_some() {
                next.clone_from(&row[col_idx]);
            } else if let Some(value) = &next {
                row[col_idx] = Some(value.clone());
                filled += 1;
            }
        }
    }
    filled
}

/// Drops the rows at the given raw positions.
///
/// Returns the original positions of the rows that remain, in order.
pub fn exclude_rows(
    raw: &mut RawRegistry,
    rows: &[usize],
) -> Result<Vec<usize>, PreconditionError> {
    let total = raw.row_count();
    if let Some(&row) = rows.iter().find(|&&row| row >= total) {
        return Err(PreconditionError::ExcludedRowOutOfRange { row, rows: total });
    }
    let excluded: BTreeSet<usize> = rows.iter().copied().collect();
    let kept: Vec<usize> = (0..total).filter(|idx| !excluded.contains(idx)).collect();
    raw.retain_rows(|position| !excluded.contains(&position));
    Ok(kept)
}

/// Splits `"<year><separator><category>"`, e.g. `"2020년_총인구"`.
pub fn split_column_label(column: &str, separator: &str) -> Result<ColumnLabel, ParseError> {
    let invalid = || ParseError::InvalidColumnLabel {
        column: column.to_string(),
    };
    let (year, category) = column.split_once(separator).ok_or_else(invalid)?;
    if category.is_empty() || category.contains(separator) {
        return Err(invalid());
    }
    let token = year.trim();
    let year = token.parse::<i32>().map_err(|_| ParseError::InvalidYear {
        column: column.to_string(),
        token: token.to_string(),
    })?;
    Ok(ColumnLabel {
        year,
        category: category.trim().to_string(),
    })
}

/// Parses a population cell such as `"9,586,195"`.
///
/// Values must fit in `i64` so that year-over-year differences stay exact.
pub fn parse_population(value: &str, region: &str, column: &str) -> Result<u64, ParseError> {
    let digits: String = value.chars().filter(|&ch| ch != ',').collect();
    digits
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|population| u64::try_from(population).ok())
        .ok_or_else(|| ParseError::InvalidPopulation {
            region: region.to_string(),
            column: column.to_string(),
            value: value.to_string(),
        })
}

/// Builds the long-form table from a raw registry.
///
/// The raw grid is consumed; nothing of it survives the call.
pub fn normalize_registry(
    mut raw: RawRegistry,
    options: &NormalizeOptions,
) -> Result<RegistryTable, RegistryError> {
    let span = info_span!("normalize", rows = raw.row_count());
    let _guard = span.enter();

    let identity_idx = raw.column_index(&options.identity_column).ok_or_else(|| {
        ParseError::MissingIdentityColumn {
            column: options.identity_column.clone(),
        }
    })?;

    let filled = backward_fill(&mut raw);
    debug!(filled, "backward-filled missing cells");

    let kept = exclude_rows(&mut raw, &options.excluded_rows)?;
    debug!(
        excluded = options.excluded_rows.len(),
        remaining = kept.len(),
        "dropped excluded rows"
    );

    let columns = raw
        .headers()
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != identity_idx)
        .map(|(_, header)| split_column_label(header, &options.column_separator))
        .collect::<Result<Vec<_>, _>>()?;
    let rows = registry_rows(&raw, identity_idx, &kept)?;
    let records = melt(&rows, &columns, &options.code_padding)?;
    let table = RegistryTable::from_records(records)?;
    info!(
        regions = rows.len(),
        records = table.len(),
        "normalized registry"
    );
    Ok(table)
}

fn registry_rows(
    raw: &RawRegistry,
    identity_idx: usize,
    positions: &[usize],
) -> Result<Vec<RawRegistryRow>, ParseError> {
    let mut rows = Vec::with_capacity(raw.row_count());
    let headers = raw.headers();
    for (row, &position) in raw.rows().iter().zip(positions) {
        let cell = |idx: usize| {
            row.get(idx)
                .cloned()
                .flatten()
                .ok_or_else(|| ParseError::UnfilledCell {
                    row: position,
                    column: headers[idx].clone(),
                })
        };
        let label = cell(identity_idx)?;
        let mut values = Vec::with_capacity(headers.len().saturating_sub(1));
        for (idx, header) in headers.iter().enumerate() {
            if idx == identity_idx {
                continue;
            }
            values.push((header.clone(), cell(idx)?));
        }
        rows.push(RawRegistryRow { label, values });
    }
    Ok(rows)
}

/// Column-major melt: all regions for the first data column, then the next.
fn melt(
    rows: &[RawRegistryRow],
    columns: &[ColumnLabel],
    code_padding: &str,
) -> Result<Vec<RegionRecord>, ParseError> {
    let regions = rows
        .iter()
        .map(|row| parse_region_label_with_padding(&row.label, code_padding))
        .collect::<Result<Vec<_>, _>>()?;

    let mut records = Vec::with_capacity(rows.len() * columns.len());
    for (col_idx, column) in columns.iter().enumerate() {
        for (row, region) in rows.iter().zip(&regions) {
            let (header, value) = &row.values[col_idx];
            records.push(RegionRecord {
                region_name: region.name.clone(),
                region_code: region.code.clone(),
                year: column.year,
                category: column.category.clone(),
                population: parse_population(value, &region.name, header)?,
            });
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(headers: &[&str], rows: &[&[Option<&str>]]) -> RawRegistry {
        let mut raw = RawRegistry::new(headers.iter().map(|h| h.to_string()).collect());
        for row in rows {
            raw.push_row(row.iter().map(|cell| cell.map(str::to_string)).collect());
        }
        raw
    }

    #[test]
    fn backward_fill_copies_next_value_in_column() {
        let mut raw = grid(
            &["a", "b"],
            &[
                &[None, Some("1")],
                &[Some("x"), None],
                &[None, None],
                &[Some("y"), Some("4")],
                &[None, None],
            ],
        );
        let filled = backward_fill(&mut raw);
        assert_eq!(filled, 4);
        assert_eq!(raw.rows()[0][0].as_deref(), Some("x"));
        assert_eq!(raw.rows()[2][0].as_deref(), Some("y"));
        assert_eq!(raw.rows()[1][1].as_deref(), Some("4"));
        assert_eq!(raw.rows()[2][1].as_deref(), Some("4"));
        assert_eq!(raw.rows()[4][0], None);
    }

    #[test]
    fn exclude_rows_reports_kept_positions() {
        let mut raw = grid(
            &["a"],
            &[&[Some("0")], &[Some("1")], &[Some("2")], &[Some("3")]],
        );
        let kept = exclude_rows(&mut raw, &[0, 2]).unwrap();
        assert_eq!(kept, vec![1, 3]);
        assert_eq!(
            raw.rows(),
            vec![vec![Some("1".to_string())], vec![Some("3".to_string())]]
        );
    }

    #[test]
    fn exclude_rows_out_of_range() {
        let mut raw = grid(&["a"], &[&[Some("0")]]);
        assert_eq!(
            exclude_rows(&mut raw, &[0, 11]),
            Err(PreconditionError::ExcludedRowOutOfRange { row: 11, rows: 1 })
        );
        assert_eq!(raw.row_count(), 1);
    }

    #[test]
    fn splits_column_label() {
        assert_eq!(
            split_column_label("2020년_총인구", "년_").unwrap(),
            ColumnLabel {
                year: 2020,
                category: "총인구".to_string()
            }
        );
        assert_eq!(
            split_column_label("2020년_남자 인구수", "년_").unwrap().category,
            "남자 인구수"
        );
    }

    #[test]
    fn rejects_malformed_column_labels() {
        assert!(matches!(
            split_column_label("총인구", "년_"),
            Err(ParseError::InvalidColumnLabel { .. })
        ));
        assert!(matches!(
            split_column_label("2020년_", "년_"),
            Err(ParseError::InvalidColumnLabel { .. })
        ));
        assert_eq!(
            split_column_label("이천년_총인구", "년_"),
            Err(ParseError::InvalidYear {
                column: "이천년_총인구".to_string(),
                token: "이천".to_string()
            })
        );
    }

    #[test]
    fn parses_population_with_separators() {
        assert_eq!(
            parse_population("9,586,195", "서울", "c").unwrap(),
            9_586_195
        );
        assert_eq!(parse_population("0", "서울", "c").unwrap(), 0);
        assert!(parse_population("-1", "서울", "c").is_err());
        assert!(parse_population("n/a", "서울", "c").is_err());
    }

    #[test]
    fn rejects_population_beyond_i64() {
        assert_eq!(
            parse_population("9,223,372,036,854,775,807", "서울", "c").unwrap(),
            i64::MAX as u64
        );
        assert_eq!(
            parse_population("10,000,000,000,000,000,000", "서울", "c"),
            Err(ParseError::InvalidPopulation {
                region: "서울".to_string(),
                column: "c".to_string(),
                value: "10,000,000,000,000,000,000".to_string(),
            })
        );
    }
}
