//! Terminal rendering of registry summaries, selections and deltas.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use regpop_analytics::MigrationOverview;
use regpop_model::{MigrationDelta, RegionRecord};

/// Counts describing a loaded registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySummary {
    pub raw_rows: usize,
    pub excluded_rows: usize,
    pub regions: usize,
    pub records: usize,
    pub years: Vec<i32>,
    pub categories: Vec<String>,
}

pub fn summary_lines(summary: &RegistrySummary) -> Vec<String> {
    let years: Vec<String> = summary.years.iter().map(i32::to_string).collect();
    vec![
        format!(
            "rows: {} ({} excluded)",
            summary.raw_rows, summary.excluded_rows
        ),
        format!("regions: {}", summary.regions),
        format!("records: {}", summary.records),
        format!("years: {}", years.join(", ")),
        format!("categories: {}", summary.categories.join(", ")),
    ]
}

pub fn records_table(records: &[&RegionRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Region"),
        header_cell("Code"),
        header_cell("Year"),
        header_cell("Category"),
        header_cell("Population"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    for record in records {
        table.add_row(vec![
            Cell::new(&record.region_name),
            Cell::new(&record.region_code),
            Cell::new(record.year),
            Cell::new(&record.category),
            Cell::new(record.population),
        ]);
    }
    table
}

pub fn deltas_table(deltas: &[MigrationDelta]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Region"),
        header_cell("Code"),
        header_cell("Population"),
        header_cell("Change"),
        header_cell("|Change|"),
    ]);
    apply_table_style(&mut table);
    for index in 2..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for delta in deltas {
        table.add_row(vec![
            Cell::new(&delta.region_name),
            Cell::new(&delta.region_code),
            Cell::new(delta.population),
            change_cell(delta.population_difference),
            Cell::new(delta.population_difference_abs),
        ]);
    }
    table
}

/// Largest gain, largest loss and threshold ratios, one line each.
///
/// The baseline year has no meaningful change, so its lines show `-`.
pub fn headline_lines(overview: &MigrationOverview, threshold: i64) -> Vec<String> {
    let extreme = |label: &str, delta: Option<&MigrationDelta>| match delta {
        Some(delta) => format!(
            "{label}: {} {} ({})",
            delta.region_name,
            delta.population,
            format_signed(delta.population_difference)
        ),
        None => format!("{label}: -"),
    };
    vec![
        extreme("largest gain", overview.top_gainer.as_ref()),
        extreme("largest loss", overview.top_loser.as_ref()),
        format!("gaining > {threshold}: {}%", overview.stats.gainers_ratio),
        format!("losing > {threshold}: {}%", overview.stats.losers_ratio),
    ]
}

pub fn format_signed(value: i64) -> String {
    if value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn change_cell(value: i64) -> Cell {
    let cell = Cell::new(format_signed(value));
    match value.signum() {
        1 => cell.fg(Color::Green),
        -1 => cell.fg(Color::Red),
        _ => cell.fg(Color::DarkGrey),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_formatting() {
        assert_eq!(format_signed(15_256), "+15256");
        assert_eq!(format_signed(-142_912), "-142912");
        assert_eq!(format_signed(0), "0");
    }

    #[test]
    fn tables_have_one_row_per_item() {
        let record = RegionRecord {
            region_name: "서울특별시".to_string(),
            region_code: "11".to_string(),
            year: 2020,
            category: "총인구".to_string(),
            population: 9_586_195,
        };
        assert_eq!(records_table(&[&record]).row_iter().count(), 1);
        let delta = MigrationDelta::new(&record, Some(9_729_107));
        assert_eq!(deltas_table(&[delta.clone(), delta]).row_iter().count(), 2);
    }
}
