//! Tests for the migration analytics engine.

use proptest::prelude::*;

use regpop_analytics::MigrationEngine;
use regpop_model::{
    AggregateMigrationStat, AnalyticsOptions, NormalizeOptions, PreconditionError, RawRegistry,
    RegionRecord, RegistryTable,
};
use regpop_transform::normalize_registry;

fn record(name: &str, code: &str, year: i32, population: u64) -> RegionRecord {
    RegionRecord {
        region_name: name.to_string(),
        region_code: code.to_string(),
        year,
        category: "총인구".to_string(),
        population,
    }
}

fn sample_table() -> RegistryTable {
    RegistryTable::from_records(vec![
        record("서울특별시", "11", 2019, 9_729_107),
        record("부산광역시", "26", 2019, 3_413_841),
        record("세종특별자치시", "36", 2019, 340_575),
        record("서울특별시", "11", 2020, 9_668_465),
        record("부산광역시", "26", 2020, 3_391_946),
        record("세종특별자치시", "36", 2020, 355_831),
        record("경기도", "41", 2020, 13_427_014),
    ])
    .expect("valid table")
}

#[test]
fn seoul_delta_from_registry_rows() {
    let mut raw = RawRegistry::new(vec![
        "행정구역".to_string(),
        "2019년_총인구".to_string(),
        "2020년_총인구".to_string(),
    ]);
    raw.push_row(vec![
        Some("서울특별시(1100000000)".to_string()),
        Some("9,729,107".to_string()),
        Some("9,586,195".to_string()),
    ]);
    let table = normalize_registry(raw, &NormalizeOptions::default().with_excluded_rows([]))
        .expect("normalize");
    let engine = MigrationEngine::new(&table, AnalyticsOptions::default());

    let deltas = engine.compute_deltas(2020, "총인구").unwrap();

    assert_eq!(deltas.len(), 1);
    assert_eq!(deltas[0].region_name, "서울특별시");
    assert_eq!(deltas[0].region_code, "11");
    assert_eq!(deltas[0].population, 9_586_195);
    assert_eq!(deltas[0].population_difference, -142_912);
    assert_eq!(deltas[0].population_difference_abs, 142_912);
}

#[test]
fn deltas_are_sorted_by_difference_descending() {
    let table = sample_table();
    let engine = MigrationEngine::new(&table, AnalyticsOptions::default());

    let deltas = engine.compute_deltas(2020, "총인구").unwrap();

    let summary: Vec<(&str, i64)> = deltas
        .iter()
        .map(|d| (d.region_name.as_str(), d.population_difference))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("경기도", 13_427_014),
            ("세종특별자치시", 15_256),
            ("부산광역시", -21_895),
            ("서울특별시", -60_642),
        ]
    );
}

#[test]
fn vanished_regions_are_not_listed() {
    let table = RegistryTable::from_records(vec![
        record("서울특별시", "11", 2019, 10),
        record("강원도", "42", 2019, 20),
        record("서울특별시", "11", 2020, 12),
    ])
    .unwrap();
    let engine = MigrationEngine::new(&table, AnalyticsOptions::default());

    let deltas = engine.compute_deltas(2020, "총인구").unwrap();

    assert_eq!(deltas.len(), 1);
    assert_eq!(deltas[0].population_difference, 2);
}

#[test]
fn ties_are_broken_by_region_name() {
    let table = RegistryTable::from_records(vec![
        record("다", "3", 2019, 10),
        record("가", "1", 2019, 10),
        record("나", "2", 2019, 10),
        record("다", "3", 2020, 15),
        record("가", "1", 2020, 15),
        record("나", "2", 2020, 15),
    ])
    .unwrap();
    let engine = MigrationEngine::new(&table, AnalyticsOptions::default());

    let deltas = engine.compute_deltas(2020, "총인구").unwrap();

    let order: Vec<&str> = deltas.iter().map(|d| d.region_name.as_str()).collect();
    assert_eq!(order, vec!["가", "나", "다"]);
}

#[test]
fn first_year_deltas_equal_population() {
    let table = sample_table();
    let engine = MigrationEngine::new(&table, AnalyticsOptions::default());

    let deltas = engine.compute_deltas(2019, "총인구").unwrap();

    assert_eq!(deltas.len(), 3);
    for delta in &deltas {
        assert_eq!(delta.population_difference, delta.population as i64);
    }
}

#[test]
fn largest_population_keeps_baseline_rule() {
    let top = i64::MAX as u64;
    let table = RegistryTable::from_records(vec![
        record("서울특별시", "11", 2019, top),
        record("서울특별시", "11", 2020, 0),
    ])
    .expect("valid table");
    let engine = MigrationEngine::new(&table, AnalyticsOptions::default());

    let baseline = engine.compute_deltas(2019, "총인구").unwrap();
    assert_eq!(baseline[0].population_difference, i64::MAX);
    assert_eq!(baseline[0].population_difference_abs, top);

    let next = engine.compute_deltas(2020, "총인구").unwrap();
    assert_eq!(next[0].population_difference, -i64::MAX);
}

#[test]
fn unknown_year_is_reported() {
    let table = sample_table();
    let engine = MigrationEngine::new(&table, AnalyticsOptions::default());

    assert_eq!(
        engine.compute_deltas(2021, "총인구"),
        Err(PreconditionError::UnknownYear { year: 2021 })
    );
}

#[test]
fn overview_reports_head_tail_and_ratios() {
    let table = sample_table();
    let engine = MigrationEngine::new(&table, AnalyticsOptions::default());

    let overview = engine.overview(2020, "총인구").unwrap();

    assert!(!overview.baseline);
    assert_eq!(overview.deltas.len(), 4);
    assert_eq!(
        overview.top_gainer.as_ref().map(|d| d.region_name.as_str()),
        Some("경기도")
    );
    assert_eq!(
        overview.top_loser.as_ref().map(|d| d.region_name.as_str()),
        Some("서울특별시")
    );
    // 2 of 4 gain beyond 5000, 2 of 4 lose beyond it.
    assert_eq!(
        overview.stats,
        AggregateMigrationStat {
            gainers_ratio: 50,
            losers_ratio: 50
        }
    );
}

#[test]
fn overview_suppresses_baseline_year() {
    let table = sample_table();
    let engine = MigrationEngine::new(&table, AnalyticsOptions::default());

    let overview = engine.overview(2019, "총인구").unwrap();

    assert!(overview.baseline);
    assert_eq!(overview.top_gainer, None);
    assert_eq!(overview.top_loser, None);
    assert_eq!(overview.stats, AggregateMigrationStat::default());
    assert_eq!(overview.deltas.len(), 3);
}

#[test]
fn engine_uses_configured_threshold() {
    let table = sample_table();
    let engine =
        MigrationEngine::new(&table, AnalyticsOptions::default().with_threshold(20_000));

    let deltas = engine.compute_deltas(2020, "총인구").unwrap();
    let stats = engine.aggregate_stats(&deltas).unwrap();

    assert_eq!(stats.gainers_ratio, 25);
    assert_eq!(stats.losers_ratio, 50);
}

fn table_from(populations: &[(u64, u64)]) -> RegistryTable {
    let mut records = Vec::new();
    for (idx, (before, after)) in populations.iter().enumerate() {
        let name = format!("지역{idx:02}");
        let code = format!("{}", idx + 10);
        records.push(record(&name, &code, 2019, *before));
        records.push(record(&name, &code, 2020, *after));
    }
    RegistryTable::from_records(records).unwrap()
}

proptest! {
    #[test]
    fn deltas_are_deterministic_and_ordered(
        populations in prop::collection::vec((0u64..100_000, 0u64..100_000), 1..20)
    ) {
        let table = table_from(&populations);
        let engine = MigrationEngine::new(&table, AnalyticsOptions::default());

        let first = engine.compute_deltas(2020, "총인구").unwrap();
        let second = engine.compute_deltas(2020, "총인구").unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), populations.len());
        for pair in first.windows(2) {
            prop_assert!(
                pair[0].population_difference > pair[1].population_difference
                    || (pair[0].population_difference == pair[1].population_difference
                        && pair[0].region_name < pair[1].region_name)
            );
        }
    }

    #[test]
    fn baseline_deltas_equal_population(
        populations in prop::collection::vec((0u64..100_000, 0u64..100_000), 1..20)
    ) {
        let table = table_from(&populations);
        let engine = MigrationEngine::new(&table, AnalyticsOptions::default());

        for delta in engine.compute_deltas(2019, "총인구").unwrap() {
            prop_assert_eq!(delta.population_difference, delta.population as i64);
            prop_assert_eq!(delta.population_difference_abs, delta.population);
        }
    }
}
