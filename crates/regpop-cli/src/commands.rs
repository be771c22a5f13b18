//! Subcommand implementations: load, select, analyse and export.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use regpop_analytics::{MigrationEngine, Query};
use regpop_ingest::{IngestOptions, SourceEncoding, read_registry};
use regpop_model::{AnalyticsOptions, NormalizeOptions, RatioRounding, RegistryTable};
use regpop_transform::{deltas_to_frame, normalize_registry, records_to_frame, write_frame_csv};

use crate::cli::{DeltasArgs, EncodingArg, ExportArgs, RecordsArgs, RegistryArgs, SelectionArgs};
use crate::report::{RegistrySummary, deltas_table, headline_lines, records_table, summary_lines};

struct LoadedRegistry {
    table: RegistryTable,
    raw_rows: usize,
    excluded_rows: usize,
}

fn ingest_options(args: &RegistryArgs) -> IngestOptions {
    let encoding = match args.encoding {
        EncodingArg::EucKr => SourceEncoding::EucKr,
        EncodingArg::Utf8 => SourceEncoding::Utf8,
    };
    IngestOptions::new().with_encoding(encoding)
}

fn normalize_options(args: &RegistryArgs) -> NormalizeOptions {
    let excluded = if args.keep_all_rows {
        Vec::new()
    } else {
        args.exclude_rows.clone()
    };
    NormalizeOptions::new()
        .with_identity_column(args.identity_column.clone())
        .with_excluded_rows(excluded)
}

fn load_registry(args: &RegistryArgs) -> Result<LoadedRegistry> {
    let span = info_span!("load", registry = %args.registry.display());
    let _guard = span.enter();

    let raw = read_registry(&args.registry, &ingest_options(args))
        .with_context(|| format!("read registry: {}", args.registry.display()))?;
    let raw_rows = raw.row_count();
    let options = normalize_options(args);
    let excluded_rows = options.excluded_rows.iter().collect::<BTreeSet<_>>().len();
    let table = normalize_registry(raw, &options)
        .with_context(|| format!("normalize registry: {}", args.registry.display()))?;
    Ok(LoadedRegistry {
        table,
        raw_rows,
        excluded_rows,
    })
}

/// Falls back to the latest year and the first category, as a fresh
/// selection would.
fn resolve_selection(query: &Query<'_>, selection: &SelectionArgs) -> Result<(i32, String)> {
    let year = match selection.year {
        Some(year) => year,
        None => query
            .years()
            .first()
            .copied()
            .ok_or_else(|| anyhow!("registry has no records"))?,
    };
    let category = match &selection.category {
        Some(category) => category.clone(),
        None => query
            .categories()
            .first()
            .map(|category| (*category).to_string())
            .ok_or_else(|| anyhow!("registry has no records"))?,
    };
    Ok((year, category))
}

pub fn run_summary(args: &RegistryArgs) -> Result<RegistrySummary> {
    let loaded = load_registry(args)?;
    let query = Query::new(&loaded.table);
    Ok(RegistrySummary {
        raw_rows: loaded.raw_rows,
        excluded_rows: loaded.excluded_rows,
        regions: loaded.table.region_count(),
        records: loaded.table.len(),
        years: query.years(),
        categories: query.categories().into_iter().map(String::from).collect(),
    })
}

pub fn print_summary(summary: &RegistrySummary) {
    for line in summary_lines(summary) {
        println!("{line}");
    }
}

pub fn run_records(args: &RecordsArgs) -> Result<()> {
    let loaded = load_registry(&args.registry)?;
    let query = Query::new(&loaded.table);
    let (year, category) = resolve_selection(&query, &args.selection)?;
    let records = if args.sorted {
        query.select_sorted(year, &category)
    } else {
        query.select(year, &category)
    }
    .with_context(|| format!("select {year} / {category}"))?;
    println!("{year} {category}");
    println!("{}", records_table(&records));
    Ok(())
}

pub fn run_deltas(args: &DeltasArgs) -> Result<()> {
    let loaded = load_registry(&args.registry)?;
    let rounding = if args.round_half_up {
        RatioRounding::HalfAwayFromZero
    } else {
        RatioRounding::HalfEven
    };
    let options = AnalyticsOptions::new()
        .with_threshold(args.threshold)
        .with_rounding(rounding);
    let engine = MigrationEngine::new(&loaded.table, options);
    let (year, category) = resolve_selection(&engine.query(), &args.selection)?;
    let overview = engine
        .overview(year, &category)
        .with_context(|| format!("migration deltas for {year} / {category}"))?;

    println!("{year} {category}");
    println!("{}", deltas_table(&overview.deltas));
    for line in headline_lines(&overview, args.threshold) {
        println!("{line}");
    }
    Ok(())
}

/// Files written by the export command.
#[derive(Debug)]
pub struct ExportResult {
    pub records: PathBuf,
    pub deltas: PathBuf,
    pub overview: PathBuf,
}

pub fn run_export(args: &ExportArgs) -> Result<ExportResult> {
    let loaded = load_registry(&args.registry)?;
    let engine = MigrationEngine::new(
        &loaded.table,
        AnalyticsOptions::new().with_threshold(args.threshold),
    );
    let (year, category) = resolve_selection(&engine.query(), &args.selection)?;
    let overview = engine
        .overview(year, &category)
        .with_context(|| format!("migration deltas for {year} / {category}"))?;

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("create output dir: {}", args.output_dir.display()))?;

    let records_path = args.output_dir.join("records.csv");
    let mut records: DataFrame =
        records_to_frame(loaded.table.records()).context("build record frame")?;
    write_frame_csv(&mut records, &records_path)
        .with_context(|| format!("write {}", records_path.display()))?;
    info!(path = %records_path.display(), rows = records.height(), "wrote records");

    let deltas_path = args.output_dir.join("deltas.csv");
    let mut deltas: DataFrame = deltas_to_frame(&overview.deltas).context("build delta frame")?;
    write_frame_csv(&mut deltas, &deltas_path)
        .with_context(|| format!("write {}", deltas_path.display()))?;
    info!(path = %deltas_path.display(), rows = deltas.height(), "wrote deltas");

    let overview_path = args.output_dir.join("overview.json");
    let json = serde_json::to_string_pretty(&overview).context("serialize overview")?;
    fs::write(&overview_path, json)
        .with_context(|| format!("write {}", overview_path.display()))?;

    Ok(ExportResult {
        records: records_path,
        deltas: deltas_path,
        overview: overview_path,
    })
}
