//! The `batch` subcommand: conflict checks across many mediators.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use fairmediator_lib::{check_batch, quick_check, CachedStore, SqliteStore};

use crate::output::{
    build_quick_rows, print_assessments, print_batch_summary, print_csv, print_json,
    print_markdown, print_table, OutputFormat,
};

/// Arguments for the `batch` subcommand.
#[derive(Args)]
pub struct BatchArgs {
    /// SQLite database path
    #[arg(long, default_value = "fairmediator.db")]
    pub db: PathBuf,

    /// Mediator id to include; repeatable
    #[arg(long = "id", required = true)]
    pub ids: Vec<String>,

    /// Case party to screen against; repeatable, accepts `role:name`
    #[arg(long = "party", required = true)]
    pub parties: Vec<String>,

    /// Return only red/yellow/green flags per mediator
    #[arg(long)]
    pub quick: bool,

    /// Case-history staleness window in years
    #[arg(long, default_value_t = super::STALENESS_DEFAULT)]
    pub staleness_years: i32,

    /// Pin the reference date (YYYY-MM-DD) for reproducible output
    #[arg(long)]
    pub as_of: Option<String>,
}

pub fn run(args: &BatchArgs, format: &OutputFormat) -> Result<()> {
    let ids = super::parse_ids(&args.ids)?;
    let parties = super::parse_parties(&args.parties)?;
    let cfg = super::detect_config(args.staleness_years, args.as_of.as_deref())?;

    let store = SqliteStore::open(&args.db)?;
    store.init()?;
    let store = CachedStore::new(store, Duration::from_secs(300));

    if args.quick {
        let report = quick_check(&store, &ids, &parties, &cfg)?;
        let rows = build_quick_rows(&report);
        match format {
            OutputFormat::Json => print_json(&report),
            OutputFormat::Csv => print_csv(rows)?,
            OutputFormat::Markdown => print_markdown(rows),
            OutputFormat::Table => print_table(rows),
        }
        if !report.not_found.is_empty() {
            eprintln!("Not found: {}", report.not_found.join(", "));
        }
        return Ok(());
    }

    let report = check_batch(&store, &ids, &parties, &cfg)?;
    match format {
        OutputFormat::Json => print_json(&report),
        _ => {
            print_assessments(&report.per_mediator, format)?;
            print_batch_summary(&report);
        }
    }
    Ok(())
}
