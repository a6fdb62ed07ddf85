//! The `check` subcommand: conflict check for a single mediator.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Args;
use fairmediator_lib::{check_batch, CachedStore, SqliteStore};

use crate::output::{
    build_finding_rows, print_assessments, print_csv, print_json, print_markdown, print_table,
    OutputFormat,
};

/// Arguments for the `check` subcommand.
#[derive(Args)]
pub struct CheckArgs {
    /// SQLite database path
    #[arg(long, default_value = "fairmediator.db")]
    pub db: PathBuf,

    /// Mediator id to check
    #[arg(long)]
    pub id: String,

    /// Case party to screen against; repeatable, accepts `role:name`
    #[arg(long = "party", required = true)]
    pub parties: Vec<String>,

    /// Case-history staleness window in years
    #[arg(long, default_value_t = super::STALENESS_DEFAULT)]
    pub staleness_years: i32,

    /// Pin the reference date (YYYY-MM-DD) for reproducible output
    #[arg(long)]
    pub as_of: Option<String>,
}

pub fn run(args: &CheckArgs, format: &OutputFormat) -> Result<()> {
    let ids = super::parse_ids(std::slice::from_ref(&args.id))?;
    let parties = super::parse_parties(&args.parties)?;
    let cfg = super::detect_config(args.staleness_years, args.as_of.as_deref())?;

    let store = SqliteStore::open(&args.db)?;
    store.init()?;
    let store = CachedStore::new(store, Duration::from_secs(300));

    let report = check_batch(&store, &ids, &parties, &cfg)?;
    let Some(assessment) = report.per_mediator.first() else {
        bail!("mediator '{}' not found", args.id);
    };

    match format {
        OutputFormat::Json => print_json(assessment),
        OutputFormat::Csv => print_csv(build_finding_rows(assessment))?,
        OutputFormat::Markdown => {
            print_assessments(std::slice::from_ref(assessment), format)?;
            if assessment.has_conflicts {
                println!();
                print_markdown(build_finding_rows(assessment));
            }
        }
        OutputFormat::Table => {
            print_assessments(std::slice::from_ref(assessment), format)?;
            if assessment.has_conflicts {
                println!();
                print_table(build_finding_rows(assessment));
            }
        }
    }

    if assessment.diagnostics.skipped_parties > 0 || assessment.diagnostics.skipped_records > 0 {
        eprintln!(
            "Note: skipped {} blank party value(s) and {} malformed record(s)",
            assessment.diagnostics.skipped_parties, assessment.diagnostics.skipped_records
        );
    }
    Ok(())
}
