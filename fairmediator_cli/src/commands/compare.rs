//! The `compare` subcommand: side-by-side scores for an explicit id list.
//!
//! Unlike `rank`, high-risk mediators are always included here so a
//! reviewer can see exactly why each candidate lands where it does.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use fairmediator_lib::{compare_mediators, CachedStore, MatchCriteria, RankWeights, SqliteStore};

use crate::output::{build_rank_rows, print_csv, print_json, print_markdown, print_table, OutputFormat};

/// Arguments for the `compare` subcommand.
#[derive(Args)]
pub struct CompareArgs {
    /// SQLite database path
    #[arg(long, default_value = "fairmediator.db")]
    pub db: PathBuf,

    /// Mediator id to compare; repeatable
    #[arg(long = "id", required = true)]
    pub ids: Vec<String>,

    /// Required specialization; repeatable
    #[arg(long = "spec")]
    pub specializations: Vec<String>,

    /// Case party to screen against; repeatable, accepts `role:name`
    #[arg(long = "party")]
    pub parties: Vec<String>,

    /// Target ideology score (-10 to +10)
    #[arg(long)]
    pub ideology: Option<f64>,

    /// Case-history staleness window in years
    #[arg(long, default_value_t = super::STALENESS_DEFAULT)]
    pub staleness_years: i32,

    /// Pin the reference date (YYYY-MM-DD) for reproducible output
    #[arg(long)]
    pub as_of: Option<String>,
}

pub fn run(args: &CompareArgs, format: &OutputFormat) -> Result<()> {
    let ids = super::parse_ids(&args.ids)?;
    let criteria = MatchCriteria {
        required_specializations: args.specializations.clone(),
        parties: super::parse_parties(&args.parties)?,
        ideology_preference: args.ideology,
    };
    let cfg = super::detect_config(args.staleness_years, args.as_of.as_deref())?;

    let store = SqliteStore::open(&args.db)?;
    store.init()?;
    let store = CachedStore::new(store, Duration::from_secs(300));

    let result = compare_mediators(&store, &ids, &criteria, &RankWeights::default(), &cfg)?;

    match format {
        OutputFormat::Json => print_json(&result),
        OutputFormat::Csv => print_csv(build_rank_rows(&result.scores))?,
        OutputFormat::Markdown => print_markdown(build_rank_rows(&result.scores)),
        OutputFormat::Table => print_table(build_rank_rows(&result.scores)),
    }
    if !result.not_found.is_empty() {
        eprintln!("Not found: {}", result.not_found.join(", "));
    }
    Ok(())
}
