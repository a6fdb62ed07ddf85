//! The `rank` subcommand: rank stored mediators against search criteria.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use fairmediator_lib::{
    find_matching_mediators, validation, MatchCriteria, MatchOptions, RankWeights, SqliteStore,
};

use crate::output::{build_rank_rows, print_csv, print_json, print_markdown, print_table, OutputFormat};

/// Arguments for the `rank` subcommand.
#[derive(Args)]
pub struct RankArgs {
    /// SQLite database path
    #[arg(long, default_value = "fairmediator.db")]
    pub db: PathBuf,

    /// Required specialization; repeatable
    #[arg(long = "spec")]
    pub specializations: Vec<String>,

    /// Case party to screen against; repeatable, accepts `role:name`
    #[arg(long = "party")]
    pub parties: Vec<String>,

    /// Target ideology score (-10 to +10)
    #[arg(long)]
    pub ideology: Option<f64>,

    /// Include mediators whose risk band is high
    #[arg(long)]
    pub include_high_risk: bool,

    /// Number of results to show
    #[arg(long, default_value = "25")]
    pub top: usize,

    /// TOML file overriding the default component weights
    #[arg(long)]
    pub weights: Option<PathBuf>,

    /// Case-history staleness window in years
    #[arg(long, default_value_t = super::STALENESS_DEFAULT)]
    pub staleness_years: i32,

    /// Pin the reference date (YYYY-MM-DD) for reproducible output
    #[arg(long)]
    pub as_of: Option<String>,
}

pub fn run(args: &RankArgs, format: &OutputFormat) -> Result<()> {
    if let Some(target) = args.ideology {
        if !(-10.0..=10.0).contains(&target) {
            bail!(
                "Invalid --ideology value: '{}'. Must be between -10 and 10",
                target
            );
        }
    }

    let weights = match &args.weights {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            RankWeights::from_toml_str(&content)?
        }
        None => RankWeights::default(),
    };
    validation::validate_weights(&weights)?;

    let criteria = MatchCriteria {
        required_specializations: args.specializations.clone(),
        parties: super::parse_parties(&args.parties)?,
        ideology_preference: args.ideology,
    };
    let options = MatchOptions {
        include_high_risk: args.include_high_risk,
        top_k: Some(args.top),
    };
    let cfg = super::detect_config(args.staleness_years, args.as_of.as_deref())?;

    let store = SqliteStore::open(&args.db)?;
    store.init()?;

    let results = find_matching_mediators(&store, &criteria, &weights, &options, &cfg)?;
    if results.is_empty() {
        println!("No matching mediators.");
        return Ok(());
    }

    let rows = build_rank_rows(&results);
    match format {
        OutputFormat::Json => print_json(&results),
        OutputFormat::Csv => print_csv(rows)?,
        OutputFormat::Markdown => print_markdown(rows),
        OutputFormat::Table => print_table(rows),
    }
    Ok(())
}
