//! The `swot` subcommand: rule-based SWOT analyses.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Args;
use fairmediator_lib::{
    compare_swot, detect, generate, swot_to_json, swot_to_markdown, CachedStore, MediatorStore,
    SqliteStore, SwotResult,
};

use crate::output::{print_json, OutputFormat};

/// Arguments for the `swot` subcommand.
///
/// With `--party` flags, each mediator is first screened against the
/// parties and the findings feed the analysis (a clean screen becomes a
/// strength, conflicts become a threat). Multiple ids are ranked by
/// assessment score.
#[derive(Args)]
pub struct SwotArgs {
    /// SQLite database path
    #[arg(long, default_value = "fairmediator.db")]
    pub db: PathBuf,

    /// Mediator id to analyze; repeatable
    #[arg(long = "id", required = true)]
    pub ids: Vec<String>,

    /// Case party to screen against; repeatable, accepts `role:name`
    #[arg(long = "party")]
    pub parties: Vec<String>,

    /// Case-history staleness window in years
    #[arg(long, default_value_t = super::STALENESS_DEFAULT)]
    pub staleness_years: i32,

    /// Pin the reference date (YYYY-MM-DD) for reproducible output
    #[arg(long)]
    pub as_of: Option<String>,
}

pub fn run(args: &SwotArgs, format: &OutputFormat) -> Result<()> {
    let ids = super::parse_ids(&args.ids)?;
    let parties = super::parse_parties(&args.parties)?;
    let cfg = super::detect_config(args.staleness_years, args.as_of.as_deref())?;

    let store = SqliteStore::open(&args.db)?;
    store.init()?;
    let store = CachedStore::new(store, Duration::from_secs(300));

    let results: Vec<SwotResult> = if parties.is_empty() {
        compare_swot(&store, &ids)?
    } else {
        let mediators = store.fetch_mediators_by_ids(&ids)?;
        let mut results: Vec<SwotResult> = mediators
            .iter()
            .map(|m| {
                let detection = detect(m, &parties, &cfg);
                generate(m, Some(&detection.findings))
            })
            .collect();
        results.sort_by(|a, b| {
            b.assessment
                .score
                .cmp(&a.assessment.score)
                .then_with(|| a.mediator_name.cmp(&b.mediator_name))
        });
        results
    };

    if results.is_empty() {
        bail!("none of the requested mediators were found");
    }
    for id in &ids {
        if !results.iter().any(|r| &r.mediator_id == id) {
            eprintln!("Not found: {}", id);
        }
    }

    match format {
        OutputFormat::Json => {
            if let [single] = results.as_slice() {
                println!("{}", swot_to_json(single)?);
            } else {
                print_json(&results);
            }
        }
        _ => {
            for (idx, result) in results.iter().enumerate() {
                if idx > 0 {
                    println!("\n---\n");
                }
                print!("{}", swot_to_markdown(result));
            }
        }
    }
    Ok(())
}
