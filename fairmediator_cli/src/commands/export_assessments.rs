//! The `export-assessments` subcommand: sweep every stored mediator and
//! persist the assessment list, e.g. for training-data pipelines.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use fairmediator_lib::{assess, detect, MediatorStore, Party, RiskAssessment, SqliteStore};
use serde::Serialize;

/// Arguments for the `export-assessments` subcommand.
#[derive(Args)]
pub struct ExportAssessmentsArgs {
    /// SQLite database path
    #[arg(long, default_value = "fairmediator.db")]
    pub db: PathBuf,

    /// Case party to screen against; repeatable, accepts `role:name`
    #[arg(long = "party", required = true)]
    pub parties: Vec<String>,

    /// Output JSON file
    #[arg(long)]
    pub out: PathBuf,

    /// Case-history staleness window in years
    #[arg(long, default_value_t = super::STALENESS_DEFAULT)]
    pub staleness_years: i32,

    /// Pin the reference date (YYYY-MM-DD) for reproducible output
    #[arg(long)]
    pub as_of: Option<String>,
}

/// File envelope for an assessment sweep.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SweepExport {
    generated_at: String,
    parties: Vec<Party>,
    assessments: Vec<RiskAssessment>,
}

pub fn run(args: &ExportAssessmentsArgs) -> Result<()> {
    let parties = super::parse_parties(&args.parties)?;
    let cfg = super::detect_config(args.staleness_years, args.as_of.as_deref())?;

    let store = SqliteStore::open(&args.db)?;
    store.init()?;

    let mediators = store.fetch_candidates()?;
    let assessments: Vec<RiskAssessment> = mediators
        .iter()
        .map(|m| assess(&m.id, detect(m, &parties, &cfg)))
        .collect();
    let with_conflicts = assessments.iter().filter(|a| a.has_conflicts).count();

    let export = SweepExport {
        generated_at: Utc::now().to_rfc3339(),
        parties,
        assessments,
    };
    let json = serde_json::to_string_pretty(&export)?;
    std::fs::write(&args.out, json)
        .with_context(|| format!("writing {}", args.out.display()))?;

    println!(
        "Assessed {} mediator(s) ({} with conflicts); wrote {}",
        export.assessments.len(),
        with_conflicts,
        args.out.display()
    );
    Ok(())
}
