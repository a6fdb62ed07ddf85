pub mod batch;
pub mod check;
pub mod compare;
pub mod export_assessments;
pub mod import;
pub mod rank;
pub mod swot;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use fairmediator_lib::conflict::DEFAULT_STALENESS_YEARS;
use fairmediator_lib::{validation, DetectConfig, Party};

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| anyhow!("invalid date '{}': {} (expected YYYY-MM-DD)", input, e))
}

/// Build a detection config from the shared `--staleness-years` and
/// `--as-of` flags. `--as-of` pins the reference date for reproducible
/// runs; without it the config uses today.
pub fn detect_config(staleness_years: i32, as_of: Option<&str>) -> Result<DetectConfig> {
    let mut cfg = match as_of {
        Some(date) => DetectConfig::with_reference_date(parse_date(date)?),
        None => DetectConfig::default(),
    };
    cfg.staleness_years = staleness_years;
    Ok(cfg)
}

/// Validate and parse `--party` values, accepting optional `role:name`
/// tagging (e.g. `plaintiff:Acme Corp`).
pub fn parse_parties(raw: &[String]) -> Result<Vec<Party>> {
    raw.iter()
        .map(|p| validation::parse_party(p).map_err(|e| anyhow!("{}", e)))
        .collect()
}

/// Validate `--id` values.
pub fn parse_ids(raw: &[String]) -> Result<Vec<String>> {
    raw.iter()
        .map(|id| validation::validate_mediator_id(id).map_err(|e| anyhow!("{}", e)))
        .collect()
}

/// Re-export of the default staleness window for clap default values.
pub const STALENESS_DEFAULT: i32 = DEFAULT_STALENESS_YEARS;
