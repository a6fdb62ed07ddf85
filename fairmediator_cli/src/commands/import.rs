//! The `import` subcommand: load mediator JSON documents into SQLite.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fairmediator_lib::{validation, Mediator, SqliteStore};

/// Arguments for the `import` subcommand.
///
/// The input file is a JSON array of mediator documents in the platform's
/// camelCase shape. Documents with invalid ids are skipped, not fatal:
/// an import run should load everything it can.
#[derive(Args)]
pub struct ImportArgs {
    /// SQLite database path
    #[arg(long, default_value = "fairmediator.db")]
    pub db: PathBuf,

    /// JSON file containing an array of mediator documents
    #[arg(long)]
    pub file: PathBuf,
}

pub fn run(args: &ImportArgs) -> Result<()> {
    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let mediators: Vec<Mediator> =
        serde_json::from_str(&content).with_context(|| "parsing mediator documents")?;

    let store = SqliteStore::open(&args.db)?;
    store.init()?;

    let mut imported = 0usize;
    let mut skipped = 0usize;
    for mediator in &mediators {
        if let Err(e) = validation::validate_mediator_id(&mediator.id) {
            eprintln!("Skipping document with bad id {:?}: {}", mediator.id, e);
            skipped += 1;
            continue;
        }
        store.upsert_mediator(mediator)?;
        imported += 1;
    }

    println!(
        "Imported {} mediator(s) into {} ({} skipped, {} total in store)",
        imported,
        args.db.display(),
        skipped,
        store.mediator_count()?
    );
    Ok(())
}
