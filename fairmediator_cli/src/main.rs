mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "fairmediator")]
#[command(about = "Conflict screening, risk scoring, and match ranking for mediators")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import mediator JSON documents into the local database
    Import(commands::import::ImportArgs),
    /// Run a conflict check for a single mediator
    Check(commands::check::CheckArgs),
    /// Run a batch conflict check across multiple mediators
    Batch(commands::batch::BatchArgs),
    /// Rank stored mediators against search criteria
    Rank(commands::rank::RankArgs),
    /// Compare an explicit list of mediators side by side
    Compare(commands::compare::CompareArgs),
    /// Generate SWOT analyses for one or more mediators
    Swot(commands::swot::SwotArgs),
    /// Assess every stored mediator and write the results to a file
    ExportAssessments(commands::export_assessments::ExportAssessmentsArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fairmediator=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);

    match &cli.command {
        Commands::Import(args) => commands::import::run(args)?,
        Commands::Check(args) => commands::check::run(args, &format)?,
        Commands::Batch(args) => commands::batch::run(args, &format)?,
        Commands::Rank(args) => commands::rank::run(args, &format)?,
        Commands::Compare(args) => commands::compare::run(args, &format)?,
        Commands::Swot(args) => commands::swot::run(args, &format)?,
        Commands::ExportAssessments(args) => commands::export_assessments::run(args)?,
    }

    Ok(())
}
