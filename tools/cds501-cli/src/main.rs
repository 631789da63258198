mod commands;
mod format;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{
    anomalies::AnomaliesArgs, rejects::RejectsArgs, schema::SchemaArgs, summary::SummaryArgs,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cds501", about = "Inspect CDS501 crash-data extracts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count crashes, vehicles, participants, rejects and anomalies per file
    Summary(SummaryArgs),
    /// List lines that could not be decoded or linked
    Rejects(RejectsArgs),
    /// List referential and count inconsistencies
    Anomalies(AnomaliesArgs),
    /// Print the field layout of a record kind
    Schema(SchemaArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary(args) => args.run(),
        Commands::Rejects(args) => args.run(),
        Commands::Anomalies(args) => args.run(),
        Commands::Schema(args) => args.run(),
    }
}
