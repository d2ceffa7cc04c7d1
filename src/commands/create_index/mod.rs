mod cli_tests;
mod execute;
mod output;

pub use execute::{submit_indexes, CollectionIndexOutcome, CreateIndexResult};

use clap::Args;

use crate::output::OutputFormat;

/// Create the declared indexes of every indexable collection
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  doc_schema create-index -c ./catalog.sqlite -d itembank          # Local index catalog
  doc_schema create-index -c :memory: -d itembank --format json    # Dry run, JSON report
  doc_schema create-index -c sqlite:///var/lib/catalog.db -d app   # Explicit sqlite URL")]
pub struct CreateIndexCmd {
    /// Store connection string (`:memory:`, `sqlite://<path>` or a file path)
    #[arg(short, long)]
    pub connection: String,

    /// Database name the indexes belong to
    #[arg(short, long)]
    pub database: String,

    /// Output format for the report
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}
