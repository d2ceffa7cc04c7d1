mod cli_tests;
mod execute;
mod output;

pub use execute::SchemaDocResult;

use clap::Args;
use std::path::PathBuf;

/// Generate schema documentation for every registered collection
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  doc_schema schema-doc                        # YAML to stdout
  doc_schema schema-doc -f md -o SCHEMA.md     # Markdown to a file
  doc_schema schema-doc -f yml -o schema.yaml  # YAML to a file")]
pub struct SchemaDocCmd {
    /// Output format: yaml, yml, md or markdown (default: config `default_format`, else yaml)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
