//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing (`mod.rs`)
//! - Its execution logic and result type (`execute.rs`)
//! - Table formatting of the result (`output.rs`)
//! - CLI parsing tests (`cli_tests.rs`)

mod create_index;
mod schema_doc;

pub use create_index::{submit_indexes, CollectionIndexOutcome, CreateIndexCmd, CreateIndexResult};
pub use schema_doc::{SchemaDocCmd, SchemaDocResult};

use clap::Subcommand;
use std::error::Error;

use crate::config::ConfigFile;
use crate::output::Outputable;

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, config: &ConfigFile) -> Result<Self::Output, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate schema documentation for every registered collection
    SchemaDoc(SchemaDocCmd),

    /// Create the declared indexes of every indexable collection
    CreateIndex(CreateIndexCmd),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(self, config: &ConfigFile) -> Result<String, Box<dyn Error>> {
        match self {
            Command::SchemaDoc(cmd) => {
                let result = cmd.execute(config)?;
                // Keep stdout clean when it carries the document itself.
                if result.output_path.is_none() {
                    eprintln!("{}", result.summary);
                }
                Ok(result.to_table())
            }
            Command::CreateIndex(cmd) => {
                let format = cmd.format;
                let result = cmd.execute(config)?;
                Ok(result.format(format))
            }
        }
    }
}
