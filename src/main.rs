use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use doc_schema::cli::Args;
use doc_schema::config::ConfigFile;

fn init_tracing(directive: Option<&str>) {
    let filter = match directive {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<String, Box<dyn std::error::Error>> {
    let config = ConfigFile::load(&args.config)?;
    args.command.run(&config)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref());

    match run(args) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output.trim_end_matches('\n'));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
