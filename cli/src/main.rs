//! carekit command-line tool.
//!
//! Usage:
//!   carekit hash request.json
//!   carekit merge --base fetched.json --priority drafts.json
//!   carekit retry --retries 5 -- curl -fsS https://example.invalid/health
//!
//! Log output goes to stderr; results go to stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use carekit_cli::{hash_document, merge_documents, read_input, retry_command, retry_options};
use carekit_retry::CancellationToken;
use clap::{Parser, Subcommand};
use tracing::{error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "carekit")]
#[command(about = "Fingerprint, merge and retry utilities for the care-facility front-end")]
struct Args {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the fingerprint of a JSON document
    Hash {
        /// JSON file to read ("-" or omitted for stdin)
        file: Option<PathBuf>,

        /// Treat null object members as absent
        #[arg(long)]
        omit_nulls: bool,

        /// Print the canonical text instead of the digest
        #[arg(long)]
        canonical: bool,
    },

    /// Merge two JSON record arrays, priority records winning per id
    Merge {
        /// Records fetched from the store
        #[arg(long)]
        base: PathBuf,

        /// Locally drafted records
        #[arg(long)]
        priority: PathBuf,

        /// Field holding each record's id
        #[arg(long, default_value = "id")]
        id_field: String,
    },

    /// Run a command until it succeeds, backing off between attempts
    Retry {
        /// Retries after the first attempt
        #[arg(short, long, default_value = "3")]
        retries: u32,

        /// Wait before the first retry, doubled for each further retry
        #[arg(long, default_value = "400")]
        base_delay_ms: u64,

        /// Upper bound for a single wait
        #[arg(long)]
        max_delay_ms: Option<u64>,

        /// Program and arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Hash {
            file,
            omit_nulls,
            canonical,
        } => {
            let text = read_input(file.as_deref())?;
            println!("{}", hash_document(&text, omit_nulls, canonical)?);
            Ok(ExitCode::SUCCESS)
        }

        Command::Merge {
            base,
            priority,
            id_field,
        } => {
            let base = read_input(Some(base.as_path()))?;
            let priority = read_input(Some(priority.as_path()))?;
            println!("{}", merge_documents(&base, &priority, &id_field)?);
            Ok(ExitCode::SUCCESS)
        }

        Command::Retry {
            retries,
            base_delay_ms,
            max_delay_ms,
            command,
        } => {
            let Some((program, rest)) = command.split_first() else {
                anyhow::bail!("no command given");
            };
            let options = retry_options(retries, base_delay_ms, max_delay_ms, program.as_str());
            let token = CancellationToken::new();

            let watcher = token.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("interrupt received, cancelling");
                    watcher.cancel();
                }
            });

            match retry_command(program, rest, options, &token).await {
                Ok(outcome) => {
                    info!("{}: {}", program, outcome);
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    error!("{}: {}", program, e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
