//! CLI definitions and entry point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};

use crate::commands;
use reconciler::ReconcileError;
use reconciler::core::services::Comparator;
use reconciler::output::Status;

/// Environment variable read when `-v` is not given
const VERBOSITY_ENV: &str = "RECONCILER_VERBOSITY";

/// Exit code for differences reported by the `fail` writer
const EXIT_DIFFERENCES: u8 = 1;

/// Exit code for every other failure
const EXIT_ERROR: u8 = 2;

/// reconciler - Compare two datasets record by record
#[derive(Parser, Debug)]
#[command(
    name = "reconciler",
    version,
    about = "Compare two datasets record by record",
    long_about = "Match records of two CSV files by key and report what differs.\n\n\
                  Every key is classified as identical, different, only in the source,\n\
                  only in the target, or duplicated. The report is rendered by a writer:\n\
                  pretty (default), csv, json, fail or noop."
)]
pub struct Cli {
    /// Source dataset (CSV file)
    #[arg(required_unless_present = "list_writers")]
    pub source: Option<PathBuf>,

    /// Target dataset (CSV file)
    #[arg(required_unless_present = "list_writers")]
    pub target: Option<PathBuf>,

    /// Writer used to render the report
    #[arg(short, long)]
    pub writer: Option<String>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Reconciler to run
    #[arg(short, long)]
    pub reconciler: Option<String>,

    /// Key field (repeat for a composite key; default: first column)
    #[arg(short, long = "key", value_name = "FIELD")]
    pub keys: Vec<String>,

    /// Comparator for one field: exact, strict, case-insensitive, numeric[:tolerance]
    #[arg(long = "compare", value_name = "FIELD=COMPARATOR", value_parser = parse_compare)]
    pub comparators: Vec<(String, Comparator)>,

    /// Leave a field out of the comparison (repeatable)
    #[arg(long = "ignore", value_name = "FIELD")]
    pub ignore: Vec<String>,

    /// Fail when a key appears more than once instead of reporting it
    #[arg(long)]
    pub strict_duplicates: bool,

    /// Skip malformed rows instead of failing
    #[arg(long)]
    pub skip_malformed: bool,

    /// CSV field delimiter
    #[arg(long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Worker threads used for field comparison
    #[arg(long, value_name = "N")]
    pub parallelism: Option<usize>,

    /// Configuration file
    #[arg(short, long, env = "RECONCILER_CONFIG")]
    pub config: Option<PathBuf>,

    /// List available writers and exit
    #[arg(long)]
    pub list_writers: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v info and error causes, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Verbosity from flags, falling back to the environment
    #[must_use]
    pub fn verbosity(&self) -> u8 {
        if self.verbose > 0 {
            return self.verbose;
        }
        std::env::var(VERBOSITY_ENV)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }
}

fn parse_compare(s: &str) -> Result<(String, Comparator), String> {
    let (field, comparator) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid comparison: {s}. Use: FIELD=COMPARATOR"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("Invalid comparison: {s}. Field name is empty"));
    }
    Ok((field.to_string(), comparator.parse()?))
}

fn init_logging(quiet: bool, verbosity: u8) {
    let level = match (quiet, verbosity) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Run the CLI and map the outcome to an exit code
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let verbosity = cli.verbosity();
    let status = Status::new(cli.quiet, verbosity);
    init_logging(status.is_quiet(), verbosity);

    let result = if cli.list_writers {
        commands::list_writers()
    } else {
        commands::reconcile(&cli, &status)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            status.error(err.as_ref());
            let differences = err
                .downcast_ref::<ReconcileError>()
                .is_some_and(ReconcileError::is_reconciliation_failure);
            ExitCode::from(if differences { EXIT_DIFFERENCES } else { EXIT_ERROR })
        },
    }
}
