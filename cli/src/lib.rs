use anyhow::{Error, Result};
use clap::{CommandFactory, Parser};
use log::{info, warn};
use rdf2json::{CancellationToken, Config, Converter, UsageError};
use std::ffi::OsString;
use std::path::PathBuf;

const NOTES: &str = "Notes:
  Sorting on Mac OS X & Linux:
    sort -k 1,1 UNSORTED.EXT > SORTED.EXT

  More information on the --minimize parameter:
    https://github.com/joejimbo/rdf2json";

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    /// Arguments could not be parsed, or any other fatal error.
    pub const FAILURE: i32 = 1;
    pub const MISSING_REQUIRED: i32 = 2;
    pub const CONFLICTING_FORMATS: i32 = 3;
    pub const UNDETERMINED_FORMAT: i32 = 4;
    pub const INPUT_NOT_FOUND: i32 = 6;
}

#[derive(Debug, Parser)]
#[command(name = "rdf2json", version)]
#[command(override_usage = "rdf2json [OPTIONS] --input <FILE> --output <FILE>")]
#[command(
    about = "Reads RDF N-Triples/N-Quads that are sorted by subject and appends a JSON/JSON-LD document per line in a designated output file."
)]
#[command(after_help = NOTES)]
struct Cli {
    /// Input file for the conversion; either RDF N-Triples or N-Quads.
    #[clap(long, short, value_name = "FILE")]
    input: Option<PathBuf>,
    /// Output file to which JSON-LD/JSON is appended.
    #[clap(long, short, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Minimize JSON-LD to plain (semantically untyped) JSON.
    #[clap(long, short, action, default_value = "false")]
    minimize: bool,
    /// Alternative name for JSON-LD's "@id" key; replaces it; turns on --minimize
    #[clap(long, short, num_args = 0..=1, value_name = "NAMESPACE")]
    namespace: Option<Option<String>>,
    /// Prefix that should be removed from keys; requires --minimize.
    #[clap(long, short, num_args = 0..=1, value_name = "PREFIX")]
    prefix: Option<Option<String>>,
    /// Input file is in RDF N-Triples format.
    #[clap(long, short, action, default_value = "false")]
    triples: bool,
    /// Input file is in RDF N-Quads format.
    #[clap(long, short, action, default_value = "false")]
    quads: bool,
    /// Do not print the conversion statistics at the end of the run.
    #[clap(long, short, action, default_value = "false")]
    silent: bool,
    /// Verbose mode - sets the RUST_LOG level to info, defaults to warning level
    #[clap(long, short, action, default_value = "false")]
    verbose: bool,
    /// Debug mode - sets the RUST_LOG level to debug, defaults to warning level
    #[clap(long, action, default_value = "false")]
    debug: bool,
}

pub fn run() -> Result<()> {
    rdf2json::init_logging();
    let cmd = Cli::try_parse().map_err(Error::from)?;
    execute(cmd)
}

pub fn run_from_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    rdf2json::init_logging();
    let cmd = Cli::try_parse_from(args).map_err(Error::from)?;
    execute(cmd)
}

/// Prints `err` the way the command line reports it and returns the process exit code.
pub fn report(err: &Error) -> i32 {
    if let Some(clap_err) = err.downcast_ref::<clap::Error>() {
        // clap renders help, version and usage errors itself
        let _ = clap_err.print();
        return if clap_err.use_stderr() {
            exit_code::FAILURE
        } else {
            exit_code::SUCCESS
        };
    }
    match err.downcast_ref::<UsageError>() {
        Some(usage) => {
            eprintln!("Error: {}", usage);
            eprintln!();
            eprintln!("{}", Cli::command().render_help());
            usage_exit_code(usage)
        }
        None => {
            eprintln!("Error: {:#}", err);
            exit_code::FAILURE
        }
    }
}

fn usage_exit_code(err: &UsageError) -> i32 {
    match err {
        UsageError::MissingRequired => exit_code::MISSING_REQUIRED,
        UsageError::ConflictingFormats => exit_code::CONFLICTING_FORMATS,
        UsageError::UndeterminedFormat { .. } => exit_code::UNDETERMINED_FORMAT,
        UsageError::InputNotFound { .. } => exit_code::INPUT_NOT_FOUND,
    }
}

fn execute(cmd: Cli) -> Result<()> {
    // The RUST_LOG env var is set by `init_logging` if RDF2JSON_LOG is present.
    // CLI flags for verbosity take precedence. If nothing is set, we default to "warn".
    if cmd.debug {
        std::env::set_var("RUST_LOG", "debug");
    } else if cmd.verbose {
        std::env::set_var("RUST_LOG", "info");
    } else if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "warn");
    }
    let _ = env_logger::try_init();

    let mut builder = Config::builder()
        .triples(cmd.triples)
        .quads(cmd.quads)
        .minimize(cmd.minimize)
        .silent(cmd.silent)
        .require_input_exists(true);
    if let Some(input) = cmd.input {
        builder = builder.input(input);
    }
    if let Some(output) = cmd.output {
        builder = builder.output(output);
    }
    // a bare --namespace still turns on --minimize
    if let Some(namespace) = cmd.namespace {
        builder = builder.minimize(true);
        if let Some(namespace) = namespace {
            builder = builder.namespace(namespace);
        }
    }
    if let Some(Some(prefix)) = cmd.prefix {
        builder = builder.prefix(prefix);
    }

    let config: Config = builder.build()?;

    if cmd.verbose || cmd.debug {
        config.print();
    }
    if config.prefix.is_some() && !config.output_format.is_minimized() {
        warn!("--prefix has no effect without --minimize");
    }

    let cancellation = CancellationToken::new();
    let handler_token = cancellation.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        warn!("Failed to install the Ctrl-C handler: {}", e);
    }

    let (outcome, _) = Converter::from_config(&config)?
        .with_cancellation(cancellation)
        .convert()?;
    if outcome.is_cancelled() {
        // the user hit Ctrl-C, which is okay and does not need error reporting
        info!(
            "Interrupted after {} documents",
            outcome.stats().documents
        );
    }
    Ok(())
}
