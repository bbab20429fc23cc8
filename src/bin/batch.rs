//! Batch battle solver CLI.
//!
//! Reads scenarios as JSON lines and writes one JSON report per scenario.
//!
//! Usage:
//!   cargo run --release --bin batch -- [OPTIONS]
//!
//! Options:
//!   --input FILE        Input file path (default: stdin)
//!   --output FILE       Output file path (default: stdout)
//!   --threads N         Number of parallel threads (default: 4)
//!   --neutral-unknown   Treat unknown unit types as neutral instead of rejecting
//!   --quiet             Suppress summary output

use std::env;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::process::ExitCode;
use std::time::Instant;

use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use platoon::batch::{self, BatchConfig, BatchError, BatchSummary};
use platoon::protocol::roster::UnknownTypePolicy;

struct Args {
    config: BatchConfig,
    input: Option<String>,
    output: Option<String>,
    quiet: bool,
}

fn parse_args() -> Result<Option<Args>, String> {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args {
        config: BatchConfig::default(),
        input: None,
        output: None,
        quiet: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                parsed.input = Some(value(&args, i, "--input")?.to_string());
            }
            "--output" => {
                i += 1;
                parsed.output = Some(value(&args, i, "--output")?.to_string());
            }
            "--threads" => {
                i += 1;
                let raw = value(&args, i, "--threads")?;
                parsed.config.threads = raw
                    .parse()
                    .map_err(|_| format!("invalid --threads value: '{}'", raw))?;
            }
            "--neutral-unknown" => {
                parsed.config.unknown_types = UnknownTypePolicy::Neutral;
            }
            "--quiet" => {
                parsed.quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
        i += 1;
    }

    Ok(Some(parsed))
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("missing value for {}", flag))
}

fn run(args: &Args) -> Result<BatchSummary, BatchError> {
    let lines = match &args.input {
        Some(path) => batch::read_lines(BufReader::new(File::open(path)?))?,
        None => batch::read_lines(io::stdin().lock())?,
    };

    if !args.quiet {
        info!(
            scenarios = lines.len(),
            threads = args.config.threads,
            unknown_types = args.config.unknown_types.name(),
            "batch starting"
        );
    }

    let start = Instant::now();
    let records = batch::run_batch(&args.config, &lines)?;
    let summary = BatchSummary::from_records(&records);

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            batch::write_jsonl(&records, &mut writer)?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            batch::write_jsonl(&records, &mut writer)?;
        }
    }

    if !args.quiet {
        info!(
            wins = summary.wins,
            no_solution = summary.no_solution,
            invalid = summary.invalid,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "batch finished"
        );
    }
    Ok(summary)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => return ExitCode::SUCCESS,
        Err(msg) => {
            error!("{}", msg);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    eprintln!("Usage: batch [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --input FILE        Input file path (default: stdin)");
    eprintln!("  --output FILE       Output file path (default: stdout)");
    eprintln!("  --threads N         Number of parallel threads (default: 4)");
    eprintln!("  --neutral-unknown   Treat unknown unit types as neutral");
    eprintln!("  --quiet             Suppress summary output");
    eprintln!("  --help              Show this help");
}
