//! Interrupt trace interpreter CLI.
//!
//! This binary wires the file-based providers to the engine. It performs:
//! 1. **Loading:** Reads the optional JSON configuration, the vector table, and the device table.
//! 2. **Replay:** Streams the trace file through the engine record by record.
//! 3. **Output:** Writes the finished execution log once, to a file or stdout.
//!
//! Any error is fatal: a diagnostic goes to stderr, no log is written, and the exit code is 1.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use isrsim_core::common::constants::DEFAULT_OUTPUT;
use isrsim_core::sim::{FileSink, LogSink, TraceReader, VectorTable, WriterSink};
use isrsim_core::{Config, Engine, Result, SimError};

#[derive(Parser, Debug)]
#[command(
    name = "isrsim",
    author,
    version,
    about = "Deterministic interrupt-handling trace interpreter",
    long_about = "Replay a trace of CPU bursts, SYSCALLs, and END_IO completions against a fixed\n\
                  kernel cost model and write a timestamped execution log.\n\n\
                  Examples:\n  isrsim trace.txt\n  isrsim trace.txt --vectors vector_table.txt --devices device_table.txt\n  isrsim trace.txt --config costs.json --stdout --stats"
)]
struct Cli {
    /// Trace file, one `ACTIVITY, ARG` record per line.
    trace: PathBuf,

    /// Vector table file, one ISR address per line.
    #[arg(long, default_value = "vector_table.txt")]
    vectors: PathBuf,

    /// Device table file, one delay (ms) per line.
    #[arg(long, default_value = "device_table.txt")]
    devices: PathBuf,

    /// Output file for the execution log.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// JSON configuration overriding the cost model and vector layout.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the execution log to stdout instead of the output file.
    #[arg(long)]
    stdout: bool,

    /// Print run statistics after the log is written (to stderr when combined with --stdout).
    #[arg(long)]
    stats: bool,

    /// Increase diagnostic verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = cmd_run(&cli) {
        eprintln!("{}", fatal_message(&e));
        process::exit(1);
    }
}

/// Installs a stderr subscriber; `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn fatal_message(e: &SimError) -> String {
    format!("\n[!] FATAL: {e}")
}

/// Loads inputs, replays the trace, and writes the log.
fn cmd_run(cli: &Cli) -> Result<()> {
    run_with(cli, &mut io::stdout().lock(), &mut io::stderr().lock())
}

/// Runs one simulation with explicit console streams.
///
/// The log goes to `out` with `--stdout`, otherwise to the output file. The statistics
/// report goes to `out`, or to `err` when `out` carries the log.
fn run_with<O: Write, E: Write>(cli: &Cli, out: &mut O, err: &mut E) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    tracing::info!(?config, "configuration");

    let vectors = VectorTable::load(&cli.vectors, &cli.devices)?;
    let reader = TraceReader::open(&cli.trace)?;

    let mut engine = Engine::new(&config, &vectors);
    engine.run_trace(reader)?;
    let (log, stats) = engine.into_parts();

    if cli.stdout {
        WriterSink::new(&mut *out).write_log(&log)?;
    } else {
        FileSink::new(&cli.output).write_log(&log)?;
    }

    if cli.stats {
        let report = stats.report();
        if cli.stdout {
            err.write_all(report.as_bytes())
                .map_err(|e| SimError::io("<stderr>", e))?;
        } else {
            out.write_all(report.as_bytes())
                .map_err(|e| SimError::io("<stdout>", e))?;
        }
    }
    Ok(())
}
