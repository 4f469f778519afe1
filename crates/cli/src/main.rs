//! Fork/exec simulator CLI.
//!
//! This binary drives one simulation run. It performs:
//! 1. **Loading:** Reads the trace, vector table, device table, and external program catalog.
//! 2. **Bootstrap:** Places the bootstrap process in the partition table.
//! 3. **Simulation:** Interprets the trace and writes the execution and status artifacts.

use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ossim_core::config::Config;
use ossim_core::log::render;
use ossim_core::process::WaitQueue;
use ossim_core::sim::{FsTraceSource, Simulator, loader};
use ossim_core::stats::STATS_SECTIONS;
use ossim_core::SimError;

#[derive(Parser, Debug)]
#[command(
    name = "ossim",
    author,
    version,
    about = "Trace-driven fork/exec interrupt simulator",
    long_about = "Replay a trace of CPU bursts, system calls, I/O completions, forks and execs on a \
                  simulated single-CPU system with fixed memory partitions.\n\n\
                  Examples:\n  \
                  ossim trace.txt vector_table.txt device_table.txt external_files.txt\n  \
                  ossim trace.txt vectors.txt devices.txt programs.txt --program-dir programs/ --stats"
)]
struct Cli {
    /// Trace of the bootstrap process.
    trace: PathBuf,

    /// ISR addresses, one per line, indexed from 0.
    vector_table: PathBuf,

    /// Device service delays, one per line, indexed from 0.
    device_table: PathBuf,

    /// External programs (`name, size[, path]` per line).
    external_files: PathBuf,

    /// JSON configuration overriding costs, partitions, or the bootstrap process.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory external program traces are resolved against.
    #[arg(long, default_value = ".")]
    program_dir: PathBuf,

    /// Where to write the execution log.
    #[arg(long, default_value = "execution.txt")]
    execution_out: PathBuf,

    /// Where to write the status snapshots.
    #[arg(long, default_value = "system_status.txt")]
    status_out: PathBuf,

    /// Print run statistics when done.
    #[arg(long)]
    stats: bool,

    /// Print only these statistics sections (comma separated). Implies `--stats`.
    #[arg(
        long,
        value_delimiter = ',',
        value_parser = clap::builder::PossibleValuesParser::new(STATS_SECTIONS)
    )]
    stats_sections: Vec<String>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Installs the stderr subscriber.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the inputs, runs the simulation, and writes both artifacts.
fn run(cli: &Cli) -> Result<(), SimError> {
    let config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    let trace = loader::load_trace(&cli.trace)?;
    let vectors = loader::load_vector_table(&cli.vector_table)?;
    let devices = loader::load_device_table(&cli.device_table)?;
    let catalog = loader::load_catalog(&cli.external_files)?;
    info!(
        vectors = vectors.len(),
        devices = devices.len(),
        "external programs:\n{catalog}"
    );

    let source = FsTraceSource::new(&cli.program_dir);
    let mut sim = Simulator::new(&config, &vectors, &devices, &catalog, &source);

    let root = sim.bootstrap_process();
    if root.partition.is_none() {
        eprintln!("ERROR! Memory allocation failed!");
    }

    let outcome = sim.simulate(&trace, 0, &root, &WaitQueue::new())?;

    write_output(&cli.execution_out, &render::execution_text(&outcome.log))?;
    write_output(&cli.status_out, &render::status_text(&outcome.log))?;
    println!(
        "[*] Simulation finished at t={} ({} records)",
        outcome.end_time,
        outcome.log.len()
    );

    if cli.stats || !cli.stats_sections.is_empty() {
        sim.stats().print_sections(&cli.stats_sections);
    }
    Ok(())
}

fn write_output(path: &Path, contents: &str) -> Result<(), SimError> {
    fs::write(path, contents).map_err(|e| SimError::io(path, e))
}
