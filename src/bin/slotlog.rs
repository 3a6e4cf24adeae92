//! slotlog harness binary
//!
//! Forks one writer process per `<count> <label>` pair, waits for all of
//! them, then prints every committed record in slot-index order.

use clap::Parser;
use slotlog::config::{DEFAULT_LOG_FILENAME, DEFAULT_MAX_RECORDS};
use slotlog::{harness, Config};
use tracing_subscriber::{fmt, EnvFilter};

/// Multi-process append-only log over a shared memory map
#[derive(Parser, Debug)]
#[command(name = "slotlog")]
#[command(about = "Multi-process append-only log over a shared memory map")]
#[command(version)]
struct Args {
    /// Backing file path
    #[arg(short, long, default_value = DEFAULT_LOG_FILENAME)]
    path: String,

    /// Fixed slot capacity of the log
    #[arg(short, long, default_value_t = DEFAULT_MAX_RECORDS)]
    max_records: u32,

    /// Keep records from a previous run instead of truncating
    #[arg(long)]
    preserve: bool,

    /// Alternating <count> <label> pairs, one writer process per pair
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    writers: Vec<String>,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,slotlog=debug"));

    // Log to stderr; stdout carries only the dumped records
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("slotlog v{}", slotlog::VERSION);
    tracing::info!("Backing file: {}", args.path);

    // Input validation happens before any writer is spawned
    let specs = match harness::parse_specs(&args.writers) {
        Ok(specs) => specs,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Usage: slotlog [--path FILE] <count> <label> [<count> <label> ...]");
            std::process::exit(2);
        }
    };

    let mut builder = Config::builder()
        .path(&args.path)
        .max_records(args.max_records);
    if args.preserve {
        builder = builder.preserve_existing();
    }
    let config = builder.build();

    match harness::run(&config, &specs) {
        Ok(records) => {
            for (index, text) in records.iter().enumerate() {
                println!("{}: {}", index, text);
            }
        }
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}
