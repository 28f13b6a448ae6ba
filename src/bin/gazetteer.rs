//! gazetteer Shell Binary
//!
//! Interactive city database session over a flat data file.

use clap::Parser;
use gazetteer::shell::Shell;
use gazetteer::{persist, Config, Store, Strictness};
use tracing_subscriber::{fmt, EnvFilter};

/// gazetteer shell
#[derive(Parser, Debug)]
#[command(name = "gazetteer")]
#[command(about = "In-memory city record store with flat-file persistence")]
#[command(version)]
struct Args {
    /// Path to the city data file
    #[arg(short, long, default_value = "cities.txt")]
    file: String,

    /// Reject malformed lines when loading instead of defaulting numeric
    /// fields to zero
    #[arg(long)]
    strict: bool,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,gazetteer=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .data_file(&args.file)
        .strictness(if args.strict {
            Strictness::Strict
        } else {
            Strictness::Lenient
        })
        .build();

    tracing::info!("gazetteer v{}", gazetteer::VERSION);
    tracing::info!("Data file: {}", config.data_file.display());

    let mut store = Store::new();

    // Seed the store from the data file; a missing file just means a fresh
    // session. Duplicate lines resolve last-wins before the shell is up.
    match persist::load_from_path(&mut store, &config.data_file, config.strictness, &mut |_| true) {
        Ok(report) => {
            tracing::info!("loaded {} cities", report.loaded());
        }
        Err(e) => {
            tracing::warn!("could not load {}: {}", config.data_file.display(), e);
        }
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    let mut shell = Shell::new(&mut store, &config, stdin.lock(), stdout.lock());
    if let Err(e) = shell.run() {
        tracing::error!("session error: {}", e);
        std::process::exit(1);
    }
    drop(shell);

    // Save-before-exit keeps the data file in sync with the final store state
    if let Err(e) = persist::save_to_path(&store, &config.data_file) {
        tracing::error!("failed to save {}: {}", config.data_file.display(), e);
        std::process::exit(1);
    }
}
