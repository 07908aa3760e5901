// ─────────────────────────────────────────────────────────────────────
// Diffbench — Command Line
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! `diffbench` command line: run sweeps, or write a single solver input.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Benchmark harness for the external diffusion solver
#[derive(Parser)]
#[command(name = "diffbench")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Benchmark harness for the diffusion solver executable", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a grid size × algorithm sweep
    Sweep(commands::sweep::SweepArgs),
    /// Write one solver input file
    WriteInput(commands::write_input::WriteInputArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Sweep(args) => commands::sweep::execute(args),
        Commands::WriteInput(args) => commands::write_input::execute(args),
    }
}
