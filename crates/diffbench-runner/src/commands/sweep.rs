use anyhow::{Context, Result};
use clap::Args;
use diffbench_runner::config::SweepConfig;
use diffbench_runner::sweep::Sweep;
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct SweepArgs {
    /// Sweep configuration (JSON)
    #[arg(short, long)]
    pub config: PathBuf,

    /// Write the result table as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Write the result table as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,
}

pub fn execute(args: SweepArgs) -> Result<()> {
    let config = SweepConfig::from_file(&args.config)
        .with_context(|| format!("loading sweep config {}", args.config.display()))?;
    info!(
        executable = %config.executable.display(),
        sizes = config.grid_sizes.len(),
        params = config.params.len(),
        "sweep starting"
    );

    let sweep = Sweep::from_config(config)?;
    let table = sweep.run().context("sweep aborted")?;

    if let Some(path) = &args.csv {
        table
            .write_csv(path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("table written to {}", path.display());
    }
    if let Some(path) = &args.json {
        table
            .write_json(path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("table written to {}", path.display());
    }
    if args.csv.is_none() && args.json.is_none() {
        print!("{}", table.to_csv());
    }
    Ok(())
}
