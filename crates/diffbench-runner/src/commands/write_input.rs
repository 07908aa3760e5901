use anyhow::{Context, Result};
use clap::Args;
use diffbench_core::input::{Input, InputFormat};
use diffbench_core::system::{Coefficients, SourceRecipe};
use diffbench_types::config::{Algorithm, Parameters};
use diffbench_types::constants::{BENCH_DOMAIN_LENGTH, DEFAULT_MAX_ITER, DEFAULT_TOLERANCE};
use diffbench_types::grid::Grid;
use std::path::PathBuf;
use tracing::info;

/// Benchmark problem (Gaussian source, unit coefficients) on an `n × n` grid.
#[derive(Args)]
pub struct WriteInputArgs {
    /// Interior points per side
    #[arg(short = 'n', long)]
    pub size: usize,

    /// lup, pj, gs or sor
    #[arg(short, long)]
    pub algorithm: Algorithm,

    /// json or text
    #[arg(short, long, default_value = "json")]
    pub format: InputFormat,

    /// Destination file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    #[arg(long, default_value_t = DEFAULT_MAX_ITER)]
    pub max_iter: u64,

    /// SOR only
    #[arg(long, default_value_t = 1.5)]
    pub relaxation_factor: f64,
}

pub fn execute(args: WriteInputArgs) -> Result<()> {
    let params = match args.algorithm {
        Algorithm::Lup => Parameters::lup(),
        Algorithm::PointJacobi => Parameters::point_jacobi(args.tolerance, args.max_iter)?,
        Algorithm::GaussSeidel => Parameters::gauss_seidel(args.tolerance, args.max_iter)?,
        Algorithm::Sor => {
            Parameters::sor(args.tolerance, args.max_iter, args.relaxation_factor)?
        }
    };
    let grid = Grid::build_square(BENCH_DOMAIN_LENGTH, args.size)?;
    let system = SourceRecipe::default().build(grid, Coefficients::default())?;
    let input = Input::new(params, system);

    match &args.output {
        Some(path) => {
            input
                .write(path, args.format)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("{} input written to {}", args.algorithm, path.display());
        }
        None => println!("{}", input.encode(args.format)?),
    }
    Ok(())
}
