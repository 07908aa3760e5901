// ─────────────────────────────────────────────────────────────────────
// Diffbench — Sweep Orchestrator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Grid size × parameter set sweep.
//!
//! Runs in two phases: every direct (LUP) configuration first, whose flux
//! becomes the per-grid-size baseline, then every iterative configuration,
//! which is compared against that baseline.

use crate::config::SweepConfig;
use crate::execute::{ProcessRunner, SolverRunner};
use crate::table::{SweepRow, SweepTable};
use diffbench_core::input::Input;
use diffbench_core::solution::Solution;
use diffbench_types::config::Parameters;
use diffbench_types::error::{BenchError, BenchResult};
use diffbench_types::grid::Grid;
use ndarray::Array2;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use tracing::info;

pub struct Sweep<R> {
    config: SweepConfig,
    runner: R,
}

impl Sweep<ProcessRunner> {
    /// Sweep that spawns `config.executable` under `config.harness`.
    pub fn from_config(config: SweepConfig) -> BenchResult<Self> {
        let runner = ProcessRunner::new(
            config.executable.clone(),
            config.harness.clone(),
            config.input_format,
        );
        Sweep::with_runner(config, runner)
    }
}

impl<R: SolverRunner> Sweep<R> {
    pub fn with_runner(config: SweepConfig, runner: R) -> BenchResult<Self> {
        config.validate()?;
        Ok(Sweep { config, runner })
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// `p{n}_{algo}.{json|txt}` in the output directory.
    pub fn input_path(&self, n: usize, params: &Parameters) -> PathBuf {
        self.config.output_dir.join(format!(
            "p{}_{}.{}",
            n,
            params.algorithm(),
            self.config.input_format.extension()
        ))
    }

    /// `p{n}_{algo}_result.json` in the output directory.
    pub fn result_path(&self, n: usize, params: &Parameters) -> PathBuf {
        self.config
            .output_dir
            .join(format!("p{}_{}_result.json", n, params.algorithm()))
    }

    /// Build, write and solve one `(n, params)` pair.
    pub fn run_pair(&self, n: usize, params: &Parameters) -> BenchResult<Solution> {
        let grid = Grid::build_square(self.config.length, n)?;
        let system = self.config.source.build(grid, self.config.coefficients)?;
        let input = Input::new(*params, system);

        let input_path = self.input_path(n, params);
        let result_path = self.result_path(n, params);
        input.write(&input_path, self.config.input_format)?;

        let solution = self.runner.run(&input_path, &result_path)?;
        info!(
            n,
            algorithm = %params.algorithm(),
            time_ms = solution.time,
            memory = ?solution.memory,
            residual = solution.residual_error,
            "solved"
        );
        Ok(solution)
    }

    /// Run every pair and assemble the table; the first error aborts.
    ///
    /// Rows come out grid-size-major, then in `config.params` order.
    pub fn run(&self) -> BenchResult<SweepTable> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let (direct, iterative): (Vec<_>, Vec<_>) = self
            .config
            .params
            .iter()
            .enumerate()
            .partition(|(_, p)| p.algorithm().is_direct());

        let mut baselines: HashMap<usize, Array2<f64>> = HashMap::new();
        let mut rows: BTreeMap<(usize, usize), SweepRow> = BTreeMap::new();

        for (gi, &n) in self.config.grid_sizes.iter().enumerate() {
            for &(pi, params) in &direct {
                let solution = self.run_pair(n, params)?;
                let baseline = baselines.entry(n).or_insert_with(|| solution.flux.clone());
                let relative_lup = solution.max_abs_difference(baseline)?;
                rows.insert((gi, pi), make_row(n, &solution, relative_lup)?);
            }
        }

        for (gi, &n) in self.config.grid_sizes.iter().enumerate() {
            for &(pi, params) in &iterative {
                let baseline = baselines
                    .get(&n)
                    .ok_or(BenchError::MissingBaseline { grid_size: n })?;
                let solution = self.run_pair(n, params)?;
                let relative_lup = solution.max_abs_difference(baseline)?;
                rows.insert((gi, pi), make_row(n, &solution, relative_lup)?);
            }
        }

        info!(rows = rows.len(), "sweep complete");
        Ok(SweepTable {
            rows: rows.into_values().collect(),
        })
    }
}

fn make_row(n: usize, solution: &Solution, relative_lup: f64) -> BenchResult<SweepRow> {
    let memory = solution.memory.ok_or_else(|| BenchError::MemoryParse("runner reported no peak memory".into()))?;
    Ok(SweepRow::new(
        n,
        solution.params.algorithm(),
        solution.residual_error,
        solution.time,
        memory,
        solution.converged.unwrap_or(false),
        solution.iterations,
        solution.relative_error,
        relative_lup,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use diffbench_types::config::Algorithm;
    use std::cell::RefCell;
    use std::path::Path;

    /// Echoes the problem back with `flux = scale(algorithm) · source`.
    struct FakeRunner {
        calls: RefCell<Vec<(usize, Algorithm)>>,
    }

    impl FakeRunner {
        fn new() -> Self {
            FakeRunner {
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl SolverRunner for FakeRunner {
        fn run(&self, input_path: &Path, _result_path: &Path) -> BenchResult<Solution> {
            let input = Input::from_json_file(input_path)?;
            let algorithm = input.params.algorithm();
            let n = input.system.grid().m();
            self.calls.borrow_mut().push((n, algorithm));

            let scale = 1.0 + 1e-3 * algorithm.ordinal() as f64;
            let flux = input.system.source().mapv(|v| v * scale);
            let iterative = !algorithm.is_direct();
            Ok(Solution {
                flux,
                residual_error: 1e-10,
                time: 10 * n as u64,
                memory: Some(4096),
                converged: iterative.then_some(true),
                relative_error: iterative.then_some(1e-9),
                iterations: iterative.then_some(25),
                system: input.system,
                params: input.params,
            })
        }
    }

    fn out_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("diffbench_sweep_{}_{}", tag, std::process::id()))
    }

    #[test]
    fn test_sweep_two_sizes_two_algorithms() {
        let dir = out_dir("basic");
        // iterative listed first: the baseline must still be solved first
        let config = SweepConfig::new(
            "unused",
            vec![4, 8],
            vec![Parameters::point_jacobi(1e-6, 100).unwrap(), Parameters::lup()],
            &dir,
        );
        let sweep = Sweep::with_runner(config, FakeRunner::new()).unwrap();
        let table = sweep.run().unwrap();

        assert_eq!(table.len(), 4);
        let order: Vec<_> = table.rows.iter().map(|r| (r.n, r.algo)).collect();
        assert_eq!(
            order,
            vec![
                (4, Algorithm::PointJacobi),
                (4, Algorithm::Lup),
                (8, Algorithm::PointJacobi),
                (8, Algorithm::Lup),
            ]
        );
        for row in table.rows_for(Algorithm::Lup) {
            assert_eq!(row.relative_lup, 0.0);
            assert!(!row.converged);
            assert!(row.iterations.is_none());
        }
        for row in table.rows_for(Algorithm::PointJacobi) {
            assert!(row.relative_lup > 0.0);
            assert!(row.converged);
            assert_eq!(row.iterations, Some(25));
            assert!((row.kbytes - 4.0).abs() < 1e-15);
        }

        let calls = sweep.runner.calls.borrow();
        assert_eq!(calls[0], (4, Algorithm::Lup));
        assert_eq!(calls[1], (8, Algorithm::Lup));
        assert!(dir.join("p4_lup.json").exists());
        assert!(dir.join("p8_pj.json").exists());
        drop(calls);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_relative_lup_is_max_abs_difference() {
        let dir = out_dir("relative");
        let config = SweepConfig::new(
            "unused",
            vec![4],
            vec![Parameters::lup(), Parameters::gauss_seidel(1e-6, 100).unwrap()],
            &dir,
        );
        let sweep = Sweep::with_runner(config, FakeRunner::new()).unwrap();
        let table = sweep.run().unwrap();

        let input = Input::from_json_file(dir.join("p4_gs.json")).unwrap();
        let max_source = input.system.source().iter().cloned().fold(0.0, f64::max);
        let gs = table.rows_for(Algorithm::GaussSeidel).next().unwrap();
        assert!((gs.relative_lup - 2e-3 * max_source).abs() < 1e-9 * max_source);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_baseline_rejected_before_running() {
        let dir = out_dir("nobase");
        let config = SweepConfig::new(
            "unused",
            vec![4],
            vec![Parameters::sor(1e-6, 100, 1.5).unwrap()],
            &dir,
        );
        match Sweep::with_runner(config, FakeRunner::new()) {
            Err(BenchError::MissingBaseline { grid_size }) => assert_eq!(grid_size, 4),
            Err(other) => panic!("expected MissingBaseline, got {other:?}"),
            Ok(_) => panic!("expected MissingBaseline"),
        }
    }

    #[test]
    fn test_runner_error_aborts_sweep() {
        struct Failing;
        impl SolverRunner for Failing {
            fn run(&self, _: &Path, _: &Path) -> BenchResult<Solution> {
                Err(BenchError::SolverFailed {
                    status: "exit status: 1".into(),
                    stderr: "boom".into(),
                })
            }
        }

        let dir = out_dir("fail");
        let config = SweepConfig::new("unused", vec![4], vec![Parameters::lup()], &dir);
        let sweep = Sweep::with_runner(config, Failing).unwrap();
        assert!(matches!(sweep.run(), Err(BenchError::SolverFailed { .. })));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_file_names() {
        let config = SweepConfig::new("unused", vec![16], vec![Parameters::lup()], "out");
        let sweep = Sweep::with_runner(config, FakeRunner::new()).unwrap();
        let sor = Parameters::sor(1e-6, 100, 1.5).unwrap();
        assert_eq!(sweep.input_path(16, &sor), Path::new("out").join("p16_sor.json"));
        assert_eq!(
            sweep.result_path(16, &Parameters::lup()),
            Path::new("out").join("p16_lup_result.json")
        );
    }
}
