//! Aggregated sweep results.

use diffbench_types::config::Algorithm;
use diffbench_types::constants::{BYTES_PER_KILOBYTE, MILLIS_PER_SECOND};
use diffbench_types::error::BenchResult;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

/// One `(grid size, algorithm)` measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRow {
    pub n: usize,
    pub algo: Algorithm,
    pub residual: f64,
    /// Solver-reported time [ms].
    pub time: u64,
    /// Harness-reported peak memory [bytes].
    pub memory: u64,
    pub converged: bool,
    pub iterations: Option<u64>,
    pub relative: Option<f64>,
    /// `max |flux - flux_lup|` at the same grid size.
    pub relative_lup: f64,
    pub sec: f64,
    pub kbytes: f64,
}

impl SweepRow {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        n: usize,
        algo: Algorithm,
        residual: f64,
        time: u64,
        memory: u64,
        converged: bool,
        iterations: Option<u64>,
        relative: Option<f64>,
        relative_lup: f64,
    ) -> Self {
        SweepRow {
            n,
            algo,
            residual,
            time,
            memory,
            converged,
            iterations,
            relative,
            relative_lup,
            sec: time as f64 / MILLIS_PER_SECOND,
            kbytes: memory as f64 / BYTES_PER_KILOBYTE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SweepTable {
    pub rows: Vec<SweepRow>,
}

const CSV_HEADER: [&str; 11] = [
    "n",
    "algo",
    "residual",
    "time",
    "memory",
    "converged",
    "iterations",
    "relative",
    "relative_lup",
    "sec",
    "kbytes",
];

impl SweepTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows_for(&self, algo: Algorithm) -> impl Iterator<Item = &SweepRow> {
        self.rows.iter().filter(move |r| r.algo == algo)
    }

    /// Comma-separated table; absent optionals are empty cells.
    pub fn to_csv(&self) -> String {
        let mut out = CSV_HEADER.join(",");
        out.push('\n');
        for r in &self.rows {
            let _ = writeln!(
                out,
                "{},{},{:.15e},{},{},{},{},{},{:.15e},{},{}",
                r.n,
                r.algo,
                r.residual,
                r.time,
                r.memory,
                r.converged,
                r.iterations.map(|v| v.to_string()).unwrap_or_default(),
                r.relative.map(|v| format!("{v:.15e}")).unwrap_or_default(),
                r.relative_lup,
                r.sec,
                r.kbytes,
            );
        }
        out
    }

    pub fn write_csv(&self, path: impl AsRef<Path>) -> BenchResult<()> {
        std::fs::write(path, self.to_csv())?;
        Ok(())
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> BenchResult<()> {
        std::fs::write(path, serde_json::to_string_pretty(&self.rows)?)?;
        Ok(())
    }
}
