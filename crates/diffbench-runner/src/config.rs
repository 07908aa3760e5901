// ─────────────────────────────────────────────────────────────────────
// Diffbench — Sweep Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use diffbench_core::input::InputFormat;
use diffbench_core::system::{Coefficients, SourceRecipe};
use diffbench_types::config::{Algorithm, Parameters};
use diffbench_types::constants::BENCH_DOMAIN_LENGTH;
use diffbench_types::error::{BenchError, BenchResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Process wrapper that reports peak memory on stderr after the solver exits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureHarness {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for MeasureHarness {
    /// BSD `time -lha`; its last stderr line carries the peak memory footprint.
    fn default() -> Self {
        MeasureHarness {
            program: "time".to_string(),
            args: vec!["-lha".to_string()],
        }
    }
}

/// Sweep description, loaded from JSON.
///
/// Only `executable`, `grid_sizes`, `params` and `output_dir` are required;
/// the rest default to the standard benchmark (unit square, Gaussian point
/// source at (0.25, 0.25), JSON input, `time -lha`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    pub executable: PathBuf,
    pub grid_sizes: Vec<usize>,
    pub params: Vec<Parameters>,
    pub output_dir: PathBuf,
    #[serde(default)]
    pub input_format: InputFormat,
    #[serde(default)]
    pub harness: MeasureHarness,
    #[serde(default)]
    pub source: SourceRecipe,
    #[serde(default)]
    pub coefficients: Coefficients,
    #[serde(default = "default_length")]
    pub length: f64,
}

fn default_length() -> f64 {
    BENCH_DOMAIN_LENGTH
}

impl SweepConfig {
    pub fn new(
        executable: impl Into<PathBuf>,
        grid_sizes: Vec<usize>,
        params: Vec<Parameters>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        SweepConfig {
            executable: executable.into(),
            grid_sizes,
            params,
            output_dir: output_dir.into(),
            input_format: InputFormat::default(),
            harness: MeasureHarness::default(),
            source: SourceRecipe::default(),
            coefficients: Coefficients::default(),
            length: default_length(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> BenchResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects sweeps that could only fail part-way through.
    pub fn validate(&self) -> BenchResult<()> {
        if self.grid_sizes.is_empty() {
            return Err(BenchError::ConfigError("grid_sizes is empty".into()));
        }
        if let Some(&n) = self.grid_sizes.iter().find(|&&n| n == 0) {
            return Err(BenchError::ConfigError(format!("grid size must be positive: {n}")));
        }
        if self.params.is_empty() {
            return Err(BenchError::ConfigError("params is empty".into()));
        }
        let has_baseline = self.params.iter().any(|p| p.algorithm().is_direct());
        if !has_baseline {
            // the relative_lup column needs a direct solve at every size
            return Err(BenchError::MissingBaseline {
                grid_size: self.grid_sizes[0],
            });
        }
        let mut seen: Vec<Algorithm> = Vec::with_capacity(self.params.len());
        for p in &self.params {
            let algorithm = p.algorithm();
            if seen.contains(&algorithm) {
                // per-pair files are named by algorithm
                return Err(BenchError::ConfigError(format!(
                    "algorithm `{algorithm}` listed more than once"
                )));
            }
            seen.push(algorithm);
        }
        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(BenchError::invalid("length", "positive", self.length));
        }
        if self.harness.program.trim().is_empty() {
            return Err(BenchError::ConfigError("harness program is empty".into()));
        }
        Ok(())
    }
}
