// ─────────────────────────────────────────────────────────────────────
// Diffbench — Solver Result Import
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Decoding of the solver executable's JSON result.
//!
//! Expected layout:
//! ```text
//! {
//!   "project": {"params": {..}, "problem": {..}},
//!   "flux": {"m_rows": M, "m_cols": N, "m_data": [..]},
//!   "residual_error": <f64>,
//!   "time": <integer ms>,
//!   "converged": <bool>?, "relative_error": <f64>?, "iterations": <int>?
//! }
//! ```
//! Peak memory is not part of the payload; the caller attaches it.

use crate::input::Input;
use crate::system::System;
use diffbench_types::config::Parameters;
use diffbench_types::error::{BenchError, BenchResult};
use diffbench_types::matrix;
use ndarray::{Array2, Zip};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub system: System,
    pub params: Parameters,
    pub flux: Array2<f64>,
    pub residual_error: f64,
    /// Solver-reported wall time in milliseconds.
    pub time: u64,
    /// Peak memory from the measurement harness.
    pub memory: Option<u64>,
    pub converged: Option<bool>,
    pub relative_error: Option<f64>,
    pub iterations: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct SolutionRecord {
    project: Input,
    #[serde(with = "matrix")]
    flux: Array2<f64>,
    residual_error: f64,
    time: u64,
    #[serde(default)]
    converged: Option<bool>,
    #[serde(default)]
    relative_error: Option<f64>,
    #[serde(default)]
    iterations: Option<u64>,
}

impl Solution {
    pub fn from_json_str(text: &str) -> BenchResult<Self> {
        let record: SolutionRecord = serde_json::from_str(text)?;
        let Input { params, system } = record.project;
        Ok(Solution {
            system,
            params,
            flux: record.flux,
            residual_error: record.residual_error,
            time: record.time,
            memory: None,
            converged: record.converged,
            relative_error: record.relative_error,
            iterations: record.iterations,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> BenchResult<Self> {
        Solution::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn with_memory(mut self, peak: u64) -> Self {
        self.memory = Some(peak);
        self
    }

    /// `max |self.flux - other.flux|`; both fields must share a shape.
    pub fn max_abs_difference(&self, other: &Array2<f64>) -> BenchResult<f64> {
        if self.flux.dim() != other.dim() {
            return Err(BenchError::ShapeMismatch {
                expected: other.dim(),
                found: self.flux.dim(),
            });
        }
        Ok(Zip::from(&self.flux)
            .and(other)
            .fold(0.0_f64, |acc, a, b| acc.max((a - b).abs())))
    }
}
