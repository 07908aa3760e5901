// ─────────────────────────────────────────────────────────────────────
// Diffbench — Errors
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("`{field}` must be {requirement}: {value}")]
    InvalidValue {
        field: &'static str,
        requirement: &'static str,
        value: String,
    },

    #[error("Shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Matrix data length {len} does not match {rows}x{cols}")]
    MatrixLength { rows: usize, cols: usize, len: usize },

    #[error("Invalid source recipe: {0}")]
    InvalidRecipe(String),

    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Text parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Solver exited with {status}: {stderr}")]
    SolverFailed { status: String, stderr: String },

    #[error("Could not read peak memory from harness output: {0:?}")]
    MemoryParse(String),

    #[error("No baseline solution for grid size {grid_size}")]
    MissingBaseline { grid_size: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BenchError {
    pub fn invalid(
        field: &'static str,
        requirement: &'static str,
        value: impl ToString,
    ) -> Self {
        BenchError::InvalidValue {
            field,
            requirement,
            value: value.to_string(),
        }
    }
}

pub type BenchResult<T> = Result<T, BenchError>;
