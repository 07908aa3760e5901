// ─────────────────────────────────────────────────────────────────────
// Diffbench — Diffusion System
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Steady-state diffusion problem instance: grid, coefficients, source.
//!
//! Source fields are built from declarative recipes (point sources, a
//! constant fill, or a band around a line) evaluated over the grid mesh.

use crate::special::Kernel;
use diffbench_types::constants::{BENCH_SOURCE_CENTER, BENCH_SOURCE_FWHM};
use diffbench_types::error::{BenchError, BenchResult};
use diffbench_types::format::{sci, sci_row};
use diffbench_types::grid::Grid;
use diffbench_types::matrix;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Material coefficients of the diffusion equation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    /// Macroscopic removal (absorption/scattering) cross section.
    pub absorption_scattering: f64,
    pub diffusion_coefficient: f64,
}

impl Default for Coefficients {
    fn default() -> Self {
        Coefficients {
            absorption_scattering: 1.0,
            diffusion_coefficient: 1.0,
        }
    }
}

/// Weighted point sources given as parallel sequences.
///
/// A single `fwhms` or `weights` entry is broadcast over every location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSources {
    pub locations: Vec<(f64, f64)>,
    #[serde(default = "default_fwhms")]
    pub fwhms: Vec<f64>,
    #[serde(default = "default_weights")]
    pub weights: Vec<f64>,
    #[serde(default)]
    pub kernel: Kernel,
}

fn default_fwhms() -> Vec<f64> {
    vec![1e-2]
}
fn default_weights() -> Vec<f64> {
    vec![1.0]
}

impl PointSources {
    /// One source of unit weight.
    pub fn single(location: (f64, f64), fwhm: f64, kernel: Kernel) -> Self {
        PointSources {
            locations: vec![location],
            fwhms: vec![fwhm],
            weights: vec![1.0],
            kernel,
        }
    }

    /// `(location, fwhm, weight)` per source after broadcasting.
    fn expand(&self) -> BenchResult<Vec<((f64, f64), f64, f64)>> {
        let count = self.locations.len();
        let fwhms = broadcast("fwhms", &self.fwhms, count)?;
        let weights = broadcast("weights", &self.weights, count)?;
        Ok(self
            .locations
            .iter()
            .zip(fwhms)
            .zip(weights)
            .map(|((&loc, fwhm), q)| (loc, fwhm, q))
            .collect())
    }
}

fn broadcast(name: &str, values: &[f64], count: usize) -> BenchResult<Vec<f64>> {
    match values.len() {
        1 => Ok(vec![values[0]; count]),
        len if len == count => Ok(values.to_vec()),
        len => Err(BenchError::InvalidRecipe(format!(
            "{name} has {len} entries for {count} locations"
        ))),
    }
}

/// Constant source `q` inside the band `|y - slope·x - intercept| / √(slope²+1) < distance`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSource {
    #[serde(default)]
    pub slope: f64,
    #[serde(default = "default_intercept")]
    pub intercept: f64,
    #[serde(default = "default_strength")]
    pub q: f64,
    #[serde(default = "default_distance")]
    pub distance: f64,
}

fn default_intercept() -> f64 {
    0.5
}
fn default_strength() -> f64 {
    1.0
}
fn default_distance() -> f64 {
    1e-2
}

impl Default for LineSource {
    fn default() -> Self {
        LineSource {
            slope: 0.0,
            intercept: default_intercept(),
            q: default_strength(),
            distance: default_distance(),
        }
    }
}

/// Declarative description of a source field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceRecipe {
    Point(PointSources),
    Constant { q: f64 },
    Line(LineSource),
}

impl Default for SourceRecipe {
    /// The benchmark source: one Gaussian at (0.25, 0.25), fwhm 0.05.
    fn default() -> Self {
        SourceRecipe::Point(PointSources::single(
            BENCH_SOURCE_CENTER,
            BENCH_SOURCE_FWHM,
            Kernel::Gaussian,
        ))
    }
}

impl SourceRecipe {
    pub fn build(&self, grid: Grid, coefficients: Coefficients) -> BenchResult<System> {
        match self {
            SourceRecipe::Point(sources) => System::from_point_sources(grid, sources, coefficients),
            SourceRecipe::Constant { q } => System::from_constant_source(grid, *q, coefficients),
            SourceRecipe::Line(line) => System::from_line_source(grid, line, coefficients),
        }
    }
}

/// A validated problem instance. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SystemRecord", into = "SystemRecord")]
pub struct System {
    grid: Grid,
    coefficients: Coefficients,
    source: Array2<f64>,
}

impl System {
    /// Validates coefficient signs, source shape and source sign; a missing
    /// source is all zeros.
    pub fn new(grid: Grid, coefficients: Coefficients, source: Option<Array2<f64>>) -> BenchResult<Self> {
        let source = source.unwrap_or_else(|| Array2::zeros(grid.shape()));

        if source.dim() != grid.shape() {
            return Err(BenchError::ShapeMismatch {
                expected: grid.shape(),
                found: source.dim(),
            });
        }
        let Coefficients {
            absorption_scattering,
            diffusion_coefficient,
        } = coefficients;
        if !(absorption_scattering.is_finite() && absorption_scattering >= 0.0) {
            return Err(BenchError::invalid(
                "absorption_scattering",
                "non-negative",
                absorption_scattering,
            ));
        }
        if !(diffusion_coefficient.is_finite() && diffusion_coefficient >= 0.0) {
            return Err(BenchError::invalid(
                "diffusion_coefficient",
                "non-negative",
                diffusion_coefficient,
            ));
        }
        if let Some(bad) = source.iter().find(|v| !(v.is_finite() && **v >= 0.0)) {
            return Err(BenchError::invalid("source", "non-negative", bad));
        }

        Ok(System {
            grid,
            coefficients,
            source,
        })
    }

    pub fn from_point_sources(grid: Grid, sources: &PointSources, coefficients: Coefficients) -> BenchResult<Self> {
        let (xx, yy) = grid.mesh();
        let mut source = Array2::zeros(grid.shape());
        for ((x0, y0), fwhm, q) in sources.expand()? {
            if !(fwhm.is_finite() && fwhm > 0.0) {
                return Err(BenchError::invalid("fwhm", "positive", fwhm));
            }
            source.scaled_add(q, &sources.kernel.field(&xx, &yy, x0, y0, fwhm));
        }
        System::new(grid, coefficients, Some(source))
    }

    pub fn from_constant_source(grid: Grid, q: f64, coefficients: Coefficients) -> BenchResult<Self> {
        let source = Array2::from_elem(grid.shape(), q);
        System::new(grid, coefficients, Some(source))
    }

    pub fn from_line_source(grid: Grid, line: &LineSource, coefficients: Coefficients) -> BenchResult<Self> {
        let (xx, yy) = grid.mesh();
        let norm = (line.slope * line.slope + 1.0).sqrt();
        let mut source = Array2::zeros(grid.shape());
        ndarray::Zip::from(&mut source)
            .and(&xx)
            .and(&yy)
            .for_each(|s, &x, &y| {
                let d = (y - line.slope * x - line.intercept).abs() / norm;
                if d < line.distance {
                    *s = line.q;
                }
            });
        System::new(grid, coefficients, Some(source))
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn coefficients(&self) -> Coefficients {
        self.coefficients
    }

    pub fn absorption_scattering(&self) -> f64 {
        self.coefficients.absorption_scattering
    }

    pub fn diffusion_coefficient(&self) -> f64 {
        self.coefficients.diffusion_coefficient
    }

    pub fn source(&self) -> &Array2<f64> {
        &self.source
    }

    /// Grid block, `D Sa` line, blank line, one `%14.8e` row per grid row.
    ///
    /// The coefficient line is written diffusion coefficient first: the
    /// solver reads `D` and then the removal cross section.
    pub fn to_text(&self) -> String {
        let mut rows = vec![
            self.grid.to_text(),
            format!(
                "{} {}",
                sci(self.diffusion_coefficient()),
                sci(self.absorption_scattering())
            ),
            String::new(),
        ];
        rows.extend(self.source.rows().into_iter().map(|row| sci_row(row.iter())));
        rows.join("\n")
    }

    pub fn from_file(path: impl AsRef<Path>) -> BenchResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let system: Self = serde_json::from_str(&contents)?;
        Ok(system)
    }

    pub fn to_file(&self, path: impl AsRef<Path>) -> BenchResult<()> {
        std::fs::write(path, serde_json::to_string(self)?)?;
        Ok(())
    }
}

/// Wire form shared with the solver executable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemRecord {
    pub grid: Grid,
    pub absorption_scattering: f64,
    pub diffusion_coefficient: f64,
    #[serde(with = "matrix")]
    pub source: Array2<f64>,
}

impl TryFrom<SystemRecord> for System {
    type Error = BenchError;

    fn try_from(record: SystemRecord) -> BenchResult<Self> {
        System::new(
            record.grid,
            Coefficients {
                absorption_scattering: record.absorption_scattering,
                diffusion_coefficient: record.diffusion_coefficient,
            },
            Some(record.source),
        )
    }
}

impl From<System> for SystemRecord {
    fn from(system: System) -> Self {
        SystemRecord {
            grid: system.grid,
            absorption_scattering: system.coefficients.absorption_scattering,
            diffusion_coefficient: system.coefficients.diffusion_coefficient,
            source: system.source,
        }
    }
}
