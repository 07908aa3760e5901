// ─────────────────────────────────────────────────────────────────────
// Diffbench — Solver Parameters
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::{DEFAULT_MAX_ITER, DEFAULT_TOLERANCE};
use crate::error::{BenchError, BenchResult};
use crate::format::sci;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Linear-system algorithms offered by the solver executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Algorithm {
    Lup,
    PointJacobi,
    GaussSeidel,
    Sor,
}

impl Algorithm {
    /// Ordinal ↔ algorithm. The solver's text reader decodes the
    /// algorithm by position in this table; do not reorder.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Lup,
        Algorithm::PointJacobi,
        Algorithm::GaussSeidel,
        Algorithm::Sor,
    ];

    pub fn ordinal(self) -> usize {
        Self::ALL
            .iter()
            .position(|&a| a == self)
            .unwrap_or_default()
    }

    pub fn from_ordinal(ordinal: usize) -> BenchResult<Self> {
        Self::ALL
            .get(ordinal)
            .copied()
            .ok_or_else(|| BenchError::UnknownAlgorithm(ordinal.to_string()))
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Lup => "lup",
            Algorithm::PointJacobi => "pj",
            Algorithm::GaussSeidel => "gs",
            Algorithm::Sor => "sor",
        }
    }

    /// Only LUP is a direct solve; it is the reference for relative errors.
    pub fn is_direct(self) -> bool {
        self == Algorithm::Lup
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = BenchError;

    fn from_str(s: &str) -> BenchResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.name() == s)
            .ok_or_else(|| BenchError::UnknownAlgorithm(s.to_string()))
    }
}

impl Serialize for Algorithm {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Stopping criteria for the iterative algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IterSettingsRecord")]
pub struct IterSettings {
    tolerance: f64,
    max_iter: u64,
}

#[derive(Deserialize)]
struct IterSettingsRecord {
    #[serde(default = "default_tolerance")]
    tolerance: f64,
    #[serde(default = "default_max_iter")]
    max_iter: u64,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}
fn default_max_iter() -> u64 {
    DEFAULT_MAX_ITER
}

impl TryFrom<IterSettingsRecord> for IterSettings {
    type Error = BenchError;

    fn try_from(record: IterSettingsRecord) -> BenchResult<Self> {
        IterSettings::new(record.tolerance, record.max_iter)
    }
}

impl IterSettings {
    pub fn new(tolerance: f64, max_iter: u64) -> BenchResult<Self> {
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(BenchError::invalid("tolerance", "positive", tolerance));
        }
        if max_iter == 0 {
            return Err(BenchError::invalid("max_iter", "positive", max_iter));
        }
        Ok(IterSettings {
            tolerance,
            max_iter,
        })
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn max_iter(&self) -> u64 {
        self.max_iter
    }
}

impl Default for IterSettings {
    fn default() -> Self {
        IterSettings {
            tolerance: DEFAULT_TOLERANCE,
            max_iter: DEFAULT_MAX_ITER,
        }
    }
}

/// SOR relaxation factor ω. The solver rejects ω ≤ 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct RelaxationFactor(f64);

impl RelaxationFactor {
    pub fn new(omega: f64) -> BenchResult<Self> {
        if !(omega.is_finite() && omega > 1.0) {
            return Err(BenchError::invalid(
                "relaxation_factor",
                "larger than 1",
                omega,
            ));
        }
        Ok(RelaxationFactor(omega))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for RelaxationFactor {
    type Error = BenchError;

    fn try_from(omega: f64) -> BenchResult<Self> {
        RelaxationFactor::new(omega)
    }
}

impl From<RelaxationFactor> for f64 {
    fn from(omega: RelaxationFactor) -> f64 {
        omega.0
    }
}

/// One solver configuration. Each variant carries exactly the settings
/// its algorithm consumes, which is also exactly what gets serialized.
///
/// JSON: `{"algorithm": "lup"}`,
/// `{"algorithm": "pj", "iter_settings": {"tolerance": .., "max_iter": ..}}`,
/// `{"algorithm": "sor", "iter_settings": {..}, "relaxation_factor": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm")]
pub enum Parameters {
    #[serde(rename = "lup")]
    Lup,
    #[serde(rename = "pj")]
    PointJacobi {
        #[serde(default)]
        iter_settings: IterSettings,
    },
    #[serde(rename = "gs")]
    GaussSeidel {
        #[serde(default)]
        iter_settings: IterSettings,
    },
    #[serde(rename = "sor")]
    Sor {
        #[serde(default)]
        iter_settings: IterSettings,
        relaxation_factor: RelaxationFactor,
    },
}

impl Parameters {
    pub fn lup() -> Self {
        Parameters::Lup
    }

    pub fn point_jacobi(tolerance: f64, max_iter: u64) -> BenchResult<Self> {
        Ok(Parameters::PointJacobi {
            iter_settings: IterSettings::new(tolerance, max_iter)?,
        })
    }

    pub fn gauss_seidel(tolerance: f64, max_iter: u64) -> BenchResult<Self> {
        Ok(Parameters::GaussSeidel {
            iter_settings: IterSettings::new(tolerance, max_iter)?,
        })
    }

    pub fn sor(tolerance: f64, max_iter: u64, relaxation_factor: f64) -> BenchResult<Self> {
        Ok(Parameters::Sor {
            iter_settings: IterSettings::new(tolerance, max_iter)?,
            relaxation_factor: RelaxationFactor::new(relaxation_factor)?,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Parameters::Lup => Algorithm::Lup,
            Parameters::PointJacobi { .. } => Algorithm::PointJacobi,
            Parameters::GaussSeidel { .. } => Algorithm::GaussSeidel,
            Parameters::Sor { .. } => Algorithm::Sor,
        }
    }

    pub fn iter_settings(&self) -> Option<&IterSettings> {
        match self {
            Parameters::Lup => None,
            Parameters::PointJacobi { iter_settings }
            | Parameters::GaussSeidel { iter_settings }
            | Parameters::Sor { iter_settings, .. } => Some(iter_settings),
        }
    }

    pub fn relaxation_factor(&self) -> Option<f64> {
        match self {
            Parameters::Sor {
                relaxation_factor, ..
            } => Some(relaxation_factor.value()),
            _ => None,
        }
    }

    /// Text block: ordinal; blank line and `max_iter tolerance` for
    /// iterative algorithms; relaxation factor line for SOR.
    pub fn to_text(&self) -> String {
        let mut rows = vec![self.algorithm().ordinal().to_string()];
        if let Some(settings) = self.iter_settings() {
            rows.push(String::new());
            rows.push(format!("{} {}", settings.max_iter, sci(settings.tolerance)));
        }
        if let Some(omega) = self.relaxation_factor() {
            rows.push(sci(omega));
        }
        rows.join("\n")
    }

    pub fn from_file(path: impl AsRef<Path>) -> BenchResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&contents)?;
        Ok(params)
    }

    pub fn to_file(&self, path: impl AsRef<Path>) -> BenchResult<()> {
        std::fs::write(path, serde_json::to_string(self)?)?;
        Ok(())
    }
}
