//! Normalized 2D point-spread kernels for source construction.
//!
//! Both kernels are evaluated over whole coordinate fields at once (the
//! `X`, `Y` arrays from `Grid::mesh`).

use diffbench_types::constants::FWHM_PER_SIGMA;
use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Point-spread shape used by point sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kernel {
    #[default]
    Gaussian,
    Lorentzian,
}

impl Kernel {
    /// Kernel value at a single point.
    pub fn eval(self, x: f64, y: f64, x0: f64, y0: f64, fwhm: f64) -> f64 {
        let r_sq = (x - x0).powi(2) + (y - y0).powi(2);
        match self {
            Kernel::Gaussian => {
                let sigma = fwhm / FWHM_PER_SIGMA;
                let two_sigma_sq = 2.0 * sigma * sigma;
                (-r_sq / two_sigma_sq).exp() / (PI * two_sigma_sq)
            }
            Kernel::Lorentzian => {
                let half = 0.5 * fwhm;
                fwhm / (2.0 * PI) / (r_sq + half * half).powf(1.5)
            }
        }
    }

    /// Kernel evaluated over a coordinate field.
    pub fn field(self, x: &Array2<f64>, y: &Array2<f64>, x0: f64, y0: f64, fwhm: f64) -> Array2<f64> {
        Zip::from(x)
            .and(y)
            .map_collect(|&xi, &yi| self.eval(xi, yi, x0, y0, fwhm))
    }
}

/// 2D Gaussian density centred at `(x0, y0)`:
/// `exp(-r² / 2σ²) / (2πσ²)` with `σ = fwhm / (2√(2 ln 2))`.
pub fn gaussian_2d(x: &Array2<f64>, y: &Array2<f64>, x0: f64, y0: f64, fwhm: f64) -> Array2<f64> {
    Kernel::Gaussian.field(x, y, x0, y0, fwhm)
}

/// 2D Lorentzian falloff centred at `(x0, y0)`:
/// `fwhm / 2π / (r² + (fwhm/2)²)^{3/2}`.
pub fn lorentzian_2d(x: &Array2<f64>, y: &Array2<f64>, x0: f64, y0: f64, fwhm: f64) -> Array2<f64> {
    Kernel::Lorentzian.field(x, y, x0, y0, fwhm)
}
