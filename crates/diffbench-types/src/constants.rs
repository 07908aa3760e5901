// ─────────────────────────────────────────────────────────────────────
// Diffbench — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// FWHM → standard deviation: σ = fwhm / (2√(2 ln 2)).
pub const FWHM_PER_SIGMA: f64 = 2.354_820_045_030_949_3;

/// Default iteration tolerance of the external solver.
pub const DEFAULT_TOLERANCE: f64 = 1.0e-8;

/// Default iteration cap of the external solver.
pub const DEFAULT_MAX_ITER: u64 = 100;

/// Benchmark point source location (x, y).
pub const BENCH_SOURCE_CENTER: (f64, f64) = (0.25, 0.25);

/// Benchmark point source spread.
pub const BENCH_SOURCE_FWHM: f64 = 0.05;

/// Side length of the square benchmark domain.
pub const BENCH_DOMAIN_LENGTH: f64 = 1.0;

/// Width of the `%14.8e` text fields read by the solver.
pub const TEXT_FIELD_WIDTH: usize = 14;

/// Mantissa digits of the `%14.8e` text fields.
pub const TEXT_FIELD_PRECISION: usize = 8;

/// Solver reports time in milliseconds.
pub const MILLIS_PER_SECOND: f64 = 1.0e3;

/// Measurement harness reports memory in bytes.
pub const BYTES_PER_KILOBYTE: f64 = 1024.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fwhm_per_sigma_matches_closed_form() {
        let expected = 2.0 * (2.0 * 2f64.ln()).sqrt();
        assert!((FWHM_PER_SIGMA - expected).abs() < 1e-15);
    }
}
