// ─────────────────────────────────────────────────────────────────────
// Diffbench — Property-Based Tests (proptest) for diffbench-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for diffbench-types using proptest.
//!
//! Covers: Grid mesh invariants, Grid JSON round trip, per-algorithm
//! parameter field inclusion.

use diffbench_types::config::{Algorithm, Parameters};
use diffbench_types::format::sci;
use diffbench_types::grid::Grid;
use proptest::prelude::*;

// ── Grid Mesh Invariants ─────────────────────────────────────────────

proptest! {
    /// Mesh arrays are shaped (M, N).
    #[test]
    fn mesh_shape_matches_grid(
        m in 1usize..64,
        n in 1usize..64,
        a in 0.01f64..100.0,
        b in 0.01f64..100.0,
    ) {
        let grid = Grid::new(a, b, m, n).unwrap();
        let (xx, yy) = grid.mesh();
        prop_assert_eq!(xx.dim(), (m, n));
        prop_assert_eq!(yy.dim(), (m, n));
        prop_assert_eq!(grid.size(), m * n);
    }

    /// Only strictly interior coordinates are produced.
    #[test]
    fn mesh_is_strictly_interior(
        m in 1usize..64,
        n in 1usize..64,
        a in 0.01f64..100.0,
        b in 0.01f64..100.0,
    ) {
        let grid = Grid::new(a, b, m, n).unwrap();
        let (xx, yy) = grid.mesh();
        for &x in xx.iter() {
            prop_assert!(x > 0.0 && x < a, "x={} outside (0, {})", x, a);
        }
        for &y in yy.iter() {
            prop_assert!(y > 0.0 && y < b, "y={} outside (0, {})", y, b);
        }
    }

    /// Interior x coordinates are uniformly spaced by dx.
    #[test]
    fn mesh_uniform_spacing(m in 2usize..64, a in 0.1f64..10.0) {
        let grid = Grid::new(a, 1.0, m, 3).unwrap();
        let x = grid.x();
        prop_assert!((x[0] - grid.dx()).abs() < 1e-12 * a.max(1.0));
        for i in 1..m {
            let delta = x[i] - x[i - 1];
            prop_assert!((delta - grid.dx()).abs() < 1e-10 * a.max(1.0),
                "Non-uniform spacing at {}: delta={}, dx={}", i, delta, grid.dx());
        }
    }

    /// Negative extents never construct.
    #[test]
    fn negative_extent_rejected(a in -100.0f64..-1e-9, m in 1usize..16) {
        prop_assert!(Grid::new(a, 1.0, m, m).is_err());
        prop_assert!(Grid::new(1.0, a, m, m).is_err());
    }

    /// JSON encoding is lossless.
    #[test]
    fn grid_json_round_trip(
        m in 1usize..512,
        n in 1usize..512,
        a in 1e-6f64..1e6,
        b in 1e-6f64..1e6,
    ) {
        let grid = Grid::new(a, b, m, n).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, grid);
    }
}

// ── Parameters Field Inclusion ───────────────────────────────────────

proptest! {
    /// Iterative algorithms always serialize iteration settings; only SOR
    /// serializes a relaxation factor.
    #[test]
    fn iterative_field_inclusion(
        tolerance in 1e-14f64..1.0,
        max_iter in 1u64..1_000_000,
        omega in 1.0001f64..1.9999,
    ) {
        let cases = [
            Parameters::point_jacobi(tolerance, max_iter).unwrap(),
            Parameters::gauss_seidel(tolerance, max_iter).unwrap(),
            Parameters::sor(tolerance, max_iter, omega).unwrap(),
        ];
        for params in cases {
            let value = serde_json::to_value(params).unwrap();
            prop_assert!(value.get("iter_settings").is_some());
            prop_assert_eq!(
                value.get("relaxation_factor").is_some(),
                params.algorithm() == Algorithm::Sor
            );
            let back: Parameters = serde_json::from_value(value).unwrap();
            prop_assert_eq!(back, params);
        }
    }

    /// The text block always starts with the algorithm ordinal and has the
    /// number of lines its algorithm requires.
    #[test]
    fn text_block_shape(
        tolerance in 1e-14f64..1.0,
        max_iter in 1u64..1_000_000,
        omega in 1.0001f64..1.9999,
    ) {
        let cases = [
            (Parameters::lup(), 1),
            (Parameters::point_jacobi(tolerance, max_iter).unwrap(), 3),
            (Parameters::gauss_seidel(tolerance, max_iter).unwrap(), 3),
            (Parameters::sor(tolerance, max_iter, omega).unwrap(), 4),
        ];
        for (params, lines) in cases {
            let text = params.to_text();
            let rows: Vec<&str> = text.split('\n').collect();
            prop_assert_eq!(rows.len(), lines);
            prop_assert_eq!(rows[0], params.algorithm().ordinal().to_string());
        }
    }

    /// `%14.8e` output parses back within its 9 significant digits.
    #[test]
    fn sci_parses_back(v in -1e300f64..1e300) {
        let parsed: f64 = sci(v).trim().parse().unwrap();
        prop_assert!((parsed - v).abs() <= v.abs() * 1e-8);
    }
}
