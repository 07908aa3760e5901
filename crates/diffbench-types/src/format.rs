// ─────────────────────────────────────────────────────────────────────
// Diffbench — Text Formatting
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Fixed-width scientific notation for the solver's text input.
//!
//! The solver reads numbers written with C's `%14.8e`: right-aligned in
//! 14 columns, 8 mantissa digits, signed exponent of at least two digits
//! (`1.00000000e+00`). Rust's `{:e}` drops the sign and padding of the
//! exponent, so it is rebuilt here.

use crate::constants::{TEXT_FIELD_PRECISION, TEXT_FIELD_WIDTH};

/// Format `value` the way `printf("%14.8e", value)` does.
pub fn sci(value: f64) -> String {
    let raw = format!("{:.*e}", TEXT_FIELD_PRECISION, value);
    let body = match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exponent.abs())
        }
        // inf / NaN carry no exponent
        None => raw.to_lowercase(),
    };
    format!("{:>width$}", body, width = TEXT_FIELD_WIDTH)
}

/// Space-joined `%14.8e` fields.
pub fn sci_row<'a>(values: impl IntoIterator<Item = &'a f64>) -> String {
    values
        .into_iter()
        .map(|v| sci(*v))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sci_matches_printf() {
        assert_eq!(sci(1.0), "1.00000000e+00");
        assert_eq!(sci(0.0), "0.00000000e+00");
        assert_eq!(sci(-2.5e-3), "-2.50000000e-03");
        assert_eq!(sci(1.0e-8), "1.00000000e-08");
        assert_eq!(sci(6.02214076e123), "6.02214076e+123");
    }

    #[test]
    fn test_sci_is_right_aligned() {
        assert_eq!(sci(3.0).len(), 14);
        assert_eq!(sci(-3.0), "-3.00000000e+00");
    }

    #[test]
    fn test_sci_row_joins_with_spaces() {
        let row = sci_row(&[1.0, 2.0]);
        assert_eq!(row, "1.00000000e+00 2.00000000e+00");
    }

    #[test]
    fn test_sci_round_trips_through_parse() {
        for v in [0.1, 123.456, 7.5e-12] {
            let parsed: f64 = sci(v).trim().parse().unwrap();
            assert!((parsed - v).abs() <= v.abs() * 1e-8);
        }
    }
}
