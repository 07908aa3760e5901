// ─────────────────────────────────────────────────────────────────────
// Diffbench — Matrix Wire Format
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Row-major `{m_rows, m_cols, m_data}` matrix encoding.
//!
//! This is how the solver executable (de)serializes its dense matrices,
//! both for the source field it reads and the flux field it writes.

use crate::error::{BenchError, BenchResult};
use ndarray::Array2;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRecord {
    pub m_rows: usize,
    pub m_cols: usize,
    pub m_data: Vec<f64>,
}

impl MatrixRecord {
    pub fn from_array(array: &Array2<f64>) -> Self {
        let (rows, cols) = array.dim();
        MatrixRecord {
            m_rows: rows,
            m_cols: cols,
            // logical (row-major) order regardless of memory layout
            m_data: array.iter().copied().collect(),
        }
    }

    /// Rebuild the dense array; the data length must equal rows × cols.
    pub fn into_array(self) -> BenchResult<Array2<f64>> {
        let len = self.m_data.len();
        if self.m_rows.checked_mul(self.m_cols) != Some(len) {
            return Err(BenchError::MatrixLength {
                rows: self.m_rows,
                cols: self.m_cols,
                len,
            });
        }
        Array2::from_shape_vec((self.m_rows, self.m_cols), self.m_data).map_err(|_| {
            BenchError::MatrixLength {
                rows: self.m_rows,
                cols: self.m_cols,
                len,
            }
        })
    }
}

/// For `#[serde(with = "diffbench_types::matrix")]` on `Array2<f64>` fields.
pub fn serialize<S: Serializer>(array: &Array2<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    MatrixRecord::from_array(array).serialize(serializer)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Array2<f64>, D::Error> {
    MatrixRecord::deserialize(deserializer)?
        .into_array()
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_row_major_fill() {
        let record = MatrixRecord {
            m_rows: 2,
            m_cols: 3,
            m_data: vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        };
        let a = record.into_array().unwrap();
        assert_eq!(a.dim(), (2, 3));
        assert_eq!(a[[0, 2]], 3.0);
        assert_eq!(a[[1, 0]], 4.0);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let record = MatrixRecord {
            m_rows: 2,
            m_cols: 2,
            m_data: vec![1.0, 2.0, 3.0],
        };
        match record.into_array() {
            Err(BenchError::MatrixLength { rows, cols, len }) => {
                assert_eq!((rows, cols, len), (2, 2, 3));
            }
            other => panic!("expected MatrixLength, got {other:?}"),
        }
    }

    #[test]
    fn test_transposed_view_flattens_logically() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let t = a.t().to_owned();
        let record = MatrixRecord::from_array(&t);
        assert_eq!(record.m_data, vec![1.0, 3.0, 2.0, 4.0]);
    }

    #[test]
    fn test_serde_with_rejects_bad_length() {
        #[derive(Debug, Deserialize)]
        struct Holder {
            #[serde(with = "crate::matrix")]
            #[allow(dead_code)]
            field: Array2<f64>,
        }
        let json = r#"{"field":{"m_rows":3,"m_cols":1,"m_data":[1.0]}}"#;
        let err = serde_json::from_str::<Holder>(json).unwrap_err();
        assert!(err.to_string().contains("does not match"));
    }
}
