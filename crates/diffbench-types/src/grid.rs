// ─────────────────────────────────────────────────────────────────────
// Diffbench — Grid
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{BenchError, BenchResult};
use crate::format::sci;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rectangular domain `[0, a] × [0, b]` discretized by `m × n` interior nodes.
///
/// Boundary nodes are implicit: the solver pads each axis with one node on
/// either side, so the spacing is `a / (m + 1)` and `b / (n + 1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridRecord", into = "GridRecord")]
pub struct Grid {
    a: f64,
    b: f64,
    m: usize,
    n: usize,
}

impl Grid {
    pub fn new(a: f64, b: f64, m: usize, n: usize) -> BenchResult<Self> {
        if !(a.is_finite() && a > 0.0) {
            return Err(BenchError::invalid("a", "positive", a));
        }
        if !(b.is_finite() && b > 0.0) {
            return Err(BenchError::invalid("b", "positive", b));
        }
        if m == 0 {
            return Err(BenchError::invalid("M", "positive", m));
        }
        if n == 0 {
            return Err(BenchError::invalid("N", "positive", n));
        }
        Ok(Grid { a, b, m, n })
    }

    /// Square domain of side `l` with `n × n` interior nodes.
    pub fn build_square(l: f64, n: usize) -> BenchResult<Self> {
        Grid::new(l, l, n, n)
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn m(&self) -> usize {
        self.m
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    pub fn size(&self) -> usize {
        self.m * self.n
    }

    pub fn dx(&self) -> f64 {
        self.a / (self.m + 1) as f64
    }

    pub fn dy(&self) -> f64 {
        self.b / (self.n + 1) as f64
    }

    /// Interior x coordinates: `linspace(0, a, m + 2)` without its endpoints.
    pub fn x(&self) -> Array1<f64> {
        interior_linspace(self.a, self.m)
    }

    /// Interior y coordinates: `linspace(0, b, n + 2)` without its endpoints.
    pub fn y(&self) -> Array1<f64> {
        interior_linspace(self.b, self.n)
    }

    /// Coordinate fields `(X, Y)` shaped `(m, n)`.
    ///
    /// Rows follow the x axis (`X[[i, j]] = x[i]`, `Y[[i, j]] = y[j]`), the
    /// same orientation the solver uses when it reads `M` rows of `N` values.
    pub fn mesh(&self) -> (Array2<f64>, Array2<f64>) {
        let x = self.x();
        let y = self.y();
        let xx = Array2::from_shape_fn(self.shape(), |(i, _)| x[i]);
        let yy = Array2::from_shape_fn(self.shape(), |(_, j)| y[j]);
        (xx, yy)
    }

    /// Two-line text block: extents, then point counts.
    pub fn to_text(&self) -> String {
        format!("{} {}\n{} {}", sci(self.a), sci(self.b), self.m, self.n)
    }

    pub fn from_file(path: impl AsRef<Path>) -> BenchResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let grid: Self = serde_json::from_str(&contents)?;
        Ok(grid)
    }

    pub fn to_file(&self, path: impl AsRef<Path>) -> BenchResult<()> {
        std::fs::write(path, serde_json::to_string(self)?)?;
        Ok(())
    }
}

fn interior_linspace(extent: f64, points: usize) -> Array1<f64> {
    let full = Array1::linspace(0.0, extent, points + 2);
    full.slice(ndarray::s![1..points + 1]).to_owned()
}

/// Wire form `{space: {X, Y}, points: {NX, NY}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridRecord {
    pub space: SpaceRecord,
    pub points: PointsRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceRecord {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsRecord {
    #[serde(rename = "NX")]
    pub nx: usize,
    #[serde(rename = "NY")]
    pub ny: usize,
}

impl TryFrom<GridRecord> for Grid {
    type Error = BenchError;

    fn try_from(record: GridRecord) -> BenchResult<Self> {
        Grid::new(
            record.space.x,
            record.space.y,
            record.points.nx,
            record.points.ny,
        )
    }
}

impl From<Grid> for GridRecord {
    fn from(grid: Grid) -> Self {
        GridRecord {
            space: SpaceRecord {
                x: grid.a,
                y: grid.b,
            },
            points: PointsRecord {
                nx: grid.m,
                ny: grid.n,
            },
        }
    }
}
