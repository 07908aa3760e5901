//! Complete solver invocation request: parameters plus problem.
//!
//! JSON is `{params, problem}`. Text is the parameters block, a blank line,
//! and the system block, which is what the solver reads without
//! `--input-json`.

use crate::system::{Coefficients, System};
use diffbench_types::config::{Algorithm, Parameters};
use diffbench_types::error::{BenchError, BenchResult};
use diffbench_types::grid::Grid;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// On-disk encoding of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    #[default]
    Json,
    Text,
}

impl InputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            InputFormat::Json => "json",
            InputFormat::Text => "txt",
        }
    }
}

impl FromStr for InputFormat {
    type Err = BenchError;

    fn from_str(s: &str) -> BenchResult<Self> {
        match s {
            "json" => Ok(InputFormat::Json),
            "text" | "txt" => Ok(InputFormat::Text),
            other => Err(BenchError::ConfigError(format!("unknown input format `{other}`"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Input {
    pub params: Parameters,
    #[serde(rename = "problem")]
    pub system: System,
}

impl Input {
    pub fn new(params: Parameters, system: System) -> Self {
        Input { params, system }
    }

    pub fn to_text(&self) -> String {
        [self.params.to_text(), String::new(), self.system.to_text()].join("\n")
    }

    /// Parse the text grammar back, reading whitespace-separated tokens the
    /// way the solver does (blank lines carry no meaning).
    pub fn from_text(text: &str) -> BenchResult<Self> {
        let mut tokens = Tokens::new(text);

        let ordinal: usize = tokens.next("algorithm")?;
        let params = match Algorithm::from_ordinal(ordinal)? {
            Algorithm::Lup => Parameters::lup(),
            iterative => {
                let max_iter: u64 = tokens.next("max_iter")?;
                let tolerance: f64 = tokens.next("tolerance")?;
                match iterative {
                    Algorithm::PointJacobi => Parameters::point_jacobi(tolerance, max_iter)?,
                    Algorithm::GaussSeidel => Parameters::gauss_seidel(tolerance, max_iter)?,
                    _ => {
                        let omega: f64 = tokens.next("relaxation factor")?;
                        Parameters::sor(tolerance, max_iter, omega)?
                    }
                }
            }
        };

        let a: f64 = tokens.next("a")?;
        let b: f64 = tokens.next("b")?;
        let m: usize = tokens.next("M")?;
        let n: usize = tokens.next("N")?;
        let grid = Grid::new(a, b, m, n)?;

        let diffusion_coefficient: f64 = tokens.next("D")?;
        let absorption_scattering: f64 = tokens.next("Sa")?;

        let mut values = Vec::with_capacity(grid.size());
        for _ in 0..grid.size() {
            values.push(tokens.next::<f64>("source")?);
        }
        if let Some(extra) = tokens.remaining() {
            return Err(BenchError::Parse(format!("unexpected trailing token `{extra}`")));
        }
        let source = Array2::from_shape_vec(grid.shape(), values)
            .map_err(|e| BenchError::Parse(e.to_string()))?;

        let system = System::new(
            grid,
            Coefficients {
                absorption_scattering,
                diffusion_coefficient,
            },
            Some(source),
        )?;
        Ok(Input { params, system })
    }

    pub fn encode(&self, format: InputFormat) -> BenchResult<String> {
        Ok(match format {
            InputFormat::Json => serde_json::to_string(self)?,
            InputFormat::Text => self.to_text(),
        })
    }

    /// Write to `path` in the given format.
    pub fn write(&self, path: impl AsRef<Path>, format: InputFormat) -> BenchResult<()> {
        std::fs::write(path, self.encode(format)?)?;
        Ok(())
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> BenchResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let input: Self = serde_json::from_str(&contents)?;
        Ok(input)
    }

    pub fn from_text_file(path: impl AsRef<Path>) -> BenchResult<Self> {
        Input::from_text(&std::fs::read_to_string(path)?)
    }
}

struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Tokens {
            inner: text.split_whitespace(),
        }
    }

    fn next<T: FromStr>(&mut self, what: &str) -> BenchResult<T>
    where
        T::Err: std::fmt::Display,
    {
        let token = self
            .inner
            .next()
            .ok_or_else(|| BenchError::Parse(format!("missing {what}")))?;
        token
            .parse()
            .map_err(|e| BenchError::Parse(format!("bad {what} `{token}`: {e}")))
    }

    fn remaining(&mut self) -> Option<&'a str> {
        self.inner.next()
    }
}
