//! Running the solver executable under the measurement harness.

use crate::config::MeasureHarness;
use diffbench_core::input::InputFormat;
use diffbench_core::solution::Solution;
use diffbench_types::error::{BenchError, BenchResult};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// Something that turns an input file into a solution.
pub trait SolverRunner {
    fn run(&self, input_path: &Path, result_path: &Path) -> BenchResult<Solution>;
}

/// Spawns the solver as a subprocess wrapped in a [`MeasureHarness`].
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    pub executable: PathBuf,
    pub harness: MeasureHarness,
    pub input_format: InputFormat,
}

impl ProcessRunner {
    pub fn new(executable: impl Into<PathBuf>, harness: MeasureHarness, input_format: InputFormat) -> Self {
        ProcessRunner {
            executable: executable.into(),
            harness,
            input_format,
        }
    }

    /// `harness… executable <input> [--input-json] -o <result> --output-json`
    pub fn command(&self, input_path: &Path, result_path: &Path) -> Command {
        let mut command = Command::new(&self.harness.program);
        command.args(&self.harness.args);
        command.arg(&self.executable).arg(input_path);
        if self.input_format == InputFormat::Json {
            command.arg("--input-json");
        }
        command.arg("-o").arg(result_path).arg("--output-json");
        command
    }
}

impl SolverRunner for ProcessRunner {
    fn run(&self, input_path: &Path, result_path: &Path) -> BenchResult<Solution> {
        let mut command = self.command(input_path, result_path);
        debug!(?command, "spawning solver");

        let output = command.output()?;
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            warn!(status = %output.status, input = %input_path.display(), "solver failed");
            return Err(BenchError::SolverFailed {
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        let peak = parse_peak_memory(&stderr)?;
        Ok(Solution::from_file(result_path)?.with_memory(peak))
    }
}

/// Peak memory from the harness's stderr: the last integer token on the
/// last non-empty line.
///
/// Handles both `time -l` (`  1867776  peak memory footprint`) and
/// single-value reports such as GNU `time -f %M`.
pub fn parse_peak_memory(stderr: &str) -> BenchResult<u64> {
    let last_line = stderr
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| BenchError::MemoryParse(stderr.to_string()))?;

    last_line
        .split_whitespace()
        .rev()
        .find_map(|token| token.parse::<u64>().ok())
        .ok_or_else(|| BenchError::MemoryParse(last_line.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bsd_time_output() {
        let stderr = "\
        0.01 real         0.00 user         0.00 sys
             1720320  maximum resident set size
                   0  average shared memory size
                 155  page reclaims
             1867776  peak memory footprint
";
        assert_eq!(parse_peak_memory(stderr).unwrap(), 1_867_776);
    }

    #[test]
    fn test_parse_single_value() {
        assert_eq!(parse_peak_memory("solver chatter\n4096\n\n").unwrap(), 4096);
    }

    #[test]
    fn test_parse_failures() {
        assert!(matches!(parse_peak_memory(""), Err(BenchError::MemoryParse(_))));
        assert!(matches!(
            parse_peak_memory("1234\nno numbers here\n"),
            Err(BenchError::MemoryParse(_))
        ));
    }

    #[test]
    fn test_command_line_json() {
        let runner = ProcessRunner::new("/opt/solver", MeasureHarness::default(), InputFormat::Json);
        let command = runner.command(Path::new("p4_lup.json"), Path::new("p4_lup_result.json"));
        assert_eq!(command.get_program(), "time");
        let args: Vec<_> = command.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            [
                "-lha",
                "/opt/solver",
                "p4_lup.json",
                "--input-json",
                "-o",
                "p4_lup_result.json",
                "--output-json"
            ]
        );
    }

    #[test]
    fn test_command_line_text_omits_input_flag() {
        let harness = MeasureHarness {
            program: "/usr/bin/time".into(),
            args: vec![],
        };
        let runner = ProcessRunner::new("solver", harness, InputFormat::Text);
        let command = runner.command(Path::new("p4_gs.txt"), Path::new("out.json"));
        let args: Vec<_> = command.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, ["solver", "p4_gs.txt", "-o", "out.json", "--output-json"]);
    }
}
