use std::{fmt, path::PathBuf, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            other => Err(ReportError::UnsupportedFormat(other.to_owned())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Report settings, read from an optional yaml file. Missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Searched for the latest result file when no input is given
    pub results_dir: PathBuf,
    /// Regex a file name must match to count as a result file
    pub file_pattern: String,
    pub format: OutputFormat,
    /// Second title line of the summary table and the combined figure
    pub subtitle: String,
    /// Y axis label of the throughput chart
    pub throughput_label: String,
    pub chart_size: (u32, u32),
    pub table_size: (u32, u32),
    pub combined_size: (u32, u32),
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("benchmark_results"),
            file_pattern: r"^.*\.csv$".to_owned(),
            format: OutputFormat::default(),
            subtitle: "Password Decryption Parallel Comparison".to_owned(),
            throughput_label: "Passwords/sec".to_owned(),
            chart_size: (1200, 720),
            table_size: (1200, 960),
            combined_size: (2400, 1440),
        }
    }
}
