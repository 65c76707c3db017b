use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use itertools::Itertools;
use regex::Regex;
use tokio::fs::read_dir;
use tracing::debug;

use crate::error::ReportError;

/// Formats `value` with `decimals` fraction digits and `,` between thousands
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let grouped = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .join(",");

    let negative = value.is_sign_negative()
        && formatted
            .bytes()
            .any(|b| b.is_ascii_digit() && b != b'0');
    let sign = if negative { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// `results/run.csv` + `_speedup` + `png` -> `results/run_speedup.png`
pub fn output_path(input: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{suffix}.{extension}"))
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Picks the lexicographically last file in `dir` whose name matches `pattern`
pub async fn find_latest_result(dir: &Path, pattern: &str) -> Result<PathBuf> {
    if !dir.is_dir() {
        return Err(ReportError::ResultsDirNotFound(dir.to_path_buf()).into());
    }
    let name_regex = Regex::new(pattern).context(format!("Parse file pattern {pattern}"))?;

    let mut entries = read_dir(dir)
        .await
        .context(format!("Read results directory {}", dir.display()))?;
    let mut candidates = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name_regex.is_match(&name) {
            candidates.push(name);
        }
    }
    debug!("Found {} result files in {}", candidates.len(), dir.display());

    candidates
        .into_iter()
        .max()
        .map(|name| dir.join(name))
        .ok_or_else(|| {
            ReportError::NoResultFiles {
                dir: dir.to_path_buf(),
                pattern: pattern.to_owned(),
            }
            .into()
        })
}
