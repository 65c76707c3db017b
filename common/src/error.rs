use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("file {} not found", .0.display())]
    InputNotFound(PathBuf),
    #[error("results directory {} not found", .0.display())]
    ResultsDirNotFound(PathBuf),
    #[error("no result file matching {pattern} found in {}", dir.display())]
    NoResultFiles { dir: PathBuf, pattern: String },
    #[error("no valid data found in {}", .0.display())]
    NoValidData(PathBuf),
    #[error("row {row}: thread count must be positive")]
    InvalidThreads { row: usize },
    #[error("unsupported output format {0}, expected png or svg")]
    UnsupportedFormat(String),
}
