use std::{fmt, io::Read};

use csv::{ReaderBuilder, Trim};
use eyre::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ReportError;

/// The implementation a benchmark row was measured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variant {
    Sequential,
    Parallel,
    ParallelNowait,
}

impl Variant {
    pub const PARALLEL: [Variant; 2] = [Variant::Parallel, Variant::ParallelNowait];

    /// Maps a `Version` column label
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Sequential" => Some(Variant::Sequential),
            "Parallel" => Some(Variant::Parallel),
            "ParallelNOWAIT" => Some(Variant::ParallelNowait),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Variant::Sequential => "Sequential",
            Variant::Parallel => "Parallel",
            Variant::ParallelNowait => "Parallel NOWAIT",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Variant::Sequential => "Seq",
            Variant::Parallel => "Par",
            Variant::ParallelNowait => "NW",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One measurement: a variant run with a given number of threads
#[derive(Debug, Clone, PartialEq)]
pub struct BenchRecord {
    pub variant: Variant,
    pub threads: u32,
    pub avg_time: f64,
    pub speedup: f64,
    pub efficiency: f64,
    pub scalability: f64,
    pub throughput: f64,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Version")]
    version: String,
    #[serde(rename = "Threads")]
    threads: u32,
    #[serde(rename = "AvgTime(s)")]
    avg_time: f64,
    #[serde(rename = "Speedup")]
    speedup: f64,
    #[serde(rename = "Efficiency(%)")]
    efficiency: f64,
    #[serde(rename = "Scalability")]
    scalability: f64,
    #[serde(rename = "Passwords/sec", alias = "Throughput")]
    throughput: f64,
}

/// Parses a results table. Lines starting with `#` are skipped, rows with an
/// unknown `Version` are dropped.
pub fn parse_records<R: Read>(input: R) -> Result<Vec<BenchRecord>> {
    let mut reader = ReaderBuilder::new()
        .comment(Some(b'#'))
        .trim(Trim::All)
        .from_reader(input);

    let mut records = Vec::new();
    for (idx, row) in reader.deserialize::<RawRecord>().enumerate() {
        let row_number = idx + 1;
        let raw = row.with_context(|| format!("Parse benchmark row {row_number}"))?;

        let Some(variant) = Variant::from_label(&raw.version) else {
            warn!(
                "Skipping row {row_number} with unknown version {:?}",
                raw.version
            );
            continue;
        };
        if raw.threads == 0 {
            return Err(ReportError::InvalidThreads { row: row_number }.into());
        }

        records.push(BenchRecord {
            variant,
            threads: raw.threads,
            avg_time: raw.avg_time,
            speedup: raw.speedup,
            efficiency: raw.efficiency,
            scalability: raw.scalability,
            throughput: raw.throughput,
        });
    }
    debug!("Parsed {} benchmark rows", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Version,Threads,AvgTime(s),Speedup,Efficiency(%),Scalability,Passwords/sec\n";

    #[test]
    fn parses_rows_and_skips_comments() {
        let input = format!(
            "# password benchmark\n# iterations: 500\n{HEADER}\
             Sequential,1,12.5,1.0,100.0,1.0,263380\n\
             # parallel runs\n\
             Parallel, 4 , 3.4 ,3.67,91.9,0.92,968300\n"
        );
        let records = parse_records(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].variant, Variant::Sequential);
        assert_eq!(records[1].variant, Variant::Parallel);
        assert_eq!(records[1].threads, 4);
        assert_eq!(records[1].avg_time, 3.4);
        assert_eq!(records[1].throughput, 968300.0);
    }

    #[test]
    fn throughput_alias_is_accepted() {
        let input = "Version,Threads,AvgTime(s),Speedup,Efficiency(%),Scalability,Throughput\n\
                     ParallelNOWAIT,2,6.0,2.0,100.0,1.0,1000\n";
        let records = parse_records(input.as_bytes()).unwrap();
        assert_eq!(records[0].variant, Variant::ParallelNowait);
        assert_eq!(records[0].throughput, 1000.0);
    }

    #[test]
    fn unknown_versions_are_dropped() {
        let input = format!("{HEADER}Hybrid,2,6.0,2.0,100.0,1.0,1000\n");
        assert!(parse_records(input.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn header_only_yields_no_rows() {
        assert!(parse_records(HEADER.as_bytes()).unwrap().is_empty());
        assert!(parse_records("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn malformed_row_reports_row_number() {
        let input = format!(
            "{HEADER}Sequential,1,12.5,1.0,100.0,1.0,263380\nParallel,2,fast,1.9,95.0,0.95,5000\n"
        );
        let err = parse_records(input.as_bytes()).unwrap_err();
        assert!(format!("{err}").contains("row 2"), "{err}");
    }

    #[test]
    fn missing_column_is_an_error() {
        let input = "Version,Threads,AvgTime(s)\nSequential,1,12.5\n";
        assert!(parse_records(input.as_bytes()).is_err());
    }

    #[test]
    fn zero_threads_is_rejected() {
        let input = format!("{HEADER}Parallel,0,1.0,1.0,100.0,1.0,10\n");
        let err = parse_records(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::InvalidThreads { row: 1 })
        ));
    }

    #[test]
    fn variant_names() {
        assert_eq!(Variant::from_label("ParallelNOWAIT"), Some(Variant::ParallelNowait));
        assert_eq!(Variant::from_label("parallel"), None);
        assert_eq!(Variant::ParallelNowait.to_string(), "Parallel NOWAIT");
        assert_eq!(Variant::Parallel.short_name(), "Par");
    }
}
