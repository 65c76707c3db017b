use std::{io::Read, path::Path};

use eyre::Result;
use itertools::Itertools;
use tracing::debug;

use crate::{
    error::ReportError,
    record::{BenchRecord, Variant, parse_records},
};

/// Where the sequential reference time comes from
#[derive(Debug, Clone, PartialEq)]
pub struct Baseline<'a> {
    pub record: &'a BenchRecord,
    /// The row is a 1-thread parallel run standing in for a missing sequential row
    pub fallback: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    records: Vec<BenchRecord>,
}

impl ResultTable {
    pub fn new(records: Vec<BenchRecord>) -> Self {
        Self { records }
    }

    /// Parses `input`, failing with [`ReportError::NoValidData`] when no usable row remains
    pub fn parse<R: Read>(input: R, source: &Path) -> Result<Self> {
        let records = parse_records(input)?;
        if records.is_empty() {
            return Err(ReportError::NoValidData(source.to_path_buf()).into());
        }
        let table = Self::new(records);
        debug!(
            "Loaded table: {} sequential, {} parallel, {} nowait rows",
            table.count(Variant::Sequential),
            table.count(Variant::Parallel),
            table.count(Variant::ParallelNowait)
        );
        Ok(table)
    }

    pub fn records(&self) -> &[BenchRecord] {
        &self.records
    }

    pub fn count(&self, variant: Variant) -> usize {
        self.records.iter().filter(|r| r.variant == variant).count()
    }

    pub fn has(&self, variant: Variant) -> bool {
        self.records.iter().any(|r| r.variant == variant)
    }

    /// Rows of one variant ordered by thread count, ties kept in file order
    pub fn series(&self, variant: Variant) -> Vec<&BenchRecord> {
        self.records
            .iter()
            .filter(|r| r.variant == variant)
            .sorted_by_key(|r| r.threads)
            .collect()
    }

    pub fn sequential(&self) -> Option<&BenchRecord> {
        self.first(Variant::Sequential, None)
    }

    pub fn baseline(&self) -> Option<Baseline<'_>> {
        if let Some(record) = self.sequential() {
            return Some(Baseline {
                record,
                fallback: false,
            });
        }
        Variant::PARALLEL
            .iter()
            .find_map(|v| self.first(*v, Some(1)))
            .map(|record| Baseline {
                record,
                fallback: true,
            })
    }

    /// Thread counts used for x ticks and for ordering the summary table
    pub fn thread_axis(&self) -> Vec<u32> {
        let source = [
            Variant::Parallel,
            Variant::ParallelNowait,
            Variant::Sequential,
        ]
        .into_iter()
        .find(|v| self.has(*v));

        match source {
            Some(variant) => self
                .records
                .iter()
                .filter(|r| r.variant == variant)
                .map(|r| r.threads)
                .sorted()
                .dedup()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Sequential row first, then Parallel/NOWAIT pairs per thread count
    pub fn summary_rows(&self) -> Vec<&BenchRecord> {
        let mut rows: Vec<&BenchRecord> = self.sequential().into_iter().collect();
        for threads in self.thread_axis() {
            for variant in Variant::PARALLEL {
                if let Some(record) = self.first(variant, Some(threads)) {
                    rows.push(record);
                }
            }
        }
        rows
    }

    /// Highest speedup of a variant, first row wins ties. Non finite speedups are ignored.
    pub fn best(&self, variant: Variant) -> Option<&BenchRecord> {
        self.records
            .iter()
            .filter(|r| r.variant == variant && r.speedup.is_finite())
            .fold(None, |best: Option<&BenchRecord>, r| match best {
                Some(b) if b.speedup >= r.speedup => Some(b),
                _ => Some(r),
            })
    }

    fn first(&self, variant: Variant, threads: Option<u32>) -> Option<&BenchRecord> {
        self.records
            .iter()
            .find(|r| r.variant == variant && threads.is_none_or(|t| r.threads == t))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(variant: Variant, threads: u32, avg_time: f64, speedup: f64) -> BenchRecord {
        BenchRecord {
            variant,
            threads,
            avg_time,
            speedup,
            efficiency: speedup / threads as f64 * 100.0,
            scalability: speedup / threads as f64,
            throughput: 1000.0 / avg_time,
        }
    }

    fn full_table() -> ResultTable {
        ResultTable::new(vec![
            record(Variant::Sequential, 1, 16.0, 1.0),
            record(Variant::Parallel, 4, 4.4, 3.6),
            record(Variant::Parallel, 2, 8.2, 1.95),
            record(Variant::Parallel, 8, 2.5, 6.4),
            record(Variant::ParallelNowait, 2, 8.1, 1.97),
            record(Variant::ParallelNowait, 4, 4.3, 3.7),
            record(Variant::ParallelNowait, 8, 2.4, 6.6),
        ])
    }

    #[test]
    fn empty_input_is_no_valid_data() {
        let input = "# nothing measured\nVersion,Threads,AvgTime(s),Speedup,Efficiency(%),Scalability,Passwords/sec\n";
        let err = ResultTable::parse(input.as_bytes(), Path::new("empty.csv")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReportError>(),
            Some(ReportError::NoValidData(_))
        ));
        assert!(err.to_string().contains("no valid data"));
    }

    #[test]
    fn series_are_sorted_by_threads() {
        let table = full_table();
        let threads = table
            .series(Variant::Parallel)
            .iter()
            .map(|r| r.threads)
            .collect::<Vec<_>>();
        assert_eq!(threads, vec![2, 4, 8]);
        assert!(table.series(Variant::Sequential).len() == 1);
    }

    #[test]
    fn thread_axis_falls_back_through_variants() {
        assert_eq!(full_table().thread_axis(), vec![2, 4, 8]);

        let nowait_only = ResultTable::new(vec![
            record(Variant::ParallelNowait, 16, 1.0, 12.0),
            record(Variant::ParallelNowait, 1, 12.0, 1.0),
            record(Variant::ParallelNowait, 16, 1.1, 11.0),
        ]);
        assert_eq!(nowait_only.thread_axis(), vec![1, 16]);

        let sequential_only = ResultTable::new(vec![record(Variant::Sequential, 1, 10.0, 1.0)]);
        assert_eq!(sequential_only.thread_axis(), vec![1]);

        assert!(ResultTable::default().thread_axis().is_empty());
    }

    #[test]
    fn baseline_prefers_sequential_then_single_thread_runs() {
        let table = full_table();
        let baseline = table.baseline().unwrap();
        assert!(!baseline.fallback);
        assert_eq!(baseline.record.avg_time, 16.0);

        let parallel = ResultTable::new(vec![
            record(Variant::ParallelNowait, 1, 15.0, 1.0),
            record(Variant::Parallel, 2, 8.0, 2.0),
            record(Variant::Parallel, 1, 15.5, 1.0),
        ]);
        let baseline = parallel.baseline().unwrap();
        assert!(baseline.fallback);
        assert_eq!(baseline.record.variant, Variant::Parallel);
        assert_eq!(baseline.record.avg_time, 15.5);

        let no_single = ResultTable::new(vec![record(Variant::Parallel, 2, 8.0, 2.0)]);
        assert!(no_single.baseline().is_none());
    }

    #[test]
    fn summary_rows_interleave_parallel_variants() {
        let table = full_table();
        let rows = table
            .summary_rows()
            .iter()
            .map(|r| (r.variant, r.threads))
            .collect::<Vec<_>>();
        assert_eq!(
            rows,
            vec![
                (Variant::Sequential, 1),
                (Variant::Parallel, 2),
                (Variant::ParallelNowait, 2),
                (Variant::Parallel, 4),
                (Variant::ParallelNowait, 4),
                (Variant::Parallel, 8),
                (Variant::ParallelNowait, 8),
            ]
        );
    }

    #[test]
    fn summary_rows_skip_counts_missing_from_nowait() {
        let table = ResultTable::new(vec![
            record(Variant::Parallel, 2, 8.0, 2.0),
            record(Variant::Parallel, 4, 4.0, 4.0),
            record(Variant::ParallelNowait, 4, 3.9, 4.1),
            record(Variant::ParallelNowait, 6, 3.0, 5.0),
        ]);
        let rows = table
            .summary_rows()
            .iter()
            .map(|r| (r.variant, r.threads))
            .collect::<Vec<_>>();
        assert_eq!(
            rows,
            vec![
                (Variant::Parallel, 2),
                (Variant::Parallel, 4),
                (Variant::ParallelNowait, 4),
            ]
        );
    }

    #[test]
    fn best_takes_first_maximum() {
        let table = ResultTable::new(vec![
            record(Variant::Parallel, 4, 4.0, 4.0),
            record(Variant::Parallel, 8, 4.1, 4.0),
            record(Variant::Parallel, 2, 8.0, 2.0),
        ]);
        assert_eq!(table.best(Variant::Parallel).unwrap().threads, 4);
        assert!(table.best(Variant::ParallelNowait).is_none());
    }

    #[test]
    fn best_ignores_nan_speedup() {
        let input = "Version,Threads,AvgTime(s),Speedup,Efficiency(%),Scalability,Passwords/sec\n\
                     Parallel,2,5.0,2.0,100.0,1.0,200\n\
                     Parallel,4,3.0,NaN,NaN,NaN,300\n";
        let table = ResultTable::parse(input.as_bytes(), Path::new("nan.csv")).unwrap();
        assert_eq!(table.best(Variant::Parallel).unwrap().threads, 2);

        let only_nan = ResultTable::new(vec![record(Variant::Parallel, 4, 1.0, f64::NAN)]);
        assert!(only_nan.best(Variant::Parallel).is_none());
    }
}
