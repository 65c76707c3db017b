use crate::{
    record::{BenchRecord, Variant},
    table::{Baseline, ResultTable},
};

/// Best-configuration comparison between the two parallel variants
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub faster: Variant,
    pub slower: Variant,
    /// How much less time the faster variant needs, in percent of the slower one
    pub improvement_pct: f64,
    pub difference_secs: f64,
}

impl Comparison {
    pub fn between(parallel: &BenchRecord, nowait: &BenchRecord) -> Self {
        let (fast, slow) = if nowait.avg_time < parallel.avg_time {
            (nowait, parallel)
        } else {
            (parallel, nowait)
        };
        let difference_secs = slow.avg_time - fast.avg_time;
        let improvement_pct = if slow.avg_time > 0.0 {
            difference_secs / slow.avg_time * 100.0
        } else {
            0.0
        };
        Self {
            faster: fast.variant,
            slower: slow.variant,
            improvement_pct,
            difference_secs,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Summary<'a> {
    pub sequential: Option<&'a BenchRecord>,
    pub baseline: Option<Baseline<'a>>,
    pub best_parallel: Option<&'a BenchRecord>,
    pub best_nowait: Option<&'a BenchRecord>,
    pub comparison: Option<Comparison>,
}

impl<'a> Summary<'a> {
    pub fn new(table: &'a ResultTable) -> Self {
        let best_parallel = table.best(Variant::Parallel);
        let best_nowait = table.best(Variant::ParallelNowait);
        let comparison = best_parallel
            .zip(best_nowait)
            .map(|(p, nw)| Comparison::between(p, nw));

        Self {
            sequential: table.sequential(),
            baseline: table.baseline(),
            best_parallel,
            best_nowait,
            comparison,
        }
    }

    pub fn best(&self, variant: Variant) -> Option<&'a BenchRecord> {
        match variant {
            Variant::Sequential => self.sequential,
            Variant::Parallel => self.best_parallel,
            Variant::ParallelNowait => self.best_nowait,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::tests::record;

    #[test]
    fn nowait_faster() {
        let p = record(Variant::Parallel, 8, 2.0, 8.0);
        let nw = record(Variant::ParallelNowait, 8, 1.5, 10.0);
        let cmp = Comparison::between(&p, &nw);
        assert_eq!(cmp.faster, Variant::ParallelNowait);
        assert_eq!(cmp.slower, Variant::Parallel);
        assert!((cmp.improvement_pct - 25.0).abs() < 1e-9);
        assert!((cmp.difference_secs - 0.5).abs() < 1e-9);
    }

    #[test]
    fn parallel_faster_or_tied() {
        let p = record(Variant::Parallel, 8, 1.0, 8.0);
        let nw = record(Variant::ParallelNowait, 8, 4.0, 2.0);
        let cmp = Comparison::between(&p, &nw);
        assert_eq!(cmp.faster, Variant::Parallel);
        assert!((cmp.improvement_pct - 75.0).abs() < 1e-9);

        let tie = Comparison::between(&p, &record(Variant::ParallelNowait, 8, 1.0, 8.0));
        assert_eq!(tie.faster, Variant::Parallel);
        assert_eq!(tie.improvement_pct, 0.0);
    }

    #[test]
    fn summary_uses_best_speedup_rows() {
        let table = ResultTable::new(vec![
            record(Variant::Sequential, 1, 16.0, 1.0),
            record(Variant::Parallel, 4, 4.4, 3.6),
            record(Variant::Parallel, 8, 2.5, 6.4),
            record(Variant::ParallelNowait, 4, 4.3, 3.7),
        ]);
        let summary = Summary::new(&table);
        assert_eq!(summary.sequential.unwrap().avg_time, 16.0);
        assert_eq!(summary.best(Variant::Parallel).unwrap().threads, 8);
        assert_eq!(summary.best(Variant::ParallelNowait).unwrap().threads, 4);
        assert_eq!(summary.comparison.unwrap().faster, Variant::Parallel);
    }

    #[test]
    fn no_comparison_with_one_parallel_variant() {
        let table = ResultTable::new(vec![record(Variant::Parallel, 1, 10.0, 1.0)]);
        let summary = Summary::new(&table);
        assert!(summary.comparison.is_none());
        assert!(summary.sequential.is_none());
        assert!(summary.baseline.unwrap().fallback);
    }
}
