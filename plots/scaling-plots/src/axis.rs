use std::ops::Range;

use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;

/// Linear x axis whose ticks sit on the measured thread counts
#[derive(Clone)]
pub struct ThreadAxis {
    inner: RangedCoordf64,
    ticks: Vec<f64>,
}

impl ThreadAxis {
    pub fn new(range: Range<f64>, threads: &[u32]) -> Self {
        let ticks = threads
            .iter()
            .map(|t| *t as f64)
            .filter(|t| range.contains(t))
            .collect();
        Self {
            inner: range.into(),
            ticks,
        }
    }

    pub fn ticks(&self) -> &[f64] {
        &self.ticks
    }
}

impl Ranged for ThreadAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.inner.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        let max = hint.max_num_points().max(1);
        let step = self.ticks.len().div_ceil(max).max(1);
        self.ticks.iter().copied().step_by(step).collect()
    }

    fn range(&self) -> Range<f64> {
        self.inner.range()
    }
}
