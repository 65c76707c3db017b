use crate::{record::BenchRecord, util::format_thousands};

/// A column plotted against the thread count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    ExecutionTime,
    Speedup,
    Efficiency,
    Scalability,
    Throughput,
}

/// Line drawn next to the measured series for orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reference {
    /// Horizontal line at the sequential baseline value of the metric
    Baseline,
    /// `y = threads`
    Ideal,
    Constant { value: f64, label: &'static str },
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::ExecutionTime,
        Metric::Speedup,
        Metric::Efficiency,
        Metric::Scalability,
        Metric::Throughput,
    ];

    pub fn suffix(&self) -> &'static str {
        match self {
            Metric::ExecutionTime => "_execution_time",
            Metric::Speedup => "_speedup",
            Metric::Efficiency => "_efficiency",
            Metric::Scalability => "_scalability",
            Metric::Throughput => "_throughput",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Metric::ExecutionTime => "Execution Time vs Threads",
            Metric::Speedup => "Speedup vs Threads",
            Metric::Efficiency => "Efficiency vs Threads",
            Metric::Scalability => "Scalability vs Threads",
            Metric::Throughput => "Throughput vs Threads",
        }
    }

    pub fn y_label<'a>(&self, throughput_label: &'a str) -> &'a str {
        match self {
            Metric::ExecutionTime => "Execution Time (s)",
            Metric::Speedup => "Speedup",
            Metric::Efficiency => "Efficiency (%)",
            Metric::Scalability => "Scalability",
            Metric::Throughput => throughput_label,
        }
    }

    pub fn value(&self, record: &BenchRecord) -> f64 {
        match self {
            Metric::ExecutionTime => record.avg_time,
            Metric::Speedup => record.speedup,
            Metric::Efficiency => record.efficiency,
            Metric::Scalability => record.scalability,
            Metric::Throughput => record.throughput,
        }
    }

    pub fn reference(&self) -> Reference {
        match self {
            Metric::ExecutionTime | Metric::Throughput => Reference::Baseline,
            Metric::Speedup => Reference::Ideal,
            Metric::Efficiency => Reference::Constant {
                value: 100.0,
                label: "100% Efficiency",
            },
            Metric::Scalability => Reference::Constant {
                value: 1.0,
                label: "Linear Scalability",
            },
        }
    }

    pub fn format_tick(&self, value: f64) -> String {
        match self {
            Metric::Throughput => format_thousands(value, 0),
            Metric::Efficiency => format!("{value:.0}"),
            _ => format!("{value:.1}"),
        }
    }
}
