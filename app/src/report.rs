use std::{
    fmt::{self, Write},
    path::PathBuf,
};

use common::{
    record::{BenchRecord, Variant},
    summary::Summary,
    util::{file_name, format_thousands},
};
use console::style;

const RULE_WIDTH: usize = 70;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn header(source: &str, generated_at: &str) -> String {
    format!(
        "\n{rule}\n{} {source}\n{generated_at}\n{rule}\n",
        style("Generating charts from:").bold(),
        rule = rule()
    )
}

/// Console statistics: sequential time, best speedup per parallel variant and their comparison
pub struct StatsReport<'a> {
    pub summary: &'a Summary<'a>,
    pub throughput_label: &'a str,
}

impl StatsReport<'_> {
    fn throughput(&self, record: &BenchRecord) -> String {
        format!(
            "{} {}",
            format_thousands(record.throughput, 1),
            self.throughput_label
        )
    }

    fn write_best(&self, f: &mut fmt::Formatter<'_>, variant: Variant) -> fmt::Result {
        let Some(best) = self.summary.best(variant) else {
            return Ok(());
        };
        writeln!(
            f,
            "\n{}",
            style(format!("{}:", variant.display_name().to_uppercase())).bold()
        )?;
        writeln!(
            f,
            "   Best speedup: {:.2}x with {} threads",
            best.speedup, best.threads
        )?;
        writeln!(f, "   Time: {:.3}s", best.avg_time)?;
        writeln!(f, "   Efficiency: {:.1}%", best.efficiency)?;
        writeln!(f, "   Throughput: {}", self.throughput(best))
    }
}

impl fmt::Display for StatsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n{}", rule())?;
        writeln!(f, "{}", style("BENCHMARK STATISTICS").bold())?;
        writeln!(f, "{}", rule())?;

        if let Some(seq) = self.summary.sequential {
            writeln!(f, "\n{}", style("SEQUENTIAL:").bold())?;
            writeln!(f, "   Time: {:.3}s", seq.avg_time)?;
            writeln!(f, "   Throughput: {}", self.throughput(seq))?;
        } else if let Some(baseline) = &self.summary.baseline {
            writeln!(
                f,
                "\n{} {} with 1 thread",
                style("BASELINE:").bold(),
                baseline.record.variant
            )?;
            writeln!(f, "   Time: {:.3}s", baseline.record.avg_time)?;
            writeln!(f, "   Throughput: {}", self.throughput(baseline.record))?;
        }

        for variant in Variant::PARALLEL {
            self.write_best(f, variant)?;
        }

        if let Some(cmp) = &self.summary.comparison {
            writeln!(f, "\n{}", style("COMPARISON (best configuration):").bold())?;
            writeln!(
                f,
                "   {} is {:.1}% faster than {}",
                cmp.faster, cmp.improvement_pct, cmp.slower
            )?;
            writeln!(f, "   Difference: {:.3}s", cmp.difference_secs)?;
        }
        write!(f, "{}", rule())
    }
}

/// Numbered list of written images, the last one marked as the combined view
pub fn generated_files(paths: &[PathBuf]) -> String {
    let mut out = format!("\n{}\n", style("Generated files:").bold());
    for (idx, path) in paths.iter().enumerate() {
        let note = if idx + 1 == paths.len() {
            " (combined view)"
        } else {
            ""
        };
        // writing to a String cannot fail
        let _ = writeln!(out, "   {}. {}{note}", idx + 1, file_name(path));
    }
    out.push_str(&rule());
    out
}
