use std::path::{Path, PathBuf};

use common::{
    config::{OutputFormat, Settings},
    metric::Metric,
    table::ResultTable,
    util::{file_name, output_path},
};
use eyre::{Result, eyre};
use plotters::{coord::Shift, drawing::DrawingAreaErrorKind, prelude::*};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::debug;

pub mod axis;
pub mod chart;
pub mod combined;
pub mod style;
pub mod table;

use chart::MetricChart;
use combined::CombinedFigure;
use table::SummaryTable;

pub type DrawResult<T, DB> = Result<T, DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Everything a figure needs to draw itself
#[derive(Debug, Clone)]
pub struct PlotContext<'a> {
    pub table: &'a ResultTable,
    pub settings: &'a Settings,
    /// File name of the input table, shown in the combined figure
    pub source_name: String,
}

impl<'a> PlotContext<'a> {
    pub fn new(table: &'a ResultTable, input: &Path, settings: &'a Settings) -> Self {
        Self {
            table,
            settings,
            source_name: file_name(input),
        }
    }
}

pub trait Figure: Sync {
    /// Appended to the input file stem to name the output
    fn suffix(&self) -> &'static str;
    fn size(&self, settings: &Settings) -> (u32, u32);
    /// Draws onto `root`, which has the size returned by [`Figure::size`]
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        ctx: &PlotContext<'_>,
    ) -> DrawResult<(), DB>;
}

/// The seven outputs of a report, in the order they are listed to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotJob {
    Metric(Metric),
    SummaryTable,
    Combined,
}

impl PlotJob {
    pub fn all() -> Vec<PlotJob> {
        Metric::ALL
            .into_iter()
            .map(PlotJob::Metric)
            .chain([PlotJob::SummaryTable, PlotJob::Combined])
            .collect()
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            PlotJob::Metric(metric) => MetricChart::new(*metric).suffix(),
            PlotJob::SummaryTable => SummaryTable.suffix(),
            PlotJob::Combined => CombinedFigure.suffix(),
        }
    }

    pub fn output_path(&self, input: &Path, format: OutputFormat) -> PathBuf {
        output_path(input, self.suffix(), format.extension())
    }

    fn render(&self, ctx: &PlotContext<'_>, path: &Path) -> Result<()> {
        match self {
            PlotJob::Metric(metric) => render(&MetricChart::new(*metric), ctx, path),
            PlotJob::SummaryTable => render(&SummaryTable, ctx, path),
            PlotJob::Combined => render(&CombinedFigure, ctx, path),
        }
    }
}

/// Draws `figure` into a new image file at `path`
pub fn render<F: Figure>(figure: &F, ctx: &PlotContext<'_>, path: &Path) -> Result<()> {
    style::register_fonts()?;
    let size = figure.size(ctx.settings);
    debug!("Rendering {} ({}x{})", path.display(), size.0, size.1);

    match ctx.settings.format {
        OutputFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            figure
                .draw(&root, ctx)
                .map_err(|err| eyre!("Draw {}: {err}", path.display()))?;
            root.present()
                .map_err(|err| eyre!("Write {}: {err}", path.display()))?;
        }
        OutputFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            figure
                .draw(&root, ctx)
                .map_err(|err| eyre!("Draw {}: {err}", path.display()))?;
            root.present()
                .map_err(|err| eyre!("Write {}: {err}", path.display()))?;
        }
    }
    Ok(())
}

/// Renders every [`PlotJob`] next to `input`, returning the written paths in job order
pub fn render_all(table: &ResultTable, input: &Path, settings: &Settings) -> Result<Vec<PathBuf>> {
    let ctx = PlotContext::new(table, input, settings);
    PlotJob::all()
        .into_par_iter()
        .map(|job| -> Result<PathBuf> {
            let path = job.output_path(input, settings.format);
            job.render(&ctx, &path)?;
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_jobs_with_fixed_suffixes() {
        let suffixes = PlotJob::all().iter().map(|j| j.suffix()).collect::<Vec<_>>();
        assert_eq!(
            suffixes,
            vec![
                "_execution_time",
                "_speedup",
                "_efficiency",
                "_scalability",
                "_throughput",
                "_summary_table",
                "_combined",
            ]
        );
    }

    #[test]
    fn job_output_paths() {
        let input = Path::new("benchmark_results/bench_2025.csv");
        assert_eq!(
            PlotJob::SummaryTable.output_path(input, OutputFormat::Svg),
            PathBuf::from("benchmark_results/bench_2025_summary_table.svg")
        );
        assert_eq!(
            PlotJob::Metric(Metric::Speedup).output_path(input, OutputFormat::Png),
            PathBuf::from("benchmark_results/bench_2025_speedup.png")
        );
    }
}
