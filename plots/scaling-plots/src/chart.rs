use common::{
    config::Settings,
    metric::{Metric, Reference},
    record::Variant,
};
use plotters::{coord::Shift, prelude::*};

use crate::{
    DrawResult, Figure, PlotContext,
    axis::ThreadAxis,
    style::{self, DASHES, FONT, Fonts, Marker, REFERENCE_GRAY},
};

/// One metric against the thread count, both parallel variants plus a reference line
#[derive(Debug, Clone, Copy)]
pub struct MetricChart {
    metric: Metric,
}

impl MetricChart {
    pub fn new(metric: Metric) -> Self {
        Self { metric }
    }
}

impl Figure for MetricChart {
    fn suffix(&self) -> &'static str {
        self.metric.suffix()
    }

    fn size(&self, settings: &Settings) -> (u32, u32) {
        settings.chart_size
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        ctx: &PlotContext<'_>,
    ) -> DrawResult<(), DB> {
        root.fill(&WHITE)?;
        let fonts = Fonts::for_height(root.dim_in_pixel().1);
        draw_metric(root, ctx, self.metric, &fonts)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub label: String,
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub color: RGBColor,
}

/// The reference overlay of `metric` across `x_range`, if the table provides one
pub fn reference_line(
    ctx: &PlotContext<'_>,
    metric: Metric,
    x_range: &std::ops::Range<f64>,
) -> Option<ReferenceLine> {
    match metric.reference() {
        Reference::Baseline => ctx.table.baseline().map(|baseline| {
            let y = metric.value(baseline.record);
            let label = if baseline.fallback {
                format!("Baseline ({}, 1 thread)", baseline.record.variant)
            } else {
                Variant::Sequential.display_name().to_owned()
            };
            ReferenceLine {
                label,
                from: (x_range.start, y),
                to: (x_range.end, y),
                color: BLACK,
            }
        }),
        Reference::Ideal => {
            let axis = ctx.table.thread_axis();
            let lo = *axis.first()? as f64;
            let hi = *axis.last()? as f64;
            Some(ReferenceLine {
                label: "Ideal Speedup".to_owned(),
                from: (lo, lo),
                to: (hi, hi),
                color: REFERENCE_GRAY,
            })
        }
        Reference::Constant { value, label } => Some(ReferenceLine {
            label: label.to_owned(),
            from: (x_range.start, value),
            to: (x_range.end, value),
            color: REFERENCE_GRAY,
        }),
    }
}

/// Draws the chart of `metric` into `area`. Shared by the single charts and the combined figure.
pub fn draw_metric<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    ctx: &PlotContext<'_>,
    metric: Metric,
    fonts: &Fonts,
) -> DrawResult<(), DB> {
    let table = ctx.table;
    let axis = table.thread_axis();
    let series = Variant::PARALLEL
        .into_iter()
        .map(|variant| {
            let points = table
                .series(variant)
                .into_iter()
                .map(|r| (r.threads as f64, metric.value(r)))
                .collect::<Vec<_>>();
            (variant, points)
        })
        .filter(|(_, points)| !points.is_empty())
        .collect::<Vec<_>>();

    let x_range = style::padded_x_range(
        axis.iter()
            .copied()
            .chain(series.iter().flat_map(|(_, p)| p.iter().map(|(x, _)| *x as u32))),
    );
    let reference = reference_line(ctx, metric, &x_range);
    let y_max = series
        .iter()
        .flat_map(|(_, points)| points.iter().map(|(_, y)| *y))
        .chain(reference.iter().flat_map(|r| [r.from.1, r.to.1]))
        .fold(0.0, f64::max);

    let mut chart = ChartBuilder::on(area)
        .caption(
            metric.title(),
            (FONT, fonts.title).into_font().style(FontStyle::Bold),
        )
        .margin(fonts.margin)
        .x_label_area_size(fonts.label * 3)
        .y_label_area_size(fonts.label * 5)
        .build_cartesian_2d(
            ThreadAxis::new(x_range.clone(), &axis),
            0f64..style::y_upper(y_max),
        )?;

    chart
        .configure_mesh()
        .x_desc("Number of Threads")
        .y_desc(metric.y_label(&ctx.settings.throughput_label))
        .axis_desc_style((FONT, fonts.label).into_font().style(FontStyle::Bold))
        .label_style((FONT, fonts.tick).into_font())
        .x_labels(axis.len().max(1))
        .x_label_formatter(&|x| format!("{x:.0}"))
        .y_label_formatter(&|y| metric.format_tick(*y))
        .bold_line_style(BLACK.mix(0.15).stroke_width(1))
        .light_line_style(WHITE.mix(0.0).stroke_width(0))
        .draw()?;

    let mut labelled = false;
    if let Some(line) = reference {
        let line_style = line.color.mix(0.7).stroke_width(2);
        chart
            .draw_series(
                style::dashed_segments(line.from, line.to, DASHES)
                    .into_iter()
                    .map(|segment| PathElement::new(segment.to_vec(), line_style)),
            )?
            .label(line.label)
            .legend(move |(x, y)| PathElement::new(vec![(x - 10, y), (x + 10, y)], line_style));
        labelled = true;
    }

    for (variant, points) in &series {
        let color = style::series_color(metric, *variant);
        let line_style = color.stroke_width(2);
        chart
            .draw_series(LineSeries::new(points.iter().copied(), line_style))?
            .label(variant.display_name())
            .legend(move |(x, y)| PathElement::new(vec![(x - 10, y), (x + 10, y)], line_style));
        labelled = true;

        let size = fonts.marker;
        match style::marker(*variant) {
            Marker::Circle => {
                chart.draw_series(
                    points
                        .iter()
                        .map(|point| Circle::new(*point, size, color.filled())),
                )?;
            }
            Marker::Square => {
                chart.draw_series(points.iter().map(|point| {
                    EmptyElement::at(*point)
                        + Rectangle::new([(-size, -size), (size, size)], color.filled())
                }))?;
            }
        }
    }

    if labelled {
        chart
            .configure_series_labels()
            .position(style::legend_position(metric))
            .label_font((FONT, fonts.legend).into_font())
            .background_style(WHITE.mix(0.85).filled())
            .border_style(BLACK.mix(0.3).stroke_width(1))
            .draw()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use common::{record::BenchRecord, table::ResultTable};

    use super::*;

    fn row(variant: Variant, threads: u32, avg_time: f64) -> BenchRecord {
        BenchRecord {
            variant,
            threads,
            avg_time,
            speedup: 8.0 / avg_time,
            efficiency: 800.0 / avg_time / threads as f64,
            scalability: 1.0,
            throughput: 1000.0 / avg_time,
        }
    }

    #[test]
    fn baseline_reference_uses_sequential_row() {
        let table = ResultTable::new(vec![
            row(Variant::Sequential, 1, 8.0),
            row(Variant::Parallel, 4, 2.0),
        ]);
        let settings = Settings::default();
        let ctx = PlotContext::new(&table, std::path::Path::new("r.csv"), &settings);
        let line = reference_line(&ctx, Metric::ExecutionTime, &(0.0..5.0)).unwrap();
        assert_eq!(line.label, "Sequential");
        assert_eq!(line.from, (0.0, 8.0));
        assert_eq!(line.to, (5.0, 8.0));
        assert_eq!(line.color, BLACK);
    }

    #[test]
    fn baseline_reference_falls_back_to_single_thread_run() {
        let table = ResultTable::new(vec![
            row(Variant::Parallel, 1, 8.0),
            row(Variant::Parallel, 4, 2.0),
        ]);
        let settings = Settings::default();
        let ctx = PlotContext::new(&table, std::path::Path::new("r.csv"), &settings);
        let line = reference_line(&ctx, Metric::Throughput, &(0.0..5.0)).unwrap();
        assert_eq!(line.label, "Baseline (Parallel, 1 thread)");
        assert_eq!(line.from.1, 125.0);

        let no_baseline = ResultTable::new(vec![row(Variant::Parallel, 4, 2.0)]);
        let ctx = PlotContext::new(&no_baseline, std::path::Path::new("r.csv"), &settings);
        assert!(reference_line(&ctx, Metric::ExecutionTime, &(0.0..5.0)).is_none());
    }

    #[test]
    fn ideal_speedup_spans_thread_axis() {
        let table = ResultTable::new(vec![
            row(Variant::Parallel, 8, 1.0),
            row(Variant::Parallel, 2, 4.0),
        ]);
        let settings = Settings::default();
        let ctx = PlotContext::new(&table, std::path::Path::new("r.csv"), &settings);
        let line = reference_line(&ctx, Metric::Speedup, &(0.0..10.0)).unwrap();
        assert_eq!((line.from, line.to), ((2.0, 2.0), (8.0, 8.0)));

        let efficiency = reference_line(&ctx, Metric::Efficiency, &(0.0..10.0)).unwrap();
        assert_eq!(efficiency.label, "100% Efficiency");
        assert_eq!(efficiency.from.1, 100.0);
    }
}
