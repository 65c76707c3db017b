use common::{config::Settings, record::BenchRecord, table::ResultTable, util::format_thousands};
use plotters::{
    coord::Shift,
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};

use crate::{
    DrawResult, Figure, PlotContext,
    style::{CELL_BORDER, FONT, Fonts, HEADER_FILL, ROW_FILLS},
};

/// Cell contents and relative column widths of a rendered table
#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    pub header: Vec<&'static str>,
    pub widths: Vec<f64>,
    pub rows: Vec<Vec<String>>,
}

impl TableSpec {
    /// The standalone summary table
    pub fn full(table: &ResultTable) -> Self {
        Self {
            header: vec![
                "Version",
                "Threads",
                "Time",
                "Speedup",
                "Efficiency",
                "Throughput",
            ],
            widths: vec![0.20, 0.12, 0.15, 0.15, 0.15, 0.23],
            rows: table
                .summary_rows()
                .into_iter()
                .map(|r| {
                    let mut cells = vec![r.variant.display_name().to_owned()];
                    cells.extend(measure_cells(r));
                    cells.push(format_thousands(r.throughput, 0));
                    cells
                })
                .collect(),
        }
    }

    /// The narrow table in the last panel of the combined figure
    pub fn compact(table: &ResultTable) -> Self {
        Self {
            header: vec!["Ver", "Thr", "Time", "Speedup", "Eff"],
            widths: vec![0.15, 0.15, 0.25, 0.23, 0.22],
            rows: table
                .summary_rows()
                .into_iter()
                .map(|r| {
                    let mut cells = vec![r.variant.short_name().to_owned()];
                    cells.extend(measure_cells(r));
                    cells
                })
                .collect(),
        }
    }
}

fn measure_cells(record: &BenchRecord) -> [String; 4] {
    [
        record.threads.to_string(),
        format!("{:.2}s", record.avg_time),
        format!("{:.2}x", record.speedup),
        format!("{:.1}%", record.efficiency),
    ]
}

#[derive(Debug, Clone, Copy)]
pub struct SummaryTable;

impl Figure for SummaryTable {
    fn suffix(&self) -> &'static str {
        "_summary_table"
    }

    fn size(&self, settings: &Settings) -> (u32, u32) {
        settings.table_size
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        ctx: &PlotContext<'_>,
    ) -> DrawResult<(), DB> {
        root.fill(&WHITE)?;
        let fonts = Fonts::for_height(root.dim_in_pixel().1);
        let area = root
            .titled(
                "Benchmark Summary Table",
                (FONT, fonts.title).into_font().style(FontStyle::Bold),
            )?
            .titled(
                &ctx.settings.subtitle,
                (FONT, fonts.label).into_font().style(FontStyle::Bold),
            )?;
        draw_table(&area, &TableSpec::full(ctx.table), &fonts)
    }
}

/// Draws `spec` centered in `area`, header on a dark fill and body rows alternating
pub fn draw_table<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    spec: &TableSpec,
    fonts: &Fonts,
) -> DrawResult<(), DB> {
    let (width, height) = area.dim_in_pixel();
    let total_weight: f64 = spec.widths.iter().sum();
    let table_width = width as f64 * 0.9;
    let row_count = spec.rows.len() + 1;
    let row_height = (height as f64 * 0.9 / row_count as f64).min(fonts.tick as f64 * 2.6);
    let x0 = (width as f64 - table_width) / 2.0;
    let y0 = (height as f64 - row_height * row_count as f64) / 2.0;

    let column_edges = spec
        .widths
        .iter()
        .scan(x0, |x, w| {
            let start = *x;
            *x += table_width * w / total_weight;
            Some((start as i32, *x as i32))
        })
        .collect::<Vec<_>>();

    let header_style = (FONT, fonts.tick)
        .into_font()
        .style(FontStyle::Bold)
        .color(&WHITE)
        .pos(Pos::new(HPos::Center, VPos::Center));
    let body_style = (FONT, fonts.tick)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));

    let header = spec.header.iter().map(|h| h.to_string()).collect::<Vec<_>>();
    let lines = std::iter::once((&header, HEADER_FILL, &header_style)).chain(
        spec.rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row, ROW_FILLS[i % 2], &body_style)),
    );

    for (row_idx, (cells, fill, text_style)) in lines.enumerate() {
        let top = (y0 + row_height * row_idx as f64) as i32;
        let bottom = (y0 + row_height * (row_idx + 1) as f64) as i32;
        for ((left, right), cell) in column_edges.iter().zip(cells) {
            area.draw(&Rectangle::new([(*left, top), (*right, bottom)], fill.filled()))?;
            area.draw(&Rectangle::new(
                [(*left, top), (*right, bottom)],
                CELL_BORDER.stroke_width(1),
            ))?;
            area.draw(&Text::new(
                cell.clone(),
                ((left + right) / 2, (top + bottom) / 2),
                text_style.clone(),
            ))?;
        }
    }
    Ok(())
}
