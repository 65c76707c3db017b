use common::{config::Settings, metric::Metric};
use plotters::{coord::Shift, prelude::*};

use crate::{
    DrawResult, Figure, PlotContext,
    chart::draw_metric,
    style::{FONT, Fonts},
    table::{TableSpec, draw_table},
};

/// Overview figure: the five metric charts and a compact table on a 2x3 grid
#[derive(Debug, Clone, Copy)]
pub struct CombinedFigure;

impl Figure for CombinedFigure {
    fn suffix(&self) -> &'static str {
        "_combined"
    }

    fn size(&self, settings: &Settings) -> (u32, u32) {
        settings.combined_size
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        ctx: &PlotContext<'_>,
    ) -> DrawResult<(), DB> {
        root.fill(&WHITE)?;
        let (_, height) = root.dim_in_pixel();
        let heading = Fonts::for_height(height / 2);
        let area = root
            .titled(
                &format!("Benchmark Results - {}", ctx.settings.subtitle),
                (FONT, heading.title + heading.title / 4)
                    .into_font()
                    .style(FontStyle::Bold),
            )?
            .titled(&ctx.source_name, (FONT, heading.label).into_font())?;

        let panels = area.split_evenly((2, 3));
        let fonts = Fonts::for_height(panels[0].dim_in_pixel().1);
        for (panel, metric) in panels.iter().zip(Metric::ALL) {
            draw_metric(panel, ctx, metric, &fonts)?;
        }

        if let Some(panel) = panels.get(Metric::ALL.len()) {
            let table_area = panel
                .titled("Summary Table", (FONT, fonts.label).into_font().style(FontStyle::Bold))?
                .titled(
                    "(Seq=Sequential, Par=Parallel, NW=NOWAIT)",
                    (FONT, fonts.tick).into_font(),
                )?;
            draw_table(&table_area, &TableSpec::compact(ctx.table), &fonts)?;
        }
        Ok(())
    }
}
