//! Static Chart Renderer
//! Renders a page's chart models to a PNG with plotters.
//!
//! Layout: a 2x2 grid, one panel per chart in page order, each with its own
//! caption, category axis and series legend.

use crate::charts::model::{ChartBody, ChartModel};
use crate::charts::plotter::PALETTE;
use crate::export::ExportError;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

const CAPTION_FONT: (&str, u32) = ("sans-serif", 24);
const LABEL_FONT: (&str, u32) = ("sans-serif", 14);
const BAR_HALF_WIDTH: f64 = 0.4;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render up to four charts into one PNG at `path`.
    pub fn render_png(
        charts: &[ChartModel],
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), ExportError> {
        Self::render(charts, path, size).map_err(|e| ExportError::Render(e.to_string()))
    }

    fn render(charts: &[ChartModel], path: &Path, size: (u32, u32)) -> anyhow::Result<()> {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let panels = root.split_evenly((2, 2));
        for (chart, area) in charts.iter().zip(panels.iter()) {
            Self::draw_panel(chart, area)?;
        }

        root.present()?;
        Ok(())
    }

    fn color(index: usize) -> RGBColor {
        let c = PALETTE[index % PALETTE.len()];
        RGBColor(c.r(), c.g(), c.b())
    }

    fn draw_panel(
        chart: &ChartModel,
        area: &DrawingArea<BitMapBackend<'_>, Shift>,
    ) -> anyhow::Result<()> {
        let n = chart.categories.len().max(1);
        let y_max = chart.y_max() * 1.05;

        let mut ctx = ChartBuilder::on(area)
            .caption(chart.kind.title(), CAPTION_FONT)
            .margin(12)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max)?;

        let categories = chart.categories.clone();
        ctx.configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&|x| {
                let idx = x.round();
                if (x - idx).abs() > 1e-6 || idx < 0.0 {
                    return String::new();
                }
                categories.get(idx as usize).cloned().unwrap_or_default()
            })
            .x_desc(chart.x_label)
            .y_desc(chart.kind.y_label())
            .label_style(LABEL_FONT)
            .draw()?;

        match &chart.body {
            ChartBody::Bar(series) => {
                for s in series {
                    let color = Self::color(s.color_index);
                    ctx.draw_series(s.marks.iter().map(|m| {
                        let x = m.category as f64;
                        Rectangle::new(
                            [
                                (x - BAR_HALF_WIDTH, m.base),
                                (x + BAR_HALF_WIDTH, m.base + m.value),
                            ],
                            color.filled(),
                        )
                    }))?
                    .label(s.name.clone())
                    .legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                    });
                }
            }
            ChartBody::Scatter(series) => {
                for s in series {
                    let color = Self::color(s.color_index);
                    ctx.draw_series(s.marks.iter().map(|m| {
                        Circle::new(
                            (m.category as f64, m.value),
                            m.radius.round() as i32,
                            color.mix(0.8).filled(),
                        )
                    }))?
                    .label(s.name.clone())
                    .legend(move |(x, y)| Circle::new((x + 5, y), 5, color.filled()));
                }
            }
        }

        if !chart.is_empty() {
            ctx.configure_series_labels()
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()?;
        }

        Ok(())
    }
}
