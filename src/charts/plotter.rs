//! Chart Plotter Module
//! Draws chart models as interactive egui_plot panels.

use crate::charts::model::{BarMark, ChartBody, ChartModel, ScatterMark, Series, SEEDS_USED_LABEL};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, Points};

/// Qualitative palette, assigned to series in order of first appearance.
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(99, 110, 250),  // Blue
    Color32::from_rgb(239, 85, 59),   // Red
    Color32::from_rgb(0, 204, 150),   // Green
    Color32::from_rgb(171, 99, 250),  // Purple
    Color32::from_rgb(255, 161, 90),  // Orange
    Color32::from_rgb(25, 211, 243),  // Cyan
    Color32::from_rgb(255, 102, 146), // Pink
    Color32::from_rgb(182, 232, 128), // Light Green
    Color32::from_rgb(255, 151, 255), // Light Pink
    Color32::from_rgb(254, 203, 82),  // Yellow
];

const BAR_WIDTH: f64 = 0.8;
const PLOT_HEIGHT: f32 = 320.0;

/// Draws interactive charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get color for a series.
    pub fn series_color(color_index: usize) -> Color32 {
        PALETTE[color_index % PALETTE.len()]
    }

    /// Draw a chart panel with its title.
    pub fn draw_chart(ui: &mut egui::Ui, chart: &ChartModel, id_salt: &str) {
        ui.label(RichText::new(chart.kind.title()).size(16.0).strong());
        ui.add_space(4.0);

        match &chart.body {
            ChartBody::Bar(series) => Self::draw_bar_chart(ui, chart, series, id_salt),
            ChartBody::Scatter(series) => Self::draw_scatter_chart(ui, chart, series, id_salt),
        }
    }

    fn base_plot(chart: &ChartModel, id_salt: &str) -> Plot<'static> {
        let x_labels = chart.categories.clone();

        Plot::new(format!("{}_{:?}", id_salt, chart.kind))
            .height(PLOT_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label(chart.x_label)
            .y_axis_label(chart.kind.y_label())
            .include_x(-0.5)
            .include_x(chart.categories.len().max(1) as f64 - 0.5)
            .include_y(0.0)
            .include_y(chart.y_max())
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                    return String::new();
                }
                x_labels.get(idx as usize).cloned().unwrap_or_default()
            })
    }

    /// One bar segment per record, stacked per category, colored by region.
    fn draw_bar_chart(
        ui: &mut egui::Ui,
        chart: &ChartModel,
        series: &[Series<BarMark>],
        id_salt: &str,
    ) {
        let categories = chart.categories.clone();
        let y_label = chart.kind.y_label();

        Self::base_plot(chart, id_salt).show(ui, |plot_ui| {
            for s in series {
                let color = Self::series_color(s.color_index);
                let bars: Vec<Bar> = s
                    .marks
                    .iter()
                    .map(|m| {
                        let entity = categories.get(m.category).cloned().unwrap_or_default();
                        Bar::new(m.category as f64, m.value)
                            .base_offset(m.base)
                            .width(BAR_WIDTH)
                            .fill(color)
                            .name(format!("{}\n{} = {:.2}", entity, y_label, m.value))
                    })
                    .collect();

                plot_ui.bar_chart(BarChart::new(bars).color(color).name(&s.name));
            }
        });
    }

    /// One marker per record, sized by seed weight, with the other status on hover.
    fn draw_scatter_chart(
        ui: &mut egui::Ui,
        chart: &ChartModel,
        series: &[Series<ScatterMark>],
        id_salt: &str,
    ) {
        let hover_series = series.to_vec();
        let categories = chart.categories.clone();
        let x_label = chart.x_label;
        let y_label = chart.kind.y_label();
        let hover_label = chart
            .kind
            .hover_dimension()
            .map(|d| d.column())
            .unwrap_or_default();

        Self::base_plot(chart, id_salt)
            .label_formatter(move |name, value| {
                Self::hover_text(
                    &hover_series,
                    &categories,
                    name,
                    value,
                    [x_label, y_label, hover_label],
                )
            })
            .show(ui, |plot_ui| {
                for s in series {
                    let color = Self::series_color(s.color_index);
                    for m in &s.marks {
                        plot_ui.points(
                            Points::new(vec![[m.category as f64, m.value]])
                                .radius(m.radius)
                                .color(color.gamma_multiply(0.8))
                                .name(&s.name),
                        );
                    }
                }
            });
    }

    /// Hover text for the scatter mark closest to the cursor.
    fn hover_text(
        series: &[Series<ScatterMark>],
        categories: &[String],
        name: &str,
        value: &PlotPoint,
        [x_label, y_label, hover_label]: [&str; 3],
    ) -> String {
        let Some(s) = series.iter().find(|s| s.name == name) else {
            return String::new();
        };

        let category = value.x.round();
        let nearest = s
            .marks
            .iter()
            .filter(|m| m.category as f64 == category)
            .min_by(|a, b| {
                (a.value - value.y)
                    .abs()
                    .total_cmp(&(b.value - value.y).abs())
            });

        match nearest {
            Some(m) => format!(
                "{}\n{} = {}\n{} = {:.2}\n{} = {:.2}\n{} = {}",
                name,
                x_label,
                categories.get(m.category).map(String::as_str).unwrap_or(""),
                y_label,
                m.value,
                SEEDS_USED_LABEL,
                m.seeds_used,
                hover_label,
                m.hover
            ),
            None => String::new(),
        }
    }
}
