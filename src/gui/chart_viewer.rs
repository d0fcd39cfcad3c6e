//! Chart Viewer Widget
//! Chart cards for the current page, laid out side by side when there is room.

use crate::charts::{ChartKind, ChartModel, ChartPlotter};
use egui::{Color32, RichText};

const CHART_SPACING: f32 = 15.0;
const MIN_CARD_WIDTH: f32 = 520.0;

/// Holds the four chart models of the current page.
#[derive(Default)]
pub struct ChartViewer {
    pub charts: Vec<ChartModel>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_charts(&mut self, charts: Vec<ChartModel>) {
        self.charts = charts;
    }

    pub fn chart(&self, kind: ChartKind) -> Option<&ChartModel> {
        self.charts.iter().find(|c| c.kind == kind)
    }

    /// Draw the cards for `kinds`, two per row when the panel is wide enough.
    pub fn show(&self, ui: &mut egui::Ui, kinds: &[ChartKind]) {
        let charts: Vec<&ChartModel> = kinds.iter().filter_map(|k| self.chart(*k)).collect();
        if charts.is_empty() {
            return;
        }

        let avail_width = ui.available_width();
        let side_by_side = avail_width >= 2.0 * MIN_CARD_WIDTH + CHART_SPACING;
        let card_width = if side_by_side {
            (avail_width - CHART_SPACING) / 2.0
        } else {
            avail_width
        };

        if side_by_side {
            ui.horizontal_top(|ui| {
                for chart in &charts {
                    Self::draw_chart_card(ui, chart, card_width);
                    ui.add_space(CHART_SPACING);
                }
            });
        } else {
            for chart in &charts {
                Self::draw_chart_card(ui, chart, card_width);
                ui.add_space(CHART_SPACING);
            }
        }
        ui.add_space(CHART_SPACING);
    }

    fn draw_chart_card(ui: &mut egui::Ui, chart: &ChartModel, width: f32) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, Color32::from_gray(200)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(width - 26.0);
                ui.vertical(|ui| {
                    ChartPlotter::draw_chart(ui, chart, "card");
                    if chart.is_empty() {
                        ui.label(
                            RichText::new("No records match the current selection")
                                .size(11.0)
                                .color(Color32::GRAY),
                        );
                    }
                });
            });
    }
}
