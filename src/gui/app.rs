//! Dashboard Main Application
//! Header with navigation, then the routed page: dropdowns and chart cards.

use crate::charts::{ChartBuilder, StaticChartRenderer};
use crate::config::DefaultSelection;
use crate::data::{Dataset, Record};
use crate::export::export_records_json;
use crate::gui::{ChartViewer, FilterPanel, FilterPanelAction};
use crate::pages::{Page, Route, NOT_FOUND_TEXT};
use egui::{Color32, RichText};
use tracing::{debug, info, warn};

const BRAND_GREEN: Color32 = Color32::from_rgb(0x38, 0x7F, 0x39);
const EXPORT_SIZE: (u32, u32) = (1600, 1200);

/// State of a rendered page: its dropdowns and the charts they produce.
pub struct PageView {
    pub page: Page,
    pub filters: FilterPanel,
    pub chart_viewer: ChartViewer,
    /// Records passing the current selection.
    pub matching: usize,
}

impl PageView {
    pub fn new(page: Page, dataset: &Dataset, default: DefaultSelection) -> Self {
        let mut view = Self {
            page,
            filters: FilterPanel::new(dataset, &page.filter_dimensions(), default),
            chart_viewer: ChartViewer::new(),
            matching: 0,
        };
        view.refresh(dataset);
        view
    }

    pub fn filtered<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Record> {
        self.filters.to_filter().apply(dataset)
    }

    /// Recompute the charts from the current selections.
    pub fn refresh(&mut self, dataset: &Dataset) {
        let subset = self.filtered(dataset);
        self.matching = subset.len();
        self.chart_viewer
            .set_charts(ChartBuilder::build_all(self.page.entity(), &subset));
        debug!(page = ?self.page, matching = self.matching, "charts refreshed");
    }
}

/// Main application window.
pub struct DashboardApp {
    dataset: Dataset,
    default_selection: DefaultSelection,
    route: Route,
    address: String,
    view: Option<PageView>,
    status: String,
}

impl DashboardApp {
    pub fn new(dataset: Dataset, default_selection: DefaultSelection, start_path: &str) -> Self {
        let mut app = Self {
            dataset,
            default_selection,
            route: Route::NotFound(String::new()),
            address: String::new(),
            view: None,
            status: String::new(),
        };
        app.navigate(start_path);
        app
    }

    /// Switch to the page at `path`; pages always open with fresh selections.
    pub fn navigate(&mut self, path: &str) {
        self.address = path.to_string();
        self.route = Route::resolve(path);
        self.view = self
            .route
            .page()
            .map(|page| PageView::new(page, &self.dataset, self.default_selection));
        self.status = format!("{} records loaded", self.dataset.len());
        info!(path, route = ?self.route, "navigated");
    }

    /// Handle PNG export of the current page's charts
    fn handle_export_png(&mut self) {
        let Some(view) = &self.view else {
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("harvest_dashboard.png")
            .save_file()
        else {
            return;
        };

        match StaticChartRenderer::render_png(&view.chart_viewer.charts, &path, EXPORT_SIZE) {
            Ok(()) => {
                info!(path = %path.display(), "charts exported");
                self.status = format!("Charts exported to {}", path.display());
                if let Err(e) = open::that(&path) {
                    warn!(error = %e, "could not open exported image");
                }
            }
            Err(e) => {
                warn!(error = %e, "chart export failed");
                self.status = format!("Error: {}", e);
            }
        }
    }

    /// Handle JSON export of the filtered records
    fn handle_export_json(&mut self) {
        let Some(view) = &self.view else {
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("filtered_records.json")
            .save_file()
        else {
            return;
        };

        let records = view.filtered(&self.dataset);
        match export_records_json(&records, &path) {
            Ok(()) => {
                info!(path = %path.display(), records = records.len(), "records exported");
                self.status = format!("{} records exported to {}", records.len(), path.display());
            }
            Err(e) => {
                warn!(error = %e, "record export failed");
                self.status = format!("Error: {}", e);
            }
        }
    }

    fn show_header(&mut self, ui: &mut egui::Ui) -> HeaderAction {
        let mut action = HeaderAction::None;

        egui::Frame::none()
            .fill(BRAND_GREEN)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("Agent Performance Dashboard")
                            .size(28.0)
                            .strong()
                            .color(Color32::WHITE),
                    );
                });
            });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            for page in Page::ALL {
                let button = egui::Button::new(
                    RichText::new(page.nav_label()).color(Color32::WHITE),
                )
                .fill(BRAND_GREEN);
                if ui.add(button).clicked() {
                    action = HeaderAction::Navigate(page.path().to_string());
                }
            }

            ui.add_space(20.0);
            ui.label("Path:");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.address).desired_width(220.0),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                action = HeaderAction::Navigate(self.address.clone());
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_enabled_ui(self.view.is_some(), |ui| {
                    if ui.button("📄 Export JSON").clicked() {
                        action = HeaderAction::ExportJson;
                    }
                    if ui.button("🖼 Export PNG").clicked() {
                        action = HeaderAction::ExportPng;
                    }
                });
            });
        });
        ui.add_space(8.0);

        action
    }
}

/// Actions triggered from the header
#[derive(Debug, Clone, PartialEq)]
enum HeaderAction {
    None,
    Navigate(String),
    ExportPng,
    ExportJson,
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            match self.show_header(ui) {
                HeaderAction::Navigate(path) => self.navigate(&path),
                HeaderAction::ExportPng => self.handle_export_png(),
                HeaderAction::ExportJson => self.handle_export_json(),
                HeaderAction::None => {}
            }
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let color = if self.status.starts_with("Error") {
                Color32::from_rgb(220, 53, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(color));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(view) = self.view.as_mut() else {
                ui.label(NOT_FOUND_TEXT);
                return;
            };

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let mut changed = false;
                    for section in view.page.sections() {
                        if view.filters.show(ui, section.dimensions)
                            == FilterPanelAction::SelectionChanged
                        {
                            changed = true;
                        }
                        view.chart_viewer.show(ui, section.charts);
                    }
                    if changed {
                        view.refresh(&self.dataset);
                    }
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKind;
    use crate::data::record::record;
    use crate::data::{Dimension, Status};

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            record("North", "A", "F1", "D1", 10.0, Status::Done, Status::Done, 40.0),
            record("North", "B", "F1", "D2", 5.0, Status::NotYet, Status::NotYet, 0.0),
            record("South", "C", "F2", "D3", 8.0, Status::Done, Status::NotYet, 25.0),
        ])
    }

    fn app(start: &str) -> DashboardApp {
        DashboardApp::new(dataset(), DefaultSelection::All, start)
    }

    #[test]
    fn home_page_charts_every_record_by_fba() {
        let app = app("/");
        let view = app.view.as_ref().unwrap();

        assert_eq!(view.page, Page::FbaPerformance);
        assert_eq!(view.matching, 3);
        let chart = view.chart_viewer.chart(ChartKind::HarvestAmount).unwrap();
        assert_eq!(chart.categories, vec!["F1", "F2"]);
        assert_eq!(chart.mark_count(), 3);
    }

    #[test]
    fn dac_page_filters_on_fba_and_charts_by_dac() {
        let app = app("/dac-performance");
        let view = app.view.as_ref().unwrap();

        assert_eq!(view.page, Page::DacPerformance);
        assert_eq!(view.filters.filters.len(), 3);
        let chart = view.chart_viewer.chart(ChartKind::ThreshingStatus).unwrap();
        assert_eq!(chart.x_label, "DAC_Name");
        assert_eq!(chart.categories, vec!["D1", "D2", "D3"]);
    }

    #[test]
    fn unknown_path_shows_not_found() {
        let mut app = app("/");
        app.navigate("/unknown");

        assert_eq!(&app.route, &Route::NotFound("/unknown".to_string()));
        assert!(app.view.is_none());
    }

    #[test]
    fn unmatched_selection_gives_empty_charts() {
        let mut app = app("/");
        let ds = app.dataset.clone();
        let view = app.view.as_mut().unwrap();

        let region = view.filters.get_mut(Dimension::Region).unwrap();
        region.set_all(false);
        view.refresh(&ds);

        assert_eq!(view.matching, 0);
        assert!(view.chart_viewer.charts.iter().all(|c| c.is_empty()));
    }

    #[test]
    fn navigation_resets_selections() {
        let mut app = app("/");
        let ds = app.dataset.clone();
        {
            let view = app.view.as_mut().unwrap();
            view.filters
                .get_mut(Dimension::HarvestStatus)
                .unwrap()
                .selected[0] = false;
            view.refresh(&ds);
            assert_eq!(view.matching, 1);
        }

        app.navigate("/dac-performance");
        app.navigate("/");

        assert_eq!(app.view.as_ref().unwrap().matching, 3);
    }
}
