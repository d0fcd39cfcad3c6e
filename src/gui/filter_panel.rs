//! Filter Panel Widget
//! Multi-select dropdowns, one per filterable dimension of a page.

use crate::config::DefaultSelection;
use crate::data::{Dataset, Dimension, Filter};
use egui::{ComboBox, PopupCloseBehavior, RichText, ScrollArea};

/// Dropdown state for a single dimension.
#[derive(Debug, Clone)]
pub struct DimensionFilter {
    pub dimension: Dimension,
    pub options: Vec<String>,
    pub selected: Vec<bool>,
}

impl DimensionFilter {
    pub fn new(dataset: &Dataset, dimension: Dimension, default: DefaultSelection) -> Self {
        let options = dataset.distinct(dimension);
        let selected = vec![default == DefaultSelection::All; options.len()];
        Self {
            dimension,
            options,
            selected,
        }
    }

    pub fn selected_values(&self) -> Vec<String> {
        self.options
            .iter()
            .zip(self.selected.iter())
            .filter(|(_, &selected)| selected)
            .map(|(value, _)| value.clone())
            .collect()
    }

    pub fn set_all(&mut self, selected: bool) {
        self.selected.iter_mut().for_each(|v| *v = selected);
    }

    /// Closed-dropdown caption.
    pub fn summary(&self) -> String {
        let values = self.selected_values();
        match values.len() {
            0 => "None selected".to_string(),
            n if n == self.options.len() => format!("All ({})", n),
            n if n <= 3 => values.join(", "),
            n => format!("{} of {} selected", n, self.options.len()),
        }
    }
}

/// Dropdowns for one page.
pub struct FilterPanel {
    pub filters: Vec<DimensionFilter>,
}

impl FilterPanel {
    pub fn new(dataset: &Dataset, dimensions: &[Dimension], default: DefaultSelection) -> Self {
        Self {
            filters: dimensions
                .iter()
                .map(|d| DimensionFilter::new(dataset, *d, default))
                .collect(),
        }
    }

    pub fn get_mut(&mut self, dimension: Dimension) -> Option<&mut DimensionFilter> {
        self.filters.iter_mut().find(|f| f.dimension == dimension)
    }

    /// Current selections as a conjunctive filter.
    pub fn to_filter(&self) -> Filter {
        self.filters.iter().fold(Filter::new(), |filter, f| {
            filter.with(f.dimension, f.selected_values())
        })
    }

    /// Draw the dropdowns for `dimensions`
    pub fn show(&mut self, ui: &mut egui::Ui, dimensions: &[Dimension]) -> FilterPanelAction {
        let mut action = FilterPanelAction::None;

        for dimension in dimensions {
            let Some(filter) = self.get_mut(*dimension) else {
                continue;
            };

            ui.label(RichText::new(dimension.label()).size(14.0));
            ComboBox::from_id_salt(dimension.column())
                .width(ui.available_width().min(600.0))
                .selected_text(filter.summary())
                .close_behavior(PopupCloseBehavior::CloseOnClickOutside)
                .show_ui(ui, |ui| {
                    ui.horizontal(|ui| {
                        if ui.small_button("Select All").clicked() {
                            filter.set_all(true);
                            action = FilterPanelAction::SelectionChanged;
                        }
                        if ui.small_button("Clear All").clicked() {
                            filter.set_all(false);
                            action = FilterPanelAction::SelectionChanged;
                        }
                    });
                    ui.separator();

                    ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
                        for (value, selected) in
                            filter.options.iter().zip(filter.selected.iter_mut())
                        {
                            if ui.checkbox(selected, value).changed() {
                                action = FilterPanelAction::SelectionChanged;
                            }
                        }
                    });
                });
            ui.add_space(8.0);
        }

        action
    }
}

/// Actions triggered by the filter panel
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPanelAction {
    None,
    SelectionChanged,
}
