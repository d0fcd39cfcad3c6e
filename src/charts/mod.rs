//! Charts module - chart models and rendering

mod model;
mod plotter;
mod renderer;

pub use model::{ChartBuilder, ChartKind, ChartModel};
pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
