//! Page layouts and path routing.

use crate::charts::ChartKind;
use crate::data::Dimension;

/// Placeholder shown for unknown paths.
pub const NOT_FOUND_TEXT: &str = "404";

/// A group of dropdowns followed by the charts they sit above.
#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub dimensions: &'static [Dimension],
    pub charts: &'static [ChartKind],
}

const STATUS_DIMENSIONS: &[Dimension] = &[Dimension::HarvestStatus, Dimension::ThreshingStatus];
const AMOUNT_CHARTS: &[ChartKind] = &[ChartKind::HarvestAmount, ChartKind::SeedsUsed];
const STATUS_CHARTS: &[ChartKind] = &[ChartKind::HarvestStatus, ChartKind::ThreshingStatus];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Per-agent view at `/`.
    FbaPerformance,
    /// Per-collection-center view at `/dac-performance`.
    DacPerformance,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::FbaPerformance, Page::DacPerformance];

    pub fn path(&self) -> &'static str {
        match self {
            Page::FbaPerformance => "/",
            Page::DacPerformance => "/dac-performance",
        }
    }

    /// Navigation button caption.
    pub fn nav_label(&self) -> &'static str {
        match self {
            Page::FbaPerformance => "Home",
            Page::DacPerformance => "DAC Performance",
        }
    }

    /// Column the charts are plotted against.
    pub fn entity(&self) -> Dimension {
        match self {
            Page::FbaPerformance => Dimension::FbaName,
            Page::DacPerformance => Dimension::DacName,
        }
    }

    pub fn sections(&self) -> [Section; 2] {
        let first: &'static [Dimension] = match self {
            Page::FbaPerformance => &[Dimension::Region, Dimension::District],
            Page::DacPerformance => &[Dimension::FbaName],
        };
        [
            Section {
                dimensions: first,
                charts: AMOUNT_CHARTS,
            },
            Section {
                dimensions: STATUS_DIMENSIONS,
                charts: STATUS_CHARTS,
            },
        ]
    }

    /// Every filterable dimension of the page, in display order.
    pub fn filter_dimensions(&self) -> Vec<Dimension> {
        self.sections()
            .iter()
            .flat_map(|s| s.dimensions.iter().copied())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Page(Page),
    NotFound(String),
}

impl Route {
    /// Exact-match dispatch on the path.
    pub fn resolve(path: &str) -> Route {
        Page::ALL
            .into_iter()
            .find(|p| p.path() == path)
            .map(Route::Page)
            .unwrap_or_else(|| Route::NotFound(path.to_string()))
    }

    pub fn page(&self) -> Option<Page> {
        match self {
            Route::Page(page) => Some(*page),
            Route::NotFound(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_resolve_to_pages() {
        assert_eq!(Route::resolve("/"), Route::Page(Page::FbaPerformance));
        assert_eq!(
            Route::resolve("/dac-performance"),
            Route::Page(Page::DacPerformance)
        );
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(
            Route::resolve("/unknown"),
            Route::NotFound("/unknown".to_string())
        );
        assert_eq!(Route::resolve("/dac-performance/").page(), None);
        assert_eq!(Route::resolve("").page(), None);
    }

    #[test]
    fn page_filters_match_layouts() {
        assert_eq!(
            Page::FbaPerformance.filter_dimensions(),
            vec![
                Dimension::Region,
                Dimension::District,
                Dimension::HarvestStatus,
                Dimension::ThreshingStatus,
            ]
        );
        assert_eq!(
            Page::DacPerformance.filter_dimensions(),
            vec![
                Dimension::FbaName,
                Dimension::HarvestStatus,
                Dimension::ThreshingStatus,
            ]
        );
    }

    #[test]
    fn every_page_shows_all_four_charts() {
        for page in Page::ALL {
            let charts: Vec<ChartKind> = page
                .sections()
                .iter()
                .flat_map(|s| s.charts.iter().copied())
                .collect();
            assert_eq!(charts, ChartKind::ALL.to_vec());
        }
    }
}
