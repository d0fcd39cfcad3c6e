//! Chart Model Module
//! Turns a filtered subset into plain chart data, independent of any plotting
//! backend.
//!
//! No aggregation happens here: every record becomes exactly one mark. Bars
//! sharing a category are stacked in series order, then record order.

use crate::data::{Dimension, Record, Status};
use std::collections::HashMap;

/// Largest scatter marker radius, reached by the record using the most seed.
pub const MAX_MARKER_RADIUS: f32 = 10.0;
/// Smallest radius drawn, so zero-seed records stay hoverable.
pub const MIN_MARKER_RADIUS: f32 = 1.5;

pub const HARVEST_AMOUNT_LABEL: &str = "Harvest Amount (Kgs)";
pub const SEEDS_USED_LABEL: &str = "Seeds Used (Kgs)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    HarvestAmount,
    SeedsUsed,
    HarvestStatus,
    ThreshingStatus,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::HarvestAmount,
        ChartKind::SeedsUsed,
        ChartKind::HarvestStatus,
        ChartKind::ThreshingStatus,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::HarvestAmount => "Harvest Amount in Kgs",
            ChartKind::SeedsUsed => "Seeds Used in Kgs",
            ChartKind::HarvestStatus => "Harvest Status",
            ChartKind::ThreshingStatus => "Threshing Status",
        }
    }

    pub fn y_label(&self) -> &'static str {
        match self {
            ChartKind::SeedsUsed => SEEDS_USED_LABEL,
            _ => HARVEST_AMOUNT_LABEL,
        }
    }

    /// Dimension that splits the marks into colored series.
    pub fn color_by(&self) -> Dimension {
        match self {
            ChartKind::HarvestAmount | ChartKind::SeedsUsed => Dimension::Region,
            ChartKind::HarvestStatus => Dimension::HarvestStatus,
            ChartKind::ThreshingStatus => Dimension::ThreshingStatus,
        }
    }

    /// Extra column shown on hover (scatter charts only).
    pub fn hover_dimension(&self) -> Option<Dimension> {
        match self {
            ChartKind::HarvestStatus => Some(Dimension::ThreshingStatus),
            ChartKind::ThreshingStatus => Some(Dimension::HarvestStatus),
            _ => None,
        }
    }

    fn hover_status(&self, record: &Record) -> Status {
        match self {
            ChartKind::ThreshingStatus => record.harvest_status,
            _ => record.threshing_status,
        }
    }

    fn y_value(&self, record: &Record) -> f64 {
        match self {
            ChartKind::SeedsUsed => record.seeds_used_kgs,
            _ => record.harvest_amount_kgs,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarMark {
    pub category: usize,
    pub base: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterMark {
    pub category: usize,
    pub value: f64,
    pub seeds_used: f64,
    pub radius: f32,
    pub hover: Status,
}

/// Marks sharing one color.
#[derive(Debug, Clone, PartialEq)]
pub struct Series<M> {
    pub name: String,
    /// Palette slot, in order of first appearance.
    pub color_index: usize,
    pub marks: Vec<M>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    Bar(Vec<Series<BarMark>>),
    Scatter(Vec<Series<ScatterMark>>),
}

/// Everything a backend needs to draw one chart panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub kind: ChartKind,
    /// Entity column on the x axis.
    pub x_label: &'static str,
    /// Entity values, in order of first appearance.
    pub categories: Vec<String>,
    pub body: ChartBody,
}

impl ChartModel {
    pub fn is_empty(&self) -> bool {
        self.mark_count() == 0
    }

    pub fn mark_count(&self) -> usize {
        match &self.body {
            ChartBody::Bar(series) => series.iter().map(|s| s.marks.len()).sum(),
            ChartBody::Scatter(series) => series.iter().map(|s| s.marks.len()).sum(),
        }
    }

    /// Upper bound of the y axis (top of the tallest stack or point).
    pub fn y_max(&self) -> f64 {
        let max = match &self.body {
            ChartBody::Bar(series) => series
                .iter()
                .flat_map(|s| s.marks.iter().map(|m| m.base + m.value))
                .fold(0.0, f64::max),
            ChartBody::Scatter(series) => series
                .iter()
                .flat_map(|s| s.marks.iter().map(|m| m.value))
                .fold(0.0, f64::max),
        };
        if max > 0.0 {
            max
        } else {
            1.0
        }
    }
}

/// Builds the four chart models of a page.
pub struct ChartBuilder;

impl ChartBuilder {
    pub fn build_all(entity: Dimension, records: &[&Record]) -> Vec<ChartModel> {
        ChartKind::ALL
            .iter()
            .map(|kind| Self::build(*kind, entity, records))
            .collect()
    }

    pub fn build(kind: ChartKind, entity: Dimension, records: &[&Record]) -> ChartModel {
        let (categories, category_of) = Self::categories(entity, records);

        let body = match kind {
            ChartKind::HarvestAmount | ChartKind::SeedsUsed => {
                ChartBody::Bar(Self::bar_series(kind, entity, records, &category_of))
            }
            ChartKind::HarvestStatus | ChartKind::ThreshingStatus => {
                ChartBody::Scatter(Self::scatter_series(kind, entity, records, &category_of))
            }
        };

        ChartModel {
            kind,
            x_label: entity.column(),
            categories,
            body,
        }
    }

    fn categories<'a>(
        entity: Dimension,
        records: &[&'a Record],
    ) -> (Vec<String>, HashMap<&'a str, usize>) {
        let mut categories = Vec::new();
        let mut index = HashMap::new();
        for record in records {
            let value = entity.value(*record);
            index.entry(value).or_insert_with(|| {
                categories.push(value.to_string());
                categories.len() - 1
            });
        }
        (categories, index)
    }

    /// Group records by the color dimension, keeping first-appearance order.
    fn group<'a>(kind: ChartKind, records: &[&'a Record]) -> Vec<(String, Vec<&'a Record>)> {
        let color_by = kind.color_by();
        let mut groups: Vec<(String, Vec<&'a Record>)> = Vec::new();
        for record in records {
            let key = color_by.value(*record);
            match groups.iter_mut().find(|(name, _)| name.as_str() == key) {
                Some((_, members)) => members.push(*record),
                None => groups.push((key.to_string(), vec![*record])),
            }
        }
        groups
    }

    fn bar_series(
        kind: ChartKind,
        entity: Dimension,
        records: &[&Record],
        category_of: &HashMap<&str, usize>,
    ) -> Vec<Series<BarMark>> {
        let mut stack_top = vec![0.0; category_of.len()];

        Self::group(kind, records)
            .into_iter()
            .enumerate()
            .map(|(color_index, (name, members))| {
                let marks = members
                    .iter()
                    .map(|record| {
                        let category = category_of[entity.value(record)];
                        let value = kind.y_value(record);
                        let base = stack_top[category];
                        stack_top[category] += value;
                        BarMark {
                            category,
                            base,
                            value,
                        }
                    })
                    .collect();
                Series {
                    name,
                    color_index,
                    marks,
                }
            })
            .collect()
    }

    fn scatter_series(
        kind: ChartKind,
        entity: Dimension,
        records: &[&Record],
        category_of: &HashMap<&str, usize>,
    ) -> Vec<Series<ScatterMark>> {
        let max_seeds = records
            .iter()
            .map(|r| r.seeds_used_kgs)
            .fold(0.0, f64::max);

        Self::group(kind, records)
            .into_iter()
            .enumerate()
            .map(|(color_index, (name, members))| {
                let marks = members
                    .iter()
                    .map(|record| ScatterMark {
                        category: category_of[entity.value(record)],
                        value: kind.y_value(record),
                        seeds_used: record.seeds_used_kgs,
                        radius: marker_radius(record.seeds_used_kgs, max_seeds),
                        hover: kind.hover_status(record),
                    })
                    .collect();
                Series {
                    name,
                    color_index,
                    marks,
                }
            })
            .collect()
    }
}

/// Marker area proportional to seed weight.
pub fn marker_radius(seeds: f64, max_seeds: f64) -> f32 {
    if max_seeds <= 0.0 {
        return MIN_MARKER_RADIUS;
    }
    let scaled = MAX_MARKER_RADIUS * (seeds / max_seeds).sqrt() as f32;
    scaled.max(MIN_MARKER_RADIUS)
}
