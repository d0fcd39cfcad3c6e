//! Selection filter over the cleaned table.

use crate::data::record::{Dataset, Dimension, Record};
use std::collections::HashSet;

/// Conjunction of "dimension value is one of the selected values" clauses.
///
/// Dimensions without a clause are unconstrained; a clause with an empty
/// selection matches nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<(Dimension, HashSet<String>)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Filter::select`].
    pub fn with<I, S>(mut self, dimension: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select(dimension, values);
        self
    }

    /// Replace the selection for `dimension`.
    pub fn select<I, S>(&mut self, dimension: Dimension, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: HashSet<String> = values.into_iter().map(Into::into).collect();
        match self.clauses.iter_mut().find(|(d, _)| *d == dimension) {
            Some((_, selected)) => *selected = values,
            None => self.clauses.push((dimension, values)),
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.clauses
            .iter()
            .all(|(dimension, selected)| selected.contains(dimension.value(record)))
    }

    /// Matching records, in table order.
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Record> {
        dataset.records().iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::{record, Status};

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            record("North", "A", "F1", "D1", 10.0, Status::Done, Status::Done, 40.0),
            record("North", "B", "F1", "D2", 5.0, Status::NotYet, Status::NotYet, 0.0),
            record("South", "C", "F2", "D3", 8.0, Status::Done, Status::NotYet, 25.0),
            record("East", "D", "F3", "D4", 2.0, Status::NotYet, Status::Done, 3.0),
        ])
    }

    fn all_selected(ds: &Dataset, dims: &[Dimension]) -> Filter {
        dims.iter()
            .fold(Filter::new(), |f, d| f.with(*d, ds.distinct(*d)))
    }

    const FBA_PAGE: [Dimension; 4] = [
        Dimension::Region,
        Dimension::District,
        Dimension::HarvestStatus,
        Dimension::ThreshingStatus,
    ];

    #[test]
    fn all_values_selected_keeps_every_record() {
        let ds = dataset();
        let filter = all_selected(&ds, &FBA_PAGE);

        assert_eq!(filter.apply(&ds).len(), ds.len());
    }

    #[test]
    fn clauses_are_conjunctive() {
        let ds = dataset();
        let filter = all_selected(&ds, &FBA_PAGE)
            .with(Dimension::Region, ["North", "South"])
            .with(Dimension::HarvestStatus, ["DONE"]);

        let names: Vec<&str> = filter.apply(&ds).iter().map(|r| r.dac_name.as_str()).collect();
        assert_eq!(names, vec!["D1", "D3"]);
    }

    #[test]
    fn empty_selection_yields_empty_result() {
        let ds = dataset();
        let filter = all_selected(&ds, &FBA_PAGE).with(Dimension::District, Vec::<String>::new());

        assert!(filter.apply(&ds).is_empty());
    }

    #[test]
    fn unknown_value_yields_empty_result() {
        let ds = Dataset::from_records(vec![record(
            "South", "C", "F2", "D3", 8.0, Status::Done, Status::NotYet, 25.0,
        )]);
        let filter = all_selected(&ds, &FBA_PAGE).with(Dimension::Region, ["North"]);

        assert!(filter.apply(&ds).is_empty());
    }

    #[test]
    fn shrinking_a_selection_never_grows_the_result() {
        let ds = dataset();
        let regions = ds.distinct(Dimension::Region);

        let mut previous = usize::MAX;
        for keep in (0..=regions.len()).rev() {
            let filter = all_selected(&ds, &FBA_PAGE)
                .with(Dimension::Region, regions[..keep].iter().cloned());
            let size = filter.apply(&ds).len();
            assert!(size <= previous);
            previous = size;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn applying_twice_is_identical() {
        let ds = dataset();
        let filter = all_selected(&ds, &FBA_PAGE).with(Dimension::ThreshingStatus, ["NOT YET"]);

        assert_eq!(filter.apply(&ds), filter.apply(&ds));
    }

    #[test]
    fn select_replaces_existing_clause() {
        let ds = dataset();
        let mut filter = Filter::new().with(Dimension::FbaName, ["F1"]);
        filter.select(Dimension::FbaName, ["F2", "F3"]);

        let fbas: Vec<&str> = filter.apply(&ds).iter().map(|r| r.fba_name.as_str()).collect();
        assert_eq!(fbas, vec!["F2", "F3"]);
    }
}
