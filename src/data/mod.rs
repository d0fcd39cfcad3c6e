//! Data module - spreadsheet loading, cleaning and filtering

mod cleaner;
mod filter;
mod loader;
pub(crate) mod record;

pub use cleaner::{CleaningPolicy, DataCleaner};
pub use filter::Filter;
pub use loader::{DataLoader, LoadOptions};
pub use record::{Dataset, Dimension, Record, Status};
