//! Feature-status dataset: records, dates, and the JSON loader.
//!
//! Loaded once per run and shared read-only (`Arc`) between the oracle and
//! the style analyzer. Keys are lowercase feature ids.

pub mod loader;
pub mod types;

pub use loader::FeatureDataset;
pub use types::{BaselineDate, BaselineLevel, FeatureStatusRecord};
