//! Stats module - aggregation and pivot of filtered plays

mod pivot;

pub use pivot::{Aggregation, PivotCalculator, PivotMatrix};
