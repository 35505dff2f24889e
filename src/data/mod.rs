//! Data module - CSV loading, join/enrichment and filtering

pub mod filter;
pub mod loader;
pub mod model;
pub mod processor;

pub use filter::{filter_rows, Selection};
pub use loader::{DataLoader, LoaderError};
pub use model::{DefenseRecord, EnrichedRow, FieldZone, PlayRecord};
pub use processor::{DataProcessor, EnrichmentSummary};
