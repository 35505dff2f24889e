//! Passing Defense Dashboard
//!
//! Loads play and defensive-alignment tables, joins them, buckets field
//! position into zones and serves a filterable heatmap of average EPA by
//! defensive alignment and offensive formation.
//!
//! Data flow per request: selection -> [`data::filter_rows`] ->
//! [`stats::PivotCalculator::aggregate`] -> [`charts::HeatmapRenderer`].

pub mod charts;
pub mod config;
pub mod data;
pub mod server;
pub mod stats;
pub mod view;

pub use config::DashboardConfig;
pub use view::{ChartView, Dashboard, ViewModel};
