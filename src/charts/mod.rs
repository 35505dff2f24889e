//! Charts module - Chart rendering

mod heatmap;

pub use heatmap::{ChartError, HeatmapRenderer, HEATMAP_TITLE, NO_DATA_MESSAGE, NO_DATA_TITLE};
