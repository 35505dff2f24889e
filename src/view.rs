//! Dashboard view model.
//!
//! [`Dashboard`] owns the enriched dataset for the life of the process and
//! turns a [`Selection`] into a [`ViewModel`]. It holds no mutable state, so
//! one instance can be shared by every request.

use crate::charts::{ChartError, HeatmapRenderer, HEATMAP_TITLE, NO_DATA_MESSAGE, NO_DATA_TITLE};
use crate::data::{
    filter_rows, DataProcessor, DefenseRecord, EnrichedRow, EnrichmentSummary, PlayRecord,
    Selection,
};
use crate::stats::{Aggregation, PivotCalculator, PivotMatrix};
use serde::Serialize;
use std::collections::BTreeSet;

/// What the chart region shows for one selection.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartView {
    Heatmap {
        title: String,
        matrix: PivotMatrix,
        #[serde(skip)]
        svg: String,
    },
    NoData {
        title: String,
        message: String,
        #[serde(skip)]
        svg: String,
    },
}

impl ChartView {
    pub fn svg(&self) -> &str {
        match self {
            ChartView::Heatmap { svg, .. } | ChartView::NoData { svg, .. } => svg,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, ChartView::NoData { .. })
    }
}

/// Everything the page needs for one render.
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    pub title: String,
    pub zone_options: Vec<String>,
    pub alignment_options: Vec<String>,
    pub selection: Selection,
    pub chart: ChartView,
}

pub struct Dashboard {
    title: String,
    rows: Vec<EnrichedRow>,
    zone_options: Vec<String>,
    alignment_options: Vec<String>,
    renderer: HeatmapRenderer,
}

impl Dashboard {
    pub fn new(title: impl Into<String>, rows: Vec<EnrichedRow>) -> Self {
        // Lexical order for both lists, zones included.
        let zone_options: BTreeSet<String> =
            rows.iter().map(|r| r.zone.label().to_string()).collect();
        let alignment_options: BTreeSet<String> =
            rows.iter().map(|r| r.alignment.clone()).collect();

        Self {
            title: title.into(),
            rows,
            zone_options: zone_options.into_iter().collect(),
            alignment_options: alignment_options.into_iter().collect(),
            renderer: HeatmapRenderer::default(),
        }
    }

    /// Join and enrich the two source tables, then build the dashboard.
    pub fn from_sources(
        title: impl Into<String>,
        plays: &[PlayRecord],
        defense: &[DefenseRecord],
    ) -> (Self, EnrichmentSummary) {
        let (rows, summary) = DataProcessor::enrich(plays, defense);
        (Self::new(title, rows), summary)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rows(&self) -> &[EnrichedRow] {
        &self.rows
    }

    pub fn zone_options(&self) -> &[String] {
        &self.zone_options
    }

    pub fn alignment_options(&self) -> &[String] {
        &self.alignment_options
    }

    /// Both controls start with every option selected.
    pub fn default_selection(&self) -> Selection {
        Selection::new(self.zone_options.clone(), self.alignment_options.clone())
    }

    /// Filter, then group and pivot.
    pub fn aggregate(&self, selection: &Selection) -> Aggregation {
        let subset = filter_rows(&self.rows, selection);
        PivotCalculator::aggregate(&subset)
    }

    /// Build the view for one selection.
    pub fn render(&self, selection: &Selection) -> Result<ViewModel, ChartError> {
        let chart = match self.aggregate(selection) {
            Aggregation::Empty => ChartView::NoData {
                title: NO_DATA_TITLE.to_string(),
                message: NO_DATA_MESSAGE.to_string(),
                svg: self.renderer.render_no_data()?,
            },
            Aggregation::Matrix(matrix) => {
                let svg = self.renderer.render_matrix(&matrix)?;
                ChartView::Heatmap {
                    title: HEATMAP_TITLE.to_string(),
                    matrix,
                    svg,
                }
            }
        };

        Ok(ViewModel {
            title: self.title.clone(),
            zone_options: self.zone_options.clone(),
            alignment_options: self.alignment_options.clone(),
            selection: selection.clone(),
            chart,
        })
    }
}
