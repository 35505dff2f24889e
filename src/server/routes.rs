use super::page::render_page;
use crate::data::Selection;
use crate::view::{ChartView, Dashboard};
use axum::extract::{Query, State};
use axum::http::header::ACCEPT;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error};

pub const ZONE_PARAM: &str = "zone";
pub const ALIGNMENT_PARAM: &str = "alignment";
pub const APPLIED_PARAM: &str = "applied";

/// Read the selection from repeated `zone=` / `alignment=` pairs.
///
/// A query with none of the dashboard parameters is a first visit and gets
/// every option selected. Once the form has been submitted (`applied=1`), the
/// lists are taken as given, empty ones included.
pub fn selection_from_query(params: &[(String, String)], dashboard: &Dashboard) -> Selection {
    let explicit = params
        .iter()
        .any(|(key, _)| key == ZONE_PARAM || key == ALIGNMENT_PARAM || key == APPLIED_PARAM);
    if !explicit {
        return dashboard.default_selection();
    }

    let values = |name: &str| {
        params
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .collect::<Vec<_>>()
    };
    Selection::new(values(ZONE_PARAM), values(ALIGNMENT_PARAM))
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}

pub async fn dashboard_handler(
    State(dashboard): State<Arc<Dashboard>>,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let started = Instant::now();
    let selection = selection_from_query(&params, &dashboard);

    let view = match dashboard.render(&selection) {
        Ok(view) => view,
        Err(err) => {
            error!(error = %err, "chart rendering failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "chart rendering failed").into_response();
        }
    };

    let chart_kind = match &view.chart {
        ChartView::Heatmap { .. } => "heatmap",
        ChartView::NoData { .. } => "no_data",
    };
    debug!(
        zones = selection.zones.len(),
        alignments = selection.alignments.len(),
        chart = chart_kind,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "dashboard rendered"
    );

    if wants_json(&headers) {
        Json(view).into_response()
    } else {
        Html(render_page(&view)).into_response()
    }
}
