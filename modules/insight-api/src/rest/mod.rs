use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::warn;

use insight_common::FilterSelection;
use insight_metrics::{DashboardOptions, DashboardView, TopicOrder};

use crate::AppState;

/// Query keys on `/api/dashboard` that tune the view instead of filtering it.
const RADAR_ORDER_PARAM: &str = "radar_order";
const TOP_N_PARAM: &str = "top_n";
const MAX_TOP_N: usize = 50;

// --- Helpers ---

fn bad_request(message: impl Into<String>) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "message": message.into() })),
    )
        .into_response()
}

/// Split dashboard query params into view options and the filter selection.
fn parse_dashboard_query(
    mut params: HashMap<String, String>,
) -> Result<(FilterSelection, DashboardOptions), String> {
    let mut options = DashboardOptions::default();

    if let Some(raw) = params.remove(RADAR_ORDER_PARAM) {
        if !raw.trim().is_empty() {
            options.radar_order = raw.parse::<TopicOrder>().map_err(|e| e.to_string())?;
        }
    }

    if let Some(raw) = params.remove(TOP_N_PARAM) {
        if !raw.trim().is_empty() {
            let n: usize = raw
                .trim()
                .parse()
                .map_err(|_| format!("top_n must be a positive integer, got {raw:?}"))?;
            options.top_n = n.clamp(1, MAX_TOP_N);
        }
    }

    Ok((FilterSelection::from(params), options))
}

// --- Handlers ---

pub async fn health() -> &'static str {
    "ok"
}

pub async fn api_insights(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.snapshots.load_full();
    Json(snapshot.records.clone())
}

pub async fn api_filters(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.snapshots.load_full();
    Json(snapshot.distinct_values())
}

pub async fn api_map_data(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.snapshots.load_full();
    Json(snapshot.country_totals())
}

pub async fn api_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let (selection, options) = match parse_dashboard_query(params) {
        Ok(parsed) => parsed,
        Err(message) => {
            warn!(error = %message, "Rejected dashboard query");
            return bad_request(message);
        }
    };

    let snapshot = state.snapshots.load_full();
    Json(DashboardView::build(&snapshot.records, &selection, options)).into_response()
}

pub async fn api_reload(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let reloaded = state.snapshots.reload().await;
    let snapshot = state.snapshots.load_full();
    if !reloaded {
        warn!("Manual reload did not swap the snapshot");
    }
    Json(serde_json::json!({
        "reloaded": reloaded,
        "records": snapshot.len(),
        "loaded_at": snapshot.loaded_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_metrics::DEFAULT_TOP_N;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn view_options_are_not_filters() {
        let (selection, options) = parse_dashboard_query(params(&[
            ("topic", "oil"),
            ("radar_order", "frequency"),
            ("top_n", "3"),
        ]))
        .unwrap();

        assert_eq!(selection.len(), 1);
        assert_eq!(selection.get("topic"), Some("oil"));
        assert_eq!(options.radar_order, TopicOrder::Frequency);
        assert_eq!(options.top_n, 3);
    }

    #[test]
    fn defaults_apply_when_options_absent_or_blank() {
        let (_, options) =
            parse_dashboard_query(params(&[("radar_order", ""), ("top_n", " ")])).unwrap();
        assert_eq!(options.radar_order, TopicOrder::FirstSeen);
        assert_eq!(options.top_n, DEFAULT_TOP_N);
    }

    #[test]
    fn top_n_is_clamped() {
        let (_, options) = parse_dashboard_query(params(&[("top_n", "0")])).unwrap();
        assert_eq!(options.top_n, 1);
        let (_, options) = parse_dashboard_query(params(&[("top_n", "500")])).unwrap();
        assert_eq!(options.top_n, MAX_TOP_N);
    }

    #[test]
    fn invalid_options_are_rejected() {
        assert!(parse_dashboard_query(params(&[("radar_order", "alphabetical")])).is_err());
        assert!(parse_dashboard_query(params(&[("top_n", "-2")])).is_err());
    }
}
