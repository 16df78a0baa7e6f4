// HTTP request handlers
use crate::application::dashboard_service::DashboardError;
use crate::infrastructure::json_mapper::{
    dashboard_to_json, records_to_json, report_to_json, totals_to_json,
};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    pub year: Option<i32>,
    /// Comma-separated state names
    pub states: Option<String>,
}

impl SelectionQuery {
    /// `None` when `states` is absent; `?states=` is an explicit empty selection
    pub fn selection(&self) -> Option<Vec<String>> {
        self.states.as_deref().map(|states| {
            states
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
    }

    pub fn state_list(&self) -> Vec<String> {
        self.selection().unwrap_or_default()
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match self {
            DashboardError::UnknownYear(_) | DashboardError::UnknownState(_) => {
                StatusCode::BAD_REQUEST
            }
            DashboardError::EmptyDataset => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!("Request failed: {}", self);
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List all states in dataset order
pub async fn list_states(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let states: Vec<String> = state
        .dashboard_service
        .dataset()
        .regions()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(states)
}

/// Master dataset rows filtered by year and states
pub async fn list_records(
    Query(query): Query<SelectionQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, DashboardError> {
    let rows = state
        .dashboard_service
        .records(query.year, &query.state_list())?;
    Ok(Json(records_to_json(rows)))
}

/// Every year for one state
pub async fn state_records(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, DashboardError> {
    let rows = state.dashboard_service.records(None, &[name])?;
    Ok(Json(records_to_json(rows)))
}

/// Summed national figures for a year
pub async fn national_totals(
    Query(query): Query<SelectionQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, DashboardError> {
    let totals = state.dashboard_service.national_totals(query.year)?;
    Ok(Json(totals_to_json(totals)))
}

/// Tiles, charts and report for a year and state selection
pub async fn get_dashboard(
    Query(query): Query<SelectionQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, DashboardError> {
    let dashboard = state
        .dashboard_service
        .get_dashboard(query.year, query.selection().as_deref())?;
    Ok(Json(dashboard_to_json(dashboard)))
}

/// Narrative summary only
pub async fn get_report(
    Query(query): Query<SelectionQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, DashboardError> {
    let report = state
        .dashboard_service
        .get_report(query.year, query.selection().as_deref())?;
    Ok(Json(report_to_json(report)))
}
