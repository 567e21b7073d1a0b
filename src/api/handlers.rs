//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::debug;

use crate::config::ScenarioConfig;

use super::AppState;
use super::types::{DetailQuery, DetailResponse, ErrorResponse, SimulateResponse, SummaryResponse};

/// Returns the monthly table and payback of the loaded scenario.
///
/// `GET /summary` → 200 + `SummaryResponse` JSON
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    Json(SummaryResponse {
        battery: state.scenario.battery,
        months: state.output.summaries.clone(),
        projection: state.projection,
    })
}

/// Returns the detail month's hourly trace, optionally restricted to a range.
///
/// `GET /detail` → 200 + whole month
/// `GET /detail?from=240&to=288` → inclusive hour range
/// `GET /detail?from=10&to=5` → 400 + `ErrorResponse`
/// No months loaded → 404 + `ErrorResponse`
pub async fn get_detail(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DetailQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(format!(
                "`from` ({from}) must be <= `to` ({to})"
            ))),
        ));
    }

    let Some(detail) = state.output.detail.as_ref() else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("scenario has no months")),
        ));
    };

    let window = detail.window(from, to);
    Ok(Json(DetailResponse::new(detail, &window)))
}

/// Simulates the scenario in the request body.
///
/// `POST /simulate` + `ScenarioConfig` JSON → 200 + `SimulateResponse`
/// Invalid scenario → 422 + `ErrorResponse` listing every problem
pub async fn post_simulate(
    Json(scenario): Json<ScenarioConfig>,
) -> Result<Json<SimulateResponse>, (StatusCode, Json<ErrorResponse>)> {
    let errors = scenario.validate();
    if !errors.is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: "invalid scenario".to_string(),
                details: errors.iter().map(ToString::to_string).collect(),
            }),
        ));
    }

    debug!(months = scenario.months.len(), "simulating posted scenario");
    let output = scenario.run().map_err(|e| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::new(e.to_string())),
        )
    })?;
    let projection = output.projection(scenario.economics.installation_cost);

    Ok(Json(SimulateResponse {
        months: output.summaries,
        total_savings: output.total_savings,
        projection,
        detail: output.detail,
    }))
}
