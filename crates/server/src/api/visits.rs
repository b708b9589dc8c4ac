use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use manni::models::Stop;
use tracing::error;

use crate::{api::required, dto::StopDto, state::AppState};

pub async fn suggestions(State(state): State<Arc<AppState>>) -> Result<Response, StatusCode> {
    let stops = state.visits.lock().await.get_suggestions();
    let result: Vec<_> = stops
        .iter()
        .map(|stop| StopDto::from(stop, None, &state.config.default_region))
        .collect();
    Ok(Json(result).into_response())
}

pub async fn record_visit(
    State(state): State<Arc<AppState>>,
    Json(stop): Json<Stop>,
) -> Result<Response, StatusCode> {
    if stop.id.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    state
        .visits
        .lock()
        .await
        .record_visit(&stop)
        .map_err(|err| {
            error!("Failed to record visit of {}: {err}", stop.id);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Turns suggestions on or off, `?predictions=true|false`.
pub async fn settings(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let enabled: bool = required(&params, "predictions")?
        .parse()
        .map_err(|_| StatusCode::BAD_REQUEST)?;
    state.visits.lock().await.set_enabled(enabled);
    Ok(StatusCode::NO_CONTENT.into_response())
}
