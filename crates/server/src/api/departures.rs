use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use manni::client::TransitClient;
use tracing::error;

use crate::{
    api::{client_status, required},
    dto::{DepartureBoardDto, TripStopDto},
    state::AppState,
};

pub async fn departures(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let stop_id = required(&params, "stop")?;
    let board = state.client.departures(stop_id).await.map_err(|err| {
        error!("Failed to fetch departures at {stop_id}: {err}");
        client_status(&err)
    })?;
    Ok(Json(DepartureBoardDto::from(&board, Utc::now())).into_response())
}

pub async fn trip(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let trip_id = required(&params, "id")?;
    let stops = state.client.trip_stops(trip_id).await.map_err(|err| {
        error!("Failed to fetch trip {trip_id}: {err}");
        client_status(&err)
    })?;
    let result: Vec<_> = stops
        .iter()
        .map(|stop| TripStopDto::from(stop, &state.config.default_region))
        .collect();
    Ok(Json(result).into_response())
}
