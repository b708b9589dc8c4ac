use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use manni::{
    location::{FixedLocation, Unlocated},
    search::StopFinder,
};

use crate::{
    api::{coordinate, required, status_of},
    dto::StopDto,
    state::AppState,
};

pub async fn search(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let query = required(&params, "q")?;
    let location = coordinate(&params)?;

    let mut finder = StopFinder::new(state.client.clone(), Unlocated::default());
    if let Some(location) = location {
        finder.set_location(location);
    }
    let stops = finder.search(query).await.map_err(status_of)?;

    let result: Vec<_> = stops
        .iter()
        .map(|stop| StopDto::from(stop, location.as_ref(), &state.config.default_region))
        .collect();
    Ok(Json(result).into_response())
}

pub async fn near(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let location = coordinate(&params)?.ok_or(StatusCode::BAD_REQUEST)?;

    let mut finder = StopFinder::new(state.client.clone(), FixedLocation(location));
    let stops = finder.nearby().await.map_err(status_of)?;

    let result: Vec<_> = stops
        .iter()
        .map(|stop| StopDto::from(stop, Some(&location), &state.config.default_region))
        .collect();
    Ok(Json(result).into_response())
}
