use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use manni::{routes::RoutePager, shared::time::parse_timestamp};
use tracing::error;

use crate::{
    api::{client_status, required},
    dto::RouteDto,
    state::AppState,
};

const MAX_PAGES: usize = 5;

/// Routes between two stops, optionally following the pagination trigger
/// for `pages` pages.
pub async fn routes(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let from = required(&params, "from")?;
    let to = required(&params, "to")?;
    let now = Utc::now();
    let time = match params.get("time") {
        Some(value) => parse_timestamp(value).ok_or(StatusCode::BAD_REQUEST)?,
        None => now,
    };
    let pages: usize = match params.get("pages") {
        Some(value) => value.parse().map_err(|_| StatusCode::BAD_REQUEST)?,
        None => 1,
    };

    let mut pager = RoutePager::new(from, to);
    pager
        .load(state.client.as_ref(), time)
        .await
        .map_err(|err| {
            error!("Failed to fetch routes from {from} to {to}: {err}");
            client_status(&err)
        })?;
    for _ in 1..pages.clamp(1, MAX_PAGES) {
        match pager.load_next(state.client.as_ref(), now).await {
            Ok(Some(_)) => {}
            Ok(None) => break,
            // Keep what was loaded so far
            Err(err) => {
                error!("Failed to fetch next page from {from} to {to}: {err}");
                break;
            }
        }
    }

    let result: Vec<_> = pager
        .routes()
        .iter()
        .map(|route| RouteDto::from(route, now))
        .collect();
    Ok(Json(result).into_response())
}
