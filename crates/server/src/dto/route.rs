use chrono::{DateTime, Utc};
use manni::models::{Mode, PartialRoute, RegularStop, Route};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteDto {
    pub id: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i64>,
    pub transfers: usize,
    pub legs: Vec<LegDto>,
}

impl RouteDto {
    pub fn from(route: &Route, now: DateTime<Utc>) -> Self {
        Self {
            id: route.id.to_string(),
            departure_time: route.departure_time_or(now),
            arrival_time: route.arrival_time(),
            duration_minutes: route.duration_minutes(),
            transfers: route.transfers(),
            legs: route.partial_routes.iter().map(LegDto::from).collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LegDto {
    pub mode: Mode,
    pub color: String,
    pub line: Option<String>,
    pub direction: Option<String>,
    pub stops: Vec<RegularStop>,
}

impl LegDto {
    pub fn from(partial: &PartialRoute) -> Self {
        Self {
            mode: partial.mode,
            color: partial.mode.color().to_string(),
            line: partial.line.as_deref().map(str::to_string),
            direction: partial.direction.as_deref().map(str::to_string),
            stops: partial.regular_stops.clone(),
        }
    }
}
