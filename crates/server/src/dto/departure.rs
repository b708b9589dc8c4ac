use chrono::{DateTime, Utc};
use manni::models::{Departure, DepartureBoard, Mode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartureDto {
    pub trip_id: String,
    pub line: String,
    pub direction: String,
    pub mode: Mode,
    pub color: String,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub real_time: Option<DateTime<Utc>>,
    pub eta_minutes: Option<i64>,
    /// "in 4 min"
    pub eta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl DepartureDto {
    pub fn from(departure: &Departure, now: DateTime<Utc>) -> Self {
        Self {
            trip_id: departure.id.to_string(),
            line: departure.line.to_string(),
            direction: departure.direction.to_string(),
            mode: departure.mode,
            color: departure.color().to_string(),
            scheduled_time: departure.scheduled_time,
            real_time: departure.real_time,
            eta_minutes: departure.eta_minutes(now),
            eta: departure.eta_label(now),
            platform: departure.platform.as_deref().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartureBoardDto {
    pub stop_id: String,
    pub expires_at: DateTime<Utc>,
    pub departures: Vec<DepartureDto>,
}

impl DepartureBoardDto {
    pub fn from(board: &DepartureBoard, now: DateTime<Utc>) -> Self {
        Self {
            stop_id: board.stop_id.to_string(),
            expires_at: board.expires_at,
            departures: board
                .departures
                .iter()
                .map(|departure| DepartureDto::from(departure, now))
                .collect(),
        }
    }
}
