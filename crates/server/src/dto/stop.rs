use chrono::{DateTime, Utc};
use manni::{
    models::{Stop, TripStop},
    shared::geo::Coordinate,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopDto {
    pub id: String,
    pub name: String,
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,
    /// "350 m away, in Dresden"
    pub label: String,
}

impl StopDto {
    pub fn from(stop: &Stop, from: Option<&Coordinate>, default_region: &str) -> Self {
        Self {
            id: stop.id.to_string(),
            name: stop.name.to_string(),
            region: stop.region_or(default_region).to_string(),
            coordinate: stop.coordinate,
            distance_meters: from
                .and_then(|from| stop.distance(from))
                .map(|distance| distance.as_meters()),
            label: stop.location_label(from, default_region),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripStopDto {
    pub stop: StopDto,
    pub arrival_time: Option<DateTime<Utc>>,
    pub departure_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl TripStopDto {
    pub fn from(trip_stop: &TripStop, default_region: &str) -> Self {
        Self {
            stop: StopDto::from(&trip_stop.stop, None, default_region),
            arrival_time: trip_stop.arrival_time,
            departure_time: trip_stop.departure_time,
            platform: trip_stop.platform.as_deref().map(str::to_string),
        }
    }
}
