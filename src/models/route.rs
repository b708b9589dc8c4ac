use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Mode;

/// A call of a route segment at a stop.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularStop {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_id: Option<Arc<str>>,
    pub name: Arc<str>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub departure_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Arc<str>>,
}

/// One segment of a [`Route`] travelled with a single mode (a ride or a walk).
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialRoute {
    pub mode: Mode,
    /// Line label (e.g. "3" or "S1"), absent on walks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Arc<str>>,
    /// Stops served by this segment in travel order.
    pub regular_stops: Vec<RegularStop>,
}

/// A connection between two stops made of one or more segments.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: Arc<str>,
    pub partial_routes: Vec<PartialRoute>,
}

impl Route {
    /// Departure of the first segment's first stop, if the service reported it.
    pub fn scheduled_departure(&self) -> Option<DateTime<Utc>> {
        self.partial_routes
            .first()?
            .regular_stops
            .first()?
            .departure_time
    }

    /// Departure time of the route, `now` when it is unknown.
    pub fn departure_time_or(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.scheduled_departure().unwrap_or(now)
    }

    pub fn departure_time(&self) -> DateTime<Utc> {
        self.departure_time_or(Utc::now())
    }

    /// Arrival of the last segment's last stop.
    pub fn arrival_time(&self) -> Option<DateTime<Utc>> {
        self.partial_routes.last()?.regular_stops.last()?.arrival_time
    }

    /// Modes of all segments in order.
    pub fn mode_chain(&self) -> impl Iterator<Item = Mode> + '_ {
        self.partial_routes.iter().map(|partial| partial.mode)
    }

    pub fn same_mode_chain(&self, other: &Self) -> bool {
        self.mode_chain().eq(other.mode_chain())
    }

    pub fn duration_minutes(&self) -> Option<i64> {
        let departure = self.scheduled_departure()?;
        let arrival = self.arrival_time()?;
        Some((arrival - departure).num_minutes())
    }

    /// Number of changes between vehicles, walks do not count.
    pub fn transfers(&self) -> usize {
        self.mode_chain()
            .filter(|mode| !mode.is_walking())
            .count()
            .saturating_sub(1)
    }
}
