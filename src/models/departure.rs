use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    models::{Mode, Stop},
    shared::time,
};

/// A single upcoming departure at a monitored stop.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Departure {
    /// Identifier of the trip, used to look up its stop calls.
    pub id: Arc<str>,
    pub line: Arc<str>,
    pub direction: Arc<str>,
    pub mode: Mode,
    pub scheduled_time: Option<DateTime<Utc>>,
    /// Real-time prediction, absent when the vehicle does not report.
    pub real_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Arc<str>>,
}

impl Departure {
    pub const fn color(&self) -> &'static str {
        self.mode.color()
    }

    /// Best known departure time, real-time first.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.real_time.or(self.scheduled_time)
    }

    pub fn delay_minutes(&self) -> Option<i64> {
        Some((self.real_time? - self.scheduled_time?).num_minutes())
    }

    pub fn eta_minutes(&self, now: DateTime<Utc>) -> Option<i64> {
        self.time().map(|then| time::minutes_until(now, then))
    }

    pub fn eta_label(&self, now: DateTime<Utc>) -> Option<String> {
        self.eta_minutes(now).map(time::eta_label)
    }
}

/// The departures of a stop together with the time they should be refreshed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartureBoard {
    pub stop_id: Arc<str>,
    pub departures: Vec<Departure>,
    pub expires_at: DateTime<Utc>,
}

/// A call of a trip at a stop.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripStop {
    pub stop: Stop,
    pub arrival_time: Option<DateTime<Utc>>,
    pub departure_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Arc<str>>,
}
