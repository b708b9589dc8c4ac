//! Access to the transit-data service.
//!
//! [`TransitClient`] is the seam the rest of the crate talks to, every call
//! resolves to a success payload or a typed [`Error`]. [`HafasClient`]
//! implements it on top of a transport.rest style HAFAS REST API.

mod config;
mod hafas;

pub use config::*;
pub use hafas::*;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{
    models::{DepartureBoard, Route, Stop, TripStop},
    shared::geo::Coordinate,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),
    #[error("Service responded with HTTP {0}")]
    Status(u16),
    #[error("Rate limit exceeded, retry after {0:?} seconds")]
    RateLimited(Option<u64>),
    #[error("Could not parse response: {0}")]
    Parse(String),
    #[error("Search query must not be empty")]
    EmptyQuery,
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Whether asking again later may succeed.
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::Timeout(_) | Self::RateLimited(_) | Self::Status(500..)
        )
    }
}

#[async_trait]
pub trait TransitClient: Send + Sync {
    /// Stops whose name matches `query`.
    async fn search_stops(&self, query: &str) -> Result<Vec<Stop>, Error>;

    /// Stops around `coordinate`.
    async fn stops_near(&self, coordinate: Coordinate) -> Result<Vec<Stop>, Error>;

    /// One page of routes between two stops leaving from `time` on.
    async fn find_routes(
        &self,
        from: &str,
        to: &str,
        time: DateTime<Utc>,
    ) -> Result<Vec<Route>, Error>;

    /// Upcoming departures at a stop.
    async fn departures(&self, stop_id: &str) -> Result<DepartureBoard, Error>;

    /// All stop calls of a trip.
    async fn trip_stops(&self, trip_id: &str) -> Result<Vec<TripStop>, Error>;
}

#[async_trait]
impl<T> TransitClient for Arc<T>
where
    T: TransitClient + ?Sized,
{
    async fn search_stops(&self, query: &str) -> Result<Vec<Stop>, Error> {
        (**self).search_stops(query).await
    }

    async fn stops_near(&self, coordinate: Coordinate) -> Result<Vec<Stop>, Error> {
        (**self).stops_near(coordinate).await
    }

    async fn find_routes(
        &self,
        from: &str,
        to: &str,
        time: DateTime<Utc>,
    ) -> Result<Vec<Route>, Error> {
        (**self).find_routes(from, to, time).await
    }

    async fn departures(&self, stop_id: &str) -> Result<DepartureBoard, Error> {
        (**self).departures(stop_id).await
    }

    async fn trip_stops(&self, trip_id: &str) -> Result<Vec<TripStop>, Error> {
        (**self).trip_stops(trip_id).await
    }
}
