//! Transit companion core.
//!
//! Stop search, nearby stops, departure boards and paginated route search on
//! top of a HAFAS style REST service. The route aggregation in [`routes`] and
//! the distance ranking in [`proximity`] are plain synchronous functions, the
//! rest talks to the outside world through the [`client::TransitClient`],
//! [`location::LocationProvider`] and [`repository::VisitStore`] traits.

pub mod client;
pub mod departures;
mod error;
pub mod location;
pub mod models;
pub mod proximity;
pub mod repository;
pub mod routes;
pub mod search;
pub mod shared;

pub use error::Error;

pub mod prelude {
    pub use crate::Error;
    pub use crate::client::{Config as ClientConfig, HafasClient, TransitClient};
    pub use crate::departures::{DepartureMonitor, MonitorConfig};
    pub use crate::location::{FixedLocation, LocationError, LocationProvider, Unlocated};
    pub use crate::models::{
        Departure, DepartureBoard, Mode, PartialRoute, RegularStop, Route, Stop, TripStop,
    };
    pub use crate::proximity::{Locatable, MissingCoordinate, rank, rank_with};
    pub use crate::repository::{JsonFileStore, MemoryStore, VisitRepository, VisitStore};
    pub use crate::routes::{RoutePager, merge, merge_at, next_fetch};
    pub use crate::search::StopFinder;
    pub use crate::shared::{Coordinate, Distance};
}
