#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use manni::{
    client::{Error, TransitClient},
    models::{DepartureBoard, Mode, PartialRoute, RegularStop, Route, Stop, TripStop},
    shared::Coordinate,
};

pub const CENTER: Coordinate = Coordinate::new(51.05089, 13.73832);

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 2, 27, hour, minute, 0).unwrap()
}

/// A route with one segment per mode, the first leaving at `departure`.
pub fn route(id: &str, departure: Option<DateTime<Utc>>, modes: &[Mode]) -> Route {
    Route {
        id: id.into(),
        partial_routes: modes
            .iter()
            .enumerate()
            .map(|(i, mode)| PartialRoute {
                mode: *mode,
                regular_stops: vec![RegularStop {
                    name: format!("stop {i}").into(),
                    departure_time: departure.map(|d| d + Duration::minutes(5 * i as i64)),
                    ..Default::default()
                }],
                ..Default::default()
            })
            .collect(),
    }
}

pub fn departures(routes: &[Route]) -> Vec<Option<DateTime<Utc>>> {
    routes.iter().map(Route::scheduled_departure).collect()
}

pub fn ids(routes: &[Route]) -> Vec<&str> {
    routes.iter().map(|route| &*route.id).collect()
}

/// A point `meters` due north of `from`.
pub fn north_of(from: Coordinate, meters: f64) -> Coordinate {
    Coordinate::new(
        from.latitude + (meters / 6_371_000.0).to_degrees(),
        from.longitude,
    )
}

pub fn stop_at(id: &str, meters: f64) -> Stop {
    Stop::new(id, format!("Stop {id}")).with_coordinate(north_of(CENTER, meters))
}

/// Scripted transit client. Each call pops the next queued answer.
#[derive(Default)]
pub struct FakeClient {
    pub stops: Mutex<VecDeque<Result<Vec<Stop>, Error>>>,
    pub pages: Mutex<VecDeque<Result<Vec<Route>, Error>>>,
    pub boards: Mutex<VecDeque<Result<DepartureBoard, Error>>>,
    pub route_requests: Mutex<Vec<DateTime<Utc>>>,
    pub stop_requests: AtomicUsize,
    pub board_requests: AtomicUsize,
}

impl FakeClient {
    pub fn with_pages(pages: Vec<Result<Vec<Route>, Error>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            ..Default::default()
        }
    }

    pub fn with_stops(stops: Vec<Result<Vec<Stop>, Error>>) -> Self {
        Self {
            stops: Mutex::new(stops.into()),
            ..Default::default()
        }
    }

    pub fn with_boards(boards: Vec<Result<DepartureBoard, Error>>) -> Self {
        Self {
            boards: Mutex::new(boards.into()),
            ..Default::default()
        }
    }

    pub fn route_requests(&self) -> Vec<DateTime<Utc>> {
        self.route_requests.lock().unwrap().clone()
    }

    pub fn stop_requests(&self) -> usize {
        self.stop_requests.load(Ordering::SeqCst)
    }

    pub fn board_requests(&self) -> usize {
        self.board_requests.load(Ordering::SeqCst)
    }

    fn next_stops(&self) -> Result<Vec<Stop>, Error> {
        self.stop_requests.fetch_add(1, Ordering::SeqCst);
        self.stops
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Vec::new()))
    }
}

#[async_trait]
impl TransitClient for FakeClient {
    async fn search_stops(&self, _query: &str) -> Result<Vec<Stop>, Error> {
        self.next_stops()
    }

    async fn stops_near(&self, _coordinate: Coordinate) -> Result<Vec<Stop>, Error> {
        self.next_stops()
    }

    async fn find_routes(
        &self,
        _from: &str,
        _to: &str,
        time: DateTime<Utc>,
    ) -> Result<Vec<Route>, Error> {
        self.route_requests.lock().unwrap().push(time);
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Vec::new()))
    }

    async fn departures(&self, stop_id: &str) -> Result<DepartureBoard, Error> {
        self.board_requests.fetch_add(1, Ordering::SeqCst);
        let next = self.boards.lock().unwrap().pop_front();
        next.unwrap_or_else(|| {
            Ok(DepartureBoard {
                stop_id: stop_id.into(),
                departures: Vec::new(),
                expires_at: Utc::now() + Duration::seconds(60),
            })
        })
    }

    async fn trip_stops(&self, _trip_id: &str) -> Result<Vec<TripStop>, Error> {
        Ok(Vec::new())
    }
}
