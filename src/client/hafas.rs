use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{
    client::{Config, Error, TransitClient},
    models::{Departure, DepartureBoard, Mode, PartialRoute, RegularStop, Route, Stop, TripStop},
    shared::geo::Coordinate,
};

/// [`TransitClient`] backed by a transport.rest style HAFAS REST API.
#[derive(Debug, Clone)]
pub struct HafasClient {
    client: Client,
    base_url: Url,
    config: Config,
}

impl HafasClient {
    pub fn new(config: Config) -> Result<Self, Error> {
        config.validate()?;
        let base_url =
            Url::parse(&config.base_url).map_err(|err| Error::Config(err.to_string()))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|err| Error::Connection(err.to_string()))?;
        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn url<'a, I>(&self, segments: I) -> Result<Url, Error>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("{} cannot be a base url", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url, params: &[(&str, String)]) -> Result<String, Error> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    Error::Timeout(self.config.timeout_secs)
                } else {
                    Error::Connection(err.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse().ok());
            return Err(Error::RateLimited(retry_after));
        }
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|err| Error::Connection(err.to_string()))
    }

    fn parse_locations(body: &str) -> Result<Vec<Stop>, Error> {
        let raw: Vec<RawLocation> =
            serde_json::from_str(body).map_err(|err| Error::Parse(err.to_string()))?;
        Ok(raw.into_iter().filter_map(RawLocation::into_stop).collect())
    }

    fn parse_journeys(body: &str) -> Result<Vec<Route>, Error> {
        let raw: RawJourneys =
            serde_json::from_str(body).map_err(|err| Error::Parse(err.to_string()))?;
        Ok(raw.journeys.into_iter().map(RawJourney::into_route).collect())
    }

    fn parse_departures(
        body: &str,
        stop_id: &str,
        fetched_at: DateTime<Utc>,
        refresh: chrono::Duration,
    ) -> Result<DepartureBoard, Error> {
        let raw: RawDepartures =
            serde_json::from_str(body).map_err(|err| Error::Parse(err.to_string()))?;
        Ok(board(raw, stop_id, fetched_at, refresh))
    }

    fn parse_trip(body: &str) -> Result<Vec<TripStop>, Error> {
        let raw: RawTripResponse =
            serde_json::from_str(body).map_err(|err| Error::Parse(err.to_string()))?;
        Ok(trip_stops(raw))
    }
}

fn board(
    raw: RawDepartures,
    stop_id: &str,
    fetched_at: DateTime<Utc>,
    refresh: chrono::Duration,
) -> DepartureBoard {
    let departures: Vec<Departure> = raw
        .into_inner()
        .into_iter()
        .map(RawDeparture::into_departure)
        .collect();

    // Refresh no later than the moment the next vehicle leaves.
    let mut expires_at = fetched_at + refresh;
    if let Some(next) = departures
        .iter()
        .filter_map(Departure::time)
        .filter(|time| *time > fetched_at)
        .min()
    {
        expires_at = expires_at.min(next);
    }

    DepartureBoard {
        stop_id: stop_id.into(),
        departures,
        expires_at,
    }
}

fn trip_stops(raw: RawTripResponse) -> Vec<TripStop> {
    let (RawTripResponse::Wrapped { trip } | RawTripResponse::Bare(trip)) = raw;
    trip.stopovers
        .into_iter()
        .filter_map(|stopover| {
            let stop = stopover.stop.into_stop()?;
            Some(TripStop {
                stop,
                arrival_time: stopover.arrival.or(stopover.planned_arrival),
                departure_time: stopover.departure.or(stopover.planned_departure),
                platform: stopover
                    .departure_platform
                    .or(stopover.arrival_platform)
                    .map(Into::into),
            })
        })
        .collect()
}

#[async_trait]
impl TransitClient for HafasClient {
    #[instrument(skip(self))]
    async fn search_stops(&self, query: &str) -> Result<Vec<Stop>, Error> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::EmptyQuery);
        }
        let params = [
            ("query", query.to_string()),
            ("results", self.config.max_results.to_string()),
            ("stops", "true".to_string()),
            ("addresses", "false".to_string()),
            ("poi", "false".to_string()),
            ("fuzzy", "true".to_string()),
        ];
        let body = self.get(self.url(["locations"])?, &params).await?;
        Self::parse_locations(&body)
    }

    #[instrument(skip(self, coordinate), fields(coordinate = %coordinate))]
    async fn stops_near(&self, coordinate: Coordinate) -> Result<Vec<Stop>, Error> {
        let params = [
            ("latitude", coordinate.latitude.to_string()),
            ("longitude", coordinate.longitude.to_string()),
            ("results", self.config.max_results.to_string()),
            ("distance", self.config.nearby_distance_m.to_string()),
            ("stops", "true".to_string()),
            ("poi", "false".to_string()),
        ];
        let body = self
            .get(self.url(["locations", "nearby"])?, &params)
            .await?;
        Self::parse_locations(&body)
    }

    #[instrument(skip(self))]
    async fn find_routes(
        &self,
        from: &str,
        to: &str,
        time: DateTime<Utc>,
    ) -> Result<Vec<Route>, Error> {
        let params = [
            ("from", from.to_string()),
            ("to", to.to_string()),
            ("departure", time.to_rfc3339()),
            ("results", self.config.max_results.to_string()),
            ("stopovers", "true".to_string()),
            ("remarks", "false".to_string()),
        ];
        let body = self.get(self.url(["journeys"])?, &params).await?;
        let routes = Self::parse_journeys(&body)?;
        if routes.is_empty() {
            warn!("No routes found");
        }
        Ok(routes)
    }

    #[instrument(skip(self))]
    async fn departures(&self, stop_id: &str) -> Result<DepartureBoard, Error> {
        let params = [
            ("duration", self.config.departure_window_minutes.to_string()),
            ("results", self.config.max_results.to_string()),
            ("remarks", "false".to_string()),
        ];
        let fetched_at = Utc::now();
        let body = self
            .get(self.url(["stops", stop_id, "departures"])?, &params)
            .await?;
        let refresh = chrono::Duration::seconds(self.config.departure_refresh_secs as i64);
        Self::parse_departures(&body, stop_id, fetched_at, refresh)
    }

    #[instrument(skip(self))]
    async fn trip_stops(&self, trip_id: &str) -> Result<Vec<TripStop>, Error> {
        let params = [("stopovers", "true".to_string())];
        let body = self.get(self.url(["trips", trip_id])?, &params).await?;
        Self::parse_trip(&body)
    }
}

// Raw API types

#[derive(Debug, Deserialize)]
struct RawPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLocation {
    #[serde(rename = "type")]
    kind: Option<String>,
    id: Option<String>,
    name: Option<String>,
    location: Option<RawPoint>,
    region: Option<String>,
}

impl RawLocation {
    fn into_stop(self) -> Option<Stop> {
        if let Some(kind) = &self.kind
            && !matches!(kind.as_str(), "stop" | "station")
        {
            return None;
        }
        let id = self.id?;
        let name = self.name.unwrap_or_else(|| id.clone());
        Some(Stop {
            id: id.into(),
            name: name.into(),
            region: self.region.map(Into::into),
            coordinate: self
                .location
                .map(|point| Coordinate::new(point.latitude, point.longitude)),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawJourneys {
    #[serde(default)]
    journeys: Vec<RawJourney>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawJourney {
    #[serde(default)]
    legs: Vec<RawLeg>,
    refresh_token: Option<String>,
}

impl RawJourney {
    fn into_route(self) -> Route {
        let partial_routes: Vec<PartialRoute> =
            self.legs.into_iter().map(RawLeg::into_partial_route).collect();
        let id = self.refresh_token.unwrap_or_else(|| synthetic_id(&partial_routes));
        Route {
            id: id.into(),
            partial_routes,
        }
    }
}

fn synthetic_id(partial_routes: &[PartialRoute]) -> String {
    partial_routes
        .iter()
        .map(|partial| {
            let departure = partial
                .regular_stops
                .first()
                .and_then(|stop| stop.departure_time)
                .map(|time| time.timestamp().to_string())
                .unwrap_or_default();
            format!("{:?}@{}", partial.mode, departure)
        })
        .collect::<Vec<_>>()
        .join("|")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLeg {
    origin: RawLocation,
    destination: RawLocation,
    departure: Option<DateTime<Utc>>,
    planned_departure: Option<DateTime<Utc>>,
    arrival: Option<DateTime<Utc>>,
    planned_arrival: Option<DateTime<Utc>>,
    departure_platform: Option<String>,
    arrival_platform: Option<String>,
    direction: Option<String>,
    line: Option<RawLine>,
    #[serde(default)]
    walking: bool,
    stopovers: Option<Vec<RawStopover>>,
}

impl RawLeg {
    fn into_partial_route(self) -> PartialRoute {
        let mode = if self.walking {
            Mode::Walking
        } else {
            self.line
                .as_ref()
                .and_then(|line| line.product.as_deref())
                .map(Mode::from_product)
                .unwrap_or_default()
        };

        let regular_stops = match self.stopovers {
            Some(stopovers) if !stopovers.is_empty() => stopovers
                .into_iter()
                .map(RawStopover::into_regular_stop)
                .collect(),
            _ => vec![
                RegularStop {
                    stop_id: self.origin.id.map(Into::into),
                    name: self.origin.name.unwrap_or_default().into(),
                    arrival_time: None,
                    departure_time: self.departure.or(self.planned_departure),
                    platform: self.departure_platform.map(Into::into),
                },
                RegularStop {
                    stop_id: self.destination.id.map(Into::into),
                    name: self.destination.name.unwrap_or_default().into(),
                    arrival_time: self.arrival.or(self.planned_arrival),
                    departure_time: None,
                    platform: self.arrival_platform.map(Into::into),
                },
            ],
        };

        PartialRoute {
            mode,
            line: self.line.and_then(|line| line.name).map(Into::into),
            direction: self.direction.map(Into::into),
            regular_stops,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStopover {
    stop: RawLocation,
    arrival: Option<DateTime<Utc>>,
    planned_arrival: Option<DateTime<Utc>>,
    departure: Option<DateTime<Utc>>,
    planned_departure: Option<DateTime<Utc>>,
    arrival_platform: Option<String>,
    departure_platform: Option<String>,
}

impl RawStopover {
    fn into_regular_stop(self) -> RegularStop {
        RegularStop {
            stop_id: self.stop.id.map(Into::into),
            name: self.stop.name.unwrap_or_default().into(),
            arrival_time: self.arrival.or(self.planned_arrival),
            departure_time: self.departure.or(self.planned_departure),
            platform: self
                .departure_platform
                .or(self.arrival_platform)
                .map(Into::into),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawLine {
    name: Option<String>,
    product: Option<String>,
}

/// v6 wraps departures in an object, older deployments return a bare list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDepartures {
    Wrapped { departures: Vec<RawDeparture> },
    Bare(Vec<RawDeparture>),
}

impl RawDepartures {
    fn into_inner(self) -> Vec<RawDeparture> {
        match self {
            Self::Wrapped { departures } | Self::Bare(departures) => departures,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDeparture {
    trip_id: Option<String>,
    when: Option<DateTime<Utc>>,
    planned_when: Option<DateTime<Utc>>,
    direction: Option<String>,
    platform: Option<String>,
    line: Option<RawLine>,
}

impl RawDeparture {
    fn into_departure(self) -> Departure {
        let mode = self
            .line
            .as_ref()
            .and_then(|line| line.product.as_deref())
            .map(Mode::from_product)
            .unwrap_or_default();
        Departure {
            id: self.trip_id.unwrap_or_default().into(),
            line: self
                .line
                .and_then(|line| line.name)
                .unwrap_or_default()
                .into(),
            direction: self.direction.unwrap_or_default().into(),
            mode,
            scheduled_time: self.planned_when,
            real_time: self.when,
            platform: self.platform.map(Into::into),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(default)]
    stopovers: Vec<RawStopover>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTripResponse {
    Wrapped { trip: RawTrip },
    Bare(RawTrip),
}
