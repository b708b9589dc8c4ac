use std::time::Instant;

use tracing::debug;

use crate::{
    Error,
    client::TransitClient,
    location::LocationProvider,
    models::Stop,
    proximity,
    shared::geo::Coordinate,
};

/// A stop search session: text queries and "stops around me".
///
/// Results are ordered by distance whenever a location is known.
#[derive(Debug)]
pub struct StopFinder<C, L> {
    client: C,
    locator: L,
    location: Option<Coordinate>,
    query: Option<String>,
    results: Vec<Stop>,
}

impl<C, L> StopFinder<C, L>
where
    C: TransitClient,
    L: LocationProvider,
{
    pub fn new(client: C, locator: L) -> Self {
        Self {
            client,
            locator,
            location: None,
            query: None,
            results: Vec::new(),
        }
    }

    pub fn results(&self) -> &[Stop] {
        &self.results
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Last known location, used to order text search results.
    pub fn location(&self) -> Option<Coordinate> {
        self.location
    }

    pub fn set_location(&mut self, location: Coordinate) {
        self.location = Some(location);
    }

    /// Searches stops by name. Repeating the previous query while it still
    /// has results does not hit the service again.
    pub async fn search(&mut self, query: &str) -> Result<&[Stop], Error> {
        if self.query.as_deref() == Some(query) && !self.results.is_empty() {
            debug!("Query {query:?} unchanged, keeping {} results", self.results.len());
            return Ok(&self.results);
        }
        let now = Instant::now();
        let stops = self.client.search_stops(query).await?;
        debug!("Searching {query:?} took {:?}", now.elapsed());

        self.query = Some(query.to_string());
        self.results = match self.location {
            Some(location) => proximity::rank(stops, &location),
            None => stops,
        };
        Ok(&self.results)
    }

    /// Locates the device and lists the stops around it, nearest first.
    pub async fn nearby(&mut self) -> Result<&[Stop], Error> {
        let location = self.locator.locate().await?;
        self.location = Some(location);

        let now = Instant::now();
        let stops = self.client.stops_near(location).await?;
        debug!("Searching stops near {location} took {:?}", now.elapsed());

        self.query = None;
        self.results = proximity::rank(stops, &location);
        Ok(&self.results)
    }
}
