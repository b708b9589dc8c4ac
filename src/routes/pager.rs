use std::{sync::Arc, time::Instant};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::{
    client::{self, TransitClient},
    models::Route,
    routes::{merge_at, next_fetch},
};

/// Paginated route search between two stops.
///
/// Holds the routes shown so far and the time the most recent page was
/// requested for, which together drive [`next_fetch`].
#[derive(Debug, Clone)]
pub struct RoutePager {
    from: Arc<str>,
    to: Arc<str>,
    routes: Vec<Route>,
    last_fetched: Option<DateTime<Utc>>,
}

impl RoutePager {
    pub fn new(from: impl Into<Arc<str>>, to: impl Into<Arc<str>>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            routes: Vec::new(),
            last_fetched: None,
        }
    }

    pub fn endpoints(&self) -> (&str, &str) {
        (&self.from, &self.to)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }

    pub fn last_fetched(&self) -> Option<DateTime<Utc>> {
        self.last_fetched
    }

    /// Where the next page would start, see [`next_fetch`].
    pub fn next_start(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        next_fetch(&self.routes, self.last_fetched, now)
    }

    /// Fetches the routes leaving from `starting_at` and merges them in.
    /// Returns how many routes were new.
    ///
    /// The watermark is moved before the request so a failed page is not
    /// requested again by [`RoutePager::load_next`]; retrying is done by
    /// calling `load` with the same time.
    pub async fn load<C>(
        &mut self,
        client: &C,
        starting_at: DateTime<Utc>,
    ) -> Result<usize, client::Error>
    where
        C: TransitClient + ?Sized,
    {
        self.last_fetched = Some(starting_at);
        let now = Instant::now();
        let page = client.find_routes(&self.from, &self.to, starting_at).await?;
        debug!(
            "Fetching {} routes from {} to {} took {:?}",
            page.len(),
            self.from,
            self.to,
            now.elapsed()
        );
        if page.is_empty() {
            warn!("No routes from {} to {} after {}", self.from, self.to, starting_at);
        }

        let before = self.routes.len();
        let routes = std::mem::take(&mut self.routes);
        self.routes = merge_at(routes, page, Utc::now());
        Ok(self.routes.len() - before)
    }

    /// Loads the next page if the trigger asks for one.
    /// Returns None when there is nothing more to fetch.
    pub async fn load_next<C>(
        &mut self,
        client: &C,
        now: DateTime<Utc>,
    ) -> Result<Option<usize>, client::Error>
    where
        C: TransitClient + ?Sized,
    {
        match self.next_start(now) {
            Some(starting_at) => self.load(client, starting_at).await.map(Some),
            None => Ok(None),
        }
    }
}
