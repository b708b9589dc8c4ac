mod pager;

pub use pager::*;

use chrono::{DateTime, Utc};
use rayon::prelude::*;

use crate::models::Route;

/// Merges a freshly fetched page of routes into the routes already shown.
///
/// A route is skipped when the collection already holds one leaving at the
/// same time with the same chain of modes. The result is sorted by departure,
/// routes leaving at the same time keep the order they were added in.
pub fn merge<I>(existing: Vec<Route>, incoming: I) -> Vec<Route>
where
    I: IntoIterator<Item = Route>,
{
    merge_at(existing, incoming, Utc::now())
}

/// Same as [`merge`] with an explicit fallback time for routes that carry no
/// departure time.
pub fn merge_at<I>(mut existing: Vec<Route>, incoming: I, now: DateTime<Utc>) -> Vec<Route>
where
    I: IntoIterator<Item = Route>,
{
    for route in incoming {
        let departure = route.departure_time_or(now);
        let is_contained = existing.iter().any(|contained| {
            contained.departure_time_or(now) == departure && contained.same_mode_chain(&route)
        });
        if !is_contained {
            existing.push(route);
        }
    }

    // par_sort_by_key is stable
    existing.par_sort_by_key(|route| route.departure_time_or(now));
    existing
}

/// Decides where the next page of routes should start once the end of the
/// list becomes visible.
///
/// With no routes and nothing fetched yet the search starts at `now`. With
/// routes, the search continues from the last departure unless that
/// departure is exactly where the previous fetch started, in which case the
/// service has nothing later to offer and None is returned.
pub fn next_fetch(
    routes: &[Route],
    last_fetched: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match routes.last() {
        None if last_fetched.is_none() => Some(now),
        None => None,
        Some(last) => {
            let last_departure = last.departure_time_or(now);
            if Some(last_departure) != last_fetched {
                Some(last_departure)
            } else {
                None
            }
        }
    }
}
