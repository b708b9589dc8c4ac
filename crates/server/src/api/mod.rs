mod departures;
mod routes;
mod search;
mod visits;

pub use departures::*;
pub use routes::*;
pub use search::*;
pub use visits::*;

use std::collections::HashMap;

use axum::http::StatusCode;
use manni::{client, shared::geo::Coordinate};
use tracing::error;

/// Maps a library failure onto the response status, logging it.
fn status_of(err: manni::Error) -> StatusCode {
    error!("Request failed: {err}");
    match err {
        manni::Error::Client(err) => client_status(&err),
        manni::Error::Location(_) => StatusCode::BAD_REQUEST,
        manni::Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn client_status(err: &client::Error) -> StatusCode {
    match err {
        client::Error::EmptyQuery => StatusCode::BAD_REQUEST,
        client::Error::Status(404) => StatusCode::NOT_FOUND,
        client::Error::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        client::Error::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        client::Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        client::Error::Connection(_) | client::Error::Status(_) | client::Error::Parse(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

fn required<'a>(params: &'a HashMap<String, String>, key: &str) -> Result<&'a str, StatusCode> {
    params
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
        .ok_or(StatusCode::BAD_REQUEST)
}

/// Reads `lat` and `lon`. Both or neither must be present.
fn coordinate(params: &HashMap<String, String>) -> Result<Option<Coordinate>, StatusCode> {
    match (params.get("lat"), params.get("lon")) {
        (None, None) => Ok(None),
        (Some(lat), Some(lon)) => Coordinate::parse(&format!("{lat},{lon}"))
            .map(Some)
            .ok_or(StatusCode::BAD_REQUEST),
        _ => Err(StatusCode::BAD_REQUEST),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn coordinate_needs_both_parts() {
        assert_eq!(coordinate(&params(&[])), Ok(None));
        assert_eq!(
            coordinate(&params(&[("lat", "51.05"), ("lon", "13.73")])),
            Ok(Some(Coordinate::new(51.05, 13.73)))
        );
        assert_eq!(
            coordinate(&params(&[("lat", "51.05")])),
            Err(StatusCode::BAD_REQUEST)
        );
        assert_eq!(
            coordinate(&params(&[("lat", "north"), ("lon", "13.73")])),
            Err(StatusCode::BAD_REQUEST)
        );
    }

    #[test]
    fn client_errors_map_to_statuses() {
        assert_eq!(client_status(&client::Error::EmptyQuery), StatusCode::BAD_REQUEST);
        assert_eq!(client_status(&client::Error::Status(404)), StatusCode::NOT_FOUND);
        assert_eq!(client_status(&client::Error::Status(500)), StatusCode::BAD_GATEWAY);
        assert_eq!(
            client_status(&client::Error::RateLimited(None)),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn blank_parameter_is_missing() {
        let params = params(&[("q", "  ")]);
        assert_eq!(required(&params, "q"), Err(StatusCode::BAD_REQUEST));
        assert_eq!(required(&params, "stop"), Err(StatusCode::BAD_REQUEST));
    }
}
