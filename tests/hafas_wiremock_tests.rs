//! HafasClient against a mocked transport.rest server.

use chrono::{Duration, TimeZone, Utc};
use manni::{
    client::{Config, Error, HafasClient, TransitClient},
    models::Mode,
    shared::Coordinate,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn client_for(server: &MockServer) -> HafasClient {
    let config = Config {
        timeout_secs: 5,
        max_results: 3,
        ..Config::default().with_base_url(server.uri())
    };
    HafasClient::new(config).unwrap()
}

const LOCATIONS: &str = r#"[
    {
        "type": "stop",
        "id": "33000028",
        "name": "Dresden Hauptbahnhof",
        "location": { "type": "location", "latitude": 51.040562, "longitude": 13.732038 }
    },
    {
        "type": "stop",
        "id": "33000005",
        "name": "Dresden Postplatz",
        "location": { "type": "location", "latitude": 51.050854, "longitude": 13.733207 }
    },
    { "type": "location", "address": "Wiener Platz 4", "latitude": 51.04, "longitude": 13.73 }
]"#;

const JOURNEYS: &str = r#"{
    "earlierRef": "e1",
    "laterRef": "l1",
    "journeys": [{
        "refreshToken": "tok1",
        "legs": [
            {
                "origin": { "type": "stop", "id": "33000028", "name": "Hauptbahnhof" },
                "destination": { "type": "stop", "id": "33000031", "name": "Walpurgisstraße" },
                "departure": "2020-02-27T10:02:00+01:00",
                "arrival": "2020-02-27T10:06:00+01:00",
                "walking": true,
                "distance": 320
            },
            {
                "origin": { "type": "stop", "id": "33000031", "name": "Walpurgisstraße" },
                "destination": { "type": "stop", "id": "33000005", "name": "Postplatz" },
                "departure": "2020-02-27T10:08:00+01:00",
                "plannedDeparture": "2020-02-27T10:07:00+01:00",
                "arrival": "2020-02-27T10:14:00+01:00",
                "direction": "Wilder Mann",
                "line": { "name": "3", "product": "tram", "mode": "train" }
            }
        ]
    }]
}"#;

#[tokio::test]
async fn search_stops_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations"))
        .and(query_param("query", "Hauptbahnhof"))
        .and(query_param("results", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LOCATIONS))
        .expect(1)
        .mount(&server)
        .await;

    let stops = client_for(&server).search_stops(" Hauptbahnhof ").await.unwrap();
    assert_eq!(stops.len(), 2);
    assert_eq!(&*stops[0].id, "33000028");
    assert_eq!(&*stops[1].name, "Dresden Postplatz");
}

#[tokio::test]
async fn empty_query_never_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server).search_stops("   ").await.unwrap_err();
    assert!(matches!(err, Error::EmptyQuery));
}

#[tokio::test]
async fn stops_near_sends_coordinate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations/nearby"))
        .and(query_param("latitude", "51.05089"))
        .and(query_param("longitude", "13.73832"))
        .and(query_param("distance", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LOCATIONS))
        .mount(&server)
        .await;

    let stops = client_for(&server)
        .stops_near(Coordinate::new(51.05089, 13.73832))
        .await
        .unwrap();
    assert_eq!(stops.len(), 2);
}

#[tokio::test]
async fn find_routes_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/journeys"))
        .and(query_param("from", "33000028"))
        .and(query_param("to", "33000005"))
        .and(query_param("departure", "2020-02-27T09:00:00+00:00"))
        .respond_with(ResponseTemplate::new(200).set_body_string(JOURNEYS))
        .mount(&server)
        .await;

    let time = Utc.with_ymd_and_hms(2020, 2, 27, 9, 0, 0).unwrap();
    let routes = client_for(&server)
        .find_routes("33000028", "33000005", time)
        .await
        .unwrap();

    assert_eq!(routes.len(), 1);
    let route = &routes[0];
    assert_eq!(&*route.id, "tok1");
    assert_eq!(
        route.mode_chain().collect::<Vec<_>>(),
        vec![Mode::Walking, Mode::Tram]
    );
    assert_eq!(
        route.scheduled_departure(),
        Some(Utc.with_ymd_and_hms(2020, 2, 27, 9, 2, 0).unwrap())
    );
    assert_eq!(route.duration_minutes(), Some(12));
    assert_eq!(route.partial_routes[1].line.as_deref(), Some("3"));
}

#[tokio::test]
async fn find_routes_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/journeys"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .find_routes("33000028", "33000005", Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RateLimited(Some(30))));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn server_error_is_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/journeys"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .find_routes("33000028", "33000005", Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Status(503)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn unknown_stop_is_not_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stops/nope/departures"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server).departures("nope").await.unwrap_err();
    assert!(matches!(err, Error::Status(404)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).search_stops("Postplatz").await.unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[tokio::test]
async fn departures_board_expires_within_refresh_interval() {
    let server = MockServer::start().await;
    let body = r#"{
        "departures": [{
            "tripId": "1|2|3",
            "when": "2099-01-01T10:02:00+00:00",
            "plannedWhen": "2099-01-01T10:00:00+00:00",
            "direction": "Wilder Mann",
            "platform": "2",
            "line": { "name": "3", "product": "tram" }
        }]
    }"#;
    Mock::given(method("GET"))
        .and(path("/stops/33000028/departures"))
        .and(query_param("duration", "60"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let before = Utc::now();
    let board = client_for(&server).departures("33000028").await.unwrap();
    assert_eq!(&*board.stop_id, "33000028");
    assert_eq!(board.departures.len(), 1);

    let departure = &board.departures[0];
    assert_eq!(&*departure.id, "1|2|3");
    assert_eq!(departure.mode, Mode::Tram);
    assert_eq!(departure.delay_minutes(), Some(2));
    assert!(board.expires_at > before);
    assert!(board.expires_at <= Utc::now() + Duration::seconds(60));
}

#[tokio::test]
async fn trip_stops_success() {
    let server = MockServer::start().await;
    let body = r#"{
        "trip": {
            "id": "trip-42",
            "stopovers": [
                {
                    "stop": { "type": "stop", "id": "33000028", "name": "Hauptbahnhof" },
                    "departure": "2020-02-27T10:02:00+01:00",
                    "departurePlatform": "2"
                },
                {
                    "stop": { "type": "stop", "id": "33000005", "name": "Postplatz" },
                    "arrival": "2020-02-27T10:09:00+01:00",
                    "plannedArrival": "2020-02-27T10:08:00+01:00"
                }
            ]
        }
    }"#;
    Mock::given(method("GET"))
        .and(path("/trips/trip-42"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let stops = client_for(&server).trip_stops("trip-42").await.unwrap();
    assert_eq!(stops.len(), 2);
    assert_eq!(&*stops[0].stop.name, "Hauptbahnhof");
    assert_eq!(stops[0].platform.as_deref(), Some("2"));
    assert_eq!(
        stops[1].arrival_time,
        Some(Utc.with_ymd_and_hms(2020, 2, 27, 9, 9, 0).unwrap())
    );
}

#[test]
fn invalid_config_is_rejected() {
    let config = Config {
        timeout_secs: 0,
        ..Config::default()
    };
    assert!(matches!(HafasClient::new(config), Err(Error::Config(_))));
    assert!(matches!(
        HafasClient::new(Config::default().with_base_url("not a url")),
        Err(Error::Config(_))
    ));
}
