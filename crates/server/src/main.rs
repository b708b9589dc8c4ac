mod api;
mod config;
mod dto;
mod state;

use crate::{config::ServerConfig, state::AppState};
use axum::routing::{get, post};
use manni::{
    client::HafasClient,
    repository::{JsonFileStore, VisitRepository},
};
use std::{process, sync::Arc, time::Instant};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let config = match std::env::args().nth(1) {
        Some(path) => ServerConfig::from_file(&path).unwrap_or_else(|err| {
            error!("Failed to load {path}: {err}");
            process::exit(1);
        }),
        None => ServerConfig::default(),
    };

    info!("Loading visits...");
    let now = Instant::now();
    let client = HafasClient::new(config.client.clone()).unwrap_or_else(|err| {
        error!("Failed to create transit client: {err}");
        process::exit(1);
    });
    let visits = VisitRepository::open(
        JsonFileStore::new(&config.visits_path),
        config.suggestions.clone(),
    )
    .unwrap_or_else(|err| {
        error!("Failed to load {}: {err}", config.visits_path.display());
        process::exit(1);
    });
    info!("Loading visits took {:?}", now.elapsed());

    let port = config.port;
    let state = Arc::new(AppState::new(config, client, visits));
    let app = axum::Router::new()
        .route("/search", get(api::search))
        .route("/near", get(api::near))
        .route("/routes", get(api::routes))
        .route("/departures", get(api::departures))
        .route("/trip", get(api::trip))
        .route("/suggestions", get(api::suggestions))
        .route("/visits", post(api::record_visit))
        .route("/settings", post(api::settings))
        .with_state(state);

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {port}: {err}");
            process::exit(1);
        }
    };
    info!("Listening to port {port}");
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {err}");
    }
}
