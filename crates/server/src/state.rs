use std::sync::Arc;

use manni::{
    client::HafasClient,
    repository::{JsonFileStore, VisitRepository},
};
use tokio::sync::Mutex;

use crate::config::ServerConfig;

pub struct AppState {
    pub config: ServerConfig,
    pub client: Arc<HafasClient>,
    pub visits: Mutex<VisitRepository<JsonFileStore>>,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        client: HafasClient,
        visits: VisitRepository<JsonFileStore>,
    ) -> Self {
        Self {
            config,
            client: Arc::new(client),
            visits: Mutex::new(visits),
        }
    }
}
