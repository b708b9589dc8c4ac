//! Keeps a departure board fresh.
//!
//! The transit service tells how long a board stays valid, the monitor
//! sleeps until then and fetches again. Boards are delivered through a
//! channel so the consumer decides which thread renders them.

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, warn};

use crate::{
    client::{self, TransitClient},
    models::DepartureBoard,
};

pub type BoardResult = Result<DepartureBoard, client::Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Lower bound between two fetches, even if a board is already expired.
    pub min_interval: Duration,
    /// Wait before trying again after a retryable failure.
    pub retry_delay: Duration,
    pub channel_capacity: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_secs(5),
            retry_delay: Duration::from_secs(30),
            channel_capacity: 4,
        }
    }
}

/// Background task refreshing the departures of one stop.
/// Dropping the monitor or the receiver ends the task.
#[derive(Debug)]
pub struct DepartureMonitor {
    stop_id: Arc<str>,
    handle: JoinHandle<()>,
}

impl DepartureMonitor {
    pub fn spawn<C>(
        client: Arc<C>,
        stop_id: impl Into<Arc<str>>,
        config: MonitorConfig,
    ) -> (Self, mpsc::Receiver<BoardResult>)
    where
        C: TransitClient + ?Sized + 'static,
    {
        let stop_id: Arc<str> = stop_id.into();
        let (sender, receiver) = mpsc::channel(config.channel_capacity.max(1));
        let handle = tokio::spawn(run(client, stop_id.clone(), config, sender));
        (Self { stop_id, handle }, receiver)
    }

    pub fn stop_id(&self) -> &str {
        &self.stop_id
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for DepartureMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run<C>(
    client: Arc<C>,
    stop_id: Arc<str>,
    config: MonitorConfig,
    sender: mpsc::Sender<BoardResult>,
) where
    C: TransitClient + ?Sized,
{
    loop {
        let result = client.departures(&stop_id).await;
        let wait = match &result {
            Ok(board) => {
                let wait = (board.expires_at - Utc::now())
                    .to_std()
                    .unwrap_or_default()
                    .max(config.min_interval);
                debug!(
                    "{} departures at {}, next refresh in {:?}",
                    board.departures.len(),
                    stop_id,
                    wait
                );
                Some(wait)
            }
            Err(err) if err.is_retryable() => {
                warn!("Failed to load departures at {stop_id}: {err}, retrying");
                Some(config.retry_delay)
            }
            Err(err) => {
                warn!("Failed to load departures at {stop_id}: {err}");
                None
            }
        };

        if sender.send(result).await.is_err() {
            debug!("Departure receiver for {stop_id} dropped");
            return;
        }
        match wait {
            Some(wait) => tokio::time::sleep(wait).await,
            None => return,
        }
    }
}
