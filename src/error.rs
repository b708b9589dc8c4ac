use thiserror::Error;

use crate::{client, location::LocationError, repository::StoreError};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Transit service error: {0}")]
    Client(#[from] client::Error),
    #[error("Location error: {0}")]
    Location(#[from] LocationError),
    #[error("Visit store error: {0}")]
    Store(#[from] StoreError),
}

impl Error {
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Client(err) => err.is_retryable(),
            Self::Location(LocationError::Unavailable(_)) => true,
            Self::Location(_) | Self::Store(_) => false,
        }
    }
}
