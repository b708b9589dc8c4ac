//! The device location seam.

use async_trait::async_trait;
use thiserror::Error;

use crate::shared::geo::Coordinate;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("Location access was denied")]
    PermissionDenied,
    #[error("Location access has not been granted yet")]
    PermissionPending,
    #[error("Location could not be determined: {0}")]
    Unavailable(String),
}

/// Supplies at most one coordinate per request.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn locate(&self) -> Result<Coordinate, LocationError>;
}

/// A manually selected point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocation(pub Coordinate);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn locate(&self) -> Result<Coordinate, LocationError> {
        Ok(self.0)
    }
}

/// A provider that never knows where it is.
#[derive(Debug, Clone, Default)]
pub struct Unlocated {
    reason: Option<LocationError>,
}

impl Unlocated {
    pub fn with_reason(reason: LocationError) -> Self {
        Self {
            reason: Some(reason),
        }
    }
}

#[async_trait]
impl LocationProvider for Unlocated {
    async fn locate(&self) -> Result<Coordinate, LocationError> {
        Err(self
            .reason
            .clone()
            .unwrap_or_else(|| LocationError::Unavailable("no location source".into())))
    }
}
