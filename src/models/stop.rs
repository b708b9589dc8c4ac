use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::shared::geo::{Coordinate, Distance};

/// A place where passengers board or alight, as returned by the transit service.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Unique identifier assigned by the transit service.
    pub id: Arc<str>,
    /// Display name (e.g. "Hauptbahnhof").
    pub name: Arc<str>,
    /// Municipality or region the stop belongs to, when the service reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,
}

impl Stop {
    pub fn new(id: impl Into<Arc<str>>, name: impl Into<Arc<str>>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_region(mut self, region: impl Into<Arc<str>>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    /// Distance to `from`, None when the stop has no known location.
    pub fn distance(&self, from: &Coordinate) -> Option<Distance> {
        self.coordinate.map(|coordinate| coordinate.distance(from))
    }

    pub fn region_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.region.as_deref().unwrap_or(default)
    }

    /// Subtitle shown under the stop name, "350 m away, in Dresden".
    pub fn location_label(&self, from: Option<&Coordinate>, default_region: &str) -> String {
        let region = self.region_or(default_region);
        match from.and_then(|from| self.distance(from)) {
            Some(distance) => format!("{distance} away, in {region}"),
            None => region.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_label_with_and_without_distance() {
        let stop = Stop::new("33000028", "Hauptbahnhof")
            .with_coordinate(Coordinate::new(51.04, 13.73));
        assert_eq!(stop.location_label(None, "Dresden"), "Dresden");

        let here = Coordinate::new(51.04, 13.73);
        assert_eq!(
            stop.location_label(Some(&here), "Dresden"),
            "0 m away, in Dresden"
        );

        let stop = stop.with_region("Freital");
        assert_eq!(stop.location_label(None, "Dresden"), "Freital");
    }

    #[test]
    fn no_distance_without_coordinate() {
        let stop = Stop::new("1", "Nowhere");
        assert!(stop.distance(&Coordinate::new(0.0, 0.0)).is_none());
    }
}
