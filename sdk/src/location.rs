//! Location queries and map coordinates

use serde::{Deserialize, Serialize};

/// Geographic centroid of Australia, used whenever a query carries no usable
/// coordinates.
pub const AUSTRALIA_CENTROID: Coordinates = Coordinates {
    lat: -25.2744,
    lng: 133.7751,
};

/// Location name used when a query arrives with a blank name
pub const DEFAULT_LOCATION_NAME: &str = "Australia";

/// A `[latitude, longitude]` pair.
///
/// Serialized as a two-element JSON array so map bindings can pass it
/// straight to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate an untyped coordinates value.
    ///
    /// Accepts only an array of exactly two JSON numbers. Anything else
    /// (strings, nulls, wrong length, objects) yields `None`; callers must
    /// exclude the record rather than default it to `[0, 0]`.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let pair = value.as_array()?;
        if pair.len() != 2 {
            return None;
        }
        let lat = pair[0].as_f64()?;
        let lng = pair[1].as_f64()?;
        Some(Self { lat, lng })
    }

    /// The untyped `[lat, lng]` form accepted by [`Coordinates::from_value`]
    pub fn to_value(self) -> serde_json::Value {
        serde_json::json!([self.lat, self.lng])
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from(pair: [f64; 2]) -> Self {
        Self {
            lat: pair[0],
            lng: pair[1],
        }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(coords: Coordinates) -> Self {
        [coords.lat, coords.lng]
    }
}

/// A location selected by the user.
///
/// Lives for one UI interaction; every adapter consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationQuery {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl LocationQuery {
    /// Create a query without coordinates
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lat: None,
            lng: None,
        }
    }

    /// Attach coordinates to the query
    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self
    }

    /// Trimmed location name, or [`DEFAULT_LOCATION_NAME`] when blank
    pub fn display_name(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            DEFAULT_LOCATION_NAME
        } else {
            trimmed
        }
    }

    /// Coordinates for this query.
    ///
    /// Both fields must be present and finite, otherwise the whole point is
    /// replaced by [`AUSTRALIA_CENTROID`].
    pub fn coordinates(&self) -> Coordinates {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Coordinates::new(lat, lng)
            }
            _ => AUSTRALIA_CENTROID,
        }
    }
}
