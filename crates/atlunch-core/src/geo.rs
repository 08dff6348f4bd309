//! Coordinates and map bounds.
//!
//! A [`Coordinate`] can only be built through [`Coordinate::new`] (or
//! deserialized through the same validation), so a half-set or non-finite
//! pair never reaches the rest of the system.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("coordinate component {field} is not a finite number ({value})")]
    NotFinite { field: &'static str, value: f64 },

    #[error("coordinate component {field} is out of range ({value})")]
    OutOfRange { field: &'static str, value: f64 },
}

/// A validated latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoordinateError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.lat, raw.lng)
    }
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite or out-of-range components.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] naming the first invalid component.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        check_component("lat", lat, 90.0)?;
        check_component("lng", lng, 180.0)?;
        Ok(Self { lat, lng })
    }

    #[must_use]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[must_use]
    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

fn check_component(field: &'static str, value: f64, limit: f64) -> Result<(), CoordinateError> {
    if !value.is_finite() {
        return Err(CoordinateError::NotFinite { field, value });
    }
    if value.abs() > limit {
        return Err(CoordinateError::OutOfRange { field, value });
    }
    Ok(())
}

/// Rectangular viewport reported by the map surface.
///
/// Longitude ranges that cross the antimeridian (`south_west.lng > north_east.lng`)
/// are supported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Bounds {
    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        let lat_ok = point.lat >= self.south_west.lat && point.lat <= self.north_east.lat;
        let lng_ok = if self.south_west.lng <= self.north_east.lng {
            point.lng >= self.south_west.lng && point.lng <= self.north_east.lng
        } else {
            point.lng >= self.south_west.lng || point.lng <= self.north_east.lng
        };
        lat_ok && lng_ok
    }
}
