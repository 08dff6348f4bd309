//! Seams to the outside world: the device (connectivity and geolocation),
//! the places service, and the live map surface.
//!
//! All async work resumes on the caller's execution context; none of these
//! traits require `Send`.

use std::future::Future;

use thiserror::Error;

use crate::geo::{Bounds, Coordinate};
use crate::place::Place;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("user denied location permission")]
    PermissionDenied,

    #[error("position unavailable: {0}")]
    PositionUnavailable(String),

    #[error("timed out waiting for a position fix")]
    Timeout,
}

/// The host device as seen by the location resolver.
pub trait Device {
    /// Whether the device currently reports network connectivity.
    fn is_online(&self) -> bool;

    /// Whether the platform exposes a geolocation capability at all.
    fn geolocation_supported(&self) -> bool;

    /// Request a single position fix.
    fn current_position(&self) -> impl Future<Output = Result<Coordinate, GeolocationError>>;
}

/// A nearby-search request. Only operational venues are ever requested.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyRequest {
    pub location: Coordinate,
    pub radius_meters: u32,
    pub category: String,
}

impl NearbyRequest {
    pub const STATUS: &'static str = "OPERATIONAL";
}

/// The third-party places service.
pub trait PlacesService {
    type Error: std::fmt::Display;

    /// Run one proximity query. `Ok(vec![])` means the service answered with
    /// zero results.
    fn nearby_search(
        &self,
        request: &NearbyRequest,
    ) -> impl Future<Output = Result<Vec<Place>, Self::Error>>;
}

/// Read-only view of the live map owned by the rendering layer.
pub trait MapView {
    fn center(&self) -> Coordinate;

    /// `None` until the map has laid out at least once.
    fn bounds(&self) -> Option<Bounds>;
}
