//! Best-effort user location.
//!
//! Resolution is split into a synchronous [`LocationPlan`] and its async
//! execution so the decision (reuse last known, live fix, or give up) can be
//! tested without a device.

use atlunch_core::{Coordinate, Device, GeolocationError, LocationState};

/// What the resolver will do given the device state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationPlan {
    /// Offline with a previous coordinate: use it, no live fix.
    ReuseLastKnown(Coordinate),
    /// Ask the platform for a single fix.
    LiveFix,
    /// The platform has no geolocation capability.
    Unavailable,
}

/// Outcome of one resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Stale coordinate reused because the device is offline.
    Offline(Coordinate),
    /// Fresh fix from the platform.
    Fixed(Coordinate),
    Denied(GeolocationError),
    Unavailable,
}

impl Resolution {
    #[must_use]
    pub fn state(&self) -> LocationState {
        match self {
            Resolution::Offline(c) | Resolution::Fixed(c) => LocationState::Resolved(*c),
            Resolution::Denied(_) => LocationState::Denied,
            Resolution::Unavailable => LocationState::Unavailable,
        }
    }
}

pub struct LocationResolver<D> {
    device: D,
}

impl<D: Device> LocationResolver<D> {
    pub fn new(device: D) -> Self {
        Self { device }
    }

    #[must_use]
    pub fn device(&self) -> &D {
        &self.device
    }

    #[must_use]
    pub fn plan(&self, last_known: Option<Coordinate>) -> LocationPlan {
        match last_known {
            Some(c) if !self.device.is_online() => LocationPlan::ReuseLastKnown(c),
            _ if !self.device.geolocation_supported() => LocationPlan::Unavailable,
            _ => LocationPlan::LiveFix,
        }
    }

    /// Carry out a plan. A live fix is requested exactly once; any platform
    /// error maps to [`Resolution::Denied`].
    pub async fn execute(&self, plan: LocationPlan) -> Resolution {
        match plan {
            LocationPlan::ReuseLastKnown(c) => {
                tracing::info!(lat = c.lat(), lng = c.lng(), "offline; reusing last known coordinate");
                Resolution::Offline(c)
            }
            LocationPlan::Unavailable => {
                tracing::info!("geolocation not supported on this device");
                Resolution::Unavailable
            }
            LocationPlan::LiveFix => match self.device.current_position().await {
                Ok(c) => {
                    tracing::info!(lat = c.lat(), lng = c.lng(), "location fix acquired");
                    Resolution::Fixed(c)
                }
                Err(e) => {
                    tracing::info!(error = %e, "location fix failed");
                    Resolution::Denied(e)
                }
            },
        }
    }

    pub async fn resolve(&self, last_known: Option<Coordinate>) -> Resolution {
        self.execute(self.plan(last_known)).await
    }
}
