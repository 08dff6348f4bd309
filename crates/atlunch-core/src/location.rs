//! Location acquisition state.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// The four mutually exclusive outcomes of locating the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationState {
    Unresolved,
    Resolved(Coordinate),
    Denied,
    Unavailable,
}

impl LocationState {
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            LocationState::Resolved(c) => Some(*c),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, LocationState::Resolved(_))
    }

    /// Durable form of this state. `Unresolved` is never written.
    #[must_use]
    pub fn to_persisted(&self) -> Option<PersistedLocation> {
        match self {
            LocationState::Unresolved => None,
            LocationState::Resolved(c) => Some(PersistedLocation::Resolved(*c)),
            LocationState::Denied => Some(PersistedLocation::Marker(LocationMarker::Denied)),
            LocationState::Unavailable => {
                Some(PersistedLocation::Marker(LocationMarker::Unavailable))
            }
        }
    }
}

impl std::fmt::Display for LocationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationState::Unresolved => write!(f, "unresolved"),
            LocationState::Resolved(c) => write!(f, "resolved({c})"),
            LocationState::Denied => write!(f, "denied"),
            LocationState::Unavailable => write!(f, "unavailable"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationMarker {
    Denied,
    Unavailable,
}

/// Value stored under the `location` key: either a coordinate object or a
/// bare `"Denied"` / `"Unavailable"` marker string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PersistedLocation {
    Resolved(Coordinate),
    Marker(LocationMarker),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_location_serializes_as_coordinate_object() {
        let c = Coordinate::new(36.4, -105.57).unwrap();
        let json = serde_json::to_value(LocationState::Resolved(c).to_persisted()).unwrap();
        assert_eq!(json, serde_json::json!({ "lat": 36.4, "lng": -105.57 }));
    }

    #[test]
    fn denied_location_serializes_as_marker_string() {
        let json = serde_json::to_value(LocationState::Denied.to_persisted()).unwrap();
        assert_eq!(json, serde_json::json!("Denied"));
    }

    #[test]
    fn unresolved_is_never_persisted() {
        assert!(LocationState::Unresolved.to_persisted().is_none());
    }

    #[test]
    fn marker_round_trips_from_storage() {
        let parsed: PersistedLocation = serde_json::from_str("\"Unavailable\"").unwrap();
        assert_eq!(parsed, PersistedLocation::Marker(LocationMarker::Unavailable));
    }

    #[test]
    fn malformed_location_is_rejected() {
        let parsed: Result<PersistedLocation, _> = serde_json::from_str(r#"{"lat": 1.0}"#);
        assert!(parsed.is_err());
    }
}
