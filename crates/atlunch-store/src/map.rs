//! Attachment state for the externally owned map surface.
//!
//! The rendering layer owns the live map. The coordinator only records
//! whether one is attached, hands out its initial placement once, and queues
//! a recenter for the owner to apply when the location changes.

use atlunch_core::Coordinate;
use thiserror::Error;

pub const DEFAULT_ZOOM: u8 = 17;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("a map instance is already attached for this session")]
    AlreadyAttached,
}

/// Initial placement for a newly created map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapInit {
    pub center: Coordinate,
    pub zoom: u8,
}

/// One map pin.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub place_id: String,
    pub coordinate: Coordinate,
    pub favorite: bool,
    /// Hidden when the place does not match the current query.
    pub visible: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MapBinding {
    attached: bool,
    pending_recenter: Option<Coordinate>,
}

impl MapBinding {
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Claim the map for this session.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::AlreadyAttached`] if a map is attached and has not
    /// been released with [`MapBinding::detach`].
    pub fn attach(&mut self, center: Coordinate) -> Result<MapInit, MapError> {
        if self.attached {
            return Err(MapError::AlreadyAttached);
        }
        self.attached = true;
        self.pending_recenter = None;
        tracing::debug!(lat = center.lat(), lng = center.lng(), "map attached");
        Ok(MapInit {
            center,
            zoom: DEFAULT_ZOOM,
        })
    }

    pub fn detach(&mut self) {
        self.attached = false;
        self.pending_recenter = None;
    }

    /// Record a new location. Only queued while a map is attached; a map
    /// attached later starts at the right center anyway.
    pub fn note_location(&mut self, coordinate: Coordinate) {
        if self.attached {
            self.pending_recenter = Some(coordinate);
        }
    }

    pub fn take_recenter(&mut self) -> Option<Coordinate> {
        self.pending_recenter.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn second_attach_is_rejected() {
        let mut binding = MapBinding::default();
        let init = binding.attach(coord(1.0, 1.0)).unwrap();
        assert_eq!(init.zoom, DEFAULT_ZOOM);
        assert_eq!(binding.attach(coord(1.0, 1.0)), Err(MapError::AlreadyAttached));
    }

    #[test]
    fn detach_allows_a_new_owner() {
        let mut binding = MapBinding::default();
        binding.attach(coord(1.0, 1.0)).unwrap();
        binding.detach();
        assert!(binding.attach(coord(2.0, 2.0)).is_ok());
    }

    #[test]
    fn recenter_only_queued_while_attached() {
        let mut binding = MapBinding::default();
        binding.note_location(coord(1.0, 1.0));
        assert!(binding.take_recenter().is_none());

        binding.attach(coord(0.0, 0.0)).unwrap();
        binding.note_location(coord(3.0, 3.0));
        assert_eq!(binding.take_recenter(), Some(coord(3.0, 3.0)));
        assert!(binding.take_recenter().is_none());
    }
}
