//! Proximity search against the places service.

use atlunch_core::{Coordinate, NearbyRequest, Place, PlacesService};

/// Consumer-facing signal for the most recent search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchStatus {
    /// No search has been issued this session.
    #[default]
    Idle,
    InFlight,
    Loaded { count: usize },
    /// The service answered with zero results; the previous list was kept.
    Empty,
    /// The query failed; the previous list was kept.
    Failed(String),
    /// Live queries are suppressed while the device is offline.
    Offline,
}

/// An issued search waiting for its response.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSearch {
    ticket: u64,
    request: NearbyRequest,
}

impl PendingSearch {
    #[must_use]
    pub fn request(&self) -> &NearbyRequest {
        &self.request
    }
}

pub struct PlaceSearchCoordinator<P> {
    service: P,
    radius_meters: u32,
    category: String,
    searched_center: Option<Coordinate>,
    latest_ticket: u64,
    status: SearchStatus,
}

impl<P: PlacesService> PlaceSearchCoordinator<P> {
    pub fn new(service: P, radius_meters: u32, category: impl Into<String>) -> Self {
        Self {
            service,
            radius_meters,
            category: category.into(),
            searched_center: None,
            latest_ticket: 0,
            status: SearchStatus::Idle,
        }
    }

    #[must_use]
    pub fn service(&self) -> &P {
        &self.service
    }

    #[must_use]
    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    pub fn mark_offline(&mut self) {
        self.status = SearchStatus::Offline;
    }

    /// `true` when `center` has not been searched yet this session.
    #[must_use]
    pub fn is_new_center(&self, center: Coordinate) -> bool {
        self.searched_center != Some(center)
    }

    /// Issue a search for `center`. The caller runs the request and hands the
    /// outcome back to [`PlaceSearchCoordinator::complete`].
    pub fn begin(&mut self, center: Coordinate) -> PendingSearch {
        self.latest_ticket += 1;
        self.searched_center = Some(center);
        self.status = SearchStatus::InFlight;
        tracing::info!(
            ticket = self.latest_ticket,
            lat = center.lat(),
            lng = center.lng(),
            radius = self.radius_meters,
            "issuing nearby search"
        );
        PendingSearch {
            ticket: self.latest_ticket,
            request: NearbyRequest {
                location: center,
                radius_meters: self.radius_meters,
                category: self.category.clone(),
            },
        }
    }

    /// Apply a search outcome against the current list.
    ///
    /// Returns the replacement list for a non-empty success, with favorites
    /// carried over from `current`. Empty and failed outcomes return `None`
    /// so the previous list stays. Any arriving success replaces the list;
    /// only the status ignores responses older than the latest search.
    pub fn complete(
        &mut self,
        pending: &PendingSearch,
        outcome: Result<Vec<Place>, P::Error>,
        current: Option<&[Place]>,
    ) -> Option<Vec<Place>> {
        let is_latest = pending.ticket == self.latest_ticket;
        if !is_latest {
            tracing::debug!(
                ticket = pending.ticket,
                latest = self.latest_ticket,
                "applying superseded search response"
            );
        }

        let (status, replacement) = match outcome {
            Ok(fresh) if fresh.is_empty() => {
                tracing::info!("nearby search returned no results; keeping previous list");
                (SearchStatus::Empty, None)
            }
            Ok(fresh) => {
                let merged = reconcile(current.unwrap_or(&[]), fresh);
                (SearchStatus::Loaded { count: merged.len() }, Some(merged))
            }
            Err(e) => {
                tracing::warn!(error = %e, "nearby search failed; keeping previous list");
                (SearchStatus::Failed(e.to_string()), None)
            }
        };

        if is_latest {
            self.status = status;
        }
        replacement
    }
}

/// Replace `previous` with `fresh`, carrying each place's favorite flag
/// forward by id. Places new to the list keep whatever `fresh` says (absent).
#[must_use]
pub fn reconcile(previous: &[Place], fresh: Vec<Place>) -> Vec<Place> {
    fresh
        .into_iter()
        .map(|mut place| {
            if let Some(flag) = previous
                .iter()
                .find(|p| p.id == place.id)
                .and_then(|p| p.favorite)
            {
                place.favorite = Some(flag);
            }
            place
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopService;

    impl PlacesService for NoopService {
        type Error = String;

        async fn nearby_search(&self, _request: &NearbyRequest) -> Result<Vec<Place>, String> {
            Ok(vec![])
        }
    }

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    fn place(id: &str, favorite: Option<bool>) -> Place {
        let mut p = Place::new(id, id, coord(36.4, -105.57));
        p.favorite = favorite;
        p
    }

    fn coordinator() -> PlaceSearchCoordinator<NoopService> {
        PlaceSearchCoordinator::new(NoopService, 500, "restaurant")
    }

    #[test]
    fn reconcile_carries_favorites_and_defaults_new_places() {
        let previous = vec![place("a", Some(true))];
        let fresh = vec![place("a", None), place("b", None)];

        let merged = reconcile(&previous, fresh);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, "a");
        assert!(merged[0].is_favorite());
        assert_eq!(merged[1].id, "b");
        assert!(!merged[1].is_favorite());
    }

    #[test]
    fn reconcile_drops_places_missing_from_fresh() {
        let previous = vec![place("a", Some(true)), place("gone", Some(true))];
        let merged = reconcile(&previous, vec![place("a", None)]);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn begin_builds_request_and_marks_center() {
        let mut search = coordinator();
        let center = coord(36.4, -105.57);
        assert!(search.is_new_center(center));

        let pending = search.begin(center);

        assert_eq!(pending.request().location, center);
        assert_eq!(pending.request().radius_meters, 500);
        assert_eq!(pending.request().category, "restaurant");
        assert_eq!(search.status(), &SearchStatus::InFlight);
        assert!(!search.is_new_center(center));
    }

    #[test]
    fn empty_response_keeps_previous_and_signals_empty() {
        let mut search = coordinator();
        let pending = search.begin(coord(1.0, 1.0));
        let current = vec![place("a", None)];

        let replacement = search.complete(&pending, Ok(vec![]), Some(current.as_slice()));

        assert!(replacement.is_none());
        assert_eq!(search.status(), &SearchStatus::Empty);
    }

    #[test]
    fn failure_keeps_previous_and_signals_failure() {
        let mut search = coordinator();
        let pending = search.begin(coord(1.0, 1.0));

        let replacement = search.complete(&pending, Err("boom".to_string()), None);

        assert!(replacement.is_none());
        assert_eq!(search.status(), &SearchStatus::Failed("boom".to_string()));
    }

    #[test]
    fn superseded_success_replaces_list_without_touching_status() {
        let mut search = coordinator();
        let older = search.begin(coord(1.0, 1.0));
        let newer = search.begin(coord(2.0, 2.0));

        assert!(search
            .complete(&newer, Err("timeout".to_string()), None)
            .is_none());
        let replacement = search.complete(&older, Ok(vec![place("late", None)]), None);

        assert_eq!(replacement.map(|p| p.len()), Some(1));
        assert_eq!(search.status(), &SearchStatus::Failed("timeout".to_string()));
    }
}
