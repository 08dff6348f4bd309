//! The session-wide state coordinator.
//!
//! Lifecycle: [`StoreCoordinator::new`] reads the share seed and hydrates
//! synchronously from persistence; [`StoreCoordinator::start`] then resolves
//! the location and, once resolved, runs the first search. Every mutation
//! goes through a method here.
//!
//! Location and search each have a two-phase form (`begin_*` / `complete_*`)
//! so a caller can interleave user actions with an in-flight request. The
//! async helpers (`locate`, `refresh_search`) are the same two phases run
//! back to back.

use atlunch_core::{
    share_link, AppConfig, Coordinate, Device, LocationState, MapView, Place, PersistedLocation,
    PlacesService, SearchState, ShareLinkError, ShareSeed, SortDirection, ViewMode,
    ViewModeController,
};

use crate::favorites::FavoritesManager;
use crate::location::{LocationPlan, LocationResolver, Resolution};
use crate::map::{MapBinding, MapError, MapInit, Marker};
use crate::persistence::{KeyValueStore, Persistence};
use crate::search::{PendingSearch, PlaceSearchCoordinator, SearchStatus};

/// Tunables taken from [`AppConfig`].
#[derive(Debug, Clone)]
pub struct CoordinatorOptions {
    pub radius_meters: u32,
    pub category: String,
    pub default_center: Coordinate,
}

impl CoordinatorOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            radius_meters: config.search_radius_meters,
            category: config.place_category.clone(),
            default_center: config.default_center,
        }
    }
}

/// What the results list should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarStatus {
    Error(String),
    /// No list has ever been populated and no answer has come back yet.
    Searching,
    /// The service answered with nothing and there is no earlier list.
    NoneNearby,
    /// Location was denied or is unavailable, so no search will run and
    /// there is no earlier list.
    NoLocation,
    NoMatches,
    Results(usize),
}

/// What the map area should show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapStatus {
    Offline,
    Locating,
    Ready { center: Coordinate },
}

pub struct StoreCoordinator<S, D, P> {
    persistence: Persistence<S>,
    resolver: LocationResolver<D>,
    search: PlaceSearchCoordinator<P>,
    favorites: FavoritesManager,
    view_mode: ViewModeController,
    map: MapBinding,
    places: Option<Vec<Place>>,
    location: LocationState,
    last_coordinate: Option<Coordinate>,
    search_state: SearchState,
    default_center: Coordinate,
    locating: bool,
    location_applied: bool,
}

impl<S, D, P> StoreCoordinator<S, D, P>
where
    S: KeyValueStore,
    D: Device,
    P: PlacesService,
{
    /// Build the coordinator for one session.
    ///
    /// Decodes the share seed from `page_url`, then hydrates the place list,
    /// location and last coordinate from `store`. Nothing asynchronous
    /// happens here.
    pub fn new(store: S, device: D, places: P, page_url: &str, options: CoordinatorOptions) -> Self {
        let seed = ShareSeed::from_url(page_url);
        let persistence = Persistence::new(store);
        let snapshot = persistence.load_snapshot();

        let location = match snapshot.location {
            Some(PersistedLocation::Resolved(c)) => LocationState::Resolved(c),
            _ => LocationState::Unresolved,
        };
        let last_coordinate = snapshot.last_known_coordinate();

        tracing::info!(
            hydrated_places = snapshot.places.as_ref().map_or(0, Vec::len),
            %location,
            seed_size = seed.len(),
            "store hydrated"
        );

        let mut coordinator = Self {
            persistence,
            resolver: LocationResolver::new(device),
            search: PlaceSearchCoordinator::new(places, options.radius_meters, options.category),
            favorites: FavoritesManager::new(seed),
            view_mode: ViewModeController::new(),
            map: MapBinding::default(),
            places: None,
            location,
            last_coordinate,
            search_state: SearchState::default(),
            default_center: options.default_center,
            locating: false,
            location_applied: false,
        };
        if let Some(places) = snapshot.places {
            coordinator.populate(places);
        }
        coordinator
    }

    /// Resolve the location, then run the first search if it resolved.
    pub async fn start(&mut self) {
        self.locate().await;
        self.search_if_needed().await;
    }

    // ---------------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------------

    /// The working place list, or `None` if it was never populated.
    #[must_use]
    pub fn places(&self) -> Option<&[Place]> {
        self.places.as_deref()
    }

    #[must_use]
    pub fn location(&self) -> LocationState {
        self.location
    }

    #[must_use]
    pub fn last_coordinate(&self) -> Option<Coordinate> {
        self.last_coordinate
    }

    #[must_use]
    pub fn search_state(&self) -> &SearchState {
        &self.search_state
    }

    #[must_use]
    pub fn search_status(&self) -> &SearchStatus {
        self.search.status()
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode.mode()
    }

    #[must_use]
    pub fn is_locating(&self) -> bool {
        self.locating
    }

    #[must_use]
    pub fn is_map_attached(&self) -> bool {
        self.map.is_attached()
    }

    /// `true` once durable storage failed and state lives only in memory.
    #[must_use]
    pub fn persistence_degraded(&self) -> bool {
        self.persistence.is_degraded()
    }

    #[must_use]
    pub fn device(&self) -> &D {
        self.resolver.device()
    }

    /// Filtered and sorted places for rendering.
    #[must_use]
    pub fn visible_places(&self) -> Vec<&Place> {
        atlunch_core::view(
            self.places.as_deref().unwrap_or(&[]),
            &self.search_state.query,
            self.search_state.sort_direction,
        )
    }

    /// The filtered view restricted to the map's current bounds.
    #[must_use]
    pub fn places_in_view<M: MapView>(&self, map: &M) -> Vec<&Place> {
        let visible = self.visible_places();
        match map.bounds() {
            Some(bounds) => visible
                .into_iter()
                .filter(|p| bounds.contains(p.coordinate))
                .collect(),
            None => visible,
        }
    }

    /// Whether the live map is currently centered on the resolved location.
    #[must_use]
    pub fn is_centered_on_user<M: MapView>(&self, map: &M) -> bool {
        self.location.coordinate() == Some(map.center())
    }

    #[must_use]
    pub fn markers(&self) -> Vec<Marker> {
        self.places
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(|p| Marker {
                place_id: p.id.clone(),
                coordinate: p.coordinate,
                favorite: p.is_favorite(),
                visible: p.matches_query(&self.search_state.query),
            })
            .collect()
    }

    #[must_use]
    pub fn sidebar_status(&self) -> SidebarStatus {
        if let SearchStatus::Failed(message) = self.search.status() {
            return SidebarStatus::Error(message.clone());
        }
        if self.places.is_none() {
            return match (self.search.status(), self.location) {
                (SearchStatus::Empty, _) => SidebarStatus::NoneNearby,
                (_, LocationState::Denied | LocationState::Unavailable) => {
                    SidebarStatus::NoLocation
                }
                _ => SidebarStatus::Searching,
            };
        }
        match self.visible_places().len() {
            0 => SidebarStatus::NoMatches,
            n => SidebarStatus::Results(n),
        }
    }

    #[must_use]
    pub fn map_status(&self) -> MapStatus {
        if !self.resolver.device().is_online() {
            return MapStatus::Offline;
        }
        if self.locating || !self.location_applied {
            return MapStatus::Locating;
        }
        MapStatus::Ready {
            center: self.map_center(),
        }
    }

    /// Where a map should be centered: the resolved coordinate, else the
    /// configured default.
    #[must_use]
    pub fn map_center(&self) -> Coordinate {
        self.location.coordinate().unwrap_or(self.default_center)
    }

    /// Shareable link carrying every current favorite.
    ///
    /// # Errors
    ///
    /// Returns [`ShareLinkError`] if `origin` is not an absolute URL.
    pub fn share_link(&self, origin: &str, current_query: &str) -> Result<String, ShareLinkError> {
        share_link(origin, current_query, self.places.as_deref().unwrap_or(&[]))
    }

    // ---------------------------------------------------------------------
    // Setters
    // ---------------------------------------------------------------------

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search_state.query = query.into();
    }

    pub fn set_sort(&mut self, direction: SortDirection) {
        self.search_state.sort_direction = direction;
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode.set_mode(mode);
    }

    /// Feed the first viewport measurement into the view mode.
    pub fn resolve_viewport(&mut self, is_mobile_viewport: bool) -> ViewMode {
        self.view_mode.resolve_initial(is_mobile_viewport)
    }

    /// Flip one place's favorite flag and persist the list. Returns `false`
    /// when the id is unknown.
    pub fn toggle_favorite(&mut self, place_id: &str) -> bool {
        let Some(places) = self.places.as_mut() else {
            return false;
        };
        let toggled = FavoritesManager::toggle(places, place_id);
        if toggled {
            self.persistence.save_places(places);
        }
        toggled
    }

    // ---------------------------------------------------------------------
    // Map
    // ---------------------------------------------------------------------

    /// Claim the map surface for this session.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::AlreadyAttached`] on a second attach without
    /// [`StoreCoordinator::detach_map`].
    pub fn attach_map(&mut self) -> Result<MapInit, MapError> {
        let center = self.map_center();
        self.map.attach(center)
    }

    pub fn detach_map(&mut self) {
        self.map.detach();
    }

    /// Recenter queued for the map owner, if the location changed while
    /// the map was attached.
    pub fn take_recenter(&mut self) -> Option<Coordinate> {
        self.map.take_recenter()
    }

    // ---------------------------------------------------------------------
    // Location
    // ---------------------------------------------------------------------

    /// Start a resolution. Returns `None` while another one is in flight.
    pub fn begin_locate(&mut self) -> Option<LocationPlan> {
        if self.locating {
            tracing::debug!("location resolution already in flight");
            return None;
        }
        self.locating = true;
        Some(self.resolver.plan(self.last_coordinate))
    }

    pub fn complete_locate(&mut self, resolution: Resolution) {
        self.locating = false;
        self.location_applied = true;
        self.location = resolution.state();

        match resolution {
            Resolution::Fixed(c) => {
                self.last_coordinate = Some(c);
                self.persistence.save_coordinate(c);
                self.persistence.save_location(&self.location);
                self.map.note_location(c);
            }
            Resolution::Offline(c) => {
                self.map.note_location(c);
                self.search.mark_offline();
            }
            Resolution::Denied(_) | Resolution::Unavailable => {
                self.persistence.save_location(&self.location);
            }
        }
        tracing::info!(location = %self.location, "location resolved");
    }

    /// Run one resolution to completion.
    pub async fn locate(&mut self) -> LocationState {
        let Some(plan) = self.begin_locate() else {
            return self.location;
        };
        let resolution = self.resolver.execute(plan).await;
        self.complete_locate(resolution);
        self.location
    }

    // ---------------------------------------------------------------------
    // Search
    // ---------------------------------------------------------------------

    /// Issue a search if one is allowed right now.
    ///
    /// Requires a location applied this session (not just hydrated), no
    /// resolution in flight, a `Resolved` state and connectivity. Unless
    /// `force` is set, a coordinate that was already searched is skipped.
    pub fn begin_search(&mut self, force: bool) -> Option<PendingSearch> {
        if self.locating || !self.location_applied {
            return None;
        }
        let center = self.location.coordinate()?;
        if !self.resolver.device().is_online() {
            self.search.mark_offline();
            return None;
        }
        if !force && !self.search.is_new_center(center) {
            return None;
        }
        Some(self.search.begin(center))
    }

    /// Apply a search outcome. Favorites are carried over from the list as
    /// it is now, not as it was when the search was issued.
    pub fn complete_search(
        &mut self,
        pending: &PendingSearch,
        outcome: Result<Vec<Place>, P::Error>,
    ) {
        if let Some(fresh) = self
            .search
            .complete(pending, outcome, self.places.as_deref())
        {
            self.populate(fresh);
        }
    }

    /// User-triggered re-run of the search for the current coordinate.
    /// Returns `false` if no search could be issued.
    pub async fn refresh_search(&mut self) -> bool {
        self.run_search(true).await
    }

    async fn search_if_needed(&mut self) -> bool {
        self.run_search(false).await
    }

    async fn run_search(&mut self, force: bool) -> bool {
        let Some(pending) = self.begin_search(force) else {
            return false;
        };
        let outcome = self.search.service().nearby_search(pending.request()).await;
        self.complete_search(&pending, outcome);
        true
    }

    /// Install a non-empty list, applying the share seed on first population.
    fn populate(&mut self, mut places: Vec<Place>) {
        if places.is_empty() {
            return;
        }
        self.favorites.apply_seed(&mut places);
        self.persistence.save_places(&places);
        self.places = Some(places);
    }

    /// Hand the backing store back, e.g. to open the next session on it.
    pub fn into_store(self) -> S {
        self.persistence.into_store()
    }
}

#[cfg(test)]
#[path = "coordinator_test.rs"]
mod tests;
