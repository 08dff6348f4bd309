//! Client-side state coordinator.
//!
//! [`StoreCoordinator`] reconciles device location, a remote places query and
//! previously persisted state into one view model, and is the only sanctioned
//! path for mutating that state.

pub mod coordinator;
pub mod favorites;
pub mod location;
pub mod map;
pub mod persistence;
pub mod search;

pub use coordinator::{CoordinatorOptions, MapStatus, SidebarStatus, StoreCoordinator};
pub use favorites::FavoritesManager;
pub use location::{LocationPlan, LocationResolver, Resolution};
pub use map::{MapBinding, MapError, MapInit, Marker, DEFAULT_ZOOM};
pub use persistence::{
    JsonFileStore, KeyValueStore, MemoryStore, Persistence, PersistedSnapshot, PersistenceError,
};
pub use search::{PendingSearch, PlaceSearchCoordinator, SearchStatus};
