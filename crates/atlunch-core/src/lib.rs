pub mod app_config;
pub mod config;
pub mod display;
pub mod error;
pub mod geo;
pub mod location;
pub mod place;
pub mod platform;
pub mod search;
pub mod share;
pub mod view_mode;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use geo::{Bounds, Coordinate, CoordinateError};
pub use location::{LocationMarker, LocationState, PersistedLocation};
pub use place::Place;
pub use platform::{Device, GeolocationError, MapView, NearbyRequest, PlacesService};
pub use search::{view, SearchState, SortDirection};
pub use share::{share_link, ShareLinkError, ShareSeed};
pub use view_mode::{ViewMode, ViewModeController};
