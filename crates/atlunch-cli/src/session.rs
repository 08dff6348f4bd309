//! The `session` command: one simulated page load against the real places
//! service and the on-disk store.

use atlunch_core::{AppConfig, Coordinate, Device, GeolocationError};
use atlunch_places::PlacesClient;
use atlunch_store::{CoordinatorOptions, JsonFileStore, StoreCoordinator};

use crate::render;
use crate::SessionArgs;

/// A device whose connectivity and position come from command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CliDevice {
    online: bool,
    supported: bool,
    fix: Result<Coordinate, GeolocationError>,
}

impl CliDevice {
    /// Build the device described by `args`.
    ///
    /// # Errors
    ///
    /// Returns an error if `--lat`/`--lng` do not form a valid coordinate.
    pub(crate) fn from_args(args: &SessionArgs) -> anyhow::Result<Self> {
        let fix = match (args.lat, args.lng) {
            (Some(lat), Some(lng)) => Ok(Coordinate::new(lat, lng)?),
            _ if args.deny => Err(GeolocationError::PermissionDenied),
            _ => Err(GeolocationError::PositionUnavailable(
                "no position supplied; pass --lat and --lng".to_string(),
            )),
        };
        Ok(Self {
            online: !args.offline,
            supported: !args.no_geolocation,
            fix,
        })
    }
}

impl Device for CliDevice {
    fn is_online(&self) -> bool {
        self.online
    }

    fn geolocation_supported(&self) -> bool {
        self.supported
    }

    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        self.fix.clone()
    }
}

/// Run a session and print the resulting view.
///
/// # Errors
///
/// Returns an error if the places API key is missing, the device flags are
/// invalid, the places client cannot be built, or the share origin is not an
/// absolute URL. Location and search failures are printed, not returned.
pub(crate) async fn run_session(config: &AppConfig, args: &SessionArgs) -> anyhow::Result<()> {
    config.require_places_api_key()?;

    let device = CliDevice::from_args(args)?;
    let client = PlacesClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build places client: {e}"))?;
    let store = JsonFileStore::new(&config.data_dir);
    let page_url = args.url.as_deref().unwrap_or(&config.share_origin);

    let mut coordinator = StoreCoordinator::new(
        store,
        device,
        client,
        page_url,
        CoordinatorOptions::from_config(config),
    );
    if let Some(width) = args.viewport_width {
        coordinator.resolve_viewport(config.is_mobile_viewport(width));
    }

    coordinator.start().await;

    if let Some(query) = &args.query {
        coordinator.set_query(query.clone());
    }
    coordinator.set_sort(args.sort);
    for id in &args.toggles {
        if !coordinator.toggle_favorite(id) {
            tracing::warn!(place_id = %id, "no such place to toggle");
        }
    }

    println!("location: {}", coordinator.location());
    println!("view: {}", render::view_mode(coordinator.view_mode()));
    println!("map: {}", render::map_status(coordinator.map_status()));
    println!("search: {}", render::sidebar_status(&coordinator.sidebar_status()));
    for place in coordinator.visible_places() {
        println!("  {}", render::place_line(place));
    }

    let link = coordinator.share_link(&config.share_origin, "")?;
    println!("share: {link}");

    if coordinator.persistence_degraded() {
        tracing::warn!(
            dir = %config.data_dir.display(),
            "store was not writable; this session was not saved"
        );
    }
    Ok(())
}
