use atlunch_core::{Coordinate, Device, GeolocationError, Place};
use atlunch_store::{JsonFileStore, KeyValueStore, Persistence, SidebarStatus};

use super::*;
use crate::render;
use crate::session::CliDevice;

fn session_args(argv: &[&str]) -> SessionArgs {
    let mut full = vec!["atlunch", "session"];
    full.extend_from_slice(argv);
    let cli = Cli::try_parse_from(full).expect("expected valid cli args");
    match cli.command {
        Commands::Session(args) => args,
        Commands::Replay => panic!("expected session command"),
    }
}

#[test]
fn parses_replay_command() {
    let cli = Cli::try_parse_from(["atlunch", "replay"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Replay));
}

#[test]
fn missing_command_is_rejected() {
    assert!(Cli::try_parse_from(["atlunch"]).is_err());
}

#[test]
fn session_defaults() {
    let args = session_args(&[]);
    assert_eq!(args.sort, SortDirection::Descending);
    assert!(args.toggles.is_empty());
    assert!(!args.offline);
    assert!(args.url.is_none());
}

#[test]
fn session_accepts_negative_longitude_and_repeated_toggles() {
    let args = session_args(&[
        "--lat", "36.4", "--lng", "-105.57", "--sort", "asc", "--toggle", "a", "--toggle", "b",
    ]);
    assert_eq!(args.lat, Some(36.4));
    assert_eq!(args.lng, Some(-105.57));
    assert_eq!(args.sort, SortDirection::Ascending);
    assert_eq!(args.toggles, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn lat_without_lng_is_rejected() {
    assert!(Cli::try_parse_from(["atlunch", "session", "--lat", "1.0"]).is_err());
}

#[test]
fn deny_conflicts_with_explicit_position() {
    assert!(Cli::try_parse_from([
        "atlunch", "session", "--lat", "1.0", "--lng", "1.0", "--deny"
    ])
    .is_err());
}

#[test]
fn unknown_sort_direction_is_rejected() {
    assert!(Cli::try_parse_from(["atlunch", "session", "--sort", "sideways"]).is_err());
}

#[tokio::test]
async fn device_reports_flag_position() {
    let device = CliDevice::from_args(&session_args(&["--lat", "1.5", "--lng", "-2.5"])).unwrap();
    assert!(device.is_online());
    assert!(device.geolocation_supported());
    assert_eq!(
        device.current_position().await,
        Ok(Coordinate::new(1.5, -2.5).unwrap())
    );
}

#[tokio::test]
async fn device_without_position_is_unavailable_and_deny_is_denied() {
    let device = CliDevice::from_args(&session_args(&["--offline"])).unwrap();
    assert!(!device.is_online());
    assert!(matches!(
        device.current_position().await,
        Err(GeolocationError::PositionUnavailable(_))
    ));

    let denied = CliDevice::from_args(&session_args(&["--deny"])).unwrap();
    assert_eq!(
        denied.current_position().await,
        Err(GeolocationError::PermissionDenied)
    );

    let unsupported = CliDevice::from_args(&session_args(&["--no-geolocation"])).unwrap();
    assert!(!unsupported.geolocation_supported());
}

#[test]
fn device_rejects_out_of_range_position() {
    assert!(CliDevice::from_args(&session_args(&["--lat", "91.0", "--lng", "0.0"])).is_err());
}

#[test]
fn place_line_shows_rating_price_and_favorite() {
    let mut place = Place::new("p1", "Taos Pizza", Coordinate::new(36.4, -105.57).unwrap());
    place.rating = Some(4.2);
    place.rating_count = Some(1532);
    place.price_level = Some(2);
    place.vicinity = Some("Paseo del Pueblo".to_string());
    place.favorite = Some(true);

    assert_eq!(
        render::place_line(&place),
        "♥ Taos Pizza [p1]  ****- (1,532)  $$  Paseo del Pueblo"
    );
}

#[test]
fn sidebar_status_wording() {
    assert_eq!(render::sidebar_status(&SidebarStatus::Results(1)), "1 place");
    assert_eq!(render::sidebar_status(&SidebarStatus::Results(3)), "3 places");
    assert_eq!(
        render::sidebar_status(&SidebarStatus::Error("DENIED".to_string())),
        "search failed (DENIED)"
    );
    assert_eq!(
        render::sidebar_status(&SidebarStatus::NoLocation),
        "location unavailable; nothing to search"
    );
}

#[test]
fn replay_reads_what_a_session_wrote() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path());
    store
        .set("coordinate", serde_json::json!({ "lat": 36.4, "lng": -105.57 }))
        .unwrap();
    store.set("location", serde_json::json!("Denied")).unwrap();

    let snapshot = Persistence::new(JsonFileStore::new(dir.path())).load_snapshot();
    let lines = render::snapshot_lines(&snapshot);

    assert_eq!(
        lines,
        vec![
            "location: denied".to_string(),
            "last coordinate: 36.4,-105.57".to_string(),
            "places: none saved".to_string(),
        ]
    );
}

