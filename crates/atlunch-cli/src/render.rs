//! Plain-text rendering of coordinator state.

use atlunch_core::display::{price_tier, rating_line};
use atlunch_core::{PersistedLocation, Place, ViewMode};
use atlunch_store::{MapStatus, PersistedSnapshot, SidebarStatus};

/// One result row: favorite marker, name, rating, price and address.
pub(crate) fn place_line(place: &Place) -> String {
    let mut line = format!(
        "{} {} [{}]",
        if place.is_favorite() { '♥' } else { ' ' },
        place.name,
        place.id
    );
    if let Some(rating) = rating_line(place.rating, place.rating_count) {
        line.push_str("  ");
        line.push_str(&rating);
    }
    if let Some(level) = place.price_level {
        line.push_str("  ");
        line.push_str(&price_tier(level));
    }
    if let Some(vicinity) = &place.vicinity {
        line.push_str("  ");
        line.push_str(vicinity);
    }
    line
}

pub(crate) fn sidebar_status(status: &SidebarStatus) -> String {
    match status {
        SidebarStatus::Error(message) => format!("search failed ({message})"),
        SidebarStatus::Searching => "searching...".to_string(),
        SidebarStatus::NoneNearby => "nothing open nearby".to_string(),
        SidebarStatus::NoLocation => "location unavailable; nothing to search".to_string(),
        SidebarStatus::NoMatches => "no places match the filter".to_string(),
        SidebarStatus::Results(1) => "1 place".to_string(),
        SidebarStatus::Results(n) => format!("{n} places"),
    }
}

pub(crate) fn map_status(status: MapStatus) -> String {
    match status {
        MapStatus::Offline => "offline".to_string(),
        MapStatus::Locating => "locating...".to_string(),
        MapStatus::Ready { center } => format!("centered on {center}"),
    }
}

pub(crate) fn view_mode(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Map => "map",
        ViewMode::List => "list",
        ViewMode::Unset => "map (default)",
    }
}

pub(crate) fn snapshot_lines(snapshot: &PersistedSnapshot) -> Vec<String> {
    let location = match &snapshot.location {
        Some(PersistedLocation::Resolved(c)) => format!("resolved({c})"),
        Some(PersistedLocation::Marker(marker)) => format!("{marker:?}").to_lowercase(),
        None => "none".to_string(),
    };
    let coordinate = snapshot
        .coordinate
        .map_or_else(|| "none".to_string(), |c| c.to_string());

    let mut lines = vec![
        format!("location: {location}"),
        format!("last coordinate: {coordinate}"),
    ];
    match &snapshot.places {
        Some(places) => {
            lines.push(format!("places: {}", places.len()));
            lines.extend(places.iter().map(|p| format!("  {}", place_line(p))));
        }
        None => lines.push("places: none saved".to_string()),
    }
    lines
}
