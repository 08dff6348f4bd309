use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// One point of interest returned by the places service.
///
/// `id` is the upstream identifier and the only identity that matters.
/// Every other field is replaced wholesale on refresh, except `favorite`,
/// which is a local annotation carried across refreshes by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<u32>,
    /// Price tier, 1..=4.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vicinity: Option<String>,
    pub coordinate: Coordinate,
    /// `None` until the user (or a share link) sets it; an explicit
    /// `Some(false)` is distinct from "never set".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

impl Place {
    /// Minimal place with only the required fields populated.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rating: None,
            rating_count: None,
            price_level: None,
            vicinity: None,
            coordinate,
            favorite: None,
        }
    }

    #[must_use]
    pub fn is_favorite(&self) -> bool {
        self.favorite.unwrap_or(false)
    }

    /// Case-insensitive substring match against the display name.
    /// An empty query matches everything.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
    }
}
