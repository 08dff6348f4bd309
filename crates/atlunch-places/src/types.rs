//! Nearby-search response types.
//!
//! Models the JSON returned by the places web service:
//! `{ "status": "OK", "results": [...], "error_message": "..." }`.
//! Every field of a result except `place_id` and `name` may be absent.

use atlunch_core::{Coordinate, Place};
use serde::Deserialize;

/// Top-level nearby-search envelope.
#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<RawPlace>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// One upstream place record, as received.
#[derive(Debug, Deserialize)]
pub struct RawPlace {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub price_level: Option<i64>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub business_status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl RawPlace {
    /// Map into the internal [`Place`].
    ///
    /// Returns `None` for records without usable geometry or whose
    /// `business_status` says the venue is not operating. Out-of-range price
    /// tiers and non-finite ratings are dropped to absent.
    #[must_use]
    pub fn into_place(self) -> Option<Place> {
        if self
            .business_status
            .as_deref()
            .is_some_and(|s| s != atlunch_core::NearbyRequest::STATUS)
        {
            return None;
        }
        let location = self.geometry?.location;
        let coordinate = Coordinate::new(location.lat, location.lng).ok()?;

        Some(Place {
            id: self.place_id,
            name: self.name,
            rating: self.rating.filter(|r| r.is_finite()),
            rating_count: self.user_ratings_total,
            price_level: self
                .price_level
                .and_then(|p| u8::try_from(p).ok())
                .filter(|p| (1..=4).contains(p)),
            vicinity: self.vicinity.filter(|v| !v.trim().is_empty()),
            coordinate,
            favorite: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: serde_json::Value) -> RawPlace {
        serde_json::from_value(json).expect("valid raw place")
    }

    #[test]
    fn maps_full_record() {
        let place = raw(serde_json::json!({
            "place_id": "abc",
            "name": "Orlando's",
            "rating": 4.6,
            "user_ratings_total": 2210,
            "price_level": 2,
            "vicinity": "1114 Don Juan Valdez Ln, Taos",
            "geometry": { "location": { "lat": 36.43, "lng": -105.58 } },
            "business_status": "OPERATIONAL"
        }))
        .into_place()
        .expect("operational place maps");

        assert_eq!(place.id, "abc");
        assert_eq!(place.rating, Some(4.6));
        assert_eq!(place.rating_count, Some(2210));
        assert_eq!(place.price_level, Some(2));
        assert_eq!(place.favorite, None);
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let place = raw(serde_json::json!({
            "place_id": "abc",
            "name": "Food Truck",
            "geometry": { "location": { "lat": 36.43, "lng": -105.58 } }
        }))
        .into_place()
        .expect("minimal place maps");

        assert!(place.rating.is_none());
        assert!(place.rating_count.is_none());
        assert!(place.price_level.is_none());
        assert!(place.vicinity.is_none());
    }

    #[test]
    fn drops_closed_venues() {
        let place = raw(serde_json::json!({
            "place_id": "abc",
            "name": "Gone",
            "geometry": { "location": { "lat": 36.43, "lng": -105.58 } },
            "business_status": "CLOSED_PERMANENTLY"
        }));
        assert!(place.into_place().is_none());
    }

    #[test]
    fn drops_records_without_geometry() {
        let place = raw(serde_json::json!({ "place_id": "abc", "name": "Nowhere" }));
        assert!(place.into_place().is_none());
    }

    #[test]
    fn out_of_range_price_level_becomes_absent() {
        let place = raw(serde_json::json!({
            "place_id": "abc",
            "name": "Free Samples",
            "price_level": 0,
            "geometry": { "location": { "lat": 36.43, "lng": -105.58 } }
        }))
        .into_place()
        .unwrap();
        assert!(place.price_level.is_none());
    }
}
