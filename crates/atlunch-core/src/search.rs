//! Filtering and sorting of the place list.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::place::Place;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!("unknown sort direction '{other}'")),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "ascending"),
            SortDirection::Descending => write!(f, "descending"),
        }
    }
}

/// Transient per-session search input. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub sort_direction: SortDirection,
}

/// Produce the filtered, rating-sorted view of `places`.
///
/// A missing rating ranks below every real rating: first when ascending,
/// last when descending. The sort is stable, so ties keep their relative
/// order from `places`.
#[must_use]
pub fn view<'a>(places: &'a [Place], query: &str, direction: SortDirection) -> Vec<&'a Place> {
    let mut filtered: Vec<&Place> = places.iter().filter(|p| p.matches_query(query)).collect();
    filtered.sort_by(|a, b| {
        let ascending = compare_ratings(a.rating, b.rating);
        match direction {
            SortDirection::Ascending => ascending,
            SortDirection::Descending => ascending.reverse(),
        }
    });
    filtered
}

fn compare_ratings(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.total_cmp(&y),
    }
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
