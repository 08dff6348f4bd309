//! Shareable favorites links.
//!
//! A link carries one `place_id` query parameter per favorited place. On
//! session start the incoming URL is decoded into a [`ShareSeed`]; generating
//! a link appends the current favorites to whatever query the page already has.

use std::collections::BTreeSet;

use thiserror::Error;
use url::Url;

use crate::place::Place;

pub const PLACE_ID_PARAM: &str = "place_id";

#[derive(Debug, Error)]
pub enum ShareLinkError {
    #[error("invalid share origin '{origin}': {source}")]
    InvalidOrigin {
        origin: String,
        #[source]
        source: url::ParseError,
    },
}

/// Place ids decoded from an incoming share link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareSeed {
    ids: BTreeSet<String>,
}

impl ShareSeed {
    /// Decode the seed from a full page URL. Unparseable URLs yield an empty
    /// seed; a bad link must never block the session.
    #[must_use]
    pub fn from_url(page_url: &str) -> Self {
        match Url::parse(page_url) {
            Ok(url) => Self::from_query(url.query().unwrap_or("")),
            Err(_) => Self::default(),
        }
    }

    /// Decode the seed from a raw query string (with or without leading `?`).
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let ids = url::form_urlencoded::parse(query.as_bytes())
            .filter(|(k, v)| k == PLACE_ID_PARAM && !v.is_empty())
            .map(|(_, v)| v.into_owned())
            .collect();
        Self { ids }
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Drop `id` from the seed. Returns `true` if it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

impl<S: Into<String>> FromIterator<S> for ShareSeed {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Build a link to `origin` that carries every favorited place.
///
/// Existing parameters in `current_query` are kept, and a `place_id` already
/// present is not appended twice.
///
/// # Errors
///
/// Returns [`ShareLinkError::InvalidOrigin`] if `origin` is not an absolute URL.
pub fn share_link(
    origin: &str,
    current_query: &str,
    places: &[Place],
) -> Result<String, ShareLinkError> {
    let mut url = Url::parse(origin).map_err(|source| ShareLinkError::InvalidOrigin {
        origin: origin.to_string(),
        source,
    })?;

    let current_query = current_query.strip_prefix('?').unwrap_or(current_query);
    let mut pairs: Vec<(String, String)> = url::form_urlencoded::parse(current_query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    for place in places.iter().filter(|p| p.is_favorite()) {
        let already = pairs
            .iter()
            .any(|(k, v)| k == PLACE_ID_PARAM && *v == place.id);
        if !already {
            pairs.push((PLACE_ID_PARAM.to_string(), place.id.clone()));
        }
    }

    url.set_query(None);
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
    Ok(url.to_string())
}
