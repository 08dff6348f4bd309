use atlunch_core::{Place, ShareSeed};

/// Favorite flags on the place list, plus the one-shot share-link seed.
#[derive(Debug, Clone, Default)]
pub struct FavoritesManager {
    seed: Option<ShareSeed>,
}

impl FavoritesManager {
    /// An empty seed is discarded immediately.
    #[must_use]
    pub fn new(seed: ShareSeed) -> Self {
        Self {
            seed: (!seed.is_empty()).then_some(seed),
        }
    }

    #[must_use]
    pub fn seed_pending(&self) -> bool {
        self.seed.is_some()
    }

    /// Flip the flag on the place with `place_id`. Returns `false` when no
    /// such place exists.
    pub fn toggle(places: &mut [Place], place_id: &str) -> bool {
        match places.iter_mut().find(|p| p.id == place_id) {
            Some(place) => {
                place.favorite = Some(!place.is_favorite());
                tracing::debug!(place_id, favorite = place.is_favorite(), "toggled favorite");
                true
            }
            None => {
                tracing::debug!(place_id, "toggle ignored; no such place");
                false
            }
        }
    }

    /// Apply the share seed to a freshly populated list.
    ///
    /// Each seeded id is consumed by the first list it appears in: places
    /// whose flag was never set become favorites, an explicit local `false`
    /// is left alone. Ids not present in `places` stay pending for later
    /// lists. Returns the number of places changed.
    pub fn apply_seed(&mut self, places: &mut [Place]) -> usize {
        let Some(seed) = self.seed.as_mut() else {
            return 0;
        };
        let mut changed = 0;
        for place in places.iter_mut() {
            if !seed.remove(&place.id) {
                continue;
            }
            if place.favorite.is_none() {
                place.favorite = Some(true);
                changed += 1;
            }
        }
        let remaining = seed.len();
        tracing::info!(seeded = changed, remaining, "applied share link favorites");
        if remaining == 0 {
            self.seed = None;
        }
        changed
    }
}
