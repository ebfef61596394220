//! The in-memory category collection and its load lifecycle.
//!
//! The store owns the authoritative copy of all categories. Every successful
//! load replaces the collection wholesale: there is no incremental merge,
//! and nothing is mutated in place. Loads are tagged with a monotonic
//! generation so a slow response from a superseded fetch can never overwrite
//! newer data; the generation also serves as the observable refresh counter
//! (each mutation-triggered reload increments it by exactly one).

use crate::api::models::Category;
use std::sync::Arc;

/// Outcome of handing a finished load back to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The collection was replaced wholesale.
    Applied,
    /// The fetch failed; the previous collection is kept (stale but visible).
    Failed,
    /// A newer load was started after this one; the result was discarded.
    Stale,
}

pub struct CategoryStore {
    /// Collection wrapped in Arc for O(1) cloning into render/projection
    /// scopes. Replacement builds a new Vec and wraps it in a new Arc.
    categories: Arc<Vec<Category>>,
    loading: bool,
    last_error: Option<String>,
    /// Generation of the most recently started load.
    generation: u64,
    /// Generation of the most recently applied load (0 = never loaded).
    applied_generation: u64,
    /// Timestamp recorded once a refresh (second or later successful load)
    /// has happened; appended to image probe URLs to bypass caches.
    cache_bust_stamp: Option<i64>,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self {
            categories: Arc::new(Vec::new()),
            loading: false,
            last_error: None,
            generation: 0,
            applied_generation: 0,
            cache_bust_stamp: None,
        }
    }

    pub fn categories(&self) -> &Arc<Vec<Category>> {
        &self.categories
    }

    /// True while a fetch is in flight. Gates whether the table or a spinner
    /// is shown.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Generation of the newest started load. Results tagged with anything
    /// older are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cache_bust_stamp(&self) -> Option<i64> {
        self.cache_bust_stamp
    }

    /// Start a new load: bump the generation and raise the loading flag.
    /// Returns the generation tag the spawned fetch task must carry.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    /// Apply a finished load.
    ///
    /// `generation` must be the tag handed out by [`begin_load`]; anything
    /// older than the current generation is discarded without touching state
    /// (the loading flag stays up for the still-pending newer load).
    ///
    /// On success the collection is replaced wholesale. On failure the
    /// previous collection is left untouched and the error string retained
    /// for the status line; there is no automatic retry.
    ///
    /// [`begin_load`]: CategoryStore::begin_load
    pub fn apply_loaded(
        &mut self,
        generation: u64,
        result: Result<Vec<Category>, String>,
        now_ms: i64,
    ) -> LoadOutcome {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "Discarding stale load result"
            );
            return LoadOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(categories) => {
                tracing::debug!(count = categories.len(), generation, "Category load applied");
                // Any load after the first is a refresh: from here on, row
                // images must bypass caches in case one was re-uploaded at
                // the same address.
                if self.applied_generation > 0 {
                    self.cache_bust_stamp = Some(now_ms);
                }
                self.applied_generation = generation;
                self.categories = Arc::new(categories);
                self.last_error = None;
                LoadOutcome::Applied
            }
            Err(error) => {
                tracing::error!(error = %error, "Category load failed, keeping previous collection");
                self.last_error = Some(error);
                LoadOutcome::Failed
            }
        }
    }
}

impl Default for CategoryStore {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cat(id: i64, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            image_url: None,
            is_active: true,
        }
    }

    #[test]
    fn test_initial_state() {
        let store = CategoryStore::new();
        assert!(store.categories().is_empty());
        assert!(!store.is_loading());
        assert_eq!(store.generation(), 0);
        assert_eq!(store.cache_bust_stamp(), None);
    }

    #[test]
    fn test_load_replaces_collection_wholesale() {
        let mut store = CategoryStore::new();
        let gen = store.begin_load();
        assert!(store.is_loading());

        let outcome = store.apply_loaded(gen, Ok(vec![cat(1, "Fruit"), cat(2, "Dairy")]), 1_000);
        assert_eq!(outcome, LoadOutcome::Applied);
        assert!(!store.is_loading());
        assert_eq!(store.categories().len(), 2);

        // Second load fully replaces, never merges
        let gen = store.begin_load();
        store.apply_loaded(gen, Ok(vec![cat(3, "Bakery")]), 2_000);
        assert_eq!(store.categories().len(), 1);
        assert_eq!(store.categories()[0].id, 3);
    }

    #[test]
    fn test_failure_keeps_previous_collection() {
        let mut store = CategoryStore::new();
        let gen = store.begin_load();
        store.apply_loaded(gen, Ok(vec![cat(1, "Fruit")]), 1_000);

        let gen = store.begin_load();
        let outcome = store.apply_loaded(gen, Err("connection refused".to_string()), 2_000);
        assert_eq!(outcome, LoadOutcome::Failed);
        assert!(!store.is_loading());
        assert_eq!(store.categories().len(), 1, "stale data stays visible");
        assert_eq!(store.last_error(), Some("connection refused"));

        // A later success clears the error
        let gen = store.begin_load();
        store.apply_loaded(gen, Ok(vec![cat(1, "Fruit")]), 3_000);
        assert_eq!(store.last_error(), None);
    }

    #[test]
    fn test_stale_generation_discarded() {
        let mut store = CategoryStore::new();
        let gen_old = store.begin_load();
        let gen_new = store.begin_load();

        // The older fetch completes after the newer one was started
        let outcome = store.apply_loaded(gen_old, Ok(vec![cat(99, "Stale")]), 1_000);
        assert_eq!(outcome, LoadOutcome::Stale);
        assert!(store.categories().is_empty(), "stale result must not apply");
        assert!(store.is_loading(), "newer load is still pending");

        let outcome = store.apply_loaded(gen_new, Ok(vec![cat(1, "Fresh")]), 2_000);
        assert_eq!(outcome, LoadOutcome::Applied);
        assert_eq!(store.categories()[0].name, "Fresh");

        // Out-of-order arrival of the old result after the new one applied
        let outcome = store.apply_loaded(gen_old, Ok(vec![cat(99, "Stale")]), 3_000);
        assert_eq!(outcome, LoadOutcome::Stale);
        assert_eq!(store.categories()[0].name, "Fresh");
    }

    #[test]
    fn test_refresh_increments_generation_by_one() {
        let mut store = CategoryStore::new();
        let gen = store.begin_load();
        store.apply_loaded(gen, Ok(Vec::new()), 1_000);
        assert_eq!(store.generation(), 1);

        // A delete-triggered reload bumps the counter by exactly one
        store.begin_load();
        assert_eq!(store.generation(), 2);
    }

    #[test]
    fn test_cache_bust_stamp_only_after_refresh() {
        let mut store = CategoryStore::new();

        // Initial load: no refresh has occurred yet, no stamp
        let gen = store.begin_load();
        store.apply_loaded(gen, Ok(vec![cat(1, "Fruit")]), 1_000);
        assert_eq!(store.cache_bust_stamp(), None);

        // First refresh records a stamp
        let gen = store.begin_load();
        store.apply_loaded(gen, Ok(vec![cat(1, "Fruit")]), 2_000);
        assert_eq!(store.cache_bust_stamp(), Some(2_000));

        // Each further refresh moves it forward
        let gen = store.begin_load();
        store.apply_loaded(gen, Ok(vec![cat(1, "Fruit")]), 3_000);
        assert_eq!(store.cache_bust_stamp(), Some(3_000));
    }

    #[test]
    fn test_failed_refresh_does_not_update_stamp() {
        let mut store = CategoryStore::new();
        let gen = store.begin_load();
        store.apply_loaded(gen, Ok(vec![cat(1, "Fruit")]), 1_000);
        let gen = store.begin_load();
        store.apply_loaded(gen, Ok(vec![cat(1, "Fruit")]), 2_000);
        assert_eq!(store.cache_bust_stamp(), Some(2_000));

        let gen = store.begin_load();
        store.apply_loaded(gen, Err("boom".to_string()), 3_000);
        assert_eq!(store.cache_bust_stamp(), Some(2_000));
    }
}
