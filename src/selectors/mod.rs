//! Selectors
//!
//! Read-only projections over the catalog and cart. Projections that build
//! new values are memoized on the [`Revision`] of their input, so repeated
//! calls with unchanged input hand back the same `Arc`.

use std::{hash::Hash, sync::Arc};

use rustc_hash::FxHashMap;

use crate::revision::Revision;

pub mod cart;
pub mod catalog;

pub use cart::{CartSelectors, CartSummary, is_in_cart, line_for, quantity_of};
pub use catalog::CatalogSelectors;

/// Single-entry cache keyed on an input revision.
#[derive(Debug)]
pub struct Memo<V> {
    entry: Option<(Revision, Arc<V>)>,
}

impl<V> Memo<V> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self { entry: None }
    }

    /// Return the cached value for `revision`, computing it if the input changed.
    pub fn get_or_compute(&mut self, revision: Revision, compute: impl FnOnce() -> V) -> Arc<V> {
        match &self.entry {
            Some((cached, value)) if *cached == revision => Arc::clone(value),
            _ => {
                let value = Arc::new(compute());
                self.entry = Some((revision, Arc::clone(&value)));

                value
            }
        }
    }
}

impl<V> Default for Memo<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache keyed on an input revision and a selector argument.
///
/// All entries belong to the same revision; a new revision drops them.
#[derive(Debug)]
pub struct KeyedMemo<K, V> {
    revision: Option<Revision>,
    entries: FxHashMap<K, Arc<V>>,
}

impl<K: Eq + Hash, V> KeyedMemo<K, V> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            revision: None,
            entries: FxHashMap::default(),
        }
    }

    /// Return the cached value for `(revision, key)`, computing it if missing.
    pub fn get_or_compute(
        &mut self,
        revision: Revision,
        key: K,
        compute: impl FnOnce() -> V,
    ) -> Arc<V> {
        if self.revision != Some(revision) {
            self.entries.clear();
            self.revision = Some(revision);
        }

        Arc::clone(
            self.entries
                .entry(key)
                .or_insert_with(|| Arc::new(compute())),
        )
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash, V> Default for KeyedMemo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
