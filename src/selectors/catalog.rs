//! Catalog selectors

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::{
    catalog::Catalog,
    items::Item,
    selectors::{KeyedMemo, Memo},
};

/// Memoized catalog projections.
#[derive(Debug, Default)]
pub struct CatalogSelectors {
    by_category: KeyedMemo<String, Vec<Arc<Item>>>,
    in_stock: Memo<Vec<Arc<Item>>>,
    categories: Memo<Vec<String>>,
}

impl CatalogSelectors {
    /// Create selectors with empty caches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Items whose category label equals `category`.
    ///
    /// Uncategorized items carry the empty label, so `""` selects them.
    pub fn by_category(&mut self, catalog: &Catalog, category: &str) -> Arc<Vec<Arc<Item>>> {
        self.by_category
            .get_or_compute(catalog.items_revision(), category.to_string(), || {
                catalog
                    .items()
                    .iter()
                    .filter(|item| item.category().unwrap_or_default() == category)
                    .cloned()
                    .collect()
            })
    }

    /// Items currently in stock.
    pub fn in_stock_only(&mut self, catalog: &Catalog) -> Arc<Vec<Arc<Item>>> {
        self.in_stock.get_or_compute(catalog.items_revision(), || {
            catalog
                .items()
                .iter()
                .filter(|item| item.in_stock())
                .cloned()
                .collect()
        })
    }

    /// Distinct non-empty category labels in first-seen order.
    pub fn categories(&mut self, catalog: &Catalog) -> Arc<Vec<String>> {
        self.categories.get_or_compute(catalog.items_revision(), || {
            let mut seen = FxHashSet::default();

            catalog
                .items()
                .iter()
                .filter_map(|item| item.category())
                .filter(|category| seen.insert(*category))
                .map(str::to_string)
                .collect()
        })
    }
}
