//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLine},
    catalog::{
        Catalog, CatalogStatus, FetchError, FetchTicket, FixtureCatalog, ProductSource,
        SampleCatalog,
    },
    items::{Item, ItemId},
    persistence::{
        FileStorage, MemoryStorage, PersistenceBridge, SnapshotStorage, StorageError,
    },
    pricing::{Totals, format_amount},
    revision::Revision,
    selectors::{CartSelectors, CartSummary, CatalogSelectors},
    store::{Action, Storefront},
    theme::{Theme, ThemeMode, ThemeStore},
};
