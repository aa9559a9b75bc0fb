//! Storefront store
//!
//! Composition root owning the catalog, cart and theme aggregates, their
//! selectors, and the persistence bridge. UI events arrive as [`Action`]s.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    cart::{Cart, CartLine},
    catalog::{Catalog, FetchError, FetchTicket, ProductSource},
    items::{Item, ItemId},
    persistence::{PersistenceBridge, Restored, SnapshotStorage},
    selectors::{self, CartSelectors, CartSummary, CatalogSelectors},
    theme::{ThemeMode, ThemeStore},
};

/// A user-triggered state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Add one unit of a catalog item to the cart.
    AddItem(ItemId),

    /// Remove an item's line from the cart.
    RemoveItem(ItemId),

    /// Set the absolute quantity of an item already in the cart.
    SetQuantity(ItemId, i64),

    /// Empty the cart.
    ClearCart,

    /// Flip between light and dark mode.
    ToggleTheme,

    /// Switch to the given theme mode.
    SetTheme(ThemeMode),
}

/// Storefront state
#[derive(Debug)]
pub struct Storefront {
    catalog: Catalog,
    cart: Cart,
    theme: ThemeStore,
    cart_selectors: CartSelectors,
    catalog_selectors: CatalogSelectors,
    persistence: PersistenceBridge,
}

impl Storefront {
    /// Open the store, restoring the cart and theme from `storage`.
    pub fn open(storage: Arc<dyn SnapshotStorage>) -> Self {
        let catalog = Catalog::new();
        let mut persistence = PersistenceBridge::new(storage);
        let Restored { cart, theme } = persistence.restore(catalog.currency());

        Self {
            catalog,
            cart,
            theme,
            cart_selectors: CartSelectors::new(),
            catalog_selectors: CatalogSelectors::new(),
            persistence,
        }
    }

    /// Apply a user action and persist whatever it changed.
    pub fn dispatch(&mut self, action: Action) {
        debug!(?action, "dispatch");

        match action {
            Action::AddItem(id) => match self.catalog.get(&id) {
                Some(item) => self.cart.add_item(Arc::clone(item)),
                None => warn!(item = %id, "ignoring add of unknown item"),
            },
            Action::RemoveItem(id) => self.cart.remove_item(&id),
            Action::SetQuantity(id, quantity) => self.cart.set_quantity(&id, quantity),
            Action::ClearCart => self.cart.clear(),
            Action::ToggleTheme => self.theme.toggle(),
            Action::SetTheme(mode) => self.theme.set_mode(mode),
        }

        self.persistence.sync(&self.cart, &self.theme);
    }

    /// Load the catalog from `source`.
    pub async fn load_catalog(&mut self, source: &dyn ProductSource) {
        self.catalog.fetch(source).await;
    }

    /// Start a catalog fetch driven by the caller. See [`Catalog::begin_fetch`].
    pub fn begin_catalog_fetch(&mut self) -> FetchTicket {
        self.catalog.begin_fetch()
    }

    /// Finish a catalog fetch. See [`Catalog::complete_fetch`].
    pub fn complete_catalog_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Item>, FetchError>,
    ) -> bool {
        self.catalog.complete_fetch(ticket, result)
    }

    /// The catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The cart
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The theme
    pub fn theme(&self) -> &ThemeStore {
        &self.theme
    }

    /// Whether the item is in the cart.
    pub fn is_in_cart(&self, id: &ItemId) -> bool {
        selectors::is_in_cart(&self.cart, id)
    }

    /// Quantity of the item in the cart, or zero.
    pub fn quantity_of(&self, id: &ItemId) -> u32 {
        selectors::quantity_of(&self.cart, id)
    }

    /// Cart line for the item, if any.
    pub fn line_for(&self, id: &ItemId) -> Option<&CartLine> {
        selectors::line_for(&self.cart, id)
    }

    /// Cart total formatted for display.
    pub fn formatted_total(&mut self) -> Arc<String> {
        self.cart_selectors.formatted_total(&self.cart)
    }

    /// Snapshot of the cart for display.
    pub fn cart_summary(&mut self) -> Arc<CartSummary> {
        self.cart_selectors.summary(&self.cart)
    }

    /// Catalog item by id.
    pub fn item(&self, id: &ItemId) -> Option<&Arc<Item>> {
        self.catalog.get(id)
    }

    /// Catalog items in a category.
    pub fn by_category(&mut self, category: &str) -> Arc<Vec<Arc<Item>>> {
        self.catalog_selectors.by_category(&self.catalog, category)
    }

    /// Catalog items in stock.
    pub fn in_stock_only(&mut self) -> Arc<Vec<Arc<Item>>> {
        self.catalog_selectors.in_stock_only(&self.catalog)
    }

    /// Distinct catalog categories.
    pub fn categories(&mut self) -> Arc<Vec<String>> {
        self.catalog_selectors.categories(&self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use crate::{
        catalog::{CatalogStatus, MockProductSource, SampleCatalog},
        persistence::{CART_KEY, MemoryStorage, THEME_KEY},
    };

    use super::*;

    async fn loaded_store(storage: Arc<MemoryStorage>) -> Storefront {
        let mut store = Storefront::open(storage);
        store.load_catalog(&SampleCatalog::instant()).await;

        store
    }

    #[tokio::test]
    async fn negative_price_catalog_never_reaches_the_cart() {
        let storage = Arc::new(MemoryStorage::new());
        let mut source = MockProductSource::new();
        source.expect_fetch_items().returning(|| {
            Ok(vec![
                Item::new("ok", "Ok", Money::from_minor(5_00, iso::USD)),
                Item::new("neg", "Refund", Money::from_minor(-1_00, iso::USD)),
            ])
        });

        let mut store = Storefront::open(Arc::<MemoryStorage>::clone(&storage));
        store.load_catalog(&source).await;

        store.dispatch(Action::AddItem(ItemId::from("ok")));
        store.dispatch(Action::AddItem(ItemId::from("neg")));
        store.dispatch(Action::AddItem(ItemId::from("ok")));

        assert!(matches!(store.catalog().status(), CatalogStatus::Errored(_)));
        assert!(store.cart().is_empty());

        let mut store = loaded_store(Arc::clone(&storage)).await;
        store.dispatch(Action::AddItem(ItemId::from("1")));
        store.dispatch(Action::AddItem(ItemId::from("1")));

        let reopened = Storefront::open(storage);

        assert_eq!(reopened.quantity_of(&ItemId::from("1")), 2);
    }

    #[tokio::test]
    async fn add_unknown_item_is_noop() {
        let mut store = loaded_store(Arc::new(MemoryStorage::new())).await;

        store.dispatch(Action::AddItem(ItemId::from("does-not-exist")));

        assert!(store.cart().is_empty());
    }

    #[tokio::test]
    async fn dispatch_drives_cart_and_queries() {
        let mut store = loaded_store(Arc::new(MemoryStorage::new())).await;

        store.dispatch(Action::AddItem(ItemId::from("4")));
        store.dispatch(Action::AddItem(ItemId::from("5")));
        store.dispatch(Action::AddItem(ItemId::from("4")));

        assert!(store.is_in_cart(&ItemId::from("5")));
        assert_eq!(store.quantity_of(&ItemId::from("4")), 2);
        assert_eq!(store.formatted_total().as_str(), "$239.97");

        store.dispatch(Action::SetQuantity(ItemId::from("4"), 0));

        assert!(store.line_for(&ItemId::from("4")).is_none());
        assert_eq!(store.cart_summary().formatted_total, "$59.99");

        store.dispatch(Action::ClearCart);

        assert_eq!(store.cart_summary().total_items, 0);
    }

    #[tokio::test]
    async fn dispatch_persists_cart_and_theme() -> TestResult {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = loaded_store(Arc::clone(&storage)).await;

        store.dispatch(Action::AddItem(ItemId::from("1")));
        store.dispatch(Action::SetTheme(ThemeMode::Dark));

        assert!(storage.load(CART_KEY)?.is_some());
        assert_eq!(storage.load(THEME_KEY)?.as_deref(), Some(r#"{"mode":"dark"}"#));

        let reopened = Storefront::open(storage);

        assert_eq!(reopened.cart().total_items(), 1);
        assert!(reopened.theme().is_dark());
        assert_eq!(reopened.catalog().status(), &CatalogStatus::Idle);

        Ok(())
    }

    #[tokio::test]
    async fn catalog_queries_over_sample_data() {
        let mut store = loaded_store(Arc::new(MemoryStorage::new())).await;

        assert_eq!(
            *store.categories(),
            vec![
                "Electronics".to_string(),
                "Sportswear".to_string(),
                "Home".to_string(),
                "Accessories".to_string(),
            ]
        );
        assert_eq!(store.by_category("Electronics").len(), 3);
        assert_eq!(store.in_stock_only().len(), 5);
        assert!(store.item(&ItemId::from("6")).is_some());
    }

    #[tokio::test]
    async fn cart_stays_mutable_during_fetch() {
        let mut store = loaded_store(Arc::new(MemoryStorage::new())).await;

        let ticket = store.begin_catalog_fetch();
        store.dispatch(Action::AddItem(ItemId::from("2")));
        store.dispatch(Action::ToggleTheme);

        let mut source = MockProductSource::new();
        source.expect_fetch_items().returning(|| Ok(Vec::new()));
        let result = source.fetch_items().await;

        assert!(store.complete_catalog_fetch(ticket, result));
        assert_eq!(store.cart().total_items(), 1);
        assert!(store.theme().is_dark());
        assert!(store.catalog().items().is_empty());
    }
}
