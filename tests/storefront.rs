//! End-to-end storefront tests: catalog loading, cart actions, derived
//! queries and persistence across a restart.

use std::{path::PathBuf, sync::Arc};

use rusty_money::{Money, iso};
use testresult::TestResult;

use storefront::{
    catalog::{CatalogStatus, FetchError, FixtureCatalog, SampleCatalog},
    items::ItemId,
    persistence::{FileStorage, MemoryStorage, SnapshotStorage},
    store::{Action, Storefront},
    theme::ThemeMode,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/catalog.yml")
}

#[tokio::test]
async fn fixture_catalog_drives_the_cart() -> TestResult {
    let mut store = Storefront::open(Arc::new(MemoryStorage::new()));

    store.load_catalog(&FixtureCatalog::new(fixture_path())).await;

    assert_eq!(store.catalog().status(), &CatalogStatus::Loaded);
    assert_eq!(*store.categories(), vec!["Home", "Stationery"]);

    let home = store.by_category("Home");
    let home: Vec<&str> = home.iter().map(|item| item.id().as_str()).collect();

    assert_eq!(home, vec!["desk-lamp", "mug"]);

    store.dispatch(Action::AddItem(ItemId::from("desk-lamp")));
    store.dispatch(Action::AddItem(ItemId::from("mug")));
    store.dispatch(Action::AddItem(ItemId::from("mug")));

    assert_eq!(store.cart().total_amount(), Money::from_minor(42_00, iso::USD));
    assert_eq!(store.cart().total_items(), 3);
    assert_eq!(*store.formatted_total(), "$42.00");

    Ok(())
}

#[tokio::test]
async fn cart_and_theme_survive_restart() -> TestResult {
    let dir = tempfile::tempdir()?;

    {
        let mut store = Storefront::open(Arc::new(FileStorage::new(dir.path())));
        store.load_catalog(&SampleCatalog::instant()).await;

        store.dispatch(Action::AddItem(ItemId::from("1")));
        store.dispatch(Action::AddItem(ItemId::from("3")));
        store.dispatch(Action::SetQuantity(ItemId::from("3"), 2));
        store.dispatch(Action::ToggleTheme);
    }

    let mut store = Storefront::open(Arc::new(FileStorage::new(dir.path())));

    assert_eq!(store.theme().mode(), ThemeMode::Dark);
    assert_eq!(store.quantity_of(&ItemId::from("1")), 1);
    assert_eq!(store.quantity_of(&ItemId::from("3")), 2);
    assert_eq!(*store.formatted_total(), "$459.97");

    // The catalog itself isn't persisted
    assert_eq!(store.catalog().status(), &CatalogStatus::Idle);

    Ok(())
}

#[tokio::test]
async fn clearing_the_cart_is_persisted() -> TestResult {
    let storage: Arc<dyn SnapshotStorage> = Arc::new(MemoryStorage::new());

    let mut store = Storefront::open(Arc::clone(&storage));
    store.load_catalog(&SampleCatalog::instant()).await;
    store.dispatch(Action::AddItem(ItemId::from("2")));
    store.dispatch(Action::ClearCart);

    let restored = Storefront::open(storage);

    assert!(restored.cart().is_empty());
    assert_eq!(restored.cart().total_amount(), Money::from_minor(0, iso::USD));

    Ok(())
}

#[test]
fn corrupt_snapshots_fall_back_to_defaults() -> TestResult {
    let storage = Arc::new(MemoryStorage::new());
    storage.save("cart", "{not json")?;
    storage.save("theme", r#"{"mode":"sepia"}"#)?;

    let store = Storefront::open(storage);

    assert!(store.cart().is_empty());
    assert_eq!(store.theme().mode(), ThemeMode::Light);

    Ok(())
}

#[test]
fn late_catalog_response_is_discarded() {
    let mut store = Storefront::open(Arc::new(MemoryStorage::new()));

    let first = store.begin_catalog_fetch();
    let second = store.begin_catalog_fetch();

    assert!(store.complete_catalog_fetch(second, Err(FetchError::Unavailable("offline".to_string()))));
    assert!(!store.complete_catalog_fetch(first, Ok(Vec::new())));

    assert_eq!(
        store.catalog().status(),
        &CatalogStatus::Errored("Failed to fetch products: offline".to_string())
    );
}

#[tokio::test]
async fn theme_actions_leave_cart_queries_cached() {
    let mut store = Storefront::open(Arc::new(MemoryStorage::new()));
    store.load_catalog(&SampleCatalog::instant()).await;
    store.dispatch(Action::AddItem(ItemId::from("5")));

    let before = store.cart_summary();
    store.dispatch(Action::SetTheme(ThemeMode::Dark));
    let after = store.cart_summary();

    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(after.formatted_total, "$59.99");
}

#[tokio::test]
async fn missing_fixture_errors_the_catalog() {
    let mut store = Storefront::open(Arc::new(MemoryStorage::new()));

    store
        .load_catalog(&FixtureCatalog::new("/nonexistent/catalog.yml"))
        .await;

    assert!(store.catalog().error().is_some());
    assert!(store.catalog().items().is_empty());
}
