//! Catalog
//!
//! Holds the list of purchasable items and the state of the most recent
//! fetch. The catalog is populated by a [`ProductSource`] and is otherwise
//! read-only.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rusty_money::iso::{self, Currency};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    items::{Item, ItemId},
    pricing::format_amount,
    revision::Revision,
};

pub mod fixtures;
pub mod sample;

pub use fixtures::FixtureCatalog;
pub use sample::SampleCatalog;

/// Errors a product source can report.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The source could not provide any products.
    #[error("Failed to fetch products: {0}")]
    Unavailable(String),

    /// IO error reading a catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price for product {0}: {1}")]
    InvalidPrice(String, String),

    /// A product is priced in a currency other than the catalog's (product id, product currency, catalog currency).
    #[error("Product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),
}

/// Asynchronous supplier of catalog items.
#[automock]
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch every available product.
    async fn fetch_items(&self) -> Result<Vec<Item>, FetchError>;
}

/// Status of the catalog's most recent fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogStatus {
    /// No fetch has been started.
    #[default]
    Idle,

    /// A fetch is in flight.
    Loading,

    /// The last fetch succeeded.
    Loaded,

    /// The last fetch failed with the given message.
    Errored(String),
}

/// Handle for one started fetch.
///
/// Only the ticket from the most recent [`Catalog::begin_fetch`] is accepted
/// by [`Catalog::complete_fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct FetchTicket(u64);

/// Catalog store
#[derive(Debug)]
pub struct Catalog {
    items: Vec<Arc<Item>>,
    status: CatalogStatus,
    currency: &'static Currency,
    latest_ticket: u64,
    revision: Revision,
    items_revision: Revision,
}

impl Catalog {
    /// Create an empty, idle catalog priced in US dollars.
    pub fn new() -> Self {
        Self::with_currency(iso::USD)
    }

    /// Create an empty, idle catalog with the given currency.
    pub fn with_currency(currency: &'static Currency) -> Self {
        Self {
            items: Vec::new(),
            status: CatalogStatus::Idle,
            currency,
            latest_ticket: 0,
            revision: Revision::initial(),
            items_revision: Revision::initial(),
        }
    }

    /// Mark the catalog as loading and return a ticket for this fetch.
    ///
    /// Previously loaded items stay visible until the fetch completes. Any
    /// fetch started earlier is superseded: its completion will be ignored.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_ticket = self.latest_ticket.wrapping_add(1);
        self.status = CatalogStatus::Loading;
        self.revision.bump();

        debug!(ticket = self.latest_ticket, "catalog fetch started");

        FetchTicket(self.latest_ticket)
    }

    /// Apply the outcome of a fetch.
    ///
    /// Returns `false` and leaves the catalog untouched if the ticket was
    /// superseded by a later [`Catalog::begin_fetch`].
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Item>, FetchError>,
    ) -> bool {
        if ticket.0 != self.latest_ticket {
            debug!(
                ticket = ticket.0,
                latest = self.latest_ticket,
                "discarding superseded catalog fetch"
            );

            return false;
        }

        match result.and_then(|items| self.validate_items(items)) {
            Ok(items) => {
                info!(count = items.len(), "catalog loaded");

                self.items = items.into_iter().map(Arc::new).collect();
                self.status = CatalogStatus::Loaded;
                self.items_revision.bump();
            }
            Err(error) => {
                warn!(%error, "catalog fetch failed");

                self.status = CatalogStatus::Errored(error.to_string());
            }
        }

        self.revision.bump();

        true
    }

    /// Fetch items from the given source, from loading through to loaded or errored.
    pub async fn fetch(&mut self, source: &dyn ProductSource) {
        let ticket = self.begin_fetch();
        let result = source.fetch_items().await;

        // The ticket is always the latest here because `self` is borrowed
        // mutably for the whole fetch.
        _ = self.complete_fetch(ticket, result);
    }

    /// All items in catalog order.
    pub fn items(&self) -> &[Arc<Item>] {
        &self.items
    }

    /// Look up an item by id.
    pub fn get(&self, id: &ItemId) -> Option<&Arc<Item>> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Status of the most recent fetch.
    pub fn status(&self) -> &CatalogStatus {
        &self.status
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.status == CatalogStatus::Loading
    }

    /// The error message of the last failed fetch.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            CatalogStatus::Errored(message) => Some(message),
            _ => None,
        }
    }

    /// Get the currency of the catalog.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Current revision, bumped on every status or item change.
    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// Revision of the item list alone, bumped only when a fetch replaces
    /// the items.
    pub fn items_revision(&self) -> Revision {
        self.items_revision
    }

    fn validate_items(&self, items: Vec<Item>) -> Result<Vec<Item>, FetchError> {
        for item in &items {
            let price = item.price();

            if price.currency() != self.currency {
                return Err(FetchError::CurrencyMismatch(
                    item.id().to_string(),
                    price.currency().iso_alpha_code,
                    self.currency.iso_alpha_code,
                ));
            }

            if price.to_minor_units() < 0 {
                return Err(FetchError::InvalidPrice(
                    item.id().to_string(),
                    format_amount(price),
                ));
            }
        }

        Ok(items)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
