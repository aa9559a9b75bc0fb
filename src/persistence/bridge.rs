//! Persistence bridge

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use rusty_money::iso::Currency;
use tracing::{debug, warn};

use crate::{
    cart::Cart,
    persistence::{
        CART_KEY, SnapshotStorage, THEME_KEY,
        snapshot::{CartSnapshot, SnapshotError, ThemeSnapshot},
    },
    revision::Revision,
    theme::ThemeStore,
};

/// State recovered at startup.
#[derive(Debug)]
pub struct Restored {
    /// Restored cart, or an empty one
    pub cart: Cart,

    /// Restored theme, or light mode
    pub theme: ThemeStore,
}

/// Connects the cart and theme stores to a [`SnapshotStorage`].
///
/// The bridge remembers which revision of each slice it last wrote, and
/// [`PersistenceBridge::sync`] only writes slices that changed since.
pub struct PersistenceBridge {
    storage: Arc<dyn SnapshotStorage>,
    saved_cart: Option<Revision>,
    saved_theme: Option<Revision>,
}

impl PersistenceBridge {
    /// Create a bridge over the given storage.
    pub fn new(storage: Arc<dyn SnapshotStorage>) -> Self {
        Self {
            storage,
            saved_cart: None,
            saved_theme: None,
        }
    }

    /// Restore the cart and theme, falling back to defaults for anything
    /// missing or unreadable.
    pub fn restore(&mut self, currency: &'static Currency) -> Restored {
        let cart = match self.load_cart(currency) {
            Ok(Some(cart)) => cart,
            Ok(None) => Cart::with_currency(currency),
            Err(error) => {
                warn!(%error, "failed to restore cart; starting empty");
                Cart::with_currency(currency)
            }
        };

        let theme = match self.load_theme() {
            Ok(Some(snapshot)) => ThemeStore::with_mode(snapshot.mode),
            Ok(None) => ThemeStore::new(),
            Err(error) => {
                warn!(%error, "failed to restore theme; using light mode");
                ThemeStore::new()
            }
        };

        debug!(
            cart_lines = cart.len(),
            theme = %theme.mode(),
            "restored persisted state"
        );

        self.saved_cart = Some(cart.revision());
        self.saved_theme = Some(theme.revision());

        Restored { cart, theme }
    }

    /// Load the cart snapshot, if one was saved.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if storage fails or the snapshot is invalid.
    pub fn load_cart(&self, currency: &'static Currency) -> Result<Option<Cart>, SnapshotError> {
        let Some(json) = self.storage.load(CART_KEY)? else {
            return Ok(None);
        };

        Ok(Some(CartSnapshot::from_json(&json)?.into_cart(currency)?))
    }

    /// Load the theme snapshot, if one was saved.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if storage fails or the snapshot is invalid.
    pub fn load_theme(&self) -> Result<Option<ThemeSnapshot>, SnapshotError> {
        let Some(json) = self.storage.load(THEME_KEY)? else {
            return Ok(None);
        };

        Ok(Some(ThemeSnapshot::from_json(&json)?))
    }

    /// Write the cart snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if serialization or storage fails.
    pub fn save_cart(&self, cart: &Cart) -> Result<(), SnapshotError> {
        let json = CartSnapshot::from_cart(cart)?.to_json()?;

        self.storage.save(CART_KEY, &json)?;

        Ok(())
    }

    /// Write the theme snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if serialization or storage fails.
    pub fn save_theme(&self, theme: &ThemeStore) -> Result<(), SnapshotError> {
        let json = ThemeSnapshot { mode: theme.mode() }.to_json()?;

        self.storage.save(THEME_KEY, &json)?;

        Ok(())
    }

    /// Save every slice whose revision changed since it was last written.
    ///
    /// Failures are logged and the slice stays dirty, so the next sync tries
    /// again. Returns the number of slices written.
    pub fn sync(&mut self, cart: &Cart, theme: &ThemeStore) -> usize {
        let mut written = 0;

        if self.saved_cart != Some(cart.revision()) {
            match self.save_cart(cart) {
                Ok(()) => {
                    self.saved_cart = Some(cart.revision());
                    written += 1;
                }
                Err(error) => warn!(%error, "failed to persist cart"),
            }
        }

        if self.saved_theme != Some(theme.revision()) {
            match self.save_theme(theme) {
                Ok(()) => {
                    self.saved_theme = Some(theme.revision());
                    written += 1;
                }
                Err(error) => warn!(%error, "failed to persist theme"),
            }
        }

        written
    }
}

impl Debug for PersistenceBridge {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PersistenceBridge")
            .field("saved_cart", &self.saved_cart)
            .field("saved_theme", &self.saved_theme)
            .finish_non_exhaustive()
    }
}
