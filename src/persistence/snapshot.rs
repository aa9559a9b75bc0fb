//! Snapshots

use std::{num::TryFromIntError, sync::Arc};

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::{Cart, CartLine},
    items::{Item, ItemId},
    persistence::StorageError,
    theme::ThemeMode,
};

/// Errors raised while saving or restoring a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Storage backend failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Malformed snapshot JSON
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored price doesn't fit the money representation
    #[error("invalid price value")]
    InvalidPrice(#[from] TryFromIntError),
}

/// Stored copy of a catalog item, with the price in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Item id
    pub id: ItemId,

    /// Display name
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Unit price in minor units
    pub price: u64,

    /// Image reference
    #[serde(default)]
    pub image: String,

    /// Category label
    #[serde(default)]
    pub category: Option<String>,

    /// Stock availability
    pub in_stock: bool,
}

impl ItemRecord {
    fn from_item(item: &Item) -> Result<Self, SnapshotError> {
        Ok(Self {
            id: item.id().clone(),
            name: item.name().to_string(),
            description: item.description().to_string(),
            price: u64::try_from(item.price().to_minor_units())?,
            image: item.image().to_string(),
            category: item.category().map(str::to_string),
            in_stock: item.in_stock(),
        })
    }

    fn into_item(self, currency: &'static Currency) -> Result<Item, SnapshotError> {
        let price = Money::from_minor(i64::try_from(self.price)?, currency);

        let mut item = Item::new(self.id, self.name, price)
            .with_description(self.description)
            .with_image(self.image)
            .with_in_stock(self.in_stock);

        if let Some(category) = self.category {
            item = item.with_category(category);
        }

        Ok(item)
    }
}

/// Stored cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    /// The item on the line
    pub item: ItemRecord,

    /// Quantity; non-positive values are dropped on restore
    pub quantity: i64,
}

/// Persisted cart state. Totals are not stored; they are refolded on restore.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Lines in insertion order
    pub lines: Vec<LineRecord>,
}

impl CartSnapshot {
    /// Capture the lines of a cart.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::InvalidPrice`] if an item has a negative price.
    pub fn from_cart(cart: &Cart) -> Result<Self, SnapshotError> {
        let lines = cart
            .iter()
            .map(|line| {
                Ok(LineRecord {
                    item: ItemRecord::from_item(line.item())?,
                    quantity: i64::from(line.quantity()),
                })
            })
            .collect::<Result<_, SnapshotError>>()?;

        Ok(Self { lines })
    }

    /// Rebuild a cart in the given currency.
    ///
    /// Lines with a non-positive quantity are skipped and duplicate ids are
    /// merged; totals are recomputed from the surviving lines.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::InvalidPrice`] if a stored price is out of range.
    pub fn into_cart(self, currency: &'static Currency) -> Result<Cart, SnapshotError> {
        let mut lines = Vec::with_capacity(self.lines.len());

        for record in self.lines {
            if record.quantity <= 0 {
                continue;
            }

            let quantity = u32::try_from(record.quantity).unwrap_or(u32::MAX);
            let item = record.item.into_item(currency)?;

            lines.push(CartLine::new(Arc::new(item), quantity));
        }

        Ok(Cart::from_lines(lines, currency))
    }

    /// Serialize to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Persisted theme state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThemeSnapshot {
    /// Selected mode
    pub mode: ThemeMode,
}

impl ThemeSnapshot {
    /// Serialize to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}
