//! YAML catalog fixtures
//!
//! ```yaml
//! products:
//!   - id: headphones
//!     name: Wireless Headphones
//!     price: "199.99"
//!     category: Electronics
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use async_trait::async_trait;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso};
use serde::Deserialize;

use crate::{
    catalog::{FetchError, ProductSource},
    items::Item,
};

/// Top-level catalog fixture document.
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Products in catalog order
    pub products: Vec<ProductFixture>,
}

/// A single product entry in a catalog fixture.
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Unique product id
    pub id: String,

    /// Display name
    pub name: String,

    /// Unit price as a decimal string, in dollars
    pub price: String,

    /// Longer description
    #[serde(default)]
    pub description: String,

    /// Image reference
    #[serde(default)]
    pub image: String,

    /// Category label
    #[serde(default)]
    pub category: Option<String>,

    /// Stock availability
    #[serde(default = "in_stock_default")]
    pub in_stock: bool,
}

fn in_stock_default() -> bool {
    true
}

/// Parse a dollar price such as `"199.99"` into money.
///
/// # Errors
///
/// Returns [`FetchError::InvalidPrice`] if the value isn't a non-negative
/// decimal with at most two decimal places.
pub fn parse_price(id: &str, price: &str) -> Result<Money<'static, iso::Currency>, FetchError> {
    let invalid = || FetchError::InvalidPrice(id.to_string(), price.to_string());

    let amount = Decimal::from_str(price.trim()).map_err(|_err| invalid())?;

    if amount.is_sign_negative() || amount.scale() > 2 {
        return Err(invalid());
    }

    let minor = (amount * Decimal::ONE_HUNDRED)
        .to_i64()
        .ok_or_else(invalid)?;

    Ok(Money::from_minor(minor, iso::USD))
}

impl ProductFixture {
    /// Convert the fixture entry into a catalog item.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidPrice`] if the price can't be parsed.
    pub fn into_item(self) -> Result<Item, FetchError> {
        let price = parse_price(&self.id, &self.price)?;

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

/// Product source reading a YAML fixture file on every fetch.
#[derive(Debug, Clone)]
pub struct FixtureCatalog {
    path: PathBuf,
}

impl FixtureCatalog {
    /// Create a source for the given fixture file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the fixture file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse catalog items from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or a price is invalid.
    pub fn parse(contents: &str) -> Result<Vec<Item>, FetchError> {
        let fixture: CatalogFixture = serde_norway::from_str(contents)?;

        fixture
            .products
            .into_iter()
            .map(ProductFixture::into_item)
            .collect()
    }
}

#[async_trait]
impl ProductSource for FixtureCatalog {
    async fn fetch_items(&self) -> Result<Vec<Item>, FetchError> {
        let contents = fs::read_to_string(&self.path)?;

        Self::parse(&contents)
    }
}
