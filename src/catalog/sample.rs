//! Built-in sample catalog

use std::time::Duration;

use async_trait::async_trait;
use rusty_money::{Money, iso};

use crate::{
    catalog::{FetchError, ProductSource},
    items::Item,
};

/// Default simulated network latency for the sample catalog.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

/// In-process product source serving the storefront's sample products after
/// a simulated delay.
#[derive(Debug, Clone)]
pub struct SampleCatalog {
    latency: Duration,
}

impl SampleCatalog {
    /// Create a sample source with the given simulated latency.
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Create a sample source that answers immediately.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl Default for SampleCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

#[async_trait]
impl ProductSource for SampleCatalog {
    async fn fetch_items(&self) -> Result<Vec<Item>, FetchError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        Ok(sample_items())
    }
}

/// The six sample products.
pub fn sample_items() -> Vec<Item> {
    vec![
        Item::new("1", "Wireless Headphones", Money::from_minor(199_99, iso::USD))
            .with_description(
                "Premium noise-canceling wireless headphones with 30-hour battery life.",
            )
            .with_image("https://images.unsplash.com/photo-1505740420928-5e560c06d30e")
            .with_category("Electronics"),
        Item::new("2", "Smart Watch", Money::from_minor(249_99, iso::USD))
            .with_description("Fitness tracking smart watch with heart rate monitor and GPS.")
            .with_image("https://images.unsplash.com/photo-1523275335684-37898b6baf30")
            .with_category("Electronics"),
        Item::new("3", "Running Shoes", Money::from_minor(129_99, iso::USD))
            .with_description("Lightweight, breathable running shoes for maximum comfort.")
            .with_image("https://images.unsplash.com/photo-1542291026-7eec264c27ff")
            .with_category("Sportswear"),
        Item::new("4", "Coffee Maker", Money::from_minor(89_99, iso::USD))
            .with_description("Programmable coffee maker with built-in grinder for fresh coffee.")
            .with_image("https://images.unsplash.com/photo-1510017803434-a899398421b3")
            .with_category("Home"),
        Item::new("5", "Backpack", Money::from_minor(59_99, iso::USD))
            .with_description("Durable water-resistant backpack with laptop compartment.")
            .with_image("https://images.unsplash.com/photo-1553062407-98eeb64c6a62")
            .with_category("Accessories"),
        Item::new("6", "Smartphone", Money::from_minor(799_99, iso::USD))
            .with_description(
                "Latest smartphone with high-resolution camera and long battery life.",
            )
            .with_image("https://images.unsplash.com/photo-1580910051074-3eb694886505")
            .with_category("Electronics")
            .with_in_stock(false),
    ]
}
