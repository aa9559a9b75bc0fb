//! Cart selectors

use std::sync::Arc;

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::{Cart, CartLine},
    items::ItemId,
    pricing::format_amount,
    selectors::Memo,
};

/// Everything the cart screen displays, taken from one cart revision.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSummary {
    /// Lines in insertion order
    pub lines: Vec<CartLine>,

    /// Sum of unit price × quantity
    pub total_amount: Money<'static, Currency>,

    /// Sum of quantities
    pub total_items: u64,

    /// `total_amount` as a `$` string with two decimals
    pub formatted_total: String,
}

/// Whether the cart has a line for the item.
pub fn is_in_cart(cart: &Cart, id: &ItemId) -> bool {
    cart.get_line(id).is_some()
}

/// Quantity of the item in the cart, or zero.
pub fn quantity_of(cart: &Cart, id: &ItemId) -> u32 {
    cart.get_line(id).map_or(0, CartLine::quantity)
}

/// The cart line for the item, if any.
pub fn line_for<'a>(cart: &'a Cart, id: &ItemId) -> Option<&'a CartLine> {
    cart.get_line(id)
}

/// Memoized cart projections.
#[derive(Debug, Default)]
pub struct CartSelectors {
    formatted_total: Memo<String>,
    summary: Memo<CartSummary>,
}

impl CartSelectors {
    /// Create selectors with empty caches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total amount formatted for display, e.g. `$15.00`.
    pub fn formatted_total(&mut self, cart: &Cart) -> Arc<String> {
        self.formatted_total
            .get_or_compute(cart.revision(), || format_amount(&cart.total_amount()))
    }

    /// A consistent snapshot of lines and totals.
    pub fn summary(&mut self, cart: &Cart) -> Arc<CartSummary> {
        let formatted_total = self.formatted_total(cart);

        self.summary.get_or_compute(cart.revision(), || CartSummary {
            lines: cart.lines().to_vec(),
            total_amount: cart.total_amount(),
            total_items: cart.total_items(),
            formatted_total: formatted_total.as_ref().clone(),
        })
    }
}
