//! Cart

use std::sync::Arc;

use rusty_money::{
    Money,
    iso::{self, Currency},
};
use tracing::{debug, warn};

use crate::{
    items::{Item, ItemId},
    pricing::{Totals, fold_totals},
    revision::Revision,
};

/// A single item in the cart together with its quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    item: Arc<Item>,
    quantity: u32,
}

impl CartLine {
    /// Creates a new line. A zero quantity is raised to one; callers that
    /// want to drop a line remove it instead.
    pub fn new(item: Arc<Item>, quantity: u32) -> Self {
        Self {
            item,
            quantity: quantity.max(1),
        }
    }

    /// Returns the item on this line
    pub fn item(&self) -> &Arc<Item> {
        &self.item
    }

    /// Returns the quantity, always at least one
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Cart aggregate.
///
/// Lines are kept in the order items were first added and there is at most
/// one line per item id. Totals are never updated independently: every
/// mutation that changes the lines refolds them from scratch.
#[derive(Debug)]
pub struct Cart {
    lines: Vec<CartLine>,
    totals: Totals,
    currency: &'static Currency,
    revision: Revision,
}

impl Cart {
    /// Create a new empty cart priced in US dollars.
    pub fn new() -> Self {
        Self::with_currency(iso::USD)
    }

    /// Create a new empty cart with the given currency.
    pub fn with_currency(currency: &'static Currency) -> Self {
        Self {
            lines: Vec::new(),
            totals: Totals::zero(currency),
            currency,
            revision: Revision::initial(),
        }
    }

    /// Rebuild a cart from previously stored lines.
    ///
    /// Lines priced in another currency are dropped and repeated item ids are
    /// merged by summing their quantities, so the result always satisfies the
    /// one-line-per-item rule.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>, currency: &'static Currency) -> Self {
        let mut cart = Self::with_currency(currency);

        for line in lines {
            if line.item.price().currency() != currency {
                warn!(item = %line.item.id(), "dropping restored cart line with foreign currency");
                continue;
            }

            match cart.position(line.item.id()) {
                Some(idx) => {
                    if let Some(existing) = cart.lines.get_mut(idx) {
                        existing.quantity = existing.quantity.saturating_add(line.quantity);
                    }
                }
                None => cart.lines.push(line),
            }
        }

        cart.recompute();

        cart
    }

    /// Add one unit of an item, appending a new line if the item isn't in the cart yet.
    pub fn add_item(&mut self, item: Arc<Item>) {
        if item.price().currency() != self.currency {
            warn!(
                item = %item.id(),
                item_currency = item.price().currency().iso_alpha_code,
                cart_currency = self.currency.iso_alpha_code,
                "ignoring item with mismatched currency"
            );

            return;
        }

        match self.position(item.id()) {
            Some(idx) => {
                if let Some(line) = self.lines.get_mut(idx) {
                    line.quantity = line.quantity.saturating_add(1);
                }
            }
            None => self.lines.push(CartLine::new(item, 1)),
        }

        self.changed();
    }

    /// Remove the line for the given item. Does nothing if it isn't in the cart.
    pub fn remove_item(&mut self, id: &ItemId) {
        let Some(idx) = self.position(id) else {
            return;
        };

        self.lines.remove(idx);
        self.changed();
    }

    /// Overwrite the quantity of an existing line.
    ///
    /// A quantity of zero or less removes the line; ids not in the cart are
    /// ignored.
    pub fn set_quantity(&mut self, id: &ItemId, quantity: i64) {
        let Some(idx) = self.position(id) else {
            return;
        };

        if quantity <= 0 {
            self.lines.remove(idx);
            self.changed();

            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let Some(line) = self.lines.get_mut(idx) else {
            return;
        };

        if line.quantity == quantity {
            return;
        }

        line.quantity = quantity;
        self.changed();
    }

    /// Remove every line and reset the totals.
    pub fn clear(&mut self) {
        if self.lines.is_empty() {
            return;
        }

        self.lines.clear();
        self.changed();
    }

    /// Get the line for an item, if present.
    pub fn get_line(&self, id: &ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item.id() == id)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Sum of unit price × quantity over all lines.
    pub fn total_amount(&self) -> Money<'static, Currency> {
        self.totals.amount
    }

    /// Sum of quantities over all lines.
    pub fn total_items(&self) -> u64 {
        self.totals.items
    }

    /// Both derived totals.
    pub fn totals(&self) -> Totals {
        self.totals
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Current revision, bumped after every change to the lines.
    pub fn revision(&self) -> Revision {
        self.revision
    }

    fn position(&self, id: &ItemId) -> Option<usize> {
        self.lines.iter().position(|line| line.item.id() == id)
    }

    fn changed(&mut self) {
        self.recompute();
        self.revision.bump();

        debug!(
            lines = self.lines.len(),
            total_items = self.totals.items,
            total_minor = self.totals.amount.to_minor_units(),
            "cart updated"
        );
    }

    fn recompute(&mut self) {
        self.totals = fold_totals(&self.lines, self.currency);
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Cart {
    fn clone(&self) -> Self {
        // A clone evolves independently, so it must not share cache identity.
        Self {
            lines: self.lines.clone(),
            totals: self.totals,
            currency: self.currency,
            revision: Revision::initial(),
        }
    }
}

impl PartialEq for Cart {
    fn eq(&self, other: &Self) -> bool {
        self.currency == other.currency && self.lines == other.lines && self.totals == other.totals
    }
}
