//! Cart invariants checked over long scripted sequences of mutations.
//!
//! Every sequence is replayed from a fixed seed so failures reproduce.

use std::sync::Arc;

use rusty_money::{Money, iso};

use storefront::{
    cart::Cart,
    items::{Item, ItemId},
    pricing::{format_amount, line_total_minor},
    selectors::CartSelectors,
};

#[derive(Debug, Clone, Copy)]
enum Op {
    Add(usize),
    Remove(usize),
    Set(usize, i64),
    Clear,
}

/// Small deterministic generator, enough to shuffle operations around.
struct Script(u64);

impl Script {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        self.0 >> 33
    }

    fn op(&mut self, items: usize) -> Op {
        let index = usize::try_from(self.next()).unwrap_or_default() % items;

        match self.next() % 20 {
            0 => Op::Clear,
            1..=3 => Op::Remove(index),
            4..=8 => Op::Set(index, i64::try_from(self.next() % 12).unwrap_or_default() - 3),
            _ => Op::Add(index),
        }
    }
}

fn catalog() -> Vec<Arc<Item>> {
    [("a", 1_99), ("b", 10), ("c", 20), ("d", 49_95), ("e", 1_000_00)]
        .into_iter()
        .map(|(id, minor)| Arc::new(Item::new(id, id, Money::from_minor(minor, iso::USD))))
        .collect()
}

fn apply(cart: &mut Cart, items: &[Arc<Item>], op: Op) {
    match op {
        Op::Add(i) => {
            if let Some(item) = items.get(i) {
                cart.add_item(Arc::clone(item));
            }
        }
        Op::Remove(i) => {
            if let Some(item) = items.get(i) {
                cart.remove_item(item.id());
            }
        }
        Op::Set(i, quantity) => {
            if let Some(item) = items.get(i) {
                cart.set_quantity(item.id(), quantity);
            }
        }
        Op::Clear => cart.clear(),
    }
}

fn assert_invariants(cart: &Cart) {
    let minor: i64 = cart.lines().iter().map(line_total_minor).sum();
    let count: u64 = cart.lines().iter().map(|line| u64::from(line.quantity())).sum();

    assert_eq!(cart.total_amount(), Money::from_minor(minor, iso::USD));
    assert_eq!(cart.total_items(), count);

    for line in cart.lines() {
        assert!(line.quantity() >= 1, "line {} has zero quantity", line.item().id());
    }

    let mut ids: Vec<&ItemId> = cart.lines().iter().map(|line| line.item().id()).collect();
    ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    ids.dedup();

    assert_eq!(ids.len(), cart.len(), "duplicate lines in cart");
}

#[test]
fn totals_always_refold_from_lines() {
    let items = catalog();

    for seed in 1..=25 {
        let mut script = Script(seed);
        let mut cart = Cart::new();

        for _ in 0..200 {
            apply(&mut cart, &items, script.op(items.len()));
            assert_invariants(&cart);
        }
    }
}

#[test]
fn non_positive_quantity_matches_remove() {
    let items = catalog();
    let mut script = Script(7);

    for _ in 0..100 {
        let mut cart = Cart::new();

        for _ in 0..10 {
            apply(&mut cart, &items, script.op(items.len()));
        }

        for item in &items {
            let mut removed = cart.clone();
            let mut zeroed = cart.clone();

            removed.remove_item(item.id());
            zeroed.set_quantity(item.id(), 0);

            assert_eq!(removed, zeroed);
        }
    }
}

#[test]
fn replaying_a_script_gives_identical_totals() {
    let items = catalog();

    let run = || {
        let mut script = Script(42);
        let mut cart = Cart::new();

        for _ in 0..500 {
            apply(&mut cart, &items, script.op(items.len()));
        }

        (cart.total_amount(), cart.total_items(), format_amount(&cart.total_amount()))
    };

    assert_eq!(run(), run());
}

#[test]
fn clear_always_empties() {
    let items = catalog();
    let mut script = Script(99);
    let mut cart = Cart::new();

    for _ in 0..50 {
        apply(&mut cart, &items, script.op(items.len()));
    }

    cart.clear();

    assert!(cart.is_empty());
    assert_eq!(cart.total_items(), 0);
    assert_eq!(format_amount(&cart.total_amount()), "$0.00");
}

#[test]
fn memoized_summary_tracks_every_change() {
    let items = catalog();
    let mut script = Script(3);
    let mut cart = Cart::new();
    let mut selectors = CartSelectors::new();

    for _ in 0..200 {
        let before = selectors.summary(&cart);
        let revision = cart.revision();

        apply(&mut cart, &items, script.op(items.len()));

        let after = selectors.summary(&cart);

        if cart.revision() == revision {
            assert!(Arc::ptr_eq(&before, &after));
        } else {
            assert_eq!(after.formatted_total, format_amount(&cart.total_amount()));
            assert_eq!(after.total_items, cart.total_items());
        }

        assert_eq!(*selectors.formatted_total(&cart), after.formatted_total);
    }
}
