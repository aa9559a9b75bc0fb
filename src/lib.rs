//! Storefront
//!
//! State core for a small storefront: a product catalog fetched from an
//! asynchronous source, a cart whose totals are always refolded from its
//! lines, memoized derived queries, a light/dark theme and snapshot
//! persistence for the cart and theme.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod items;
pub mod observability;
pub mod persistence;
pub mod prelude;
pub mod pricing;
pub mod render;
pub mod revision;
pub mod selectors;
pub mod store;
pub mod theme;
