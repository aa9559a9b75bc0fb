//! Text rendering for the command-line front end.

use std::io;

use rusty_money::Money;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogStatus},
    items::Item,
    pricing::{format_amount, line_total_minor},
    selectors::CartSummary,
    theme::ThemeStore,
};

/// Errors that can occur while rendering output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Write a table of products, marking those already in the cart.
///
/// # Errors
///
/// Returns [`RenderError::IO`] if writing fails.
pub fn write_products<'a>(
    out: &mut impl io::Write,
    items: impl IntoIterator<Item = &'a Item>,
    quantity_of: impl Fn(&Item) -> u32,
) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Name", "Category", "Price", "Stock", "In cart"]);

    for item in items {
        let in_cart = match quantity_of(item) {
            0 => String::new(),
            quantity => format!("× {quantity}"),
        };

        builder.push_record([
            item.id().to_string(),
            item.name().to_string(),
            item.category().unwrap_or("-").to_string(),
            format_amount(item.price()),
            if item.in_stock() { "yes" } else { "sold out" }.to_string(),
            in_cart,
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..4), Alignment::right());

    writeln!(out, "{table}").map_err(|_err| RenderError::IO)
}

/// Write the details of a single product.
///
/// # Errors
///
/// Returns [`RenderError::IO`] if writing fails.
pub fn write_product(out: &mut impl io::Write, item: &Item, quantity: u32) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Name".to_string(), item.name().to_string()]);
    builder.push_record(["Price".to_string(), format_amount(item.price())]);
    builder.push_record([
        "Category".to_string(),
        item.category().unwrap_or("-").to_string(),
    ]);
    builder.push_record(["Description".to_string(), item.description().to_string()]);
    builder.push_record([
        "Availability".to_string(),
        if item.in_stock() { "In stock" } else { "Out of stock" }.to_string(),
    ]);
    builder.push_record(["In cart".to_string(), quantity.to_string()]);

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::first(), Color::BOLD);

    writeln!(out, "{table}").map_err(|_err| RenderError::IO)
}

/// Write the cart lines followed by the item count and total.
///
/// # Errors
///
/// Returns [`RenderError::IO`] if writing fails.
pub fn write_cart(out: &mut impl io::Write, summary: &CartSummary) -> Result<(), RenderError> {
    if summary.lines.is_empty() {
        return writeln!(out, "Your cart is empty.").map_err(|_err| RenderError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["ID", "Name", "Unit price", "Qty", "Line total"]);

    for line in &summary.lines {
        let item = line.item();
        let line_total = Money::from_minor(line_total_minor(line), item.price().currency());

        builder.push_record([
            item.id().to_string(),
            item.name().to_string(),
            format_amount(item.price()),
            line.quantity().to_string(),
            format_amount(&line_total),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..5), Alignment::right());

    let item_label = if summary.total_items == 1 {
        "item"
    } else {
        "items"
    };

    writeln!(out, "{table}").map_err(|_err| RenderError::IO)?;
    writeln!(
        out,
        " {} {item_label}, total {}",
        summary.total_items, summary.formatted_total
    )
    .map_err(|_err| RenderError::IO)
}

/// Write a one-line catalog status, for loading and error states.
///
/// # Errors
///
/// Returns [`RenderError::IO`] if writing fails.
pub fn write_catalog_status(out: &mut impl io::Write, catalog: &Catalog) -> Result<(), RenderError> {
    let status = match catalog.status() {
        CatalogStatus::Idle => "Catalog not loaded.".to_string(),
        CatalogStatus::Loading => "Loading products...".to_string(),
        CatalogStatus::Loaded => format!("{} products.", catalog.items().len()),
        CatalogStatus::Errored(message) => format!("Error: {message}"),
    };

    writeln!(out, "{status}").map_err(|_err| RenderError::IO)
}

/// Write the active theme and its main colors.
///
/// # Errors
///
/// Returns [`RenderError::IO`] if writing fails.
pub fn write_theme(out: &mut impl io::Write, theme: &ThemeStore) -> Result<(), RenderError> {
    let colors = theme.colors();

    writeln!(
        out,
        "Theme: {} (background {}, text {}, primary {})",
        theme.mode(),
        colors.background,
        colors.text,
        colors.primary
    )
    .map_err(|_err| RenderError::IO)
}
