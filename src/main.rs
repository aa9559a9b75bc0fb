//! Storefront command-line front end

use std::{
    io::{self, Write},
    process::ExitCode,
    sync::Arc,
    time::Duration,
};

use thiserror::Error;
use tracing::{debug, error};

use storefront::{
    catalog::{FixtureCatalog, ProductSource, SampleCatalog},
    config::{Command, StorefrontConfig, ThemeCommand},
    items::ItemId,
    observability::{ObservabilityError, init_subscriber},
    persistence::FileStorage,
    render::{self, RenderError},
    store::{Action, Storefront},
};

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Observability(#[from] ObservabilityError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("catalog unavailable: {0}")]
    Catalog(String),

    #[error("unknown product: {0}")]
    UnknownProduct(ItemId),
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = StorefrontConfig::load().unwrap_or_else(|e| e.exit());

    if let Err(e) = init_subscriber(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("{e}");
        }

        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");

            #[expect(
                clippy::print_stderr,
                reason = "user-facing error message for the failed command"
            )]
            {
                eprintln!("error: {e}");
            }

            ExitCode::FAILURE
        }
    }
}

async fn run(config: StorefrontConfig) -> Result<(), AppError> {
    let storage = Arc::new(FileStorage::new(&config.storage_dir));
    let mut store = Storefront::open(storage);
    let mut out = io::stdout().lock();

    debug!(storage = %config.storage_dir.display(), "store opened");

    if needs_catalog(&config.command) {
        let source: Box<dyn ProductSource> = match &config.catalog {
            Some(path) => Box::new(FixtureCatalog::new(path)),
            None => Box::new(SampleCatalog::new(Duration::from_millis(
                config.fetch_latency_ms,
            ))),
        };

        store.load_catalog(source.as_ref()).await;

        if let Some(message) = store.catalog().error() {
            render::write_catalog_status(&mut out, store.catalog())?;

            return Err(AppError::Catalog(message.to_string()));
        }
    }

    match config.command {
        Command::Products { category, in_stock } => {
            let items = match category {
                Some(category) => store.by_category(&category),
                None => Arc::new(store.catalog().items().to_vec()),
            };

            let items = items
                .iter()
                .filter(|item| !in_stock || item.in_stock())
                .map(Arc::as_ref);

            render::write_products(&mut out, items, |item| store.quantity_of(item.id()))?;
        }
        Command::Categories => {
            let categories = store.categories();

            for category in categories.as_slice() {
                writeln!(out, "{category}").map_err(|_err| RenderError::IO)?;
            }
        }
        Command::Show { id } => {
            let id = ItemId::from(id);
            let item = store
                .item(&id)
                .ok_or_else(|| AppError::UnknownProduct(id.clone()))?;

            render::write_product(&mut out, item, store.quantity_of(&id))?;
        }
        Command::Add { id } => {
            let id = ItemId::from(id);

            if store.item(&id).is_none() {
                return Err(AppError::UnknownProduct(id));
            }

            store.dispatch(Action::AddItem(id));
            render::write_cart(&mut out, &store.cart_summary())?;
        }
        Command::Remove { id } => {
            store.dispatch(Action::RemoveItem(ItemId::from(id)));
            render::write_cart(&mut out, &store.cart_summary())?;
        }
        Command::Set { id, quantity } => {
            store.dispatch(Action::SetQuantity(ItemId::from(id), quantity));
            render::write_cart(&mut out, &store.cart_summary())?;
        }
        Command::Clear => {
            store.dispatch(Action::ClearCart);
            render::write_cart(&mut out, &store.cart_summary())?;
        }
        Command::Cart => {
            render::write_cart(&mut out, &store.cart_summary())?;
        }
        Command::Theme { action } => {
            if let Some(mode) = action.mode() {
                store.dispatch(Action::SetTheme(mode));
            } else if action == ThemeCommand::Toggle {
                store.dispatch(Action::ToggleTheme);
            }

            render::write_theme(&mut out, store.theme())?;
        }
    }

    Ok(())
}

fn needs_catalog(command: &Command) -> bool {
    matches!(
        command,
        Command::Products { .. } | Command::Categories | Command::Show { .. } | Command::Add { .. }
    )
}
