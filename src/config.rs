//! Command-line configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::theme::ThemeMode;

/// Log output format.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Storefront configuration
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront catalog, cart and theme", long_about = None)]
pub struct StorefrontConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Directory holding the cart and theme snapshots
    #[arg(long, env = "STOREFRONT_STORAGE_DIR", default_value = ".storefront")]
    pub storage_dir: PathBuf,

    /// YAML catalog fixture; the built-in sample catalog is used when absent
    #[arg(long, env = "STOREFRONT_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Simulated latency of the sample catalog, in milliseconds
    #[arg(long, env = "STOREFRONT_FETCH_LATENCY_MS", default_value_t = 500)]
    pub fetch_latency_ms: u64,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Storefront commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List catalog products
    Products {
        /// Only show products in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Only show products in stock
        #[arg(long)]
        in_stock: bool,
    },

    /// List catalog categories
    Categories,

    /// Show a single product
    Show {
        /// Product id
        id: String,
    },

    /// Add one unit of a product to the cart
    Add {
        /// Product id
        id: String,
    },

    /// Remove a product from the cart
    Remove {
        /// Product id
        id: String,
    },

    /// Set the quantity of a product in the cart; zero or less removes it
    Set {
        /// Product id
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Empty the cart
    Clear,

    /// Show the cart
    Cart,

    /// Show or change the theme
    Theme {
        /// What to do with the theme
        #[arg(value_enum, default_value_t = ThemeCommand::Show)]
        action: ThemeCommand,
    },
}

/// Theme sub-actions
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeCommand {
    /// Print the active theme
    Show,

    /// Flip between light and dark
    Toggle,

    /// Switch to light mode
    Light,

    /// Switch to dark mode
    Dark,
}

impl ThemeCommand {
    /// Mode this command selects, if it selects one.
    pub fn mode(self) -> Option<ThemeMode> {
        match self {
            Self::Light => Some(ThemeMode::Light),
            Self::Dark => Some(ThemeMode::Dark),
            Self::Show | Self::Toggle => None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_set_with_negative_quantity() -> TestResult {
        let config = StorefrontConfig::try_parse_from(["storefront", "set", "4", "-2"])?;

        assert!(matches!(
            config.command,
            Command::Set { ref id, quantity: -2 } if id == "4"
        ));

        Ok(())
    }

    #[test]
    fn theme_defaults_to_show() -> TestResult {
        let config = StorefrontConfig::try_parse_from(["storefront", "theme"])?;

        assert!(matches!(
            config.command,
            Command::Theme {
                action: ThemeCommand::Show
            }
        ));

        Ok(())
    }

    #[test]
    fn theme_command_modes() {
        assert_eq!(ThemeCommand::Dark.mode(), Some(ThemeMode::Dark));
        assert_eq!(ThemeCommand::Toggle.mode(), None);
    }

    #[test]
    fn products_filters_parse() -> TestResult {
        let config = StorefrontConfig::try_parse_from([
            "storefront",
            "--storage-dir",
            "/tmp/store",
            "products",
            "--category",
            "Home",
            "--in-stock",
        ])?;

        assert_eq!(config.storage_dir, PathBuf::from("/tmp/store"));
        assert!(matches!(
            config.command,
            Command::Products { category: Some(ref c), in_stock: true } if c == "Home"
        ));

        Ok(())
    }
}
