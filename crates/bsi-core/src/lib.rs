pub mod app_config;
pub mod config;
pub mod contact;
pub mod detail;
pub mod error;
pub mod filter;
pub mod price;
pub mod products;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use contact::{contact_link, contact_message, encode_uri_component};
pub use detail::{choose_color, find_product, related_products, QuantityStepper};
pub use error::{ConfigError, CoreError};
pub use filter::{categories, filter_products, CatalogQuery, CategoryFilter};
pub use price::format_price;
pub use products::{Product, ProductId, SpecEntry, StockTier, DEFAULT_LOW_STOCK_THRESHOLD};
