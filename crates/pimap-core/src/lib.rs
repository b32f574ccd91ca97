//! Shared domain types and application configuration for the seller
//! discovery map.

pub mod app_config;
pub mod config;
mod error;
mod session;
mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use session::SessionUser;
pub use types::{
    FindMePreference, FulfillmentMethod, MapCenter, MapCenterKind, Seller, SellerDetail,
    SellerType,
};
