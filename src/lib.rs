pub mod api_server_axum;
pub mod app_config;
pub mod expiry;
pub mod logging;
pub mod market;
pub mod utility;

// Re-exports for convenience
pub use app_config::AppConfig;
pub use expiry::{ExpiryError, ExpiryResolver, ExpiryResult, HolidaySet};
