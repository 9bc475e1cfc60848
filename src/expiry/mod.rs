pub mod config;
pub mod error;
pub mod expiry_api_server;
pub mod expiry_commands;
pub mod holidays;
pub mod models;
pub mod resolver;

// Re-exports (public API)
pub use error::ExpiryError;
pub use expiry_api_server::{get_expiry_routes, ExpiryAppState};
pub use expiry_commands::ExpiryCommands;
pub use holidays::{HolidaySet, NSE_HOLIDAYS_2024};
pub use models::{ExpiryKind, ExpiryParams, ExpiryQuery, ExpiryResolution, ExpiryResult, ExpiryType};
pub use resolver::{last_thursday, parse_reference_date, ExpiryResolver};
