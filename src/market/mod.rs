pub mod config;
pub mod error;
pub mod instruments;
pub mod market_api_server;
pub mod market_client;
pub mod models;
pub mod options_store;
pub mod price_history;
pub mod sma;

// Re-export commonly used items
pub use error::MarketDataError;
pub use market_api_server::{get_market_routes, MarketAppState};
pub use market_client::MarketClient;
pub use models::{InstrumentsResponse, PriceBar, PriceRow};
pub use options_store::OptionsStore;
pub use sma::{calculate_sma, process_sma, SmaError};
