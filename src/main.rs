use anyhow::Result;
use colored::Colorize;
use nse_expiry_service::api_server_axum;
use nse_expiry_service::expiry::{ExpiryCommands, ExpiryResolver};
use nse_expiry_service::logging;
use nse_expiry_service::AppConfig;

/// Run API server mode
async fn run_server(config: &AppConfig, resolver: ExpiryResolver) -> Result<()> {
    println!("{}", "=".repeat(60).blue());
    println!("{}", "Expiry API Server".green().bold());
    println!("{}", "=".repeat(60).blue());
    println!();

    api_server_axum::start_server(config, resolver).await
}

#[tokio::main]
async fn main() -> Result<()> {
    // ========================================
    // CONFIGURATION - from environment
    // ========================================
    let config = AppConfig::from_env();
    config.validate()?;

    logging::init_logging(logging::LOG_DIR)?;
    config.log_config();

    let resolver = ExpiryResolver::new(config.load_holidays()?);

    match config.mode.as_str() {
        "server" => run_server(&config, resolver).await?,
        "single" => ExpiryCommands::run_single(
            &resolver,
            &config.single_index,
            config.single_date.as_deref(),
        )?,
        "holidays" => ExpiryCommands::show_holidays(&resolver),
        other => {
            ExpiryCommands::print_usage(other);
            std::process::exit(1);
        }
    }

    Ok(())
}
