use super::config;
use super::models::{ExpiryKind, ExpiryQuery, ExpiryResult};
use super::resolver::ExpiryResolver;

use anyhow::Result;
use chrono::Local;
use colored::Colorize;

/// Expiry Command Handler - terminal front-end for the resolver
pub struct ExpiryCommands;

impl ExpiryCommands {
    /// Print monthly and weekly expiry for one reference date (today when not given)
    pub fn run_single(resolver: &ExpiryResolver, index: &str, date: Option<&str>) -> Result<()> {
        println!("{}", "=".repeat(60).blue());
        println!("{}", "Expiry Date Calculator".green().bold());
        println!("{}", "=".repeat(60).blue());
        println!();

        let date = date
            .map(str::to_string)
            .unwrap_or_else(|| Local::now().date_naive().format(config::DATE_FORMAT).to_string());

        let query = ExpiryQuery::new(index, &date, ExpiryKind::Both)?;
        let resolution = resolver.resolve(&query)?;

        println!("{} Index: {}", "→".cyan(), resolution.index.yellow());
        println!("{} For date: {}", "→".cyan(), resolution.for_date.yellow());
        println!();

        if let Some(monthly) = &resolution.monthly_expiry {
            Self::display_result("Monthly", monthly);
        }
        if let Some(weekly) = &resolution.weekly_expiry {
            Self::display_result("Weekly", weekly);
        }

        println!("{}", "=".repeat(60).blue());
        Ok(())
    }

    /// Print the configured holiday table
    pub fn show_holidays(resolver: &ExpiryResolver) {
        println!("{}", "=".repeat(60).blue());
        println!("{}", "Market Holidays".green().bold());
        println!("{}", "=".repeat(60).blue());

        for (date, label) in resolver.holidays().iter() {
            println!("  {} {}", date.format(config::DATE_FORMAT).to_string().yellow(), label);
        }

        println!();
        println!("{} {} holidays configured", "ℹ".blue(), resolver.holidays().len());
        println!("{}", "=".repeat(60).blue());
    }

    fn display_result(label: &str, result: &ExpiryResult) {
        println!(
            "{} {} expiry: {} ({} days)",
            "✓".green(),
            label,
            result.expiry_date.format(config::DATE_FORMAT).to_string().yellow(),
            result.days_to_expiry
        );
    }

    pub fn print_usage(mode: &str) {
        eprintln!("Invalid mode '{}'. Use 'server', 'single' or 'holidays'", mode);
        eprintln!("Set EXPIRY_MODE environment variable to control execution mode");
        eprintln!("Examples:");
        eprintln!("  EXPIRY_MODE=server EXPIRY_PORT=5000 cargo run");
        eprintln!("  EXPIRY_MODE=single EXPIRY_INDEX=NIFTY EXPIRY_DATE=2024-01-15 cargo run");
        eprintln!("  EXPIRY_MODE=holidays EXPIRY_HOLIDAYS_FILE=holidays.json cargo run");
    }
}
