#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
pub mod utils;

// Re-export commonly used types outside of crate (for main.rs and tests)
pub use crate::models::{FairValueResult, StrengthHistory, Zone};
pub use data::{
    CalendarProvider, HttpCalendarProvider, IntervalPacer, JsonFileStorage, KeyValueStorage,
    MemoryStorage, NoopPacer, Pacer, QuoteProvider, YahooQuoteProvider,
};
pub use domain::{CurrencyPair, Direction, EconomicEvent, ImpactWeight, Major};
pub use engine::{Clock, FixedClock, RefreshOutcome, StrengthEngine, SystemClock};

// CLI argument parsing
use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Endpoint serving parsed calendar rows as JSON (the external scraper)
    #[arg(long, default_value_t = config::DEFAULT_CALENDAR_URL.to_string())]
    pub calendar_url: String,

    /// Path of the JSON blob store
    #[arg(long, default_value_t = config::PERSISTENCE.store_path.to_string())]
    pub store_path: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run one strength reconciliation cycle (same-day correction or backfill)
    Refresh {
        /// Refresh even if the stored marker already points at today
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Print the persisted 3-day strength window per currency
    History,
    /// Compute fair value for a 6-letter pair code (e.g. EURUSD)
    FairValue { pair: String },
}
