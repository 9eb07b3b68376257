use chrono::NaiveDate;
use thiserror::Error;

/// Failures surfaced by a refresh cycle.
///
/// A dropped concurrent refresh is NOT an error; it comes back as
/// `RefreshOutcome::Skipped`.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// Calendar fetch for one day failed. Days committed before this one
    /// stay committed; the marker stops at the last success.
    #[error("calendar fetch failed for {day}: {cause:#}")]
    FetchFailure { day: NaiveDate, cause: anyhow::Error },

    #[error("storage error: {0:#}")]
    Storage(anyhow::Error),
}

/// Failures surfaced by a fair value query.
#[derive(Debug, Error)]
pub enum FairValueError {
    #[error("'{0}' is not a 6-letter pair code (e.g. EURUSD)")]
    InvalidPairFormat(String),

    #[error("no usable price data for {0}")]
    MissingPriceData(String),

    #[error("quote fetch failed: {0:#}")]
    QuoteFetch(anyhow::Error),

    #[error("storage error: {0:#}")]
    Storage(anyhow::Error),
}
