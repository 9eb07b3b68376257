use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::CurrencyPair;

/// Spot quote for a pair. `previous_close` is the preferred fair value
/// anchor; callers fall back to the current price when it is missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairQuote {
    pub current_price: f64,
    pub previous_close: Option<f64>,
}

impl PairQuote {
    /// Anchor resolution chain: previous close, else current price. A
    /// close that is non-finite or non-positive is feed garbage, not a
    /// price, and falls through. The current price may still be garbage;
    /// the engine rejects that case.
    pub fn anchor_price(&self) -> f64 {
        self.previous_close
            .filter(|p| p.is_finite() && *p > 0.0)
            .unwrap_or(self.current_price)
    }
}

/// Abstract interface for the external price feed.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_quote(&self, pair: &CurrencyPair) -> Result<PairQuote>;
}

// Yahoo chart API response, pared down to the meta fields we read.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: Option<f64>,
    previous_close: Option<f64>,
    chart_previous_close: Option<f64>,
}

/// Quote provider backed by the Yahoo Finance chart endpoint
/// (`EURUSD` is quoted as symbol `EURUSD=X`).
pub struct YahooQuoteProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooQuoteProvider {
    const DEFAULT_BASE_URL: &'static str = "https://query1.finance.yahoo.com/v8/finance/chart";

    pub fn new() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for YahooQuoteProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteProvider for YahooQuoteProvider {
    async fn fetch_quote(&self, pair: &CurrencyPair) -> Result<PairQuote> {
        let url = format!(
            "{}/{}=X?interval=1d&range=2d",
            self.base_url,
            pair.code()
        );

        let response: ChartResponse = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("price fetch failed for {pair}"))?
            .json()
            .await
            .with_context(|| format!("malformed price payload for {pair}"))?;

        let meta = response
            .chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .map(|r| r.meta)
            .ok_or_else(|| anyhow!("pair {pair} not found in price feed"))?;

        let current_price = meta
            .regular_market_price
            .ok_or_else(|| anyhow!("no market price for {pair}"))?;

        Ok(PairQuote {
            current_price,
            // A zeroed previousClose defers to the chart-level close.
            previous_close: meta
                .previous_close
                .filter(|p| p.is_finite() && *p > 0.0)
                .or(meta.chart_previous_close),
        })
    }
}
