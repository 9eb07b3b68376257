use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::{Direction, EconomicEvent, ImpactWeight};

/// Abstract interface for fetching one day's economic releases.
///
/// The scrape + HTML extraction lives outside this crate; implementations
/// only see already-parsed rows. An empty day is a normal result, not an
/// error.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    async fn fetch_events(&self, day: NaiveDate) -> Result<Vec<EconomicEvent>>;
}

/// Wire shape of one row as the external scraper emits it: numeric impact
/// weight and a {-1, 0, 1} direction flag, figures as raw strings.
#[derive(Debug, Deserialize)]
struct RawEventRow {
    currency: String,
    weight: f64,
    direction: i8,
    #[serde(default)]
    actual: String,
    #[serde(default)]
    forecast: String,
}

impl From<RawEventRow> for EconomicEvent {
    fn from(row: RawEventRow) -> Self {
        EconomicEvent {
            currency: row.currency.trim().to_ascii_uppercase(),
            impact: ImpactWeight::from_raw(row.weight),
            direction: Direction::from_sign(row.direction),
            actual: row.actual,
            forecast: row.forecast,
        }
    }
}

/// Fetches scraper output over HTTP as a JSON array of rows.
pub struct HttpCalendarProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCalendarProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CalendarProvider for HttpCalendarProvider {
    async fn fetch_events(&self, day: NaiveDate) -> Result<Vec<EconomicEvent>> {
        let url = format!("{}?day={}", self.base_url, day.format("%Y-%m-%d"));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("calendar fetch failed for {day}"))?;

        if !response.status().is_success() {
            bail!("calendar endpoint returned {} for {day}", response.status());
        }

        let rows: Vec<RawEventRow> = response
            .json()
            .await
            .with_context(|| format!("malformed calendar payload for {day}"))?;

        // Rows without a currency cell are scraper noise, drop them here.
        let events: Vec<EconomicEvent> = rows
            .into_iter()
            .filter(|row| !row.currency.trim().is_empty())
            .map(EconomicEvent::from)
            .collect();

        log::info!("fetch_events(): {} rows for {day}", events.len());
        Ok(events)
    }
}
