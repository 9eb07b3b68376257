use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use fx_pulse::data::PairQuote;
use fx_pulse::{
    CalendarProvider, Direction, EconomicEvent, FixedClock, ImpactWeight, KeyValueStorage,
    MemoryStorage, NoopPacer, QuoteProvider, StrengthEngine,
};

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn event(
    currency: &str,
    impact: ImpactWeight,
    direction: Direction,
    actual: &str,
    forecast: &str,
) -> EconomicEvent {
    EconomicEvent {
        currency: currency.into(),
        impact,
        direction,
        actual: actual.into(),
        forecast: forecast.into(),
    }
}

pub fn eur_beat() -> EconomicEvent {
    event("EUR", ImpactWeight::High, Direction::Better, "2.5%", "2.0%")
}

/// Calendar fake: per-day scripted batches, per-day failure injection, an
/// optional artificial latency, and a call log.
#[derive(Default)]
pub struct ScriptedCalendar {
    batches: Mutex<BTreeMap<NaiveDate, Vec<EconomicEvent>>>,
    failing: Mutex<BTreeSet<NaiveDate>>,
    calls: Mutex<Vec<NaiveDate>>,
    pub latency: Option<Duration>,
}

impl ScriptedCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    pub async fn script(&self, day: NaiveDate, events: Vec<EconomicEvent>) {
        self.batches.lock().await.insert(day, events);
    }

    pub async fn fail_on(&self, day: NaiveDate) {
        self.failing.lock().await.insert(day);
    }

    pub async fn clear_failure(&self, day: NaiveDate) {
        self.failing.lock().await.remove(&day);
    }

    pub async fn calls(&self) -> Vec<NaiveDate> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl CalendarProvider for ScriptedCalendar {
    async fn fetch_events(&self, day: NaiveDate) -> Result<Vec<EconomicEvent>> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.failing.lock().await.contains(&day) {
            bail!("scripted outage for {day}");
        }
        self.calls.lock().await.push(day);
        Ok(self.batches.lock().await.get(&day).cloned().unwrap_or_default())
    }
}

/// Quote fake returning one fixed quote for every pair.
pub struct FixedQuotes {
    pub quote: PairQuote,
}

impl FixedQuotes {
    pub fn new(current_price: f64, previous_close: Option<f64>) -> Self {
        Self {
            quote: PairQuote {
                current_price,
                previous_close,
            },
        }
    }
}

#[async_trait]
impl QuoteProvider for FixedQuotes {
    async fn fetch_quote(&self, _pair: &fx_pulse::CurrencyPair) -> Result<PairQuote> {
        Ok(self.quote)
    }
}

pub struct TestRig {
    pub storage: Arc<MemoryStorage>,
    pub calendar: Arc<ScriptedCalendar>,
    pub clock: Arc<FixedClock>,
    pub engine: StrengthEngine,
}

impl TestRig {
    /// Raw persisted marker string, straight from storage.
    pub async fn storage_marker(&self) -> Option<String> {
        match self.storage.get("forex_last_fetch_date").await.unwrap() {
            Some(serde_json::Value::String(raw)) => Some(raw),
            _ => None,
        }
    }
}

/// Wires an engine from fakes: in-memory storage, scripted calendar, fixed
/// clock, no pacing. The quote fake serves 1.0850 over a 1.0800 close.
pub fn rig(today: NaiveDate) -> TestRig {
    rig_with_quotes(today, FixedQuotes::new(1.0850, Some(1.0800)))
}

pub fn rig_with_quotes(today: NaiveDate, quotes: FixedQuotes) -> TestRig {
    let storage = Arc::new(MemoryStorage::new());
    let calendar = Arc::new(ScriptedCalendar::new());
    let clock = Arc::new(FixedClock::new(today));

    let engine = StrengthEngine::new(
        storage.clone(),
        calendar.clone(),
        Arc::new(quotes),
        clock.clone(),
        Arc::new(NoopPacer),
    );

    TestRig {
        storage,
        calendar,
        clock,
        engine,
    }
}

/// Seeds the persisted history blob directly, bypassing the engine.
pub async fn seed_history(storage: &MemoryStorage, entries: &[(&str, [f64; 3])]) {
    let blob: BTreeMap<String, Vec<f64>> = entries
        .iter()
        .map(|(currency, window)| (currency.to_string(), window.to_vec()))
        .collect();
    storage
        .set(
            "forex_strength_history",
            serde_json::to_value(&blob).unwrap(),
        )
        .await
        .unwrap();
}

pub async fn seed_marker(storage: &MemoryStorage, day: NaiveDate) {
    storage
        .set(
            "forex_last_fetch_date",
            serde_json::Value::String(day.format("%Y-%m-%d").to_string()),
        )
        .await
        .unwrap();
}
