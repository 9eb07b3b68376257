use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result, anyhow};
use chrono::{Days, NaiveDate};
use serde_json::Value;

use crate::analysis::{fair_value, fold_event_batch};
use crate::config::PERSISTENCE;
use crate::config::constants::{fair_value::atr_for_pair, refresh::BACKFILL_CAP_DAYS};
use crate::data::{CalendarProvider, KeyValueStorage, Pacer, QuoteProvider};
use crate::domain::{CurrencyPair, EconomicEvent, Major};
use crate::engine::{Clock, FairValueError, RefreshError};
use crate::models::{FairValueResult, StrengthHistory};
use crate::utils::{format_day, parse_day};

/// What a refresh invocation ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Another refresh was in flight; this request was dropped, not queued.
    Skipped,
    /// Nothing to reconcile (marker current, or the correction batch was empty).
    UpToDate,
    /// Same-day correction: the latest snapshots were recomputed in place.
    Corrected,
    /// New days were rolled into the windows.
    Backfilled { days: usize },
}

/// Owns the persisted strength state and its sole mutator, the refresh
/// reconciliation. Everything external is injected: storage, the calendar
/// scraper, the price feed, the clock and the backfill pacer.
pub struct StrengthEngine {
    storage: Arc<dyn KeyValueStorage>,
    calendar: Arc<dyn CalendarProvider>,
    quotes: Arc<dyn QuoteProvider>,
    clock: Arc<dyn Clock>,
    pacer: Arc<dyn Pacer>,
    /// Refresh in-flight guard. Concurrent requests are dropped.
    in_flight: AtomicBool,
}

impl StrengthEngine {
    pub fn new(
        storage: Arc<dyn KeyValueStorage>,
        calendar: Arc<dyn CalendarProvider>,
        quotes: Arc<dyn QuoteProvider>,
        clock: Arc<dyn Clock>,
        pacer: Arc<dyn Pacer>,
    ) -> Self {
        Self {
            storage,
            calendar,
            quotes,
            clock,
            pacer,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Read-only snapshot of the persisted windows, seeded with the nine
    /// majors at zero when storage is empty.
    pub async fn strength_history(&self) -> Result<StrengthHistory> {
        self.load_history().await
    }

    /// Triggers one reconciliation cycle. Safe to call repeatedly: a
    /// same-day re-run corrects in place rather than appending twice.
    pub async fn refresh(&self) -> Result<RefreshOutcome, RefreshError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            log::info!("refresh(): already in flight, dropping request");
            return Ok(RefreshOutcome::Skipped);
        }

        let result = self.reconcile().await;
        self.in_flight.store(false, Ordering::SeqCst);

        match &result {
            Ok(outcome) => log::info!("refresh(): complete, {outcome:?}"),
            Err(err) => log::warn!("refresh(): aborted, {err}"),
        }
        result
    }

    /// Refreshes only when the stored marker is behind the most recent
    /// completed day. This is the scheduled entry point (e.g. once per
    /// launch).
    pub async fn refresh_if_stale(&self) -> Result<RefreshOutcome, RefreshError> {
        let target = self.clock.today().pred_opt();
        let marker = self.load_marker().await.map_err(RefreshError::Storage)?;
        if marker.is_some() && marker == target {
            return Ok(RefreshOutcome::UpToDate);
        }
        self.refresh().await
    }

    /// Fair value estimate for a 6-letter pair code, from the two legs'
    /// latest strength scores and a fresh quote.
    pub async fn fair_value(&self, pair_code: &str) -> Result<FairValueResult, FairValueError> {
        let pair = CurrencyPair::parse(pair_code)?;

        let history = self.load_history().await.map_err(FairValueError::Storage)?;
        // Legs the history has never scored (XAU, BTC, ...) read as zero.
        let base_score = history.latest_score(&pair.base);
        let quote_score = history.latest_score(&pair.quote);

        let quote = self
            .quotes
            .fetch_quote(&pair)
            .await
            .map_err(FairValueError::QuoteFetch)?;
        let current_price = quote.current_price;
        let anchor_price = quote.anchor_price();

        if !current_price.is_finite()
            || !anchor_price.is_finite()
            || current_price == 0.0
            || anchor_price == 0.0
        {
            return Err(FairValueError::MissingPriceData(pair.code()));
        }

        let atr = atr_for_pair(&pair.code());
        Ok(fair_value::compute(
            &pair,
            base_score,
            quote_score,
            anchor_price,
            current_price,
            atr,
        ))
    }

    // --- reconciliation state machine ---

    async fn reconcile(&self) -> Result<RefreshOutcome, RefreshError> {
        let today = self.clock.today();
        // The most recent fully-completed day whose calendar is expected
        // to be published.
        let target = today
            .pred_opt()
            .ok_or_else(|| RefreshError::Storage(anyhow!("calendar day underflow")))?;

        // The marker is the last day the history was computed FOR, so the
        // gap is measured target-to-marker: a re-run on the same calendar
        // day sees gap 0 and corrects, the next morning sees gap 1 and
        // appends.
        let marker = self.load_marker().await.map_err(RefreshError::Storage)?;

        let gap_days = match marker {
            Some(m) => target.signed_duration_since(m).num_days(),
            None => 1, // first ever run: process target as a single new day
        };

        log::info!(
            "reconcile(): today={today} target={target} marker={marker:?} gap={gap_days}"
        );

        if gap_days <= 0 {
            self.correct_same_day(target).await
        } else {
            self.backfill(marker, target).await
        }
    }

    /// Target's snapshot already exists; re-scrape and overwrite it.
    ///
    /// The base score is the window's SECOND-TO-LAST element: the last one
    /// already reflects a prior run for this same day, and re-basing from it
    /// would apply the day's deltas twice. Overwrite, never append.
    async fn correct_same_day(&self, target: NaiveDate) -> Result<RefreshOutcome, RefreshError> {
        let events = self.fetch_day(target).await?;
        if events.is_empty() {
            log::info!("correct_same_day(): no events for {target}, leaving state untouched");
            return Ok(RefreshOutcome::UpToDate);
        }

        let mut history = self.load_history().await.map_err(RefreshError::Storage)?;

        let base_scores: BTreeMap<String, f64> = history
            .iter()
            .map(|(currency, window)| (currency.to_string(), window.previous()))
            .collect();

        for (currency, score) in fold_event_batch(&base_scores, &events) {
            history.window_mut(&currency).overwrite_latest(score);
        }

        self.persist(&history, target)
            .await
            .map_err(RefreshError::Storage)?;
        Ok(RefreshOutcome::Corrected)
    }

    /// Rolls the windows forward one day at a time, oldest first, strictly
    /// sequentially: each day's base is the previous day's committed result.
    /// Gaps beyond the cap only replay the most recent days.
    async fn backfill(
        &self,
        marker: Option<NaiveDate>,
        target: NaiveDate,
    ) -> Result<RefreshOutcome, RefreshError> {
        let first = match marker {
            Some(m) => m + Days::new(1),
            None => target,
        };

        let mut days = Vec::new();
        let mut day = first;
        while day <= target {
            days.push(day);
            day = day + Days::new(1);
        }
        if days.len() > BACKFILL_CAP_DAYS {
            let skipped = days.len() - BACKFILL_CAP_DAYS;
            log::warn!("backfill(): gap of {} days, skipping the oldest {skipped}", days.len());
            days.drain(..skipped);
        }
        if days.is_empty() {
            return Ok(RefreshOutcome::UpToDate);
        }

        let total = days.len();
        for (i, day) in days.into_iter().enumerate() {
            // Abort on the first failed day. Days already committed below
            // stay committed, so a retry resumes from where this stopped.
            let events = self.fetch_day(day).await?;

            // Re-read state at every step rather than trusting a cache;
            // storage may have been mutated between invocations or days.
            let mut history = self.load_history().await.map_err(RefreshError::Storage)?;

            let base_scores: BTreeMap<String, f64> = history
                .iter()
                .map(|(currency, window)| (currency.to_string(), window.latest()))
                .collect();

            // Every tracked currency rolls forward a snapshot, moved by its
            // events or carried unchanged.
            for (currency, score) in fold_event_batch(&base_scores, &events) {
                history.window_mut(&currency).push(score);
            }

            // The marker tracks the day just committed, so an aborted run
            // resumes at the failed day and a finished run leaves the
            // marker on target.
            self.persist(&history, day)
                .await
                .map_err(RefreshError::Storage)?;
            log::info!("backfill(): committed {day} ({}/{total})", i + 1);

            if i + 1 != total {
                self.pacer.pause().await;
            }
        }

        Ok(RefreshOutcome::Backfilled { days: total })
    }

    async fn fetch_day(&self, day: NaiveDate) -> Result<Vec<EconomicEvent>, RefreshError> {
        self.calendar
            .fetch_events(day)
            .await
            .map_err(|cause| RefreshError::FetchFailure { day, cause })
    }

    // --- persisted state ---

    async fn load_history(&self) -> Result<StrengthHistory> {
        let mut history = match self.storage.get(PERSISTENCE.history_key).await? {
            Some(value) => serde_json::from_value::<StrengthHistory>(value)
                .context("strength history blob is malformed")?,
            None => StrengthHistory::seeded(),
        };
        history.normalize();
        // Majors missing from an older blob come back at the zero baseline.
        use strum::IntoEnumIterator;
        for major in Major::iter() {
            history.window_mut(major.as_ref());
        }
        Ok(history)
    }

    async fn load_marker(&self) -> Result<Option<NaiveDate>> {
        let marker = match self.storage.get(PERSISTENCE.marker_key).await? {
            Some(Value::String(raw)) => parse_day(&raw),
            // Anything but a date string is treated as "never fetched".
            _ => None,
        };
        Ok(marker)
    }

    async fn persist(&self, history: &StrengthHistory, marker: NaiveDate) -> Result<()> {
        self.storage
            .set(PERSISTENCE.history_key, serde_json::to_value(history)?)
            .await?;
        self.storage
            .set(PERSISTENCE.marker_key, Value::String(format_day(marker)))
            .await?;
        Ok(())
    }
}
