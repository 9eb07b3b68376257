use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::domain::Major;

/// Number of daily snapshots kept per currency: [day(t-2), day(t-1), day(t)].
pub const WINDOW_LEN: usize = 3;

/// Fixed-length FIFO of daily strength snapshots, oldest first.
///
/// Serializes as a bare JSON array so the persisted shape stays exactly
/// `{"USD": [0.0, 0.0, 0.0], ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreWindow(Vec<f64>);

impl ScoreWindow {
    pub fn zeroed() -> Self {
        Self(vec![0.0; WINDOW_LEN])
    }

    /// Today's snapshot (last element).
    pub fn latest(&self) -> f64 {
        self.0.last().copied().unwrap_or(0.0)
    }

    /// The snapshot before today's (index len-2). Same-day corrections
    /// rebase from here so a re-run never double-applies the day's deltas.
    pub fn previous(&self) -> f64 {
        if self.0.len() >= 2 {
            self.0[self.0.len() - 2]
        } else {
            0.0
        }
    }

    /// New-day append: push and drop the oldest.
    pub fn push(&mut self, score: f64) {
        self.0.push(score);
        while self.0.len() > WINDOW_LEN {
            self.0.remove(0);
        }
    }

    /// Same-day correction: overwrite today's snapshot in place.
    pub fn overwrite_latest(&mut self, score: f64) {
        if let Some(last) = self.0.last_mut() {
            *last = score;
        } else {
            self.0.push(score);
        }
    }

    pub fn points(&self) -> &[f64] {
        &self.0
    }

    /// Repairs windows loaded from storage that predate the fixed length
    /// (pads old short windows with leading zeros, trims long ones).
    fn normalize(&mut self) {
        while self.0.len() < WINDOW_LEN {
            self.0.insert(0, 0.0);
        }
        while self.0.len() > WINDOW_LEN {
            self.0.remove(0);
        }
    }
}

/// Per-currency rolling strength windows, keyed by 3-letter code.
///
/// Keys are plain strings: the set is seeded with the nine majors but an
/// unknown currency arriving in scraped data gets a zero window on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrengthHistory(BTreeMap<String, ScoreWindow>);

impl StrengthHistory {
    /// All nine majors at the zero baseline.
    pub fn seeded() -> Self {
        Self(
            Major::iter()
                .map(|c| (c.to_string(), ScoreWindow::zeroed()))
                .collect(),
        )
    }

    pub fn window(&self, currency: &str) -> Option<&ScoreWindow> {
        self.0.get(currency)
    }

    pub fn window_mut(&mut self, currency: &str) -> &mut ScoreWindow {
        self.0
            .entry(currency.to_string())
            .or_insert_with(ScoreWindow::zeroed)
    }

    /// Latest snapshot for a currency; zero if it was never scored.
    pub fn latest_score(&self, currency: &str) -> f64 {
        self.window(currency).map(|w| w.latest()).unwrap_or(0.0)
    }

    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScoreWindow)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Re-establishes the fixed window length after deserialization.
    pub fn normalize(&mut self) {
        for window in self.0.values_mut() {
            window.normalize();
        }
    }
}
