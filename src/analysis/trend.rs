use std::collections::BTreeMap;

use crate::analysis::event_score;
use crate::config::constants::scoring::TREND_SPEED;
use crate::domain::EconomicEvent;

/// Step 2 of the strength math: first-order exponential smoothing.
///
/// `new = previous + speed * (event - previous)` — the score gets pulled
/// toward the latest event like a rubber band, never snapped to it.
pub fn accumulate(previous: f64, event_score: f64, speed: f64) -> f64 {
    previous + speed * (event_score - previous)
}

/// Folds one day's event batch into a per-currency base score map.
///
/// Events are applied sequentially in scrape order: each event's output is
/// the next event's base. Order matters; never average. Currencies that are
/// not in the map yet start from a zero baseline.
pub fn fold_event_batch(
    base_scores: &BTreeMap<String, f64>,
    events: &[EconomicEvent],
) -> BTreeMap<String, f64> {
    let mut scores = base_scores.clone();

    for event in events {
        let entry = scores.entry(event.currency.clone()).or_insert(0.0);
        let event_score = event_score::score(event);
        *entry = accumulate(*entry, event_score, TREND_SPEED);
        log::debug!(
            "fold_event_batch(): {} event scored {:.4}, trend now {:.4}",
            event.currency,
            event_score,
            entry
        );
    }

    scores
}
