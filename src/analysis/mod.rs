// Scoring math: numeric normalization, per-event scoring, trend smoothing,
// and the fair value estimate derived from two currencies' trend states.
pub mod event_score;
pub mod fair_value;
pub mod numeric;
pub mod trend;

pub use {
    event_score::score_event,
    numeric::parse_magnitude,
    trend::{accumulate, fold_event_batch},
};
