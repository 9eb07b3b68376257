use crate::analysis::numeric::parse_magnitude;
use crate::config::constants::scoring::{MAGNITUDE_CAP, MAGNITUDE_OFFSET, SENSITIVITY};
use crate::domain::EconomicEvent;

/// Scores one economic release into (-1, 1).
///
/// Step 1 of the strength math:
/// `score = tanh(SENSITIVITY * weight * direction * (1 + magnitude))`
///
/// A neutral direction short-circuits to exactly 0 — rows without a
/// better/worse flag never move sentiment regardless of their figures.
pub fn score_event(weight: f64, direction: f64, actual: &str, forecast: &str) -> f64 {
    if direction == 0.0 {
        return 0.0;
    }

    // Magnitude of the surprise: |actual - forecast| / (|forecast| + offset).
    // Defaults to 0 when either figure is unparseable or forecast is zero,
    // so a malformed row degrades to direction-only instead of aborting.
    let mut magnitude = 0.0;
    if let (Some(actual), Some(forecast)) = (parse_magnitude(actual), parse_magnitude(forecast)) {
        if forecast != 0.0 {
            magnitude = (actual - forecast).abs() / (forecast.abs() + MAGNITUDE_OFFSET);
        }
    }
    magnitude = magnitude.min(MAGNITUDE_CAP);

    (SENSITIVITY * weight * direction * (1.0 + magnitude)).tanh()
}

/// Convenience wrapper over a scraped event row.
pub fn score(event: &EconomicEvent) -> f64 {
    score_event(
        event.impact.weight(),
        event.direction.sign(),
        &event.actual,
        &event.forecast,
    )
}
