use statrs::distribution::{Continuous, Normal};

use crate::config::constants::fair_value::{CURVE_SPAN_SIGMA, CURVE_STEPS, VOLATILITY_FACTOR};
use crate::domain::CurrencyPair;
use crate::models::{CurvePoint, FairValueResult, Zone};

/// Net pair sentiment from the two legs' latest strength scores.
/// Both inputs live in (-1, 1), so the halved spread does too.
pub fn pair_net_score(base_score: f64, quote_score: f64) -> f64 {
    (base_score - quote_score) / 2.0
}

/// Maps the net score onto the price anchor. A net score of +/-1.0 moves
/// fair value a full volatility-factor (1%) off the anchor.
pub fn fair_value_price(anchor_price: f64, net_score: f64) -> f64 {
    anchor_price * (1.0 + net_score * VOLATILITY_FACTOR)
}

/// Classifies a price against the ATR deviation bands.
///
/// Strict inequalities throughout: a price sitting exactly on a band edge
/// falls into the LESS extreme bucket. Check order mirrors the band widths,
/// widest first.
pub fn classify_zone(price: f64, fair_value: f64, atr: f64) -> Zone {
    if price > fair_value + 2.0 * atr {
        Zone::ExtremeOverbought
    } else if price < fair_value - 2.0 * atr {
        Zone::ExtremeOversold
    } else if price > fair_value + atr {
        Zone::Overvalued
    } else if price < fair_value - atr {
        Zone::Undervalued
    } else {
        Zone::FairValue
    }
}

/// Samples the bell curve around fair value for charting: CURVE_STEPS equal
/// steps (so CURVE_STEPS + 1 points) across +/-CURVE_SPAN_SIGMA sigma, with
/// sigma = ATR. Returns an empty curve if sigma is degenerate.
pub fn density_curve(fair_value: f64, atr: f64) -> Vec<CurvePoint> {
    let normal = match Normal::new(fair_value, atr) {
        Ok(n) => n,
        Err(_) => {
            log::warn!("density_curve(): degenerate sigma {atr}, skipping curve");
            return Vec::new();
        }
    };

    let span = CURVE_SPAN_SIGMA * atr;
    let start = fair_value - span;
    let step = (2.0 * span) / CURVE_STEPS as f64;

    (0..=CURVE_STEPS)
        .map(|i| {
            let price = start + step * i as f64;
            CurvePoint {
                price,
                density: normal.pdf(price),
            }
        })
        .collect()
}

/// Full fair value computation for a pair, given the two legs' latest
/// strength scores and externally fetched prices. Pure; all I/O and
/// validation of the inputs happens in the engine.
pub fn compute(
    pair: &CurrencyPair,
    base_score: f64,
    quote_score: f64,
    anchor_price: f64,
    current_price: f64,
    atr: f64,
) -> FairValueResult {
    let net_score = pair_net_score(base_score, quote_score);
    let fair_value = fair_value_price(anchor_price, net_score);

    FairValueResult {
        pair: pair.code(),
        current_price,
        anchor_price,
        base_score,
        quote_score,
        net_score,
        fair_value,
        atr,
        sd1_upper: fair_value + atr,
        sd1_lower: fair_value - atr,
        sd2_upper: fair_value + 2.0 * atr,
        sd2_lower: fair_value - 2.0 * atr,
        zone: classify_zone(current_price, fair_value, atr),
        curve: density_curve(fair_value, atr),
    }
}
