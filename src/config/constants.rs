use std::time::Duration;

// Top Level Constants
pub const DEFAULT_CALENDAR_URL: &str = "http://127.0.0.1:8787/calendar";

pub mod scoring {
    /// Multiplier inside the tanh saturation. Controls how fast a single
    /// event pushes the score toward +/-1.
    pub const SENSITIVITY: f64 = 2.0;

    /// Added to |forecast| in the surprise denominator so near-zero
    /// forecasts cannot blow the magnitude up.
    pub const MAGNITUDE_OFFSET: f64 = 0.1;

    /// Surprise magnitude cap. Anything beyond this is treated as "huge".
    pub const MAGNITUDE_CAP: f64 = 2.0;

    /// Exponential smoothing speed for the rubber-band trend update.
    pub const TREND_SPEED: f64 = 0.2;
}

pub mod refresh {
    use super::Duration;

    /// Backfill ceiling. Gaps longer than this only replay the most
    /// recent days; older days are silently skipped.
    pub const BACKFILL_CAP_DAYS: usize = 7;

    /// Inter-day pause during backfill, so sequential calendar fetches
    /// stay under the source's implicit rate limits.
    pub const PACING_DELAY: Duration = Duration::from_secs(2);
}

pub mod fair_value {
    /// News sensitivity: a net score of +/-1.0 moves fair value 1% off the anchor.
    pub const VOLATILITY_FACTOR: f64 = 0.01;

    /// Bell curve sampling: 60 equal steps (61 points) across +/-4 sigma.
    pub const CURVE_STEPS: usize = 60;
    pub const CURVE_SPAN_SIGMA: f64 = 4.0;

    /// Static ATR (Daily) approximations
    pub const ATR_TABLE: &[(&str, f64)] = &[
        ("EURUSD", 0.0070),
        ("GBPUSD", 0.0090),
        ("USDJPY", 0.90),
        ("AUDUSD", 0.0065),
        ("USDCAD", 0.0075),
        ("NZDUSD", 0.0060),
        ("USDCHF", 0.0065),
        ("EURGBP", 0.0050),
        ("EURJPY", 1.10),
        ("GBPJPY", 1.40),
        ("XAUUSD", 25.00),
        ("BTCUSD", 1500.00),
    ];

    /// Defaults for pairs missing from the table. JPY-quoted pairs trade
    /// at a different absolute scale, so they get a wider default.
    pub const DEFAULT_ATR_JPY: f64 = 1.00;
    pub const DEFAULT_ATR: f64 = 0.0080;

    /// Resolve the daily ATR approximation for a pair code.
    pub fn atr_for_pair(pair: &str) -> f64 {
        ATR_TABLE
            .iter()
            .find(|(code, _)| *code == pair)
            .map(|(_, atr)| *atr)
            .unwrap_or(if pair.contains("JPY") {
                DEFAULT_ATR_JPY
            } else {
                DEFAULT_ATR
            })
    }
}
