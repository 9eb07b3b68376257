use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Where the current price sits relative to the fair value bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Zone {
    #[strum(serialize = "EXTREME OVERBOUGHT")]
    ExtremeOverbought,
    #[strum(serialize = "OVERVALUED")]
    Overvalued,
    #[strum(serialize = "FAIR VALUE")]
    FairValue,
    #[strum(serialize = "UNDERVALUED")]
    Undervalued,
    #[strum(serialize = "EXTREME OVERSOLD")]
    ExtremeOversold,
}

/// One sample of the bell curve drawn around fair value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub price: f64,
    pub density: f64,
}

/// Everything the fair value query produces. Transient; recomputed on every
/// call, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairValueResult {
    pub pair: String,
    pub current_price: f64,
    pub anchor_price: f64,
    pub base_score: f64,
    pub quote_score: f64,
    /// Net pair sentiment: (base - quote) / 2, in [-1, 1].
    pub net_score: f64,
    pub fair_value: f64,
    pub atr: f64,
    pub sd1_upper: f64,
    pub sd1_lower: f64,
    pub sd2_upper: f64,
    pub sd2_lower: f64,
    pub zone: Zone,
    /// 61 samples of a Gaussian with mean `fair_value` and sigma `atr`,
    /// spanning +/-4 sigma. Charting aid only.
    pub curve: Vec<CurvePoint>,
}
