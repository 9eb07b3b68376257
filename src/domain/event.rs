use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Impact tier of a calendar release, carrying the scoring weight the
/// scraper's colour coding maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum ImpactWeight {
    High,
    Medium,
    Low,
    /// Holidays, speeches and other rows with no economic figure.
    NonEconomic,
}

impl ImpactWeight {
    pub fn weight(self) -> f64 {
        match self {
            ImpactWeight::High => 1.0,
            ImpactWeight::Medium => 0.5,
            ImpactWeight::Low => 0.25,
            ImpactWeight::NonEconomic => 0.1,
        }
    }

    /// Map a raw scraper weight back onto a tier. Unknown weights fall to
    /// the weakest tier rather than failing the row.
    pub fn from_raw(raw: f64) -> Self {
        if raw >= 1.0 {
            ImpactWeight::High
        } else if raw >= 0.5 {
            ImpactWeight::Medium
        } else if raw >= 0.25 {
            ImpactWeight::Low
        } else {
            ImpactWeight::NonEconomic
        }
    }
}

/// Whether the actual release beat, missed, or matched the forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Direction {
    Better,
    Neutral,
    Worse,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Better => 1.0,
            Direction::Neutral => 0.0,
            Direction::Worse => -1.0,
        }
    }

    /// From the scraper's {-1, 0, 1} flag. Anything else reads as neutral.
    pub fn from_sign(sign: i8) -> Self {
        match sign {
            1 => Direction::Better,
            -1 => Direction::Worse,
            _ => Direction::Neutral,
        }
    }
}

/// One scraped economic release. `actual` and `forecast` stay as the raw
/// calendar strings ("10.5K", "1.2%", "") until the scorer normalizes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicEvent {
    pub currency: String,
    pub impact: ImpactWeight,
    pub direction: Direction,
    pub actual: String,
    pub forecast: String,
}
