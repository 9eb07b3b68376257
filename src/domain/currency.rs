use std::fmt;

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::engine::FairValueError;

/// The nine majors the strength history is seeded with.
///
/// Scraped data is allowed to mention currencies outside this set; those get
/// a zero-baseline window created lazily instead of being rejected, so the
/// set is closed for seeding but open for ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter, EnumString)]
pub enum Major {
    USD,
    EUR,
    CAD,
    GBP,
    JPY,
    NZD,
    CHF,
    AUD,
    CNY,
}

/// A 6-letter pair code split into its base and quote legs.
///
/// Validation follows the fixed-width slicing contract: exactly six ASCII
/// letters, upper-cased. Whether the legs name known currencies is NOT
/// checked here; metals and crypto codes (XAU, BTC) pass through and simply
/// score zero if the strength history has never seen them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
}

impl CurrencyPair {
    pub fn parse(raw: &str) -> Result<Self, FairValueError> {
        let code = raw.trim().to_ascii_uppercase();
        if code.len() != 6 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(FairValueError::InvalidPairFormat(raw.trim().to_string()));
        }
        Ok(Self {
            base: code[..3].to_string(),
            quote: code[3..].to_string(),
        })
    }

    /// Concatenated 6-letter code, e.g. "EURUSD".
    pub fn code(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }

    pub fn includes_jpy(&self) -> bool {
        self.base == "JPY" || self.quote == "JPY"
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.quote)
    }
}
