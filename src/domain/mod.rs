mod currency;
mod event;

pub use {
    currency::{CurrencyPair, Major},
    event::{Direction, EconomicEvent, ImpactWeight},
};
