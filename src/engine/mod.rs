// The strength engine: date-gated reconciliation of daily event batches
// into the persisted per-currency windows, plus the fair value query.
mod clock;
mod errors;
mod strength;

pub use {
    clock::{Clock, FixedClock, SystemClock},
    errors::{FairValueError, RefreshError},
    strength::{RefreshOutcome, StrengthEngine},
};
