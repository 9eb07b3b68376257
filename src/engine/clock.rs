use std::sync::Mutex;

use chrono::{Local, NaiveDate};

/// Calendar-day clock. Injectable so tests can walk day boundaries without
/// waiting for wall-clock midnight.
pub trait Clock: Send + Sync {
    /// The current calendar day, local time, normalized to midnight.
    fn today(&self) -> NaiveDate;
}

/// Real wall clock in the local timezone.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Settable clock for tests.
pub struct FixedClock {
    today: Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Mutex::new(today),
        }
    }

    pub fn set(&self, today: NaiveDate) {
        *self.today.lock().expect("clock poisoned") = today;
    }

    pub fn advance_days(&self, days: u64) {
        let mut guard = self.today.lock().expect("clock poisoned");
        *guard = *guard + chrono::Days::new(days);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock().expect("clock poisoned")
    }
}
