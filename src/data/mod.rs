mod calendar;
mod pacer;
mod quotes;
mod storage;

pub use {
    calendar::{CalendarProvider, HttpCalendarProvider},
    pacer::{IntervalPacer, NoopPacer, Pacer},
    quotes::{PairQuote, QuoteProvider, YahooQuoteProvider},
    storage::{JsonFileStorage, KeyValueStorage, MemoryStorage},
};
