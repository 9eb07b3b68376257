//! Configuration module for the fx-pulse application.

// Can all be private now because we have a public re-export.
mod persistence;

// Public
pub mod constants;

// Re-export commonly used items
pub use constants::DEFAULT_CALENDAR_URL;
pub use persistence::PERSISTENCE;
