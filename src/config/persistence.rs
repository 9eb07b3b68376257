//! Blob store keys and file paths

/// Configuration for durable strength-state persistence.
pub struct PersistenceConfig {
    /// Default path of the JSON blob store file
    pub store_path: &'static str,
    /// Well-known key holding the per-currency 3-day score windows
    pub history_key: &'static str,
    /// Well-known key holding the last-fetch day marker
    pub marker_key: &'static str,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    store_path: "fx_pulse_store.json",
    // Key names are kept from the browser build so an exported store
    // round-trips without migration.
    history_key: "forex_strength_history",
    marker_key: "forex_last_fetch_date",
};
