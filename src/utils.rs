use chrono::{DateTime, Datelike};
use tracing_subscriber::EnvFilter;

pub fn start_log() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // try_init so tests can call this repeatedly
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Round to `precision` decimal places. Reported driver values carry three
/// decimals, ETo two.
pub fn round(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// Day of year (1-366) for a unix timestamp, UTC.
pub fn day_of_year(ts: i64) -> Option<u32> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.ordinal())
}

/// Day of week for a unix timestamp, 0 = Sunday, matching the hub's
/// day-of-week enumeration.
pub fn day_of_week(ts: i64) -> Option<u32> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.weekday().num_days_from_sunday())
}
