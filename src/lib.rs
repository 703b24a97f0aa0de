pub mod codes;
pub mod config;
pub mod error;
pub mod et;
pub mod hub;
pub mod nodes;
pub mod poller;
pub mod provider;
pub mod uom;
pub mod utils;

/// The hub addresses at most this many daily forecast nodes.
pub const FORECAST_DAYS_MAX: usize = 13;
